//! # TTML (Timed Text Markup Language) 解析器
//!
//! 该解析器仅用于解析 Apple Music 和 AMLL 使用的 TTML 歌词文件，
//! 不建议用于解析通用的 TTML 字幕文件。
//!
//! 解析在一次事件流遍历中完成：歌词行、段落、词作者和文档级翻译同时收集，
//! 遍历结束后再合并翻译并选定唯一的翻译语言。

mod constants;
mod handlers;
mod line;
mod metadata;
mod state;
mod utils;

use std::collections::HashMap;

use quick_xml::events::Event;
use tracing::{debug, error, trace, warn};

use self::{
    state::TtmlParserState,
    utils::{TtmlReader, decode_text, resolve_general_ref},
};
use crate::{
    TtmlTextOptions,
    error::{Result, TtmlTextError},
    language::select_translation_language,
    model::TtmlDocument,
};

/// 解析 TTML 格式的歌词文件。
///
/// # 参数
///
/// * `content` - TTML 格式的歌词文件内容字符串。
/// * `options` - 解析选项，包含默认语言和词作者相关的设置。
///
/// # 返回
///
/// * `Ok(TtmlDocument)` - 成功解析后的文档，可直接调用 [`TtmlDocument::render`]。
/// * `Err(TtmlTextError)` - 解析失败时，返回具体的错误信息。不会返回部分结果。
///
/// # Errors
///
/// * `TtmlTextError::MalformedXml` - 输入不是格式良好的 XML，例如元素未闭合、
///   没有根元素、存在多个根元素，或根元素之外存在文本。
/// * `TtmlTextError::MalformedStructure` - XML 格式良好但没有 `<body>` 元素。
pub fn parse_ttml(content: &str, options: &TtmlTextOptions) -> Result<TtmlDocument> {
    let mut reader = TtmlReader::from_str(content);
    reader.config_mut().trim_text(false);
    reader.config_mut().expand_empty_elements = true;

    let mut state = TtmlParserState::new(options);
    state.lines.reserve(content.matches("<p").count());

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                let position = reader.error_position();
                error!("TTML 解析错误，位置 {position}: {e}。无法继续解析");
                return Err(TtmlTextError::from(e).at(position));
            }
        };

        let result = match event {
            Event::Eof => break,
            Event::Start(e) => {
                state.depth += 1;
                handlers::handle_start(&e, &reader, &mut state)
            }
            Event::End(_) => {
                handlers::handle_end(&mut state);
                state.depth = state.depth.saturating_sub(1);
                Ok(())
            }
            Event::Text(e) => {
                decode_text(&e).and_then(|text| handle_text(&text, &mut state))
            }
            Event::CData(e) => reader
                .decoder()
                .decode(&e)
                .map_err(TtmlTextError::from)
                .and_then(|text| handle_text(&text, &mut state)),
            Event::GeneralRef(e) => match resolve_general_ref(&e, &mut state.warnings) {
                Ok(Some(ch)) => handle_text(ch.encode_utf8(&mut [0; 4]), &mut state),
                Ok(None) => Ok(()),
                Err(err) => Err(err),
            },
            _ => Ok(()),
        };

        if let Err(err) = result {
            let err = err.at(reader.buffer_position());
            error!("TTML 解析失败: {err}");
            return Err(err);
        }
    }

    finish_document(state, options, reader.buffer_position())
}

/// 分发文本事件。
fn handle_text(text: &str, state: &mut TtmlParserState) -> Result<()> {
    if state.depth == 0 {
        if text
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
            .is_empty()
        {
            return Ok(());
        }
        return Err(TtmlTextError::xml(0, "根元素之外存在文本"));
    }

    if state.line_state.is_some() {
        line::handle_line_text(text, state);
    } else {
        metadata::handle_metadata_text(text, state);
    }
    Ok(())
}

/// 检查文档完整性，合并文档级翻译，选定翻译语言并生成最终文档。
fn finish_document(
    mut state: TtmlParserState,
    options: &TtmlTextOptions,
    position: u64,
) -> Result<TtmlDocument> {
    if !state.seen_root {
        return Err(TtmlTextError::xml(position, "文档中没有根元素"));
    }
    if state.depth != 0 {
        return Err(TtmlTextError::xml(
            position,
            format!("输入意外结束，仍有 {} 个元素未闭合", state.depth),
        ));
    }
    if !state.body_found {
        return Err(TtmlTextError::MalformedStructure(
            "未找到 <body> 元素".to_string(),
        ));
    }

    apply_pending_translations(&mut state);

    let selected_language = select_translation_language(&state.languages);
    let lines = state
        .lines
        .into_iter()
        .map(|line| line.filter_translations(selected_language.as_deref()))
        .collect::<Vec<_>>();

    if state.sort_songwriters {
        state.songwriters.sort();
    }

    debug!(
        lines = lines.len(),
        parts = state.parts.len(),
        selected_language = ?selected_language,
        has_duet = state.has_duet,
        "TTML 解析完成"
    );

    Ok(TtmlDocument {
        language: state
            .language
            .unwrap_or_else(|| options.default_language.clone()),
        parts: state.parts,
        lines,
        songwriters: state.songwriters,
        has_duet: state.has_duet,
        selected_language,
        warnings: state.warnings,
    })
}

/// 把 `<translation>` 容器中的翻译附加到对应的行。键重复时以最后一行为准。
fn apply_pending_translations(state: &mut TtmlParserState) {
    if state.pending_translations.is_empty() {
        return;
    }

    let line_map: HashMap<String, usize> = state
        .lines
        .iter()
        .enumerate()
        .filter_map(|(index, line)| line.key.clone().map(|key| (key, index)))
        .collect();

    for pending in std::mem::take(&mut state.pending_translations) {
        let Some(line) = line_map
            .get(&pending.key)
            .and_then(|&index| state.lines.get_mut(index))
        else {
            let message = format!("翻译的目标行 '{}' 不存在，已忽略。", pending.key);
            warn!("{message}");
            state.warnings.push(message);
            continue;
        };
        trace!(key = %pending.key, lang = %pending.lang, "附加文档级翻译");
        line.append_translation(&pending.text, &pending.lang);
    }
}
