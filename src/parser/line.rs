//! # TTML 解析器 - 歌词行处理模块
//!
//! 处理 `<p>` 内部的事件。`<p>` 本身和其中的背景人声 `<span ttm:role="x-bg">`
//! 各对应行构建栈中的一帧，内联翻译和普通 `<span>` 作为帧的直接子元素处理。

use quick_xml::events::BytesStart;
use tracing::{trace, warn};

use super::{
    constants::{ATTR_ITUNES_KEY, ATTR_ROLE, ATTR_XML_LANG, ROLE_BACKGROUND, ROLE_TRANSLATION},
    state::{ChildContext, ChildKind, LineFrame, LineParseState, TtmlParserState},
    utils::{TtmlReader, get_attribute, get_non_empty_attribute, normalize_text_whitespace_into},
};
use crate::{error::Result, model::PendingLine};

/// 处理 `<p>` 内部的开始标签。
pub(super) fn handle_line_start(
    e: &BytesStart,
    reader: &TtmlReader<'_>,
    state: &mut TtmlParserState,
) -> Result<()> {
    let Some(line_state) = state.line_state.as_mut() else {
        return Ok(());
    };
    let Some(frame) = line_state.frames.last_mut() else {
        return Ok(());
    };

    if let Some(child) = frame.child.as_mut() {
        child.depth += 1;
        return Ok(());
    }

    let role = get_attribute(reader, e, ATTR_ROLE)?;
    let kind = match role.as_deref() {
        Some(ROLE_BACKGROUND) => {
            // 背景人声无条件继承所在行的对唱状态
            let key = get_attribute(reader, e, ATTR_ITUNES_KEY)?;
            let background = PendingLine::new(key, frame.line.is_duet);
            line_state.frames.push(LineFrame::new(background));
            return Ok(());
        }
        Some(ROLE_TRANSLATION) => {
            let lang = get_non_empty_attribute(reader, e, ATTR_XML_LANG)?
                .unwrap_or_else(|| state.default_language.clone());
            ChildKind::Translation {
                lang,
                text: String::new(),
            }
        }
        None => ChildKind::Plain,
        Some(_) => ChildKind::Ignored,
    };
    frame.child = Some(ChildContext { kind, depth: 1 });
    Ok(())
}

/// 处理 `<p>` 内部的文本（包括解析后的实体引用）。
///
/// 行元素自身的文本和子元素之后的尾随文本并入原文。无角色子元素和内联翻译
/// 收集其全部直接文本，包括嵌套元素之后的部分（`x<span>y</span>z` 得到 `xz`），
/// 而不只是第一个嵌套元素之前的 `x`。更深层的文本一律忽略。
pub(super) fn handle_line_text(text: &str, state: &mut TtmlParserState) {
    let Some(frame) = state
        .line_state
        .as_mut()
        .and_then(|line_state| line_state.frames.last_mut())
    else {
        return;
    };

    match frame.child.as_mut() {
        None
        | Some(ChildContext {
            kind: ChildKind::Plain,
            depth: 1,
        }) => frame.line.original_text.push_str(text),
        Some(ChildContext {
            kind: ChildKind::Translation { text: buffer, .. },
            depth: 1,
        }) => buffer.push_str(text),
        Some(_) => {}
    }
}

/// 处理 `<p>` 内部的结束标签。
pub(super) fn handle_line_end(state: &mut TtmlParserState) {
    let normalize = state.normalize_whitespace;
    let Some(line_state) = state.line_state.as_mut() else {
        return;
    };
    let Some(frame) = line_state.frames.last_mut() else {
        return;
    };

    if let Some(child) = frame.child.as_mut() {
        child.depth -= 1;
        if child.depth == 0
            && let Some(ChildContext {
                kind: ChildKind::Translation { lang, text },
                ..
            }) = frame.child.take()
        {
            frame.line.translations.insert(lang, text);
        }
        return;
    }

    // 当前帧对应的元素结束
    let Some(LineFrame { mut line, .. }) = line_state.frames.pop() else {
        return;
    };
    if normalize {
        let mut buffer = String::with_capacity(line.original_text.len());
        normalize_text_whitespace_into(&line.original_text, &mut buffer);
        line.original_text = buffer;
    }

    if let Some(parent) = line_state.frames.last_mut() {
        line.strip_enclosing_parentheses();
        parent.line.background = Some(Box::new(line));
        return;
    }

    let discard = line_state.discard;
    state.line_state = None;
    if discard {
        let message = "发现一个不在 <div> 中的 <p>，已忽略。".to_string();
        warn!("{message}");
        state.warnings.push(message);
    } else {
        finish_line(line, state);
    }
}

/// 开始解析一个 `<p>`。
pub(super) fn begin_line(line: PendingLine, discard: bool, state: &mut TtmlParserState) {
    state.line_state = Some(LineParseState {
        frames: vec![LineFrame::new(line)],
        discard,
    });
}

/// 把解析完成的行加入文档，并更新段落、对唱标记和语言集合。
fn finish_line(mut line: PendingLine, state: &mut TtmlParserState) {
    if line.key.as_deref().is_none_or(str::is_empty) {
        line.key = Some(format!("L{}", state.lines.len() + 1));
    }

    state.has_duet |= line.is_duet;
    state
        .languages
        .extend(line.translation_languages().cloned());
    if let Some(part) = state.parts.last_mut() {
        part.count += 1;
    }

    trace!(key = ?line.key, is_duet = line.is_duet, "歌词行解析完成");
    state.lines.push(line);
}
