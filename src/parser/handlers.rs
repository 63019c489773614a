//! # TTML 解析器 - 事件处理器与分发器
//!
//! 该模块负责顶层的事件分发和文档结构（根元素、head、body、div、p）的跟踪。
//! 结构的进出完全依据元素层数判断，结束标签不再比较名字。

use quick_xml::events::BytesStart;
use tracing::debug;

use super::{
    constants::{
        ATTR_AGENT, ATTR_ITUNES_KEY, ATTR_ITUNES_SONG_PART, ATTR_XML_LANG, DEFAULT_AGENT,
        TAG_BODY, TAG_DIV, TAG_HEAD, TAG_META, TAG_P, TAG_SONGWRITER, TAG_TRANSLATION,
    },
    line, metadata,
    state::TtmlParserState,
    utils::{TtmlReader, get_attribute, get_non_empty_attribute, resolve_element},
};
use crate::{
    error::{Result, TtmlTextError},
    model::{Part, PendingLine},
};

/// 分发开始标签。调用前 `state.depth` 已经计入该元素。
pub(super) fn handle_start(
    e: &BytesStart,
    reader: &TtmlReader<'_>,
    state: &mut TtmlParserState,
) -> Result<()> {
    if state.line_state.is_some() {
        return line::handle_line_start(e, reader, state);
    }
    if state.metadata_capture.is_some() {
        return Ok(());
    }

    let (is_ttml, local_name) = resolve_element(reader, e);
    if state.translation_state.is_some() {
        return metadata::handle_translation_start(e, local_name, reader, state);
    }
    handle_global_start(e, is_ttml, local_name, reader, state)
}

/// 分发结束标签。调用时 `state.depth` 仍是该元素所在的层数。
pub(super) fn handle_end(state: &mut TtmlParserState) {
    if state.line_state.is_some() {
        line::handle_line_end(state);
        return;
    }
    if metadata::handle_capture_end(state) {
        return;
    }
    if state.translation_state.is_some() {
        metadata::handle_translation_end(state);
        return;
    }
    handle_global_end(state);
}

/// 处理 `<p>` 和元数据之外的开始标签。
fn handle_global_start(
    e: &BytesStart,
    is_ttml: bool,
    local_name: &[u8],
    reader: &TtmlReader<'_>,
    state: &mut TtmlParserState,
) -> Result<()> {
    if state.depth == 1 {
        process_root_start(e, reader, state)?;
        return Ok(());
    }

    // 翻译容器和词作者信息按本地名识别，不论命名空间
    if local_name == TAG_TRANSLATION {
        return metadata::begin_translation_container(e, reader, state);
    }
    if state.in_head() {
        match local_name {
            TAG_SONGWRITER => metadata::begin_songwriter(state),
            TAG_META => metadata::begin_meta(e, reader, state)?,
            _ => {}
        }
        return Ok(());
    }
    if !is_ttml {
        return Ok(());
    }

    match local_name {
        TAG_HEAD if !state.in_body() => state.head_depth = Some(state.depth),
        TAG_BODY if !state.in_body() => {
            state.body_depth = Some(state.depth);
            state.body_found = true;
        }
        TAG_DIV if state.in_body() => {
            let name = get_non_empty_attribute(reader, e, ATTR_ITUNES_SONG_PART)?
                .unwrap_or_default();
            debug!(part = %name, "进入段落");
            state.div_stack.push((state.depth, name.clone()));
            state.parts.push(Part { count: 0, name });
            state.part_open = true;
        }
        TAG_P if state.in_body() => process_p_start(e, reader, state)?,
        _ => {}
    }
    Ok(())
}

/// 处理根元素：记录文档语言。
fn process_root_start(
    e: &BytesStart,
    reader: &TtmlReader<'_>,
    state: &mut TtmlParserState,
) -> Result<()> {
    if state.seen_root {
        return Err(TtmlTextError::xml(0, "文档包含多个根元素"));
    }
    state.seen_root = true;
    state.language = get_non_empty_attribute(reader, e, ATTR_XML_LANG)?;
    Ok(())
}

/// 处理 `<p>` 的开始标签，创建新的歌词行。
fn process_p_start(
    e: &BytesStart,
    reader: &TtmlReader<'_>,
    state: &mut TtmlParserState,
) -> Result<()> {
    // 每行只计入最内层的 div，不会同时计入外层 div
    let discard = state.div_stack.is_empty();

    // 嵌套的 div 结束后，外层 div 的后续行归入一个新的同名段落
    if !discard
        && !state.part_open
        && let Some((_, name)) = state.div_stack.last()
    {
        state.parts.push(Part {
            count: 0,
            name: name.clone(),
        });
        state.part_open = true;
    }

    let key = get_attribute(reader, e, ATTR_ITUNES_KEY)?;
    let agent = get_attribute(reader, e, ATTR_AGENT)?;
    let is_duet = agent.is_some_and(|agent| !agent.is_empty() && agent != DEFAULT_AGENT);

    line::begin_line(PendingLine::new(key, is_duet), discard, state);
    Ok(())
}

/// 处理 `<p>` 和元数据之外的结束标签。
fn handle_global_end(state: &mut TtmlParserState) {
    let depth = state.depth;

    if state.div_stack.last().is_some_and(|(d, _)| *d == depth) {
        state.div_stack.pop();
        state.part_open = false;
    } else if state.body_depth == Some(depth) {
        state.body_depth = None;
    } else if state.head_depth == Some(depth) {
        state.head_depth = None;
    }
}
