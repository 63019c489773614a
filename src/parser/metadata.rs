//! # TTML 解析器 - 元数据处理模块
//!
//! 处理 `<head>` 中的词作者信息，以及文档级的 `<translation>` 容器。
//! 容器中的翻译先暂存，等所有歌词行解析完毕后再统一合并。

use quick_xml::events::BytesStart;
use tracing::trace;

use super::{
    constants::{ATTR_FOR, ATTR_META_KEY, ATTR_META_VALUE, ATTR_XML_LANG, TAG_TEXT},
    state::{
        MetadataCapture, PendingTranslation, TextCapture, TranslationContainerState,
        TtmlParserState,
    },
    utils::{TtmlReader, get_attribute, get_non_empty_attribute, is_songwriter_key},
};
use crate::error::Result;

/// 开始读取一个 `<songwriter>`。
pub(super) fn begin_songwriter(state: &mut TtmlParserState) {
    if !state.collect_songwriters {
        return;
    }
    state.metadata_capture = Some(MetadataCapture {
        value: None,
        text: String::new(),
        depth: state.depth,
    });
}

/// 开始读取一个 `<meta>`，只有键代表词作者时才会记录。
pub(super) fn begin_meta(
    e: &BytesStart,
    reader: &TtmlReader<'_>,
    state: &mut TtmlParserState,
) -> Result<()> {
    if !state.collect_songwriters {
        return Ok(());
    }
    let Some(key) = get_attribute(reader, e, ATTR_META_KEY)? else {
        return Ok(());
    };
    if !is_songwriter_key(&key) {
        return Ok(());
    }

    let value = get_attribute(reader, e, ATTR_META_VALUE)?.filter(|v| !v.trim().is_empty());
    state.metadata_capture = Some(MetadataCapture {
        value,
        text: String::new(),
        depth: state.depth,
    });
    Ok(())
}

/// 元数据元素内部的结束标签。返回该事件是否已被处理。
pub(super) fn handle_capture_end(state: &mut TtmlParserState) -> bool {
    let Some(capture) = state.metadata_capture.as_ref() else {
        return false;
    };
    if capture.depth != state.depth {
        return true;
    }

    if let Some(MetadataCapture { value, text, .. }) = state.metadata_capture.take() {
        push_songwriter(value.unwrap_or(text), &mut state.songwriters);
    }
    true
}

/// 记录一个词作者，丢弃空白和重复的名字。
fn push_songwriter(name: String, songwriters: &mut Vec<String>) {
    let name = name.trim();
    if name.is_empty() || songwriters.iter().any(|existing| existing == name) {
        return;
    }
    trace!(name, "发现词作者");
    songwriters.push(name.to_string());
}

/// 开始一个文档级 `<translation>` 容器。
pub(super) fn begin_translation_container(
    e: &BytesStart,
    reader: &TtmlReader<'_>,
    state: &mut TtmlParserState,
) -> Result<()> {
    let lang = get_non_empty_attribute(reader, e, ATTR_XML_LANG)?
        .unwrap_or_else(|| state.default_language.clone());
    state.languages.insert(lang.clone());
    state.translation_state = Some(TranslationContainerState {
        lang,
        depth: state.depth,
        current_text: None,
    });
    Ok(())
}

/// `<translation>` 容器内部的开始标签。只有直接子元素 `<text>` 会被读取。
pub(super) fn handle_translation_start(
    e: &BytesStart,
    local_name: &[u8],
    reader: &TtmlReader<'_>,
    state: &mut TtmlParserState,
) -> Result<()> {
    let depth = state.depth;
    let Some(container) = state.translation_state.as_mut() else {
        return Ok(());
    };
    if container.current_text.is_some() || depth != container.depth + 1 || local_name != TAG_TEXT
    {
        return Ok(());
    }

    container.current_text = Some(TextCapture {
        key: get_non_empty_attribute(reader, e, ATTR_FOR)?,
        text: String::new(),
        depth,
    });
    Ok(())
}

/// `<translation>` 容器内部的结束标签。
pub(super) fn handle_translation_end(state: &mut TtmlParserState) {
    let depth = state.depth;
    let Some(container) = state.translation_state.as_mut() else {
        return;
    };

    if container.current_text.as_ref().is_some_and(|c| c.depth == depth) {
        if let Some(TextCapture {
            key: Some(key),
            text,
            ..
        }) = container.current_text.take()
        {
            state.pending_translations.push(PendingTranslation {
                key,
                lang: container.lang.clone(),
                text,
            });
        }
    } else if container.depth == depth {
        state.translation_state = None;
    }
}

/// 元数据元素或翻译容器中的文本。返回该文本是否已被处理。
pub(super) fn handle_metadata_text(text: &str, state: &mut TtmlParserState) -> bool {
    if let Some(capture) = state.metadata_capture.as_mut() {
        capture.text.push_str(text);
        return true;
    }
    if let Some(container) = state.translation_state.as_mut() {
        if let Some(capture) = container.current_text.as_mut() {
            capture.text.push_str(text);
        }
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_songwriter_dedups_and_trims() {
        let mut songwriters = Vec::new();
        push_songwriter(" 张三 ".to_string(), &mut songwriters);
        push_songwriter("张三".to_string(), &mut songwriters);
        push_songwriter("   ".to_string(), &mut songwriters);
        push_songwriter("李四".to_string(), &mut songwriters);
        assert_eq!(songwriters, vec!["张三", "李四"]);
    }

    #[test]
    fn test_translation_text_outside_capture_is_swallowed() {
        let mut state = TtmlParserState::default();
        state.translation_state = Some(TranslationContainerState {
            lang: "ja".into(),
            depth: 3,
            current_text: None,
        });
        assert!(handle_metadata_text("\n    ", &mut state));
        assert!(state.pending_translations.is_empty());
    }

    #[test]
    fn test_translation_end_pushes_pending() {
        let mut state = TtmlParserState::default();
        state.depth = 4;
        state.translation_state = Some(TranslationContainerState {
            lang: "ja".into(),
            depth: 3,
            current_text: Some(TextCapture {
                key: Some("L1".into()),
                text: String::new(),
                depth: 4,
            }),
        });
        assert!(handle_metadata_text("こんにちは", &mut state));
        handle_translation_end(&mut state);

        assert_eq!(state.pending_translations.len(), 1);
        assert_eq!(state.pending_translations[0].key, "L1");
        assert_eq!(state.pending_translations[0].text, "こんにちは");

        state.depth = 3;
        handle_translation_end(&mut state);
        assert!(state.translation_state.is_none());
    }
}
