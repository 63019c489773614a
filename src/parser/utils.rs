//! # TTML 解析器的工具函数
//!
//! 命名空间感知的元素/属性读取、文本解码和文本清理。

use std::{borrow::Cow, str};

use quick_xml::{
    NsReader,
    events::{BytesRef, BytesStart, BytesText},
};
use tracing::warn;

use super::constants::{AttrName, SONGWRITER_META_KEYS};
use crate::{
    error::{Result, TtmlTextError},
    ns::Namespace,
};

pub(super) type TtmlReader<'a> = NsReader<&'a [u8]>;

/// 解析元素名，返回（是否为 TTML 元素，本地名）。
///
/// 没有命名空间的元素也视为 TTML 元素，以兼容未声明 `xmlns` 的文档。
pub(super) fn resolve_element<'e>(reader: &TtmlReader<'_>, e: &'e BytesStart) -> (bool, &'e [u8]) {
    let (resolved, local) = reader.resolve_element(e.name());
    let is_ttml = matches!(
        Namespace::from_resolved(&resolved),
        Ok(None | Some(Namespace::Tt))
    );
    (is_ttml, local.into_inner())
}

/// 按优先级依次查找属性名（含别名），返回第一个找到的属性值。
pub(super) fn get_attribute(
    reader: &TtmlReader<'_>,
    e: &BytesStart,
    attr_names: &[AttrName],
) -> Result<Option<String>> {
    for &(namespace, local_name) in attr_names {
        for attr in e.attributes() {
            let attr = attr?;
            let (resolved, local) = reader.resolve_attribute(attr.key);
            if local.as_ref() != local_name {
                continue;
            }
            if Namespace::from_resolved(&resolved) == Ok(namespace) {
                let value = attr.decode_and_unescape_value(reader.decoder())?;
                return Ok(Some(value.into_owned()));
            }
        }
    }
    Ok(None)
}

/// 依次尝试每个属性名，返回第一个非空的属性值。
pub(super) fn get_non_empty_attribute(
    reader: &TtmlReader<'_>,
    e: &BytesStart,
    attr_names: &[AttrName],
) -> Result<Option<String>> {
    for name in attr_names {
        if let Some(value) = get_attribute(reader, e, std::slice::from_ref(name))?
            && !value.is_empty()
        {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

pub(super) fn decode_text<'a>(e: &'a BytesText) -> Result<Cow<'a, str>> {
    Ok(e.xml_content()?)
}

/// 解析实体引用。未知或无效的实体记录警告并返回 `None`。
pub(super) fn resolve_general_ref(e: &BytesRef, warnings: &mut Vec<String>) -> Result<Option<char>> {
    let entity_name = str::from_utf8(e.as_ref())
        .map_err(|err| TtmlTextError::xml(0, format!("无法将实体名解码为UTF-8: {err}")))?;

    let decoded = if let Some(num_str) = entity_name.strip_prefix('#') {
        let (radix, code_point_str) = num_str
            .strip_prefix('x')
            .map_or((10, num_str), |stripped| (16, stripped));
        u32::from_str_radix(code_point_str, radix)
            .ok()
            .and_then(char::from_u32)
    } else {
        match entity_name {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            _ => None,
        }
    };

    if decoded.is_none() {
        let message = format!("忽略了未知或无效的XML实体 '&{entity_name};'");
        warn!("{message}");
        warnings.push(message);
    }
    Ok(decoded)
}

/// 规范化文本中的空白字符
pub(super) fn normalize_text_whitespace_into(input: &str, output: &mut String) {
    output.clear();
    let mut first = true;
    for word in input.split_whitespace() {
        if !first {
            output.push(' ');
        }
        output.push_str(word);
        first = false;
    }
}

/// `<meta>` 的键是否代表词作者。
pub(super) fn is_songwriter_key(key: &str) -> bool {
    let key = key.trim().to_lowercase();
    SONGWRITER_META_KEYS.iter().any(|alias| *alias == key)
}
