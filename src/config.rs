use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// 文档、内联翻译和翻译容器缺少 `xml:lang` 时使用的语言。
pub const DEFAULT_LANGUAGE: &str = "zh-Hans";

/// TTML 文本化选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(setter(into), default)]
#[serde(default)]
pub struct TtmlTextOptions {
    /// 当 TTML 中未指定 `xml:lang` 时使用的语言代码。
    pub default_language: String,
    /// 是否从 `<head>` 中收集词作者，并在输出开头生成署名行。
    pub include_songwriters: bool,
    /// 是否在拼接前对词作者排序。为 `false` 时保持首次出现的顺序。
    pub sort_songwriters: bool,
    /// 是否折叠主歌词和背景人声中的连续空白并去除两端空白。
    pub normalize_whitespace: bool,
}

impl Default for TtmlTextOptions {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE.to_string(),
            include_songwriters: true,
            sort_songwriters: false,
            normalize_whitespace: false,
        }
    }
}

impl TtmlTextOptions {
    /// 从 TOML 文本加载选项，未出现的字段使用默认值。
    ///
    /// # Errors
    ///
    /// 当文本不是合法的 TOML，或字段类型不匹配时返回 `TtmlTextError::InvalidOptions`。
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
