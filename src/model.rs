//! # 文档模型
//!
//! 解析期间使用 [`PendingLine`] 累积内容，所有翻译合并完成并选定语言后，
//! 再整体转换为只保留单一翻译的 [`TtmlLine`]。

use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    markup::{Alignment, LineMarker, SECTION_MARKER},
    songwriters::SongwriterCredit,
};

/// 匹配文本中第一段括号内容，兼容全角括号。
static PARENTHESIZED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)[(（]+(.+?)[）)]+").expect("未能编译 PARENTHESIZED_REGEX"));

/// 匹配被括号完整包裹的文本。
static ENCLOSED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^[(（]+(.+?)[）)]+$").expect("未能编译 ENCLOSED_REGEX"));

/// 一个段落（主歌、副歌等）以及属于它的连续歌词行数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub count: usize,
    pub name: String,
}

/// 解析过程中的歌词行，翻译仍按语言分别存放。
#[derive(Debug, Clone, Default)]
pub(crate) struct PendingLine {
    pub(crate) key: Option<String>,
    pub(crate) is_duet: bool,
    pub(crate) original_text: String,
    pub(crate) background: Option<Box<PendingLine>>,
    pub(crate) translations: HashMap<String, String>,
}

impl PendingLine {
    pub(crate) fn new(key: Option<String>, is_duet: bool) -> Self {
        Self {
            key,
            is_duet,
            ..Default::default()
        }
    }

    /// 背景人声行：去掉一层包裹整行的括号。
    pub(crate) fn strip_enclosing_parentheses(&mut self) {
        let stripped = ENCLOSED_REGEX
            .captures(self.original_text.trim())
            .map(|caps| caps[1].trim().to_string());
        if let Some(stripped) = stripped {
            self.original_text = stripped;
        }
    }

    /// 附加来自文档级 `<translation>` 的翻译。
    ///
    /// 如果本行有背景人声且文本中含括号，括号内的内容归背景人声，其余归本行。
    pub(crate) fn append_translation(&mut self, text: &str, lang: &str) {
        if let Some(background) = self.background.as_deref_mut()
            && let Some(caps) = PARENTHESIZED_REGEX.captures(text)
        {
            let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
                return;
            };
            background
                .translations
                .insert(lang.to_string(), inner.as_str().trim().to_string());

            let main_text = format!("{}{}", &text[..whole.start()], &text[whole.end()..]);
            self.translations
                .insert(lang.to_string(), main_text.trim().to_string());
        } else {
            self.translations
                .insert(lang.to_string(), text.trim().to_string());
        }
    }

    pub(crate) fn translation_languages(&self) -> impl Iterator<Item = &String> {
        self.translations.keys()
    }

    /// 只保留选定语言的翻译，递归处理背景人声。
    pub(crate) fn filter_translations(mut self, lang: Option<&str>) -> TtmlLine {
        let translation = lang.and_then(|lang| self.translations.remove(lang));
        TtmlLine {
            key: self.key.unwrap_or_default(),
            is_duet: self.is_duet,
            original_text: self.original_text,
            translation,
            background: self
                .background
                .map(|background| Box::new(background.filter_translations(lang))),
        }
    }
}

/// 最终的歌词行，最多带一条翻译。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtmlLine {
    key: String,
    is_duet: bool,
    original_text: String,
    translation: Option<String>,
    background: Option<Box<TtmlLine>>,
}

impl TtmlLine {
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub const fn is_duet(&self) -> bool {
        self.is_duet
    }

    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }

    #[must_use]
    pub fn translation(&self) -> Option<&str> {
        self.translation.as_deref()
    }

    #[must_use]
    pub fn background(&self) -> Option<&Self> {
        self.background.as_deref()
    }

    /// 按固定顺序输出：原文、背景人声原文、翻译、背景人声翻译。空内容不输出。
    #[must_use]
    pub fn to_text(&self, document_has_duet: bool) -> String {
        let marker = LineMarker::for_line(self.is_duet, document_has_duet);
        let secondary = marker.secondary();
        let background = self.background();
        let mut text: Vec<String> = Vec::with_capacity(4);

        if !self.original_text.is_empty() {
            text.push(format!("{marker}{}", self.original_text));
        }
        if let Some(bg) = background
            && !bg.original_text.is_empty()
        {
            text.push(format!("{secondary}({})", bg.original_text));
        }
        if let Some(translation) = self.translation().filter(|t| !t.is_empty()) {
            text.push(format!("{secondary}{translation}"));
        }
        if let Some(translation) = background
            .and_then(Self::translation)
            .filter(|t| !t.is_empty())
        {
            text.push(format!("{secondary}({translation})"));
        }

        text.join("\n")
    }
}

/// 解析完成的 TTML 歌词文档。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtmlDocument {
    pub(crate) language: String,
    pub(crate) parts: Vec<Part>,
    pub(crate) lines: Vec<TtmlLine>,
    pub(crate) songwriters: Vec<String>,
    pub(crate) has_duet: bool,
    pub(crate) selected_language: Option<String>,
    pub(crate) warnings: Vec<String>,
}

impl TtmlDocument {
    /// 根元素的 `xml:lang`，缺省时为配置的默认语言。
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    #[must_use]
    pub fn lines(&self) -> &[TtmlLine] {
        &self.lines
    }

    #[must_use]
    pub fn songwriters(&self) -> &[String] {
        &self.songwriters
    }

    #[must_use]
    pub const fn has_duet(&self) -> bool {
        self.has_duet
    }

    /// 保留下来的翻译语言。文档中没有任何翻译时为 `None`。
    #[must_use]
    pub fn selected_language(&self) -> Option<&str> {
        self.selected_language.as_deref()
    }

    /// 解析中遇到的可恢复问题。
    #[must_use]
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// 生成带标记的歌词文本。
    #[must_use]
    pub fn render(&self) -> String {
        let mut text: Vec<String> = Vec::with_capacity(self.parts.len() + self.lines.len() + 1);

        if let Some(credit) = SongwriterCredit::new(&self.songwriters) {
            let marker = LineMarker::new(Alignment::Center, true);
            text.push(format!("{marker}{}{}", credit.label, credit.joined));
        }

        let mut lines = self.lines.iter();
        for part in &self.parts {
            text.push(format!("{SECTION_MARKER}{}", part.name));
            for line in lines.by_ref().take(part.count) {
                text.push(line.to_text(self.has_duet));
            }
        }

        text.join("\n")
    }
}

impl fmt::Display for TtmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
