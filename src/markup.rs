//! # 标记文本格式
//!
//! 文本化结果的每一行都可以带一个方括号标记：
//!
//! - `[-]名称`：段落分隔，名称可以为空。
//! - `[:-]`、`[-:]`、`[:-:]`：主唱、对唱方、居中的主歌词行。
//! - 把其中的 `-` 换成 `_`：对应的次要行（背景人声、翻译、署名）。
//!
//! 该模块同时负责生成和读取这些标记。

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

pub const SECTION_MARKER: &str = "[-]";

static MARKED_LINE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([:_-]+)\](.*)$").expect("未能编译 MARKED_LINE_REGEX"));

/// 歌词行的对齐方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// 主唱，靠左
    Lead,
    /// 对唱方，靠右
    Other,
    /// 整首歌没有对唱时居中
    Center,
}

/// 一个歌词行标记。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineMarker {
    pub alignment: Alignment,
    /// 背景人声、翻译等次要内容
    pub secondary: bool,
}

impl LineMarker {
    #[must_use]
    pub const fn new(alignment: Alignment, secondary: bool) -> Self {
        Self {
            alignment,
            secondary,
        }
    }

    /// 根据行是否为对唱行、整首歌是否存在对唱行选择主歌词标记。
    #[must_use]
    pub const fn for_line(is_duet: bool, document_has_duet: bool) -> Self {
        let alignment = match (document_has_duet, is_duet) {
            (false, _) => Alignment::Center,
            (true, true) => Alignment::Other,
            (true, false) => Alignment::Lead,
        };
        Self::new(alignment, false)
    }

    /// 同一对齐方式下的次要标记。
    #[must_use]
    pub const fn secondary(self) -> Self {
        Self::new(self.alignment, true)
    }

    fn from_spec(spec: &str) -> Option<Self> {
        let marker = match spec {
            ":-" => Self::new(Alignment::Lead, false),
            "-:" => Self::new(Alignment::Other, false),
            ":-:" => Self::new(Alignment::Center, false),
            ":_" => Self::new(Alignment::Lead, true),
            "_:" => Self::new(Alignment::Other, true),
            ":_:" => Self::new(Alignment::Center, true),
            _ => return None,
        };
        Some(marker)
    }
}

impl fmt::Display for LineMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bar = if self.secondary { '_' } else { '-' };
        match self.alignment {
            Alignment::Lead => write!(f, "[:{bar}]"),
            Alignment::Other => write!(f, "[{bar}:]"),
            Alignment::Center => write!(f, "[:{bar}:]"),
        }
    }
}

/// 一行标记文本的类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Section,
    Lyric(LineMarker),
    /// 没有可识别的标记
    Plain,
}

/// 读取回来的一行标记文本。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedLine {
    pub kind: LineKind,
    pub text: String,
}

impl MarkedLine {
    /// 解析一行标记文本，行首尾和标记后的文本都会去除空白。
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if let Some(caps) = MARKED_LINE_REGEX.captures(trimmed) {
            let spec = &caps[1];
            let text = caps[2].trim().to_string();
            if spec == "-" {
                return Self {
                    kind: LineKind::Section,
                    text,
                };
            }
            if let Some(marker) = LineMarker::from_spec(spec) {
                return Self {
                    kind: LineKind::Lyric(marker),
                    text,
                };
            }
        }
        Self {
            kind: LineKind::Plain,
            text: trimmed.to_string(),
        }
    }
}

/// 逐行解析文本化结果。
#[must_use]
pub fn parse_marked_text(text: &str) -> Vec<MarkedLine> {
    text.lines().map(MarkedLine::parse).collect()
}

/// 除段落分隔外，所有带标记的行是否都居中。
#[must_use]
pub fn is_pure_center(lines: &[MarkedLine]) -> bool {
    lines.iter().all(|line| match line.kind {
        LineKind::Lyric(marker) => marker.alignment == Alignment::Center,
        LineKind::Section | LineKind::Plain => true,
    })
}
