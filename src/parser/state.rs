//! # 解析器的状态机和数据结构

use std::collections::HashSet;

use crate::{
    TtmlTextOptions,
    model::{Part, PendingLine},
};

/// 主解析器状态，聚合了所有子状态和全局配置。
#[derive(Debug, Default)]
pub(super) struct TtmlParserState {
    // --- 配置 ---
    pub(super) default_language: String,
    pub(super) normalize_whitespace: bool,
    pub(super) collect_songwriters: bool,
    pub(super) sort_songwriters: bool,

    // --- 文档结构 ---
    /// 当前打开的元素层数。
    pub(super) depth: usize,
    pub(super) seen_root: bool,
    /// 根元素的 `xml:lang`。
    pub(super) language: Option<String>,
    pub(super) head_depth: Option<usize>,
    pub(super) body_depth: Option<usize>,
    pub(super) body_found: bool,
    /// 打开的 `<div>`：（所在层数，段落名）。
    pub(super) div_stack: Vec<(usize, String)>,
    /// 当前最内层的 `<div>` 是否已有对应的段落。
    pub(super) part_open: bool,

    // --- 结果累积 ---
    pub(super) parts: Vec<Part>,
    pub(super) lines: Vec<PendingLine>,
    pub(super) has_duet: bool,
    /// 内联翻译和翻译容器中出现过的所有语言。
    pub(super) languages: HashSet<String>,
    pub(super) songwriters: Vec<String>,
    pub(super) pending_translations: Vec<PendingTranslation>,
    pub(super) warnings: Vec<String>,

    // --- 子状态 ---
    /// 正在解析的 `<p>`。
    pub(super) line_state: Option<LineParseState>,
    /// 正在解析的文档级 `<translation>`。
    pub(super) translation_state: Option<TranslationContainerState>,
    /// 正在读取的 `<head>` 元数据元素。
    pub(super) metadata_capture: Option<MetadataCapture>,
}

impl TtmlParserState {
    pub(super) fn new(options: &TtmlTextOptions) -> Self {
        Self {
            default_language: options.default_language.clone(),
            normalize_whitespace: options.normalize_whitespace,
            collect_songwriters: options.include_songwriters,
            sort_songwriters: options.sort_songwriters,
            ..Default::default()
        }
    }

    pub(super) fn in_head(&self) -> bool {
        self.head_depth.is_some()
    }

    pub(super) fn in_body(&self) -> bool {
        self.body_depth.is_some()
    }
}

/// 存储 `<p>` 解析状态：一个行构建栈，栈底是 `<p>` 本身，之上是嵌套的背景人声。
#[derive(Debug)]
pub(super) struct LineParseState {
    pub(super) frames: Vec<LineFrame>,
    /// 该 `<p>` 不在任何 `<div>` 中，解析完后丢弃。
    pub(super) discard: bool,
}

/// 一个正在构建的行，以及它当前所在的直接子元素。
#[derive(Debug)]
pub(super) struct LineFrame {
    pub(super) line: PendingLine,
    pub(super) child: Option<ChildContext>,
}

impl LineFrame {
    pub(super) const fn new(line: PendingLine) -> Self {
        Self { line, child: None }
    }
}

/// 行元素的一个直接子元素。`depth` 为 1 时位于该子元素本身的内容中。
#[derive(Debug)]
pub(super) struct ChildContext {
    pub(super) kind: ChildKind,
    pub(super) depth: usize,
}

/// 直接子元素按 `ttm:role` 的分类。
#[derive(Debug)]
pub(super) enum ChildKind {
    /// 没有角色，文本并入原文
    Plain,
    /// 内联翻译
    Translation { lang: String, text: String },
    /// 其他角色，忽略其文本
    Ignored,
}

/// `<head>` 中可能包含词作者的元素。
#[derive(Debug)]
pub(super) struct MetadataCapture {
    /// `value` 属性，存在时优先于元素文本。
    pub(super) value: Option<String>,
    pub(super) text: String,
    pub(super) depth: usize,
}

/// 文档级 `<translation>` 容器。
#[derive(Debug)]
pub(super) struct TranslationContainerState {
    pub(super) lang: String,
    pub(super) depth: usize,
    pub(super) current_text: Option<TextCapture>,
}

/// 容器中的一个 `<text for="...">`。
#[derive(Debug)]
pub(super) struct TextCapture {
    pub(super) key: Option<String>,
    pub(super) text: String,
    pub(super) depth: usize,
}

/// 等待在所有行解析完成后合并的翻译。
#[derive(Debug, Clone)]
pub(super) struct PendingTranslation {
    pub(super) key: String,
    pub(super) lang: String,
    pub(super) text: String,
}
