//! # TTML 解析器 - 常量定义
//!
//! 该模块包含了解析时用到的标签名、属性名（含别名）和角色值。
//! 属性名以（命名空间，本地名）表示，别名按优先级排列。

use crate::ns::Namespace;

pub(super) type AttrName = (Option<Namespace>, &'static [u8]);

pub(super) const TAG_HEAD: &[u8] = b"head";
pub(super) const TAG_BODY: &[u8] = b"body";
pub(super) const TAG_DIV: &[u8] = b"div";
pub(super) const TAG_P: &[u8] = b"p";
pub(super) const TAG_SONGWRITER: &[u8] = b"songwriter";
pub(super) const TAG_META: &[u8] = b"meta";
pub(super) const TAG_TRANSLATION: &[u8] = b"translation";
pub(super) const TAG_TEXT: &[u8] = b"text";

pub(super) const ATTR_XML_LANG: &[AttrName] = &[(Some(Namespace::Xml), b"lang")];
pub(super) const ATTR_ITUNES_KEY: &[AttrName] = &[(Some(Namespace::Itunes), b"key")];
pub(super) const ATTR_ITUNES_SONG_PART: &[AttrName] = &[
    (Some(Namespace::Itunes), b"song-part"),
    (Some(Namespace::Itunes), b"songPart"),
];
pub(super) const ATTR_AGENT: &[AttrName] = &[(Some(Namespace::Ttm), b"agent"), (None, b"agent")];
pub(super) const ATTR_ROLE: &[AttrName] = &[(Some(Namespace::Ttm), b"role"), (None, b"role")];
pub(super) const ATTR_FOR: &[AttrName] = &[(None, b"for"), (Some(Namespace::Itunes), b"for")];
pub(super) const ATTR_META_KEY: &[AttrName] = &[(None, b"key")];
pub(super) const ATTR_META_VALUE: &[AttrName] = &[(None, b"value")];

pub(super) const ROLE_TRANSLATION: &str = "x-translation";
pub(super) const ROLE_BACKGROUND: &str = "x-bg";

/// `ttm:agent` 的默认值，代表主唱。
pub(super) const DEFAULT_AGENT: &str = "v1";

/// `<meta key="...">` 中代表词作者的键，比较时忽略大小写。
pub(super) const SONGWRITER_META_KEYS: &[&str] = &[
    "songwriter",
    "songwriters",
    "lyricist",
    "lyricists",
    "writer",
    "writers",
    "lyrics by",
    "作词",
    "作詞",
    "词",
    "詞",
    "作词者",
    "填词",
    "작사",
    "작사가",
];
