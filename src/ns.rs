//! TTML 歌词中用到的 XML 命名空间。

use quick_xml::name::{Namespace as XmlNamespace, ResolveResult};

pub const TT_NS: &str = "http://www.w3.org/ns/ttml";
pub const ITUNES_NS: &str = "http://music.apple.com/lyric-ttml-internal";
pub const TTM_NS: &str = "http://www.w3.org/ns/ttml#metadata";
pub const AMLL_NS: &str = "http://www.example.com/ns/amll";
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// 已知的命名空间及其惯用前缀。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Tt,
    Itunes,
    Ttm,
    Amll,
    Xml,
}

impl Namespace {
    pub const ALL: [Self; 5] = [Self::Tt, Self::Itunes, Self::Ttm, Self::Amll, Self::Xml];

    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Tt => "tt",
            Self::Itunes => "itunes",
            Self::Ttm => "ttm",
            Self::Amll => "amll",
            Self::Xml => "xml",
        }
    }

    #[must_use]
    pub const fn uri(self) -> &'static str {
        match self {
            Self::Tt => TT_NS,
            Self::Itunes => ITUNES_NS,
            Self::Ttm => TTM_NS,
            Self::Amll => AMLL_NS,
            Self::Xml => XML_NS,
        }
    }

    #[must_use]
    pub fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.prefix() == prefix)
    }

    #[must_use]
    pub fn from_uri(uri: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.uri().as_bytes() == uri)
    }

    /// 把读取器的解析结果映射到已知命名空间。
    ///
    /// 未绑定命名空间时返回 `Ok(None)`；绑定到未知命名空间时返回 `Err(())`。
    /// 未声明的前缀按惯用前缀识别。
    pub(crate) fn from_resolved(resolved: &ResolveResult<'_>) -> Result<Option<Self>, ()> {
        match resolved {
            ResolveResult::Unbound => Ok(None),
            ResolveResult::Bound(XmlNamespace(uri)) => Self::from_uri(uri).map(Some).ok_or(()),
            ResolveResult::Unknown(prefix) => std::str::from_utf8(prefix)
                .ok()
                .and_then(Self::from_prefix)
                .map(Some)
                .ok_or(()),
        }
    }
}

/// 以 Clark 记法 `{uri}local` 构造限定名。前缀未知时返回 `None`。
#[must_use]
pub fn qualified_name(prefix: &str, local: &str) -> Option<String> {
    Namespace::from_prefix(prefix).map(|ns| format!("{{{}}}{local}", ns.uri()))
}
