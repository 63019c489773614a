use quick_xml::{
    Error as QuickXmlErrorMain, encoding::EncodingError,
    events::attributes::AttrError as QuickXmlAttrError,
};
use thiserror::Error;

/// 定义 TTML 歌词解析与文本化过程中可能发生的各种错误。
///
/// 所有错误对当前调用都是终止性的，不会返回部分结果。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TtmlTextError {
    /// 时间码中的数字分组少于两个，或数值溢出。
    #[error("无效的时间码: {0}")]
    MalformedDuration(String),
    /// 输入不是格式良好的 XML。
    #[error("XML 格式错误，位置 {position}: {reason}")]
    MalformedXml {
        /// 出错时读取器所在的字节偏移。
        position: u64,
        /// 底层错误的描述。
        reason: String,
    },
    /// XML 格式良好，但缺少必须的结构（例如 `<body>`）。
    #[error("TTML 结构错误: {0}")]
    MalformedStructure(String),
    /// 配置文本无法反序列化。
    #[error("无效的配置: {0}")]
    InvalidOptions(String),
}

impl TtmlTextError {
    /// 创建一个带位置信息的 `MalformedXml` 错误。
    #[must_use]
    pub fn xml(position: u64, reason: impl Into<String>) -> Self {
        Self::MalformedXml {
            position,
            reason: reason.into(),
        }
    }

    /// 给没有位置信息的 `MalformedXml` 补上读取器的位置。
    #[must_use]
    pub(crate) fn at(self, position: u64) -> Self {
        match self {
            Self::MalformedXml { position: 0, reason } => Self::MalformedXml { position, reason },
            other => other,
        }
    }
}

impl From<QuickXmlErrorMain> for TtmlTextError {
    fn from(err: QuickXmlErrorMain) -> Self {
        Self::xml(0, err.to_string())
    }
}

impl From<QuickXmlAttrError> for TtmlTextError {
    fn from(err: QuickXmlAttrError) -> Self {
        Self::xml(0, err.to_string())
    }
}

impl From<EncodingError> for TtmlTextError {
    fn from(err: EncodingError) -> Self {
        Self::xml(0, err.to_string())
    }
}

impl From<toml::de::Error> for TtmlTextError {
    fn from(err: toml::de::Error) -> Self {
        Self::InvalidOptions(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TtmlTextError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_is_filled_only_once() {
        let err = TtmlTextError::xml(0, "boom").at(42).at(7);
        assert_eq!(err, TtmlTextError::xml(42, "boom"));
    }

    #[test]
    fn test_structure_error_is_not_relocated() {
        let err = TtmlTextError::MalformedStructure("no body".into()).at(10);
        assert!(matches!(err, TtmlTextError::MalformedStructure(_)));
    }
}
