//! 词作者署名的拼接。

use unicode_width::UnicodeWidthChar;

/// 拼接好的署名，`label` 与 `joined` 直接相连即为完整署名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongwriterCredit {
    pub label: &'static str,
    pub joined: String,
}

impl SongwriterCredit {
    /// 为一组词作者生成署名，列表为空时返回 `None`。
    #[must_use]
    pub fn new(names: &[String]) -> Option<Self> {
        if names.is_empty() {
            return None;
        }
        let label = if has_wide_chars(names) { "作词" } else { "Songwriters" };
        Some(Self {
            label,
            joined: join_songwriters(names),
        })
    }
}

/// 是否存在全角、宽字符或东亚宽度不明确的字符。
fn has_wide_chars(names: &[String]) -> bool {
    names
        .iter()
        .flat_map(|name| name.chars())
        .any(|c| c.width_cjk() == Some(2))
}

/// 按给定顺序拼接词作者。
///
/// 含宽字符时使用 `：` 前缀和 `、` 分隔，否则使用 `": "` 前缀和 `", "` 分隔。
#[must_use]
pub fn join_songwriters(names: &[String]) -> String {
    if has_wide_chars(names) {
        format!("：{}", names.join("、"))
    } else {
        format!(": {}", names.join(", "))
    }
}
