//! 翻译语言的选择策略。

use std::collections::HashSet;

/// 按优先级选出唯一保留的翻译语言：
/// `zh-Hans` > `zh-CN` > `zh-Hant` > 任意以 `zh` 开头的语言 > 其他任意语言。
///
/// 同一优先级有多个候选时取字典序最小的一个，因此结果与集合的迭代顺序无关。
/// 集合为空时返回 `None`。
#[must_use]
pub fn select_translation_language<S: std::hash::BuildHasher>(
    languages: &HashSet<String, S>,
) -> Option<String> {
    for preferred in ["zh-Hans", "zh-CN", "zh-Hant"] {
        if languages.contains(preferred) {
            return Some(preferred.to_string());
        }
    }

    languages
        .iter()
        .filter(|lang| lang.starts_with("zh"))
        .min()
        .or_else(|| languages.iter().min())
        .cloned()
}
