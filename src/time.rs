//! # TTML 时间码
//!
//! 把 `1:02:03.04`、`02:03.456` 这样以非数字字符分隔的时间码解析成
//! 规范化的（分，秒，毫秒）三元组。

use std::{fmt, ops::Sub, str::FromStr};

use crate::error::{Result, TtmlTextError};

/// 一个规范化后的时间点，精度为毫秒。
///
/// 比较按总毫秒数进行。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TtmlTime {
    minutes: u64,
    seconds: u64,
    milliseconds: u64,
}

impl TtmlTime {
    /// 解析时间码。
    ///
    /// 数字分组按从高到低的顺序逐级乘 60 累加为秒数。紧跟在 `.` 或 `,` 之后的最后一组
    /// 是秒以下的部分：1～2 位时按小数处理（`.5` 为 500 毫秒，`.05` 为 50 毫秒），
    /// 3 位及以上时取前三位作为毫秒。
    ///
    /// # Errors
    ///
    /// 数字分组少于两个，或数值溢出时返回 `TtmlTextError::MalformedDuration`。
    pub fn parse(text: &str) -> Result<Self> {
        let groups = digit_groups(text);
        if groups.len() < 2 {
            return Err(TtmlTextError::MalformedDuration(format!(
                "时间码 '{text}' 至少需要两个数字分组"
            )));
        }

        let (units, fraction) = match groups.split_last() {
            Some((&(true, fraction), units)) => (units, Some(fraction)),
            _ => (groups.as_slice(), None),
        };

        let overflow = || TtmlTextError::MalformedDuration(format!("时间码 '{text}' 数值溢出"));

        let mut total_seconds: u64 = 0;
        for &(_, unit) in units {
            let value: u64 = unit.parse().map_err(|_| overflow())?;
            total_seconds = total_seconds
                .checked_mul(60)
                .and_then(|v| v.checked_add(value))
                .ok_or_else(overflow)?;
        }

        let total_ms = total_seconds
            .checked_mul(1000)
            .and_then(|v| v.checked_add(fraction.map_or(0, parse_fraction_ms)))
            .ok_or_else(overflow)?;

        Ok(Self::from_millis(total_ms))
    }

    /// 由总毫秒数构造。
    #[must_use]
    pub const fn from_millis(total_ms: u64) -> Self {
        let total_seconds = total_ms / 1000;
        Self {
            minutes: total_seconds / 60,
            seconds: total_seconds % 60,
            milliseconds: total_ms % 1000,
        }
    }

    /// 总毫秒数。
    #[must_use]
    pub const fn as_millis(&self) -> u64 {
        (self.minutes * 60 + self.seconds) * 1000 + self.milliseconds
    }

    #[must_use]
    pub const fn minutes(&self) -> u64 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    #[must_use]
    pub const fn milliseconds(&self) -> u64 {
        self.milliseconds
    }

    /// 两个时间点之间的距离（毫秒），与参数顺序无关。
    #[must_use]
    pub const fn abs_diff(&self, other: &Self) -> u64 {
        self.as_millis().abs_diff(other.as_millis())
    }
}

/// 切分出所有连续的数字分组，并记录每组之前紧邻的分隔符是否为小数点（`.` 或 `,`）。
fn digit_groups(text: &str) -> Vec<(bool, &str)> {
    let mut groups = Vec::new();
    let mut start = None;
    let mut after_decimal = false;
    let mut group_after_decimal = false;

    for (index, c) in text.char_indices() {
        if c.is_ascii_digit() {
            if start.is_none() {
                start = Some(index);
                group_after_decimal = after_decimal;
            }
        } else {
            if let Some(begin) = start.take() {
                groups.push((group_after_decimal, &text[begin..index]));
            }
            after_decimal = matches!(c, '.' | ',');
        }
    }
    if let Some(begin) = start {
        groups.push((group_after_decimal, &text[begin..]));
    }
    groups
}

/// 数字分组只含 ASCII 数字，前三位以内不会解析失败。
fn parse_fraction_ms(fraction: &str) -> u64 {
    let digits = &fraction[..fraction.len().min(3)];
    let value: u64 = digits.parse().unwrap_or(0);
    match digits.len() {
        1 => value * 100,
        2 => value * 10,
        _ => value,
    }
}

impl FromStr for TtmlTime {
    type Err = TtmlTextError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for TtmlTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}.{:03}",
            self.minutes, self.seconds, self.milliseconds
        )
    }
}

impl Sub for TtmlTime {
    type Output = u64;

    fn sub(self, rhs: Self) -> u64 {
        self.abs_diff(&rhs)
    }
}
