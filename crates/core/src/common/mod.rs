pub mod time;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// # Summary
/// 历史行情回溯窗口，定义日线序列的跨度。
///
/// # Invariants
/// - 序列化形式与 Yahoo `range` 参数一致 (例如 `1mo`)。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum HistoryRange {
    // 5 个交易日
    FiveDays,
    // 1 个月
    #[default]
    OneMonth,
    // 3 个月
    ThreeMonths,
    // 6 个月
    SixMonths,
    // 1 年
    OneYear,
}

impl HistoryRange {
    /// 返回数据源识别的区间参数。
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryRange::FiveDays => "5d",
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
        }
    }
}

impl FromStr for HistoryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "5d" => Ok(HistoryRange::FiveDays),
            "1mo" => Ok(HistoryRange::OneMonth),
            "3mo" => Ok(HistoryRange::ThreeMonths),
            "6mo" => Ok(HistoryRange::SixMonths),
            "1y" => Ok(HistoryRange::OneYear),
            _ => Err(format!("Unknown HistoryRange: {}", s)),
        }
    }
}

impl TryFrom<String> for HistoryRange {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HistoryRange> for String {
    fn from(range: HistoryRange) -> Self {
        range.as_str().to_string()
    }
}

impl std::fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
