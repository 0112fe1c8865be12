use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// # Summary
/// 单根日线数据实体。
///
/// # Invariants
/// - `high` 必须大于或等于 `low`, `open`, `close`。
/// - `date` 为交易所当地日期。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBar {
    // 交易日
    pub date: NaiveDate,
    // 开盘价
    pub open: f64,
    // 最高价
    pub high: f64,
    // 最低价
    pub low: f64,
    // 收盘价
    pub close: f64,
    // 成交量
    pub volume: f64,
}

impl DailyBar {
    /// 收盘价是否不低于开盘价 (阳线)。
    pub fn is_rising(&self) -> bool {
        self.close >= self.open
    }
}

/// # Summary
/// 行情源返回的实时报价字段，任何字段都可能缺失。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteFields {
    // 当前价
    pub current_price: Option<f64>,
    // 昨收价
    pub previous_close: Option<f64>,
    // 当日最高
    pub day_high: Option<f64>,
    // 当日最低
    pub day_low: Option<f64>,
    // 公司全称
    pub long_name: Option<String>,
}

/// # Summary
/// 单次查询生成的报价快照。
///
/// # Invariants
/// - `percent_change` 当且仅当 `price` 与 `previous_close` 均存在 (且昨收非零) 时存在。
/// - `name` 在行情源未提供全称时回退为 `symbol`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub symbol: String,
    pub name: String,
    pub price: Option<f64>,
    pub previous_close: Option<f64>,
    pub day_high: Option<f64>,
    pub day_low: Option<f64>,
    pub percent_change: Option<f64>,
    pub retrieved_at: DateTime<Utc>,
}

impl QuoteSnapshot {
    /// # Summary
    /// 由报价字段组装快照。
    ///
    /// # Logic
    /// 1. 全称缺失时使用代码作为名称。
    /// 2. 计算涨跌幅。
    ///
    /// # Arguments
    /// * `symbol`: 查询所用代码。
    /// * `fields`: 行情源返回的报价字段。
    /// * `retrieved_at`: 检索时间。
    ///
    /// # Returns
    /// 组装好的快照。
    pub fn from_fields(symbol: &str, fields: QuoteFields, retrieved_at: DateTime<Utc>) -> Self {
        let percent_change = percent_change(fields.current_price, fields.previous_close);
        Self {
            symbol: symbol.to_string(),
            name: fields.long_name.unwrap_or_else(|| symbol.to_string()),
            price: fields.current_price,
            previous_close: fields.previous_close,
            day_high: fields.day_high,
            day_low: fields.day_low,
            percent_change,
            retrieved_at,
        }
    }
}

/// # Summary
/// 计算相对昨收的涨跌幅百分比，保留两位小数。
///
/// # Logic
/// `round((current - previous) / previous * 100, 2)`，任一输入缺失或为 0 时返回 None (当前价为 0 视为未报价)。
///
/// # Arguments
/// * `current`: 当前价。
/// * `previous`: 昨收价。
///
/// # Returns
/// 涨跌幅百分比。
pub fn percent_change(current: Option<f64>, previous: Option<f64>) -> Option<f64> {
    let (current, previous) = (current?, previous?);
    if current == 0.0 || previous == 0.0 {
        return None;
    }
    let raw = (current - previous) / previous * 100.0;
    Some((raw * 100.0).round() / 100.0)
}
