use crate::common::HistoryRange;
use crate::market::entity::{DailyBar, QuoteFields};
use crate::market::error::MarketError;
use async_trait::async_trait;

/// # Summary
/// 市场行情数据提供者接口（外部数据源）。
///
/// # Invariants
/// - 实现者必须为每次网络请求设置超时，不得无限期挂起调用方。
/// - 未知代码、网络失败、响应格式错误都必须以 `MarketError` 返回，不得 panic。
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// # Summary
    /// 获取证券的实时报价字段。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    ///
    /// # Returns
    /// 成功返回报价字段 (各字段可能缺失)。
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteFields, MarketError>;

    /// # Summary
    /// 获取证券在回溯窗口内的日线序列。
    ///
    /// # Logic
    /// 1. 按回溯窗口构建数据源请求。
    /// 2. 执行网络请求并解析响应数据。
    /// 3. 丢弃字段不完整的日线，按时间升序返回。
    ///
    /// # Arguments
    /// * `symbol`: 证券代码。
    /// * `range`: 回溯窗口。
    ///
    /// # Returns
    /// 成功返回日线列表，可能为空。
    async fn fetch_history(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<Vec<DailyBar>, MarketError>;
}
