use chrono::Local;
use std::sync::Arc;
use thiserror::Error;
use tickerview_core::chart::entity::ChartImage;
use tickerview_core::chart::port::ChartRenderer;
use tickerview_core::common::HistoryRange;
use tickerview_core::common::time::{TimeProvider, format_retrieval_time};
use tickerview_core::directory::SymbolDirectory;
use tickerview_core::market::entity::QuoteSnapshot;
use tickerview_core::market::error::MarketError;
use tickerview_core::market::port::MarketDataProvider;
use tracing::{debug, info, warn};

/// 历史日线为空时展示给用户的提示
pub const EMPTY_HISTORY_MESSAGE: &str = "Historical data not available.";
/// 其余所有失败统一展示的提示
pub const GENERIC_FAILURE_MESSAGE: &str = "Stock not found or API error.";

/// # Summary
/// 一次查询失败的原因。
///
/// # Invariants
/// - 每个变体都能映射为面向用户的提示，底层细节只进入日志。
/// - 除 `EmptyHistory` 外，所有变体对用户展示同一条通用提示。
#[derive(Error, Debug)]
pub enum LookupError {
    /// 行情源不认识该代码
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
    /// 网络不可达或请求超时
    #[error("Network failure for {symbol}: {source}")]
    Network { symbol: String, source: MarketError },
    /// 行情源返回了无法使用的响应
    #[error("Provider error for {symbol}: {source}")]
    Provider { symbol: String, source: MarketError },
    /// 代码有效但回溯窗口内没有日线
    #[error("Historical data not available for {0}")]
    EmptyHistory(String),
    /// 图表渲染失败
    #[error("Chart render failed for {symbol}: {reason}")]
    Render { symbol: String, reason: String },
}

impl LookupError {
    /// # Summary
    /// 将行情源错误归类。
    ///
    /// # Logic
    /// 1. `NotFound` → `SymbolNotFound`。
    /// 2. `Network` / `Timeout` → `Network`。
    /// 3. 其余 → `Provider`。
    pub fn from_market(symbol: &str, err: MarketError) -> Self {
        match err {
            MarketError::NotFound(_) => LookupError::SymbolNotFound(symbol.to_string()),
            MarketError::Network(_) | MarketError::Timeout(_) => LookupError::Network {
                symbol: symbol.to_string(),
                source: err,
            },
            MarketError::Parse(_) | MarketError::Unknown(_) => LookupError::Provider {
                symbol: symbol.to_string(),
                source: err,
            },
        }
    }

    /// 面向用户的提示文本
    pub fn user_message(&self) -> &'static str {
        match self {
            LookupError::EmptyHistory(_) => EMPTY_HISTORY_MESSAGE,
            LookupError::SymbolNotFound(_)
            | LookupError::Network { .. }
            | LookupError::Provider { .. }
            | LookupError::Render { .. } => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// 失败时正在查询的代码
    pub fn symbol(&self) -> &str {
        match self {
            LookupError::SymbolNotFound(symbol) | LookupError::EmptyHistory(symbol) => symbol,
            LookupError::Network { symbol, .. }
            | LookupError::Provider { symbol, .. }
            | LookupError::Render { symbol, .. } => symbol,
        }
    }
}

/// # Summary
/// 一次成功查询的完整结果。
#[derive(Debug, Clone)]
pub struct StockReport {
    // 报价快照
    pub quote: QuoteSnapshot,
    // 蜡烛图
    pub chart: ChartImage,
    // 格式化后的检索时间 (本地时区)
    pub last_updated: String,
    // 参与绘图的日线数量
    pub bar_count: usize,
}

/// # Summary
/// 股票查询服务，请求处理的核心编排。
///
/// # Invariants
/// - 目录、行情源、渲染器与时钟在构造时注入，生命周期与进程等同。
/// - 无共享可变状态，任意数量的查询可以并发执行。
/// - 要么返回完整的 `StockReport`，要么返回单个 `LookupError`，不存在部分结果。
pub struct LookupManager {
    // 公司目录
    directory: Arc<SymbolDirectory>,
    // 行情源
    provider: Arc<dyn MarketDataProvider>,
    // 图表渲染器
    renderer: Arc<dyn ChartRenderer>,
    // 时钟
    clock: Arc<dyn TimeProvider>,
    // 历史回溯窗口
    range: HistoryRange,
}

impl LookupManager {
    /// # Summary
    /// 创建 LookupManager 实例。
    ///
    /// # Arguments
    /// * `directory` - 不可变的公司目录。
    /// * `provider` - 行情源的具体实现。
    /// * `renderer` - 图表渲染器的具体实现。
    /// * `clock` - 检索时间来源。
    /// * `range` - 历史日线回溯窗口。
    ///
    /// # Returns
    /// * `Arc<Self>` - 可共享的服务实例。
    pub fn new(
        directory: Arc<SymbolDirectory>,
        provider: Arc<dyn MarketDataProvider>,
        renderer: Arc<dyn ChartRenderer>,
        clock: Arc<dyn TimeProvider>,
        range: HistoryRange,
    ) -> Arc<Self> {
        Arc::new(Self {
            directory,
            provider,
            renderer,
            clock,
            range,
        })
    }

    /// 注入的公司目录
    pub fn directory(&self) -> &Arc<SymbolDirectory> {
        &self.directory
    }

    /// # Summary
    /// 查询一家公司的报价与蜡烛图。
    ///
    /// # Logic
    /// 1. 通过目录解析代码，未命中时记录猜测代码的告警。
    /// 2. 拉取报价字段并生成快照 (含涨跌幅)。
    /// 3. 拉取历史日线，为空时直接返回 `EmptyHistory`，不调用渲染器。
    /// 4. 在阻塞线程池中渲染以公司全称为标题的蜡烛图。
    /// 5. 组装结果并格式化检索时间。
    ///
    /// # Arguments
    /// * `selection` - 用户选择的公司展示名称或原始代码。
    ///
    /// # Returns
    /// * `Result<StockReport, LookupError>` - 完整结果或单个失败原因。
    pub async fn lookup(&self, selection: &str) -> Result<StockReport, LookupError> {
        let resolution = self.directory.resolve(selection);
        let symbol = resolution.symbol().to_string();
        if resolution.is_guess() {
            warn!(%selection, %symbol, guessed = true, "Company not in directory, querying guessed symbol");
        } else {
            debug!(%selection, %symbol, "Resolved company from directory");
        }

        let fields = self
            .provider
            .fetch_quote(&symbol)
            .await
            .map_err(|e| LookupError::from_market(&symbol, e))?;
        let retrieved_at = self.clock.now();
        let quote = QuoteSnapshot::from_fields(&symbol, fields, retrieved_at);

        let bars = self
            .provider
            .fetch_history(&symbol, self.range)
            .await
            .map_err(|e| LookupError::from_market(&symbol, e))?;
        if bars.is_empty() {
            return Err(LookupError::EmptyHistory(symbol));
        }
        let bar_count = bars.len();

        let title = format!("{} Candlestick Chart", quote.name);
        let renderer = Arc::clone(&self.renderer);
        let chart = tokio::task::spawn_blocking(move || renderer.render_candlestick(&bars, &title))
            .await
            .map_err(|e| LookupError::Render {
                symbol: symbol.clone(),
                reason: e.to_string(),
            })?
            .map_err(|e| LookupError::Render {
                symbol: symbol.clone(),
                reason: e.to_string(),
            })?;

        info!(%symbol, bars = bar_count, percent_change = ?quote.percent_change, "Lookup completed");
        Ok(StockReport {
            last_updated: format_retrieval_time(&retrieved_at.with_timezone(&Local)),
            quote,
            chart,
            bar_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_error_classification() {
        let err = LookupError::from_market("X", MarketError::NotFound("X".into()));
        assert!(matches!(err, LookupError::SymbolNotFound(_)));

        let err = LookupError::from_market("X", MarketError::Timeout("slow".into()));
        assert!(matches!(err, LookupError::Network { .. }));

        let err = LookupError::from_market("X", MarketError::Network("refused".into()));
        assert!(matches!(err, LookupError::Network { .. }));

        let err = LookupError::from_market("X", MarketError::Parse("bad json".into()));
        assert!(matches!(err, LookupError::Provider { .. }));

        let err = LookupError::from_market("X", MarketError::Unknown("?".into()));
        assert!(matches!(err, LookupError::Provider { .. }));
        assert_eq!(err.symbol(), "X");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            LookupError::EmptyHistory("AAPL".into()).user_message(),
            "Historical data not available."
        );
        let generic = [
            LookupError::SymbolNotFound("X".into()),
            LookupError::Network {
                symbol: "X".into(),
                source: MarketError::Timeout("t".into()),
            },
            LookupError::Provider {
                symbol: "X".into(),
                source: MarketError::Parse("p".into()),
            },
            LookupError::Render {
                symbol: "X".into(),
                reason: "r".into(),
            },
        ];
        for err in generic {
            assert_eq!(err.user_message(), "Stock not found or API error.");
        }
    }
}
