//! 供下游 crate 测试使用的替身实现，通过 `test-utils` feature 导出。

use crate::chart::entity::ChartImage;
use crate::chart::error::ChartError;
use crate::chart::port::ChartRenderer;
use crate::common::HistoryRange;
use crate::market::entity::{DailyBar, QuoteFields};
use crate::market::error::MarketError;
use crate::market::port::MarketDataProvider;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

/// # Summary
/// 返回预设数据的行情源替身。
///
/// # Invariants
/// - `failure` 存在时两个接口都返回该错误。
#[derive(Debug, Clone, Default)]
pub struct StaticMarketData {
    pub quote: QuoteFields,
    pub history: Vec<DailyBar>,
    pub failure: Option<MarketError>,
}

impl StaticMarketData {
    /// 使用报价与日线构建替身
    pub fn new(quote: QuoteFields, history: Vec<DailyBar>) -> Self {
        Self {
            quote,
            history,
            failure: None,
        }
    }

    /// 构建始终失败的替身
    pub fn failing(error: MarketError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }
}

#[async_trait]
impl MarketDataProvider for StaticMarketData {
    async fn fetch_quote(&self, _: &str) -> Result<QuoteFields, MarketError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.quote.clone()),
        }
    }

    async fn fetch_history(&self, _: &str, _: HistoryRange) -> Result<Vec<DailyBar>, MarketError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.history.clone()),
        }
    }
}

/// # Summary
/// 记录调用次数与标题的渲染器替身。
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: AtomicUsize,
    titles: Mutex<Vec<String>>,
    failure: Option<ChartError>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// 构建始终渲染失败的替身
    pub fn failing(error: ChartError) -> Self {
        Self {
            failure: Some(error),
            ..Default::default()
        }
    }

    /// 已发生的渲染调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 每次调用传入的标题
    pub fn titles(&self) -> Vec<String> {
        self.titles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ChartRenderer for RecordingRenderer {
    fn render_candlestick(&self, bars: &[DailyBar], title: &str) -> Result<ChartImage, ChartError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.titles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(title.to_string());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(ChartImage::svg(format!(
            "<svg><title>{}</title><desc>{} bars</desc></svg>",
            title,
            bars.len()
        )))
    }
}

/// # Summary
/// 生成从 `start` 开始连续 `days` 天的递增日线样本。
pub fn sample_bars(start: NaiveDate, days: u32) -> Vec<DailyBar> {
    (0..days)
        .map(|i| {
            let base = 100.0 + f64::from(i);
            DailyBar {
                date: start + Duration::days(i64::from(i)),
                open: base,
                high: base + 2.0,
                low: base - 1.0,
                close: base + 1.0,
                volume: 1_000_000.0,
            }
        })
        .collect()
}
