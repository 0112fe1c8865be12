use async_trait::async_trait;
use chrono::DateTime;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tickerview_core::common::HistoryRange;
use tickerview_core::config::FeedConfig;
use tickerview_core::market::entity::{DailyBar, QuoteFields};
use tickerview_core::market::error::MarketError;
use tickerview_core::market::port::MarketDataProvider;
use tracing::{debug, warn};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// # Summary
/// Yahoo Finance 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，每个请求受配置的超时约束。
/// - 报价与日线均来自 v8 chart 接口。
#[derive(Clone)]
pub struct YahooProvider {
    /// 内部使用的 HTTP 客户端
    client: Client,
    /// 接口根地址
    base_url: Url,
}

impl YahooProvider {
    /// # Summary
    /// 创建一个新的 YahooProvider 实例。
    ///
    /// # Logic
    /// 1. 确保进程内已安装 rustls 加密后端。
    /// 2. 解析接口根地址。
    /// 3. 配置超时与伪装浏览器 Header (User-Agent) 以减少被拦截风险。
    ///
    /// # Arguments
    /// * `config`: 行情源配置。
    ///
    /// # Returns
    /// 返回初始化后的 YahooProvider，地址非法或客户端构建失败时返回错误。
    pub fn new(config: &FeedConfig) -> Result<Self, MarketError> {
        install_crypto_provider();

        let base_url = Url::parse(&config.base_url)
            .map_err(|e| MarketError::Unknown(format!("Invalid base url {}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| MarketError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    /// # Summary
    /// 请求 chart 接口并取出唯一的结果。
    ///
    /// # Logic
    /// 1. 以路径段方式拼接代码，避免用户输入破坏 URL 结构。
    /// 2. 发起请求，超时与其他传输错误分别映射。
    /// 3. 交给 `parse_chart` 判定状态码与响应体。
    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<ChartResult, MarketError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MarketError::Unknown(format!("Base url cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);

        debug!(%symbol, %range, "Requesting Yahoo chart");
        let resp = self
            .client
            .get(url)
            .query(&[("range", range), ("interval", "1d")])
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        let body = resp.bytes().await.map_err(transport_error)?;
        parse_chart(symbol, status, &body)
    }
}

/// 进程内只需安装一次，重复安装的错误直接忽略。
fn install_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none()
        && rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

fn transport_error(e: reqwest::Error) -> MarketError {
    if e.is_timeout() {
        MarketError::Timeout(e.to_string())
    } else {
        MarketError::Network(e.to_string())
    }
}

/// # Summary
/// Yahoo API 响应顶层结构。
///
/// # Invariants
/// - 映射自 Yahoo v8 chart 接口。
#[derive(Deserialize, Debug)]
struct YahooResponse {
    chart: YahooChart,
}

/// # Summary
/// Yahoo API 图表数据部分。
#[derive(Deserialize, Debug)]
struct YahooChart {
    result: Option<Vec<ChartResult>>,
    error: Option<YahooError>,
}

/// # Summary
/// Yahoo API 错误详情。
#[derive(Deserialize, Debug)]
struct YahooError {
    code: Option<String>,
    description: Option<String>,
}

/// # Summary
/// Yahoo API 单个代码的结果。
#[derive(Deserialize, Debug)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    // 无成交数据时 Yahoo 会省略该字段
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: YahooIndicators,
}

/// # Summary
/// 报价元数据。
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
    long_name: Option<String>,
    short_name: Option<String>,
    // 交易所相对 UTC 的偏移 (秒)
    #[serde(rename = "gmtoffset")]
    gmt_offset: Option<i64>,
}

/// # Summary
/// Yahoo API 指标容器。
#[derive(Deserialize, Debug, Default)]
struct YahooIndicators {
    #[serde(default)]
    quote: Vec<YahooQuote>,
}

/// # Summary
/// Yahoo API 原始报价数据。
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct YahooQuote {
    /// 开盘价列表
    open: Vec<Option<f64>>,
    /// 最高价列表
    high: Vec<Option<f64>>,
    /// 最低价列表
    low: Vec<Option<f64>>,
    /// 收盘价列表
    close: Vec<Option<f64>>,
    /// 成交量列表
    volume: Vec<Option<f64>>,
}

/// # Summary
/// 将 chart 接口的响应判定为结果或错误。
///
/// # Logic
/// 1. 响应体可解析时，`chart.error` 为 "Not Found" 或状态码 404 视为代码不存在。
/// 2. 其他非 2xx 状态码视为网络错误。
/// 3. 结果为空视为代码不存在。
/// 4. 响应体无法解析时，按状态码区分代码不存在、网络错误与解析错误。
fn parse_chart(symbol: &str, status: StatusCode, body: &[u8]) -> Result<ChartResult, MarketError> {
    let json: YahooResponse = match serde_json::from_slice(body) {
        Ok(json) => json,
        Err(e) => {
            return Err(if status == StatusCode::NOT_FOUND {
                MarketError::NotFound(symbol.to_string())
            } else if !status.is_success() {
                MarketError::Network(format!("HTTP {}", status))
            } else {
                MarketError::Parse(e.to_string())
            });
        }
    };

    if let Some(err) = json.chart.error {
        let not_found = status == StatusCode::NOT_FOUND || err.code.as_deref() == Some("Not Found");
        return Err(if not_found {
            MarketError::NotFound(symbol.to_string())
        } else {
            MarketError::Unknown(
                err.description
                    .or(err.code)
                    .unwrap_or_else(|| format!("HTTP {}", status)),
            )
        });
    }

    if status == StatusCode::NOT_FOUND {
        return Err(MarketError::NotFound(symbol.to_string()));
    }
    if !status.is_success() {
        return Err(MarketError::Network(format!("HTTP {}", status)));
    }

    json.chart
        .result
        .and_then(|mut results| results.pop())
        .ok_or_else(|| MarketError::NotFound(symbol.to_string()))
}

/// # Summary
/// 从结果元数据中提取报价字段。
fn to_quote(meta: ChartMeta) -> QuoteFields {
    QuoteFields {
        current_price: meta.regular_market_price,
        previous_close: meta.previous_close.or(meta.chart_previous_close),
        day_high: meta.regular_market_day_high,
        day_low: meta.regular_market_day_low,
        long_name: meta.long_name.or(meta.short_name),
    }
}

/// # Summary
/// 将并列数组形式的 OHLCV 转换为日线序列。
///
/// # Logic
/// 1. 无时间戳时返回空序列。
/// 2. 时间戳加上交易所偏移后取日期，保证亚洲市场日期不被推前一天。
/// 3. 任一字段缺失的日线直接跳过 (Yahoo 对停牌日会返回 null)。
fn to_bars(result: &ChartResult) -> Result<Vec<DailyBar>, MarketError> {
    if result.timestamp.is_empty() {
        return Ok(Vec::new());
    }

    let quote = result
        .indicators
        .quote
        .first()
        .ok_or_else(|| MarketError::Parse("No quote data".into()))?;
    let offset = result.meta.gmt_offset.unwrap_or(0);

    let mut bars = Vec::with_capacity(result.timestamp.len());
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let Some(date) = ts
            .checked_add(offset)
            .and_then(|local| DateTime::from_timestamp(local, 0))
            .map(|dt| dt.date_naive())
        else {
            warn!(ts, "Skipping bar with out-of-range timestamp");
            continue;
        };
        if let (Some(o), Some(h), Some(l), Some(c), Some(v)) = (
            quote.open.get(i).copied().flatten(),
            quote.high.get(i).copied().flatten(),
            quote.low.get(i).copied().flatten(),
            quote.close.get(i).copied().flatten(),
            quote.volume.get(i).copied().flatten(),
        ) {
            bars.push(DailyBar {
                date,
                open: o,
                high: h,
                low: l,
                close: c,
                volume: v,
            });
        }
    }

    Ok(bars)
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    /// # Summary
    /// 以单日窗口请求 chart 接口，读取元数据中的报价字段。
    async fn fetch_quote(&self, symbol: &str) -> Result<QuoteFields, MarketError> {
        let result = self.fetch_chart(symbol, "1d").await?;
        Ok(to_quote(result.meta))
    }

    /// # Summary
    /// 从 Yahoo Finance 抓取日线历史数据。
    ///
    /// # Logic
    /// 1. 以回溯窗口作为 `range`，固定 `interval=1d`。
    /// 2. 解析嵌套的 JSON 数据并转换为日线。
    async fn fetch_history(
        &self,
        symbol: &str,
        range: HistoryRange,
    ) -> Result<Vec<DailyBar>, MarketError> {
        let result = self.fetch_chart(symbol, range.as_str()).await?;
        to_bars(&result)
    }
}
