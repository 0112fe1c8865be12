use axum::Router;
use axum::extract::{Path, Query};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::get;
use std::collections::HashMap;
use std::time::Duration;
use tickerview_core::common::HistoryRange;
use tickerview_core::config::FeedConfig;
use tickerview_core::market::error::MarketError;
use tickerview_core::market::port::MarketDataProvider;
use tickerview_feed::yahoo::YahooProvider;
use tokio::net::TcpListener;

const QUOTE_BODY: &str = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","regularMarketPrice":150.0,
    "previousClose":140.0,"regularMarketDayHigh":152.0,"regularMarketDayLow":148.0,
    "longName":"Apple Inc.","gmtoffset":-18000},
    "timestamp":[1735828200],
    "indicators":{"quote":[{"open":[149.0],"high":[152.0],"low":[148.0],"close":[150.0],"volume":[1000]}]}}],
    "error":null}}"#;

const HISTORY_BODY: &str = r#"{"chart":{"result":[{"meta":{"symbol":"AAPL","gmtoffset":-18000},
    "timestamp":[1735828200,1735914600,1736173800],
    "indicators":{"quote":[{"open":[100.0,101.0,102.0],"high":[102.0,103.0,104.0],
    "low":[99.0,100.0,101.0],"close":[101.0,102.0,103.0],"volume":[10,20,30]}]}}],
    "error":null}}"#;

const NOT_FOUND_BODY: &str = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;

/// # Summary
/// 模拟 Yahoo chart 接口的桩服务。
///
/// # Logic
/// 1. `SLOW` 代码延迟 3 秒响应，用于验证超时。
/// 2. `NOPE` 代码返回 404。
/// 3. 其余代码按 `range` 返回报价或历史样本。
async fn chart_stub(
    Path(symbol): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    if symbol == "SLOW" {
        tokio::time::sleep(Duration::from_secs(3)).await;
    }
    if symbol == "NOPE" {
        return (StatusCode::NOT_FOUND, [(header::CONTENT_TYPE, "application/json")], NOT_FOUND_BODY);
    }
    assert_eq!(params.get("interval").map(String::as_str), Some("1d"));
    let body = match params.get("range").map(String::as_str) {
        Some("1d") => QUOTE_BODY,
        _ => HISTORY_BODY,
    };
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body)
}

// 帮助函数：在随机端口启动桩服务并返回对应的 Provider
async fn spawn_stub(timeout_secs: u64) -> YahooProvider {
    let app = Router::new().route("/v8/finance/chart/{symbol}", get(chart_stub));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = FeedConfig {
        base_url: format!("http://{}", addr),
        timeout_secs,
        ..FeedConfig::default()
    };
    YahooProvider::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_quote_from_stub() -> anyhow::Result<()> {
    let provider = spawn_stub(5).await;

    let quote = provider.fetch_quote("AAPL").await?;
    assert_eq!(quote.current_price, Some(150.0));
    assert_eq!(quote.previous_close, Some(140.0));
    assert_eq!(quote.day_high, Some(152.0));
    assert_eq!(quote.day_low, Some(148.0));
    assert_eq!(quote.long_name.as_deref(), Some("Apple Inc."));
    Ok(())
}

#[tokio::test]
async fn test_fetch_history_from_stub() -> anyhow::Result<()> {
    let provider = spawn_stub(5).await;

    let bars = provider.fetch_history("AAPL", HistoryRange::OneMonth).await?;
    assert_eq!(bars.len(), 3);
    assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
    assert_eq!(bars[2].close, 103.0);
    Ok(())
}

#[tokio::test]
async fn test_unknown_symbol_is_not_found() {
    let provider = spawn_stub(5).await;

    let err = provider.fetch_quote("NOPE").await.unwrap_err();
    assert_eq!(err, MarketError::NotFound("NOPE".to_string()));
}

#[tokio::test]
async fn test_unresponsive_provider_times_out() {
    let provider = spawn_stub(1).await;

    let err = provider
        .fetch_history("SLOW", HistoryRange::OneMonth)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketError::Timeout(_)), "unexpected error: {:?}", err);
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // 绑定后立即释放端口，保证无人监听
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = FeedConfig {
        base_url: format!("http://{}", addr),
        timeout_secs: 2,
        ..FeedConfig::default()
    };
    let provider = YahooProvider::new(&config).unwrap();
    let err = provider.fetch_quote("AAPL").await.unwrap_err();
    assert!(matches!(err, MarketError::Network(_)), "unexpected error: {:?}", err);
}

/// # Summary
/// 雅虎财经真实接口的集成测试，需要外网访问。
#[tokio::test]
#[ignore = "requires network access to Yahoo Finance"]
async fn test_yahoo_real_fetch() {
    let provider = YahooProvider::new(&FeedConfig::default()).unwrap();

    let quote = provider.fetch_quote("AAPL").await;
    assert!(quote.is_ok(), "Failed to fetch real quote: {:?}", quote.err());

    let bars = provider.fetch_history("AAPL", HistoryRange::OneMonth).await;
    assert!(bars.is_ok(), "Failed to fetch real data from Yahoo: {:?}", bars.err());
    let bars = bars.unwrap();
    assert!(!bars.is_empty(), "Bars list should not be empty");

    println!("Successfully fetched {} bars for AAPL", bars.len());
}
