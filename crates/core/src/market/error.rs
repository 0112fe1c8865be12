use thiserror::Error;

/// # Summary
/// 市场数据域错误枚举，处理网络、超时、解析及代码不存在等问题。
///
/// # Invariants
/// - 必须通过 `thiserror` 派生 `Error` trait。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarketError {
    // 网络层错误，包含底层 HTTP 客户端错误信息
    #[error("Network error: {0}")]
    Network(String),
    // 请求超过配置的超时时间
    #[error("Request timed out: {0}")]
    Timeout(String),
    // 数据解析错误，如 JSON 格式不匹配
    #[error("Parse error: {0}")]
    Parse(String),
    // 代码未知 (404 或结果为空)
    #[error("Symbol not found: {0}")]
    NotFound(String),
    // 未知或未分类的错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}
