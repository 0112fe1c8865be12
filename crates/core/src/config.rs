use crate::common::HistoryRange;
use crate::directory::SymbolDirectory;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 全局应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub feed: FeedConfig,
    pub chart: ChartConfig,
    pub log: LogConfig,
    /// 自定义公司目录，缺省时使用内置目录
    pub directory: Option<SymbolDirectory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// 行情源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Yahoo Finance 接口根地址，测试时可指向本地桩服务
    pub base_url: String,
    /// 单次 HTTP 请求超时 (秒)
    pub timeout_secs: u64,
    /// 历史日线回溯窗口
    pub history_range: HistoryRange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 默认过滤级别，`RUST_LOG` 优先
    pub level: String,
    /// 滚动日志目录，缺省时只输出到 stdout
    pub dir: Option<PathBuf>,
}

impl AppConfig {
    /// 服务监听地址，如 `"0.0.0.0:8080"`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 生效的公司目录
    pub fn symbol_directory(&self) -> SymbolDirectory {
        self.directory.clone().unwrap_or_else(SymbolDirectory::builtin)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            history_range: HistoryRange::OneMonth,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 540,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.feed.base_url, "https://query1.finance.yahoo.com");
        assert_eq!(config.feed.timeout_secs, 10);
        assert_eq!(config.feed.history_range, HistoryRange::OneMonth);
        assert_eq!(config.log.level, "info");
        assert!(config.log.dir.is_none());
        assert_eq!(config.symbol_directory(), SymbolDirectory::builtin());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{
            "server": { "port": 9000 },
            "directory": [{ "name": "Test", "companies": [{ "name": "Fixture", "symbol": "FIX" }] }]
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chart.width, 960);
        assert_eq!(config.symbol_directory().resolve("Fixture").symbol(), "FIX");
    }
}
