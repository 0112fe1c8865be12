use std::path::PathBuf;
use std::sync::Arc;

use tickerview_chart::svg::SvgCandlestickRenderer;
use tickerview_core::common::time::RealTimeProvider;
use tickerview_feed::yahoo::YahooProvider;
use tickerview_manager::lookup::LookupManager;
use tickerview_web::server::{AppState, start_server};
use tracing::{error, info};

mod logging;
mod settings;

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到 LookupManager。
///
/// # Logic
/// 1. 加载配置 (默认值 → 配置文件 → 环境变量)。
/// 2. 初始化全局日志。
/// 3. 实例化基础设施层（目录、Feed、Chart）。
/// 4. 构造应用服务层（LookupManager）。
/// 5. 启动页面服务，等待外部信号优雅退出。
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载配置
    let config_path = std::env::var_os(settings::CONFIG_PATH_ENV).map(PathBuf::from);
    let config = settings::load(config_path.as_deref())?;

    // 2. 初始化日志 (守卫需持有到进程退出)
    let _log_guards = logging::init(&config.log)?;
    info!("tickerview starting...");

    // 3. 实例化基础设施层
    let directory = Arc::new(config.symbol_directory());
    info!(companies = directory.len(), "Symbol directory loaded");
    let provider = Arc::new(YahooProvider::new(&config.feed)?);
    let renderer = Arc::new(SvgCandlestickRenderer::new(&config.chart));

    // 4. 构造应用服务层（注入 Core Trait 抽象）
    let lookup = LookupManager::new(
        directory,
        provider,
        renderer,
        Arc::new(RealTimeProvider),
        config.feed.history_range,
    );
    let state = AppState::new(lookup)?;

    // 5. 启动服务，直到收到退出信号
    start_server(state, &config.bind_addr(), shutdown_signal()).await?;
    info!("Shutdown complete");

    Ok(())
}

/// 等待 Ctrl-C；信号监听注册失败时保持运行。
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received. Exiting...");
}
