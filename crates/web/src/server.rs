//! # 页面服务启动器
//!
//! 组装 axum 路由、挂载请求日志中间件并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use tickerview_manager::lookup::LookupManager;

use crate::error::WebError;
use crate::routes::index;
use crate::template::Templates;

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - `lookup` 和 `templates` 在服务启动前由 DI 容器注入，生命周期与进程等同。
/// - 公司目录只通过 `lookup.directory()` 读取，页面与查询使用同一份目录。
#[derive(Clone)]
pub struct AppState {
    /// 查询服务 (Facade)
    pub lookup: Arc<LookupManager>,
    /// 预加载的页面模板
    pub templates: Arc<Templates>,
}

impl AppState {
    /// 以查询服务构建状态并加载模板
    pub fn new(lookup: Arc<LookupManager>) -> Result<Self, WebError> {
        Ok(Self {
            lookup,
            templates: Arc::new(Templates::new()?),
        })
    }
}

// ============================================================
//  服务构建与启动
// ============================================================

/// 构建完整的路由树：单一页面 `/`，支持 GET 与 POST。
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::get_index).post(index::post_index))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 启动 HTTP 监听，直到 `shutdown` 完成后优雅退出。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
/// * `shutdown` - 退出信号
pub async fn start_server<F>(
    state: AppState,
    bind_addr: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("tickerview listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
