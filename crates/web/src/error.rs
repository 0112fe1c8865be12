//! # 页面层统一错误处理
//!
//! 查询失败不属于此处：它们被渲染进页面的错误区域。
//! 这里只处理页面本身无法生成的情况。

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

/// 页面层错误枚举
#[derive(Error, Debug)]
pub enum WebError {
    /// 模板加载或渲染失败 (500)
    #[error("模板渲染失败: {0}")]
    Template(#[from] minijinja::Error),
}

/// 将 `WebError` 转换为 axum 的 HTTP 响应
impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        // 内部错误只记录日志，不向客户端透传细节
        tracing::error!("内部服务错误: {}", self);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>500 Internal Server Error</h1>"),
        )
            .into_response()
    }
}
