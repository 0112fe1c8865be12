//! # `tickerview-web` - HTTP 页面层
//!
//! 本 crate 是 tickerview 的唯一 HTTP 入口。
//! 使用 `axum` 构建路由，使用 `minijinja` 渲染 HTML 页面。
//!
//! ## 架构职责
//! - 接收浏览器提交的公司选择表单
//! - 调用下层 `LookupManager` 完成查询
//! - 将查询结果或错误转换为视图模型并渲染同一张页面

pub mod error;
pub mod routes;
pub mod server;
pub mod template;
pub mod types;
