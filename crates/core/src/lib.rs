//! # `tickerview-core` - 领域内核
//!
//! 定义行情查询系统的实体、端口 (Port) 与错误类型。
//! 本 crate 不包含任何 I/O 实现，具体的数据源与图表渲染由外部适配器 crate 提供，
//! 通过 `Arc<dyn Trait>` 注入到应用服务层。

pub mod chart;
pub mod common;
pub mod config;
pub mod directory;
pub mod market;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;
