//! # `tickerview-manager` - 应用服务层
//!
//! 编排一次股票查询：名称解析 → 报价 → 历史日线 → 蜡烛图。
//! 编译期仅依赖 `tickerview-core` 中的 Trait 定义，具体实现由 DI 容器注入。

pub mod lookup;
