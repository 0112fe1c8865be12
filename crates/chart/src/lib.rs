//! # `tickerview-chart` - 图表渲染适配器
//!
//! 实现 `tickerview_core::chart::port::ChartRenderer`，使用 `plotters` 输出 SVG 蜡烛图。

pub mod svg;
