//! # `tickerview-feed` - 行情源适配器
//!
//! 实现 `tickerview_core::market::port::MarketDataProvider`，从 Yahoo Finance 拉取报价与日线。

pub mod yahoo;
