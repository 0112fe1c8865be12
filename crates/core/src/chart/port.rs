use crate::chart::entity::ChartImage;
use crate::chart::error::ChartError;
use crate::market::entity::DailyBar;

/// # Summary
/// K 线图渲染器接口（外部渲染引擎）。
///
/// # Invariants
/// - 同步 CPU 计算，调用方负责将其移出异步执行器 (例如 `spawn_blocking`)。
/// - 实现必须是无状态或内部同步的，允许多个请求并发渲染。
pub trait ChartRenderer: Send + Sync {
    /// # Summary
    /// 将日线序列渲染为蜡烛图。
    ///
    /// # Arguments
    /// * `bars`: 按时间升序排列的日线。
    /// * `title`: 图表标题。
    ///
    /// # Returns
    /// 成功返回内存中的图像。
    fn render_candlestick(&self, bars: &[DailyBar], title: &str) -> Result<ChartImage, ChartError>;
}
