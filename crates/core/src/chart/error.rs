use thiserror::Error;

/// # Summary
/// 图表渲染错误枚举。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChartError {
    /// 输入序列为空，无法确定坐标范围
    #[error("Cannot render an empty series")]
    EmptySeries,
    /// 渲染后端失败
    #[error("Render error: {0}")]
    Render(String),
}
