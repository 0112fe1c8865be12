use chrono::{Duration, NaiveDate};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use tickerview_core::chart::entity::ChartImage;
use tickerview_core::chart::error::ChartError;
use tickerview_core::chart::port::ChartRenderer;
use tickerview_core::config::ChartConfig;
use tickerview_core::market::entity::DailyBar;
use tracing::debug;

// 阳线 / 阴线配色
const RISING: RGBColor = RGBColor(0x00, 0x63, 0x40);
const FALLING: RGBColor = RGBColor(0xa0, 0x21, 0x28);

// 坐标轴标签占用的像素，用于估算蜡烛宽度
const AXIS_MARGIN_PX: u32 = 120;

/// # Summary
/// 基于 `plotters` SVG 后端的蜡烛图渲染器。
///
/// # Invariants
/// - 无内部状态，可被多个请求并发调用。
/// - 输出完全驻留内存，不触碰文件系统。
#[derive(Debug, Clone)]
pub struct SvgCandlestickRenderer {
    width: u32,
    height: u32,
}

impl SvgCandlestickRenderer {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
        }
    }

    /// 按可见天数估算蜡烛实体宽度 (像素)。
    fn candle_width(&self, span_days: i64) -> u32 {
        let slots = u32::try_from(span_days).unwrap_or(1).max(1);
        (self.width.saturating_sub(AXIS_MARGIN_PX) / slots)
            .saturating_mul(3)
            .saturating_div(5)
            .clamp(2, 40)
    }

    fn draw(
        &self,
        buffer: &mut String,
        bars: &[DailyBar],
        title: &str,
        x_range: (NaiveDate, NaiveDate),
        y_range: (f64, f64),
    ) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
        let root = SVGBackend::with_string(buffer, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 22))
            .margin(12)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

        chart
            .configure_mesh()
            .light_line_style(WHITE)
            .x_labels(8)
            .x_label_formatter(&|d: &NaiveDate| d.format("%b %d").to_string())
            .y_desc("Price")
            .draw()?;

        let width = self.candle_width((x_range.1 - x_range.0).num_days());
        chart.draw_series(bars.iter().map(|bar| {
            CandleStick::new(
                bar.date,
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                RISING.filled(),
                FALLING.filled(),
                width,
            )
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Default for SvgCandlestickRenderer {
    fn default() -> Self {
        Self::new(&ChartConfig::default())
    }
}

/// # Summary
/// 计算纵轴范围，上下各留 5% 空白。
///
/// # Logic
/// 1. 取所有日线的最低价与最高价。
/// 2. 价格完全不变时按价格的 1% (至少 1.0) 撑开范围，避免坐标轴退化。
fn price_bounds(bars: &[DailyBar]) -> (f64, f64) {
    let low = bars.iter().map(|b| b.low).fold(f64::INFINITY, f64::min);
    let high = bars.iter().map(|b| b.high).fold(f64::NEG_INFINITY, f64::max);
    let mut pad = (high - low) * 0.05;
    if pad <= 0.0 {
        pad = (high.abs() * 0.01).max(1.0);
    }
    (low - pad, high + pad)
}

impl ChartRenderer for SvgCandlestickRenderer {
    /// # Summary
    /// 将日线序列渲染为 SVG 蜡烛图。
    ///
    /// # Logic
    /// 1. 空序列直接拒绝。
    /// 2. 横轴在首尾各扩展一天，保证首尾蜡烛完整可见。
    /// 3. 绘制网格、坐标轴与蜡烛，写入内存字符串。
    fn render_candlestick(&self, bars: &[DailyBar], title: &str) -> Result<ChartImage, ChartError> {
        let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
            return Err(ChartError::EmptySeries);
        };

        let x_range = (first.date - Duration::days(1), last.date + Duration::days(1));
        let y_range = price_bounds(bars);

        let mut document = String::new();
        self.draw(&mut document, bars, title, x_range, y_range)
            .map_err(|e| ChartError::Render(e.to_string()))?;

        debug!(bars = bars.len(), bytes = document.len(), "Rendered candlestick chart");
        Ok(ChartImage::svg(document))
    }
}
