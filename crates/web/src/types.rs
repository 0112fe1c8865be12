//! # 视图模型层
//!
//! 将领域模型转化为模板渲染所需的轻量结构体。

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tickerview_core::chart::entity::ChartImage;
use tickerview_core::directory::SymbolDirectory;
use tickerview_manager::lookup::{LookupError, StockReport};

// ============================================================
//  请求表单
// ============================================================

/// 页面提交的查询表单
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    /// 目录中的展示名称，或用户直接输入的代码
    pub selected_company: Option<String>,
    /// 查询触发标记，只有点击查询按钮时才会提交
    pub search_trigger: Option<String>,
}

impl SearchForm {
    /// # Summary
    /// 判断表单是否构成一次查询。
    ///
    /// # Logic
    /// 触发标记非空且公司名称去除首尾空白后非空时，返回去除空白后的名称。
    pub fn search_request(&self) -> Option<&str> {
        let triggered = self
            .search_trigger
            .as_deref()
            .is_some_and(|flag| !flag.is_empty());
        if !triggered {
            return None;
        }
        self.selected_company
            .as_deref()
            .map(str::trim)
            .filter(|company| !company.is_empty())
    }
}

// ============================================================
//  页面视图
// ============================================================

/// 目录条目视图
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CompanyView {
    pub name: String,
    pub symbol: String,
}

/// 地区视图 - 对应下拉框中的 optgroup
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RegionView {
    pub region: String,
    pub companies: Vec<CompanyView>,
}

/// 查询结果视图
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResultView {
    /// 公司全称
    pub name: String,
    /// 股票代码
    pub symbol: String,
    /// 当前价
    pub price: Option<f64>,
    /// 当日最高
    pub high: Option<f64>,
    /// 当日最低
    pub low: Option<f64>,
    /// 涨跌幅 (%)
    pub percent_change: Option<f64>,
    /// 蜡烛图，`data:` URI 形式内嵌
    pub chart: String,
    /// 检索时间
    pub last_updated: String,
}

/// 整页视图模型
///
/// # Invariants
/// - `result` 与 `error` 至多一个存在。
/// - `directory` 始终完整。
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageView {
    pub result: Option<ResultView>,
    pub error: Option<String>,
    pub directory: Vec<RegionView>,
    pub selected_company: Option<String>,
}

impl PageView {
    /// 无结果、无错误的初始页面
    pub fn idle(directory: &SymbolDirectory, selected_company: Option<String>) -> Self {
        Self {
            result: None,
            error: None,
            directory: directory_view(directory),
            selected_company,
        }
    }

    /// 查询成功的页面
    pub fn success(directory: &SymbolDirectory, selected_company: String, report: StockReport) -> Self {
        Self {
            result: Some(report.into()),
            error: None,
            directory: directory_view(directory),
            selected_company: Some(selected_company),
        }
    }

    /// 查询失败的页面，只展示面向用户的提示
    pub fn failure(directory: &SymbolDirectory, selected_company: String, err: &LookupError) -> Self {
        Self {
            result: None,
            error: Some(err.user_message().to_string()),
            directory: directory_view(directory),
            selected_company: Some(selected_company),
        }
    }
}

/// 将目录展开为模板友好的嵌套列表
pub fn directory_view(directory: &SymbolDirectory) -> Vec<RegionView> {
    directory
        .regions()
        .iter()
        .map(|region| RegionView {
            region: region.name.clone(),
            companies: region
                .companies
                .iter()
                .map(|c| CompanyView {
                    name: c.name.clone(),
                    symbol: c.symbol.clone(),
                })
                .collect(),
        })
        .collect()
}

/// 将图像编码为 `data:` URI
pub fn chart_data_uri(chart: &ChartImage) -> String {
    format!("data:{};base64,{}", chart.content_type, STANDARD.encode(&chart.bytes))
}

// ============================================================
//  领域模型 → 视图 惯用转换 (impl From<T>)
// ============================================================

impl From<StockReport> for ResultView {
    fn from(report: StockReport) -> Self {
        Self {
            chart: chart_data_uri(&report.chart),
            name: report.quote.name,
            symbol: report.quote.symbol,
            price: report.quote.price,
            high: report.quote.day_high,
            low: report.quote.day_low,
            percent_change: report.quote.percent_change,
            last_updated: report.last_updated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(company: Option<&str>, trigger: Option<&str>) -> SearchForm {
        SearchForm {
            selected_company: company.map(String::from),
            search_trigger: trigger.map(String::from),
        }
    }

    #[test]
    fn test_search_request_requires_trigger_and_company() {
        assert_eq!(form(Some("Apple"), Some("1")).search_request(), Some("Apple"));
        assert_eq!(form(Some("  Apple "), Some("1")).search_request(), Some("Apple"));
        assert_eq!(form(Some("Apple"), None).search_request(), None);
        assert_eq!(form(Some("Apple"), Some("")).search_request(), None);
        assert_eq!(form(None, Some("1")).search_request(), None);
        assert_eq!(form(Some("   "), Some("1")).search_request(), None);
    }

    #[test]
    fn test_directory_view_keeps_order() {
        let view = directory_view(&SymbolDirectory::builtin());
        let regions: Vec<_> = view.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["US", "India", "Global"]);
        assert_eq!(view[0].companies[0].name, "Apple");
        assert_eq!(view[2].companies[4].symbol, "BIDU");
    }

    #[test]
    fn test_chart_data_uri() {
        let chart = ChartImage::svg("<svg/>".to_string());
        assert_eq!(chart_data_uri(&chart), "data:image/svg+xml;base64,PHN2Zy8+");
    }
}
