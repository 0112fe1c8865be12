use axum::Form;
use axum::extract::State;
use axum::response::Html;
use tracing::{Instrument, error, info_span};
use uuid::Uuid;

use tickerview_manager::lookup::LookupManager;

use crate::error::WebError;
use crate::server::AppState;
use crate::types::{PageView, SearchForm};

/// 查询页面
///
/// 展示完整的公司目录，无结果、无错误。
pub async fn get_index(State(state): State<AppState>) -> Result<Html<String>, WebError> {
    let view = PageView::idle(state.lookup.directory(), None);
    Ok(Html(state.templates.render_page(&view)?))
}

/// 提交查询
///
/// 表单不构成查询时与 GET 等价；查询失败时页面仍完整展示目录，并附带错误提示。
pub async fn post_index(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, WebError> {
    let view = build_page(&state.lookup, form).await;
    Ok(Html(state.templates.render_page(&view)?))
}

/// # Summary
/// 根据表单执行一次请求的状态流转，产出页面视图。
///
/// # Logic
/// 1. 缺少触发标记或公司名称：返回初始页面 (保留已选公司)。
/// 2. 在带请求 ID 的 span 中执行查询。
/// 3. 成功填充结果；失败记录详细原因，页面只展示用户提示。
pub async fn build_page(lookup: &LookupManager, form: SearchForm) -> PageView {
    let directory = lookup.directory();
    let Some(company) = form.search_request().map(str::to_string) else {
        return PageView::idle(directory, form.selected_company);
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("lookup", %request_id, company = %company);
    match lookup.lookup(&company).instrument(span.clone()).await {
        Ok(report) => PageView::success(directory, company, report),
        Err(err) => {
            span.in_scope(|| error!(symbol = %err.symbol(), error = %err, "Lookup failed"));
            PageView::failure(directory, company, &err)
        }
    }
}
