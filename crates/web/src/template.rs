//! # HTML 模板
//!
//! 页面模板在编译期嵌入二进制，启动时加载一次。

use minijinja::Environment;

use crate::error::WebError;
use crate::types::PageView;

const INDEX_TEMPLATE_NAME: &str = "index.html";
const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// # Summary
/// 预加载的模板环境。
///
/// # Invariants
/// - 模板以 `.html` 命名，`minijinja` 自动对所有插值做 HTML 转义。
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    /// # Summary
    /// 加载并校验内嵌模板。
    ///
    /// # Returns
    /// 模板语法错误时返回 `WebError::Template`。
    pub fn new() -> Result<Self, WebError> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE_NAME, INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    /// 渲染整页视图
    pub fn render_page(&self, view: &PageView) -> Result<String, WebError> {
        let template = self.env.get_template(INDEX_TEMPLATE_NAME)?;
        Ok(template.render(view)?)
    }
}
