use serde::{Deserialize, Serialize};

/// # Summary
/// 渲染完成的图表图像，驻留内存随响应返回。
///
/// # Invariants
/// - 每次请求独立生成，不写入任何共享文件路径。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartImage {
    // MIME 类型 (例如: image/svg+xml)
    pub content_type: String,
    // 图像原始字节
    pub bytes: Vec<u8>,
}

impl ChartImage {
    /// 构建 SVG 图像。
    pub fn svg(document: String) -> Self {
        Self {
            content_type: "image/svg+xml".to_string(),
            bytes: document.into_bytes(),
        }
    }
}
