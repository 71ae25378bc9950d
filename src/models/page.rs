//! 生成的页面

use super::variant::Variant;

/// 某个版本的完整 HTML 文档
///
/// 每次运行重新生成，写盘时直接覆盖
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub variant: Variant,
    pub html: String,
}
