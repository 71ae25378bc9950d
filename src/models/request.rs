//! 论文请求数据

use serde::Deserialize;

/// GitHub Issue 记录（只取用到的字段）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueRecord {
    #[serde(default)]
    pub title: String,
    /// Issue 正文可能为 null
    #[serde(default)]
    pub body: Option<String>,
}

impl IssueRecord {
    pub fn body_text(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

/// 从 Issue 表单中解析出的请求
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperRequest {
    /// `### Paper query` 段落
    pub paper_query: String,
    /// `### Slug (optional)` 段落，空字符串表示未指定
    pub slug: String,
    /// `### Notes (optional)` 段落
    pub notes: String,
    /// Issue 标题，query 为空时作为兜底
    pub issue_title: String,
}

impl PaperRequest {
    /// 实际用于检索的 query：优先表单内容，否则使用 Issue 标题
    pub fn effective_query(&self) -> &str {
        if self.paper_query.is_empty() {
            self.issue_title.trim()
        } else {
            &self.paper_query
        }
    }

    pub fn has_notes(&self) -> bool {
        !self.notes.is_empty()
    }
}
