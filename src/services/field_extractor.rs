//! Issue 表单字段提取 - 业务能力层
//!
//! Issue 表单把每个字段渲染为 `### <字段名>` 标题加内容，
//! 未填写的可选字段会被替换为 `_No response_`。

use crate::models::{IssueRecord, PaperRequest};

pub const SECTION_PAPER_QUERY: &str = "Paper query";
pub const SECTION_SLUG: &str = "Slug (optional)";
pub const SECTION_NOTES: &str = "Notes (optional)";

/// Issue 表单对空白可选字段的占位文本
pub const NO_RESPONSE: &str = "_No response_";

const HEADING_PREFIX: &str = "### ";

/// 提取某个段落：从 `### <section>` 之后到下一个 `\n### ` 或文本结尾，去掉首尾空白
///
/// 段落不存在或内容为占位文本时返回空字符串
pub fn extract_section(body: &str, section: &str) -> String {
    let heading = format!("{}{}", HEADING_PREFIX, section);
    let Some(start) = body.find(&heading) else {
        return String::new();
    };

    let rest = &body[start + heading.len()..];
    let end = rest.find("\n### ").unwrap_or(rest.len());
    let value = rest[..end].trim();

    if value == NO_RESPONSE {
        String::new()
    } else {
        value.to_string()
    }
}

/// 解析 Issue 正文
pub fn parse_issue_body(body: &str) -> PaperRequest {
    PaperRequest {
        paper_query: extract_section(body, SECTION_PAPER_QUERY),
        slug: extract_section(body, SECTION_SLUG),
        notes: extract_section(body, SECTION_NOTES),
        issue_title: String::new(),
    }
}

/// 解析整个 Issue（正文 + 标题兜底）
pub fn parse_issue(issue: &IssueRecord) -> PaperRequest {
    PaperRequest {
        issue_title: issue.title.clone(),
        ..parse_issue_body(issue.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_with_no_response_slug() {
        let body = "### Paper query\nDiffusion models for X\n### Slug (optional)\n_No response_";
        let request = parse_issue_body(body);
        assert_eq!(request.paper_query, "Diffusion models for X");
        assert_eq!(request.slug, "");
        assert_eq!(request.notes, "");
    }

    #[test]
    fn test_full_form_body() {
        let body = "### Paper query\n\n2310.12345: Some Paper\n\n### Slug (optional)\n\nsome-paper\n\n### Notes (optional)\n\nFocus on the method.\nSecond line.\n";
        let request = parse_issue_body(body);
        assert_eq!(request.paper_query, "2310.12345: Some Paper");
        assert_eq!(request.slug, "some-paper");
        assert_eq!(request.notes, "Focus on the method.\nSecond line.");
    }

    #[test]
    fn test_sections_in_any_order_and_missing() {
        let body = "### Notes (optional)\nread carefully\n### Paper query\nAttention Is All You Need";
        let request = parse_issue_body(body);
        assert_eq!(request.paper_query, "Attention Is All You Need");
        assert_eq!(request.notes, "read carefully");
        assert_eq!(request.slug, "");
    }

    #[test]
    fn test_sentinel_is_literal() {
        let body = "### Notes (optional)\n_No response_ but actually something";
        assert_eq!(
            extract_section(body, SECTION_NOTES),
            "_No response_ but actually something"
        );
    }

    #[test]
    fn test_empty_body_falls_back_to_title() {
        let issue = IssueRecord {
            title: "Attention Is All You Need".to_string(),
            body: None,
        };
        let request = parse_issue(&issue);
        assert_eq!(request.paper_query, "");
        assert_eq!(request.effective_query(), "Attention Is All You Need");
    }
}
