//! 运行上下文
//!
//! 封装"我正在处理哪个 Issue、哪篇论文"这一信息，只用于日志

use std::fmt::Display;

use crate::models::Slug;

/// 单次运行的上下文
#[derive(Debug, Clone)]
pub struct RunCtx {
    /// Issue 编号
    pub issue_number: u64,

    /// slug 推导出来之前为空
    pub slug: Option<Slug>,
}

impl RunCtx {
    pub fn new(issue_number: u64) -> Self {
        Self {
            issue_number,
            slug: None,
        }
    }

    pub fn with_slug(mut self, slug: Slug) -> Self {
        self.slug = Some(slug);
        self
    }
}

impl Display for RunCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.slug {
            Some(slug) => write!(f, "[Issue #{} slug#{}]", self.issue_number, slug),
            None => write!(f, "[Issue #{}]", self.issue_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let ctx = RunCtx::new(42);
        assert_eq!(ctx.to_string(), "[Issue #42]");
        let ctx = ctx.with_slug(Slug::new("Example Paper"));
        assert_eq!(ctx.to_string(), "[Issue #42 slug#example-paper]");
    }
}
