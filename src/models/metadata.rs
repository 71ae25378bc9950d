//! 论文元数据

/// arXiv 返回的原始条目
///
/// `ArxivEntry::default()` 表示元数据不可用
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArxivEntry {
    pub title: String,
    pub summary: String,
    /// `YYYY-MM-DD`
    pub published: String,
    pub authors: Vec<String>,
}

impl ArxivEntry {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.summary.is_empty()
            && self.published.is_empty()
            && self.authors.is_empty()
    }
}

/// 下游各阶段使用的论文元数据（构建后只读）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperMetadata {
    pub title: String,
    pub title_zh: String,
    pub summary: String,
    pub authors: Vec<String>,
    pub published: String,
    pub venue: String,
    pub arxiv_id: String,
}

impl PaperMetadata {
    /// 只有原始 query 时的默认元数据
    pub fn from_query(query: &str, arxiv_id: &str) -> Self {
        Self {
            title: query.to_string(),
            title_zh: String::new(),
            summary: String::new(),
            authors: Vec::new(),
            published: String::new(),
            venue: "arXiv".to_string(),
            arxiv_id: arxiv_id.to_string(),
        }
        .finish()
    }

    /// 用 arXiv 条目补充元数据，空字段不覆盖已有值
    pub fn enriched_with(mut self, entry: ArxivEntry) -> Self {
        if !entry.title.is_empty() {
            self.title = entry.title;
            // 中文标题跟随新标题重新兜底
            self.title_zh.clear();
        }
        if !entry.summary.is_empty() {
            self.summary = entry.summary;
        }
        if !entry.published.is_empty() {
            self.published = entry.published;
        }
        if !entry.authors.is_empty() {
            self.authors = entry.authors;
        }
        self.finish()
    }

    fn finish(mut self) -> Self {
        if self.title_zh.is_empty() {
            self.title_zh = self.title.clone();
        }
        self
    }

    pub fn authors_line(&self) -> String {
        self.authors.join(", ")
    }

    /// 卡片徽章文字
    pub fn badge(&self) -> String {
        if self.arxiv_id.is_empty() {
            "Paper".to_string()
        } else {
            format!("arXiv {}", self.arxiv_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_defaults() {
        let meta = PaperMetadata::from_query("Diffusion models for X", "");
        assert_eq!(meta.title, "Diffusion models for X");
        assert_eq!(meta.title_zh, "Diffusion models for X");
        assert_eq!(meta.venue, "arXiv");
        assert!(meta.authors.is_empty());
        assert_eq!(meta.badge(), "Paper");
    }

    #[test]
    fn test_empty_entry_keeps_query_title() {
        let meta = PaperMetadata::from_query("2301.00001: Example Paper", "2301.00001")
            .enriched_with(ArxivEntry::default());
        assert_eq!(meta.title, "2301.00001: Example Paper");
        assert_eq!(meta.badge(), "arXiv 2301.00001");
    }

    #[test]
    fn test_enriched_with_entry() {
        let entry = ArxivEntry {
            title: "Example Paper".to_string(),
            summary: "We study examples.".to_string(),
            published: "2023-01-01".to_string(),
            authors: vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()],
        };
        let meta = PaperMetadata::from_query("2301.00001", "2301.00001").enriched_with(entry);
        assert_eq!(meta.title, "Example Paper");
        assert_eq!(meta.title_zh, "Example Paper");
        assert_eq!(meta.authors_line(), "Ada Lovelace, Alan Turing");
        assert_eq!(meta.published, "2023-01-01");
    }
}
