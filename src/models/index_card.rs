//! 首页论文卡片

use super::metadata::PaperMetadata;
use super::slug::Slug;
use super::variant::Variant;

/// 首页卡片的固定分类标签
pub const DEFAULT_TAGS: [&str; 1] = ["WAP"];

/// 四个版本的一句话摘要
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardSummaries {
    pub hs_en: String,
    pub grad_en: String,
    pub hs_zh: String,
    pub grad_zh: String,
}

impl CardSummaries {
    pub fn get(&self, variant: Variant) -> &str {
        match variant {
            Variant::HsEn => &self.hs_en,
            Variant::GradEn => &self.grad_en,
            Variant::HsZh => &self.hs_zh,
            Variant::GradZh => &self.grad_zh,
        }
    }

    pub fn set(&mut self, variant: Variant, text: impl Into<String>) {
        let slot = match variant {
            Variant::HsEn => &mut self.hs_en,
            Variant::GradEn => &mut self.grad_en,
            Variant::HsZh => &mut self.hs_zh,
            Variant::GradZh => &mut self.grad_zh,
        };
        *slot = text.into();
    }

    pub fn filled_count(&self) -> usize {
        Variant::ALL.iter().filter(|v| !self.get(**v).is_empty()).count()
    }
}

/// 一篇论文在首页上的卡片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexCard {
    pub slug: Slug,
    pub title_en: String,
    pub title_zh: String,
    pub summaries: CardSummaries,
    pub tags: Vec<String>,
    pub arxiv_id: String,
    /// `arXiv <id>` 或 `Paper`
    pub badge: String,
}

impl IndexCard {
    pub fn new(slug: Slug, metadata: &PaperMetadata, summaries: CardSummaries) -> Self {
        Self {
            slug,
            title_en: metadata.title.clone(),
            title_zh: metadata.title_zh.clone(),
            summaries,
            tags: DEFAULT_TAGS.iter().map(|t| t.to_string()).collect(),
            arxiv_id: metadata.arxiv_id.clone(),
            badge: metadata.badge(),
        }
    }

    /// 搜索用的 `data-title`
    pub fn search_title(&self) -> String {
        format!("{} {}", self.title_en, self.title_zh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_from_metadata() {
        let meta = PaperMetadata::from_query("Example Paper", "2301.00001");
        let mut summaries = CardSummaries::default();
        summaries.set(Variant::HsZh, "一句话");
        let card = IndexCard::new(Slug::new("Example Paper"), &meta, summaries);

        assert_eq!(card.badge, "arXiv 2301.00001");
        assert_eq!(card.tags, vec!["WAP".to_string()]);
        assert_eq!(card.summaries.get(Variant::HsZh), "一句话");
        assert_eq!(card.summaries.filled_count(), 1);
        assert_eq!(card.search_title(), "Example Paper Example Paper");
    }
}
