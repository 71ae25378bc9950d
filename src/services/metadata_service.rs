//! 元数据服务 - 业务能力层
//!
//! 元数据和 PDF 正文都只是补充信息：任何失败都记录警告并退回空值，
//! 不会中断流程。

use tracing::{info, warn};

use crate::clients::ArxivClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{ArxivEntry, PaperMetadata};

/// 解析出的论文资料
#[derive(Debug, Clone)]
pub struct PaperSource {
    pub metadata: PaperMetadata,
    /// PDF 前几页的正文，可能为空
    pub context_text: String,
}

/// 元数据服务
pub struct MetadataService {
    arxiv: ArxivClient,
}

impl MetadataService {
    /// 创建新的元数据服务
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            arxiv: ArxivClient::new(config)?,
        })
    }

    /// 根据 query 和 arXiv 编号构建论文资料
    ///
    /// 没有编号时直接使用 query 作为标题，不访问网络
    pub async fn resolve(&self, query: &str, arxiv_id: &str) -> PaperSource {
        let metadata = PaperMetadata::from_query(query, arxiv_id);

        if arxiv_id.is_empty() {
            info!("ℹ️ 未识别到 arXiv 编号，使用原始 query 作为标题");
            return PaperSource {
                metadata,
                context_text: String::new(),
            };
        }

        let entry = self.fetch_entry_or_default(arxiv_id).await;
        let context_text = self.extract_text_or_default(arxiv_id).await;

        PaperSource {
            metadata: metadata.enriched_with(entry),
            context_text,
        }
    }

    async fn fetch_entry_or_default(&self, arxiv_id: &str) -> ArxivEntry {
        match self.arxiv.fetch_entry(arxiv_id).await {
            Ok(entry) if entry.is_empty() => {
                warn!("⚠️ arXiv 中没有 {} 的条目，使用原始 query", arxiv_id);
                entry
            }
            Ok(entry) => {
                info!("✓ arXiv 元数据: {}", entry.title);
                entry
            }
            Err(e) => {
                warn!("⚠️ arXiv 元数据获取失败，继续使用原始 query: {}", e);
                ArxivEntry::default()
            }
        }
    }

    async fn extract_text_or_default(&self, arxiv_id: &str) -> String {
        match self.arxiv.extract_pdf_text(arxiv_id).await {
            Ok(text) => {
                info!("✓ PDF 正文提取完成: {} 字符", text.chars().count());
                text
            }
            Err(e) => {
                warn!("⚠️ PDF 正文提取失败，继续使用空上下文: {}", e);
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_id_skips_network() {
        let config = Config {
            arxiv_api_base: "http://127.0.0.1:9/api/query".to_string(),
            arxiv_pdf_base: "http://127.0.0.1:9/pdf".to_string(),
            ..Config::default()
        };
        let service = MetadataService::new(&config).unwrap();

        let source = tokio_test::block_on(service.resolve("Attention Is All You Need", ""));
        assert_eq!(source.metadata.title, "Attention Is All You Need");
        assert_eq!(source.metadata.badge(), "Paper");
        assert!(source.context_text.is_empty());
    }
}
