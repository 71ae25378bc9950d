//! 论文处理流程 - 流程层
//!
//! 核心职责：定义"一篇论文"的完整处理流程
//!
//! 流程顺序（线性，没有回退）：
//! 1. ingest → resolve_id → fetch_metadata → derive_slug（两种模式共用）
//! 2. provision_assets → synthesize_pages ×4 → write_chooser
//!    → synthesize_summaries → merge_index（直接生成模式）
//!
//! 任何阶段失败都直接返回错误，已写入的文件不回滚。

use std::fmt::Display;
use std::path::Path;
use tracing::info;

use crate::clients::GithubClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{IndexCard, PaperRequest, Slug, Variant};
use crate::services::{
    find_arxiv_id, parse_issue, AssetProvisioner, ContentSynthesizer, IndexMerger, MergeOutcome,
    MetadataService, PageInput, PageWriter, PaperSource,
};
use crate::workflow::run_ctx::RunCtx;

/// 流程阶段，仅用于日志
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    ResolveId,
    FetchMetadata,
    DeriveSlug,
    ProvisionAssets,
    SynthesizePage(Variant),
    WriteChooser,
    SynthesizeSummaries,
    MergeIndex,
    WritePrompt,
    Done,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Ingest => write!(f, "ingest"),
            Stage::ResolveId => write!(f, "resolve_id"),
            Stage::FetchMetadata => write!(f, "fetch_metadata"),
            Stage::DeriveSlug => write!(f, "derive_slug"),
            Stage::ProvisionAssets => write!(f, "provision_assets"),
            Stage::SynthesizePage(variant) => write!(f, "synthesize_page({})", variant),
            Stage::WriteChooser => write!(f, "write_chooser"),
            Stage::SynthesizeSummaries => write!(f, "synthesize_summaries"),
            Stage::MergeIndex => write!(f, "merge_index"),
            Stage::WritePrompt => write!(f, "write_prompt"),
            Stage::Done => write!(f, "done"),
        }
    }
}

pub(crate) fn enter(ctx: &RunCtx, stage: Stage) {
    info!("{} ▶ {}", ctx, stage);
}

/// 两种模式共用阶段的产物
#[derive(Debug, Clone)]
pub struct PreparedPaper {
    pub ctx: RunCtx,
    pub request: PaperRequest,
    pub arxiv_id: String,
    pub source: PaperSource,
    pub slug: Slug,
}

/// 直接生成模式的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub pages_written: usize,
    pub index_outcome: MergeOutcome,
}

/// 论文处理流程
///
/// - 只依赖业务能力（services）
/// - 生成服务只在 [`PaperFlow::generate`] 中创建，交接模式不需要 LLM 配置
pub struct PaperFlow {
    config: Config,
    github: GithubClient,
    metadata: MetadataService,
}

impl PaperFlow {
    pub fn new(config: &Config) -> AppResult<Self> {
        Ok(Self {
            config: config.clone(),
            github: GithubClient::new(config)?,
            metadata: MetadataService::new(config)?,
        })
    }

    /// ingest → resolve_id → fetch_metadata → derive_slug
    pub async fn prepare(&self, issue_number: u64) -> AppResult<PreparedPaper> {
        let ctx = RunCtx::new(issue_number);

        enter(&ctx, Stage::Ingest);
        let issue = self.github.fetch_issue(issue_number).await?;
        let request = parse_issue(&issue);
        let query = request.effective_query().to_string();
        info!("{} query: {}", ctx, crate::utils::truncate_text(&query, 80));

        enter(&ctx, Stage::ResolveId);
        let arxiv_id = find_arxiv_id(&query);
        if !arxiv_id.is_empty() {
            info!("{} arXiv 编号: {}", ctx, arxiv_id);
        }

        enter(&ctx, Stage::FetchMetadata);
        let source = self.metadata.resolve(&query, &arxiv_id).await;

        enter(&ctx, Stage::DeriveSlug);
        let slug = Slug::derive(&request.slug, &source.metadata.title, &query);
        let ctx = ctx.with_slug(slug.clone());
        info!("{} 标题: {}", ctx, source.metadata.title);

        Ok(PreparedPaper {
            ctx,
            request,
            arxiv_id,
            source,
            slug,
        })
    }

    /// provision_assets → synthesize_pages → write_chooser → synthesize_summaries → merge_index
    ///
    /// 每个页面生成后立即写入
    pub async fn generate(
        &self,
        prepared: &PreparedPaper,
        repo_path: &Path,
        instructions: &str,
    ) -> AppResult<GenerationReport> {
        let ctx = &prepared.ctx;
        let slug = &prepared.slug;
        let metadata = &prepared.source.metadata;
        let synthesizer = ContentSynthesizer::new(&self.config);

        enter(ctx, Stage::ProvisionAssets);
        let provisioner = AssetProvisioner::new(repo_path, self.config.baseline_slug.as_str());
        provisioner.ensure_assets(slug).await?;

        let writer = PageWriter::new(repo_path);
        let input = PageInput {
            slug,
            metadata,
            context_text: &prepared.source.context_text,
            notes: &prepared.request.notes,
            instructions,
        };

        let mut pages_written = 0;
        for variant in Variant::ALL {
            enter(ctx, Stage::SynthesizePage(variant));
            let page = synthesizer.generate_page(variant, &input).await?;
            writer.write_variant(slug, &page).await?;
            pages_written += 1;
        }

        enter(ctx, Stage::WriteChooser);
        writer.write_chooser(slug).await?;

        enter(ctx, Stage::SynthesizeSummaries);
        let summaries = synthesizer
            .generate_summaries(metadata, &prepared.request.notes)
            .await?;

        enter(ctx, Stage::MergeIndex);
        let card = IndexCard::new(slug.clone(), metadata, summaries);
        let merger = IndexMerger::new(repo_path, self.config.index_container_id.as_str());
        let index_outcome = merger.merge(&card).await?;

        enter(ctx, Stage::Done);
        Ok(GenerationReport {
            pages_written,
            index_outcome,
        })
    }
}
