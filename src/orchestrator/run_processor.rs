//! 单次运行处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **配置检查**：按运行模式检查必需的凭据
//! 2. **流程调度**：共用阶段交给 `PaperFlow::prepare`，再按模式分派
//! 3. **统计输出**：记录写入页面数和首页合并结果

use anyhow::{Context, Result};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::models::Slug;
use crate::services::{write_handoff, HandoffInput, MergeOutcome};
use crate::utils::logging;
use crate::workflow::paper_flow::{enter, Stage};
use crate::workflow::PaperFlow;

/// 运行模式
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// 直接调用生成服务，写入页面并更新首页
    Generate {
        repo_path: PathBuf,
        prompt_file: PathBuf,
    },
    /// 只写出一份交接说明，不调用生成服务，不改动仓库
    PromptHandoff {
        output_path: PathBuf,
        prompt_file: Option<PathBuf>,
    },
}

impl RunMode {
    pub fn name(&self) -> &'static str {
        match self {
            RunMode::Generate { .. } => "generate",
            RunMode::PromptHandoff { .. } => "prompt-handoff",
        }
    }
}

impl Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// 单次运行结果
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub slug: Slug,
    pub mode: RunMode,
    pub pages_written: usize,
    /// 交接模式下为 None
    pub index_outcome: Option<MergeOutcome>,
}

impl RunOutcome {
    /// 成功后打印到 stdout 的一行确认信息
    pub fn confirmation(&self) -> String {
        match &self.mode {
            RunMode::Generate { .. } => format!("Generated pages for {}", self.slug),
            RunMode::PromptHandoff { output_path, .. } => format!(
                "Wrote prompt for {} to {}",
                self.slug,
                output_path.display()
            ),
        }
    }
}

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 处理一个 Issue
    pub async fn run(&self, issue_number: u64, mode: RunMode) -> Result<RunOutcome> {
        logging::log_startup(issue_number, mode.name());

        self.config.require_github().map_err(AppError::from)?;
        if let RunMode::Generate { .. } = mode {
            self.config.require_llm().map_err(AppError::from)?;
        }

        let flow = PaperFlow::new(&self.config)?;
        let prepared = flow
            .prepare(issue_number)
            .await
            .with_context(|| format!("Issue #{} 解析失败", issue_number))?;

        let outcome = match &mode {
            RunMode::Generate {
                repo_path,
                prompt_file,
            } => {
                let instructions = read_prompt_file(prompt_file).await?;
                let report = flow
                    .generate(&prepared, repo_path, &instructions)
                    .await
                    .with_context(|| format!("{} 生成失败", prepared.ctx))?;

                RunOutcome {
                    slug: prepared.slug.clone(),
                    mode: mode.clone(),
                    pages_written: report.pages_written,
                    index_outcome: Some(report.index_outcome),
                }
            }
            RunMode::PromptHandoff {
                output_path,
                prompt_file,
            } => {
                let instructions = match prompt_file {
                    Some(path) => Some(read_prompt_file(path).await?),
                    None => None,
                };

                enter(&prepared.ctx, Stage::WritePrompt);
                let input = HandoffInput {
                    slug: &prepared.slug,
                    request: &prepared.request,
                    metadata: &prepared.source.metadata,
                    instructions: instructions.as_deref(),
                };
                write_handoff(output_path, &input).await?;
                enter(&prepared.ctx, Stage::Done);

                RunOutcome {
                    slug: prepared.slug.clone(),
                    mode: mode.clone(),
                    pages_written: 0,
                    index_outcome: None,
                }
            }
        };

        let index_note = outcome
            .index_outcome
            .map(|o| o.describe())
            .unwrap_or("untouched");
        logging::log_run_complete(outcome.slug.as_str(), outcome.pages_written, index_note);
        info!("{}", outcome.confirmation());

        Ok(outcome)
    }
}

async fn read_prompt_file(path: &Path) -> Result<String> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;
    Ok(content)
}
