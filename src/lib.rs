//! # WAP Paper Pages
//!
//! 根据 GitHub Issue 中的论文请求，生成四个版本的论文讲解页面并更新站点首页
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 只负责和外部服务通信
//! - `GithubClient` - 读取 Issue
//! - `ArxivClient` - arXiv 元数据与 PDF 正文
//! - `LlmClient` - 文本生成
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `field_extractor` / `identifier` - 解析 Issue 表单、识别 arXiv 编号
//! - `MetadataService` - 元数据与正文，失败时退回默认值
//! - `ContentSynthesizer` - 页面与卡片摘要生成
//! - `AssetProvisioner` / `PageWriter` / `IndexMerger` - 写入站点文件
//! - `prompt_handoff` - 写出交接说明
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一篇论文"的完整处理流程
//! - `RunCtx` - 上下文封装（Issue 编号 + slug）
//! - `PaperFlow` - 流程编排（prepare → generate）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/run_processor` - 检查配置、选择运行模式、汇总结果
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{IndexCard, PaperMetadata, PaperRequest, Slug, Variant};
pub use orchestrator::{App, RunMode, RunOutcome};
pub use services::MergeOutcome;
pub use workflow::{PaperFlow, RunCtx, Stage};
