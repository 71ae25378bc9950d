//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责单次运行的调度：检查配置、选择运行模式、汇总结果。
//!
//! ## 层次关系
//!
//! ```text
//! run_processor (处理一个 Issue，选择 RunMode)
//!     ↓
//! workflow::PaperFlow (prepare → generate)
//!     ↓
//! services (能力层：extract / metadata / synthesize / assets / pages / index)
//!     ↓
//! clients (GitHub / arXiv / LLM)
//! ```
//!
//! ## 设计原则
//!
//! 1. **向下依赖**：编排层 → workflow → services → clients
//! 2. **无业务逻辑**：只做调度和统计，不做具体业务判断

pub mod run_processor;

pub use run_processor::{App, RunMode, RunOutcome};
