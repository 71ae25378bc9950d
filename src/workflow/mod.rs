pub mod paper_flow;
pub mod run_ctx;

pub use paper_flow::{GenerationReport, PaperFlow, PreparedPaper, Stage};
pub use run_ctx::RunCtx;
