pub mod arxiv_client;
pub mod github_client;
pub mod llm_client;

pub use arxiv_client::ArxivClient;
pub use github_client::GithubClient;
pub use llm_client::LlmClient;
