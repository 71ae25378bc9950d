use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;

/// 程序配置
///
/// 加载顺序：默认值 → TOML 配置文件（可选）→ 环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- GitHub Issue 配置 ---
    pub github_api_base: String,
    /// `owner/repo`
    pub github_repository: String,
    pub github_token: String,
    // --- arXiv 配置 ---
    pub arxiv_api_base: String,
    pub arxiv_pdf_base: String,
    /// PDF 最多提取的页数
    pub pdf_max_pages: usize,
    /// PDF 提取文本的最大字符数
    pub pdf_max_chars: usize,
    /// 传给 LLM 的正文上下文最大字符数
    pub max_context_chars: usize,
    /// Issue / arXiv / PDF 请求超时（秒），不作用于 LLM 调用
    pub http_timeout_secs: u64,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    /// 卡片摘要调用的 token 上限
    pub summary_max_tokens: u32,
    // --- 站点结构 ---
    /// 提供基础样式与脚本的论文目录名（papers/<baseline_slug>/）
    pub baseline_slug: String,
    /// 首页中卡片容器的 id
    pub index_container_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_api_base: "https://api.github.com".to_string(),
            github_repository: String::new(),
            github_token: String::new(),
            arxiv_api_base: "https://export.arxiv.org/api/query".to_string(),
            arxiv_pdf_base: "https://arxiv.org/pdf".to_string(),
            pdf_max_pages: 6,
            pdf_max_chars: 12_000,
            max_context_chars: 12_000,
            http_timeout_secs: 60,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
            summary_max_tokens: 600,
            baseline_slug: "learning-to-discover-at-test-time".to_string(),
            index_container_id: "paper-list".to_string(),
        }
    }
}

impl Config {
    /// 默认值叠加环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 加载配置：可选的 TOML 文件，再叠加环境变量
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        match config_file {
            Some(path) => Ok(Self::from_toml_file(path)?.with_env_overrides()),
            None => Ok(Self::from_env()),
        }
    }

    /// 从 TOML 文件读取配置，缺失的字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileUnreadable {
            path: path.display().to_string(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            github_api_base: env("GITHUB_API_URL").unwrap_or(self.github_api_base),
            github_repository: env("GITHUB_REPOSITORY").unwrap_or(self.github_repository),
            github_token: env("GITHUB_TOKEN").unwrap_or(self.github_token),
            arxiv_api_base: env("ARXIV_API_BASE").unwrap_or(self.arxiv_api_base),
            arxiv_pdf_base: env("ARXIV_PDF_BASE").unwrap_or(self.arxiv_pdf_base),
            pdf_max_pages: parsed("PDF_MAX_PAGES").unwrap_or(self.pdf_max_pages),
            pdf_max_chars: parsed("PDF_MAX_CHARS").unwrap_or(self.pdf_max_chars),
            max_context_chars: parsed("MAX_CONTEXT_CHARS").unwrap_or(self.max_context_chars),
            http_timeout_secs: parsed("HTTP_TIMEOUT_SECS").unwrap_or(self.http_timeout_secs),
            llm_api_key: env("OPENAI_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: env("OPENAI_API_BASE").unwrap_or(self.llm_api_base_url),
            llm_model_name: env("OPENAI_MODEL").unwrap_or(self.llm_model_name),
            summary_max_tokens: parsed("SUMMARY_MAX_TOKENS").unwrap_or(self.summary_max_tokens),
            baseline_slug: env("BASELINE_SLUG").unwrap_or(self.baseline_slug),
            index_container_id: env("INDEX_CONTAINER_ID").unwrap_or(self.index_container_id),
        }
    }

    /// 读取 Issue 需要仓库名和 token
    pub fn require_github(&self) -> Result<(), ConfigError> {
        require("GITHUB_REPOSITORY", &self.github_repository)?;
        require("GITHUB_TOKEN", &self.github_token)
    }

    /// 直接生成模式需要 LLM 密钥
    pub fn require_llm(&self) -> Result<(), ConfigError> {
        require("OPENAI_API_KEY", &self.llm_api_key)
    }
}

/// 读取非空环境变量
fn env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// 读取并解析环境变量，解析失败视为未设置
fn parsed<T: FromStr>(name: &str) -> Option<T> {
    env(name).and_then(|v| v.trim().parse().ok())
}

fn require(var_name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::EnvVarNotFound {
            var_name: var_name.to_string(),
        });
    }
    Ok(())
}
