/// GitHub Issue API 客户端
///
/// 只负责按编号读取 Issue
use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::IssueRecord;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use std::time::Duration;
use tracing::debug;

const CLIENT_USER_AGENT: &str = concat!("wap-paper-pages/", env!("CARGO_PKG_VERSION"));

/// GitHub 客户端
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
    repository: String,
    token: String,
}

impl GithubClient {
    /// 创建新的 GitHub 客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            api_base: config.github_api_base.trim_end_matches('/').to_string(),
            repository: config.github_repository.clone(),
            token: config.github_token.clone(),
        })
    }

    /// 读取 Issue
    ///
    /// 非 2xx 响应视为致命错误
    pub async fn fetch_issue(&self, issue_number: u64) -> AppResult<IssueRecord> {
        let endpoint = format!(
            "{}/repos/{}/issues/{}",
            self.api_base, self.repository, issue_number
        );
        debug!("读取 Issue: {}", endpoint);

        let response = self
            .http
            .get(&endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint,
                status: status.as_u16(),
            }
            .into());
        }

        let issue = response
            .json::<IssueRecord>()
            .await
            .map_err(|e| ApiError::DecodeFailed {
                endpoint: endpoint.clone(),
                source: Box::new(e),
            })?;

        debug!("Issue 标题: {}", issue.title);
        Ok(issue)
    }
}
