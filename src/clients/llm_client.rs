//! LLM API 客户端
//!
//! 封装所有与文本生成服务的交互
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型（兼容 OpenAI API 的服务）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// 生成温度，页面内容需要稳定输出
const TEMPERATURE: f32 = 0.2;

/// LLM 客户端
///
/// 每次调用只尝试一次，失败直接返回错误
pub struct LlmClient {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        // 最长重试时间为 0：限流和 5xx 也只请求一次
        let no_retry = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::ZERO))
            .build();

        Self {
            client: Client::with_config(openai_config).with_backoff(no_retry),
            model_name: config.llm_model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 发送聊天请求，空回复视为错误
    ///
    /// # 参数
    /// - `system_message`: 系统消息
    /// - `user_message`: 用户消息内容
    /// - `max_tokens`: 输出 token 上限
    ///
    /// # 返回
    /// 返回 LLM 的响应内容（去掉首尾空白）
    pub async fn chat(
        &self,
        system_message: &str,
        user_message: &str,
        max_tokens: u32,
    ) -> AppResult<String> {
        let content = self.chat_text(system_message, user_message, max_tokens).await?;
        if content.is_empty() {
            return Err(LlmError::EmptyContent {
                model: self.model_name.clone(),
            }
            .into());
        }
        Ok(content)
    }

    /// 发送聊天请求，允许空回复（返回空字符串）
    pub async fn chat_text(
        &self,
        system_message: &str,
        user_message: &str,
        max_tokens: u32,
    ) -> AppResult<String> {
        debug!(
            "调用 LLM API，模型: {}，用户消息长度: {} 字符，max_tokens: {}",
            self.model_name,
            user_message.chars().count(),
            max_tokens
        );

        let build_failed = |e: async_openai::error::OpenAIError| {
            AppError::Llm(LlmError::RequestBuildFailed {
                model: self.model_name.clone(),
                source: Box::new(e),
            })
        };

        let system_msg = ChatCompletionRequestSystemMessageArgs::default()
            .content(system_message)
            .build()
            .map_err(build_failed)?;
        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(build_failed)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![
                ChatCompletionRequestMessage::System(system_msg),
                ChatCompletionRequestMessage::User(user_msg),
            ])
            .temperature(TEMPERATURE)
            .max_tokens(max_tokens)
            .build()
            .map_err(build_failed)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            AppError::llm_api_failed(&self.model_name, e)
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .unwrap_or_default();

        Ok(content.trim().to_string())
    }
}
