//! 内容生成服务 - 业务能力层
//!
//! 负责两类 LLM 调用：
//! - 每个版本一次，生成完整 HTML 页面
//! - 一次独立调用，生成首页卡片的四句摘要
//!
//! 返回的 HTML 不做结构校验；生成失败直接向上返回，不重试。

use tracing::{debug, info, warn};

use crate::clients::LlmClient;
use crate::config::Config;
use crate::error::AppResult;
use crate::models::{CardSummaries, GeneratedPage, PaperMetadata, Slug, Variant};

const PAGE_SYSTEM_MESSAGE: &str = "You generate a complete HTML document for a WAP paper page. \
Follow the paper's original structure and section order; do not force generic headings. \
Always include a paper facts block, resource links, and a version switcher. \
Use absolute paths for CSS/JS and internal links. Output HTML only, no code fences.";

const SUMMARY_SYSTEM_MESSAGE: &str = "Generate short summaries for index cards.";

/// 生成页面所需的输入
#[derive(Debug, Clone, Copy)]
pub struct PageInput<'a> {
    pub slug: &'a Slug,
    pub metadata: &'a PaperMetadata,
    /// PDF 正文，可能为空
    pub context_text: &'a str,
    pub notes: &'a str,
    /// 调用方提供的写作要求模板
    pub instructions: &'a str,
}

/// 内容生成服务
pub struct ContentSynthesizer {
    llm: LlmClient,
    max_context_chars: usize,
    summary_max_tokens: u32,
}

impl ContentSynthesizer {
    /// 创建新的内容生成服务
    pub fn new(config: &Config) -> Self {
        Self {
            llm: LlmClient::new(config),
            max_context_chars: config.max_context_chars,
            summary_max_tokens: config.summary_max_tokens,
        }
    }

    /// 生成某个版本的页面
    ///
    /// # 参数
    /// - `variant`: 页面版本
    /// - `input`: 论文资料与写作要求
    ///
    /// # 返回
    /// 返回 LLM 输出的 HTML（原样）
    pub async fn generate_page(
        &self,
        variant: Variant,
        input: &PageInput<'_>,
    ) -> AppResult<GeneratedPage> {
        info!("🤖 生成页面 {} (模型: {})", variant, self.llm.model_name());

        let user_message = build_page_prompt(variant, input, self.max_context_chars);
        let html = self
            .llm
            .chat(PAGE_SYSTEM_MESSAGE, &user_message, variant.max_tokens())
            .await?;

        debug!("页面 {} 生成完成: {} 字符", variant, html.chars().count());
        Ok(GeneratedPage { variant, html })
    }

    /// 生成首页卡片的四句摘要
    ///
    /// 只使用标题、摘要和备注，不带 PDF 正文
    pub async fn generate_summaries(
        &self,
        metadata: &PaperMetadata,
        notes: &str,
    ) -> AppResult<CardSummaries> {
        info!("🤖 生成首页卡片摘要");

        let user_message = build_summary_prompt(metadata, notes);
        let response = self
            .llm
            .chat_text(SUMMARY_SYSTEM_MESSAGE, &user_message, self.summary_max_tokens)
            .await?;
        if response.is_empty() {
            warn!("卡片摘要回复为空，四条摘要全部留空");
        }

        let summaries = parse_summaries(&response);
        if summaries.filled_count() < Variant::ALL.len() {
            debug!(
                "卡片摘要只解析出 {}/{} 条，缺失项留空",
                summaries.filled_count(),
                Variant::ALL.len()
            );
        }
        Ok(summaries)
    }
}

/// 某个版本的固定说明：语言、受众、资源路径与版本切换链接
///
/// 直接生成和提示词交接两种模式共用
pub fn variant_brief(variant: Variant, slug: &Slug) -> String {
    let mut brief = format!(
        "Version: {}\nLanguage: {}\nAudience level: {}\nSlug: {}\n\n\
         Required assets:\n- CSS: /papers/{}/styles.css\n- JS: /papers/{}/script.js\n\n\
         Version switcher links:\n",
        variant.code(),
        variant.lang_tag(),
        variant.audience_label(),
        slug,
        slug,
        slug,
    );
    for v in Variant::ALL {
        brief.push_str(&format!("- {}: {}\n", v.switcher_label(), v.page_path(slug)));
    }
    let siblings: Vec<&str> = variant.siblings().map(Variant::code).collect();
    brief.push_str(&format!(
        "The switcher must link to the other three versions: {}.\n",
        siblings.join(", ")
    ));
    brief
}

/// 论文元数据块
pub fn metadata_block(metadata: &PaperMetadata) -> String {
    format!(
        "Metadata:\n- Title: {}\n- Authors: {}\n- Date: {}\n- Venue: {}\n- arXiv ID: {}\n\nAbstract:\n{}\n",
        metadata.title,
        metadata.authors_line(),
        metadata.published,
        metadata.venue,
        metadata.arxiv_id,
        metadata.summary,
    )
}

/// 构建页面生成的用户消息
///
/// PDF 正文按字符数截断，保证请求大小可控
pub fn build_page_prompt(variant: Variant, input: &PageInput<'_>, max_context_chars: usize) -> String {
    let context: String = input.context_text.chars().take(max_context_chars).collect();

    format!(
        "{brief}\n{metadata}\nExtracted paper text (for structure):\n{context}\n\n\
         Extra notes:\n{notes}\n\n\
         Prompt requirements:\n{instructions}\n\n\
         Output a full HTML document. Use classes from the existing WAP styles (topbar, hero, hero-card, card, content-grid, section-header, resources, button-row, btn, footer, etc.).\n\
         Provide a version switcher section with links to the other three versions.\n\
         Do not include inline CSS. Use the linked stylesheet.",
        brief = variant_brief(variant, input.slug),
        metadata = metadata_block(input.metadata),
        context = context,
        notes = notes_or_none(input.notes),
        instructions = input.instructions.trim(),
    )
}

/// 构建卡片摘要的用户消息
pub fn build_summary_prompt(metadata: &PaperMetadata, notes: &str) -> String {
    let keys: Vec<String> = Variant::ALL
        .iter()
        .map(|v| format!("{}: <{} · {}>", v.summary_key(), v.audience_label(), v.lang_tag()))
        .collect();

    format!(
        "Paper title: {}\nAbstract: {}\nNotes: {}\n\n\
         Provide 4 one-line summaries, one per line, each line starting with its key:\n{}\n\n\
         Each should be a single sentence suitable for a card teaser.",
        metadata.title,
        metadata.summary,
        notes_or_none(notes),
        keys.join("\n"),
    )
}

/// 解析卡片摘要
///
/// 以 key 开头（不区分大小写）的行取第一个 `:` 之后的内容；
/// 其他行忽略，找不到的 key 保持空字符串
pub fn parse_summaries(content: &str) -> CardSummaries {
    let mut summaries = CardSummaries::default();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lowered = line.to_lowercase();
        for variant in Variant::ALL {
            if lowered.starts_with(variant.summary_key()) {
                let text = line.split_once(':').map(|(_, rest)| rest).unwrap_or(line);
                summaries.set(variant, text.trim());
            }
        }
    }

    summaries
}

fn notes_or_none(notes: &str) -> &str {
    if notes.trim().is_empty() {
        "(none)"
    } else {
        notes
    }
}
