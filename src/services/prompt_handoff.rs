//! 提示词交接 - 业务能力层
//!
//! 不调用生成服务，只把一次完整运行所需的信息整理成一份说明，
//! 交给外部执行者按说明生成页面并更新首页。

use minijinja::{context, Environment};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{PaperMetadata, PaperRequest, Slug, Variant};
use crate::services::asset_provisioner::write_file;
use crate::services::synthesizer::{metadata_block, variant_brief};

/// 非 `.html` 模板名，不做 HTML 转义
const HANDOFF_TEMPLATE_NAME: &str = "handoff.md";

const HANDOFF_TEMPLATE: &str = r#"# WAP paper page: {{ slug }}

Paper query: {{ query }}
{{ metadata }}
Extra notes:
{{ notes }}

## Files to create

{% for page in pages -%}
- papers/{{ slug }}/{{ page.file }} ({{ page.label }})
{% endfor -%}
- papers/{{ slug }}/index.html (version chooser linking the four pages)
- papers/{{ slug }}/styles.css and papers/{{ slug }}/script.js, only if they do not exist yet

## Per-version requirements
{% for page in pages %}
### {{ page.label }}

{{ page.brief }}
{%- endfor %}

## Index card

Insert one card as the first child of `#paper-list` in index.html unless a card
linking to /{{ slug }} already exists. The card needs the English and Chinese
titles, one-line summaries for hs_en, grad_en, hs_zh and grad_zh, and a pill
row with the badge "{{ badge }}" followed by the tags {{ tags }}.
{% if instructions %}
## Writing requirements

{{ instructions }}
{% endif %}"#;

/// 交接说明的输入
#[derive(Debug, Clone, Copy)]
pub struct HandoffInput<'a> {
    pub slug: &'a Slug,
    pub request: &'a PaperRequest,
    pub metadata: &'a PaperMetadata,
    /// 可选的写作要求模板
    pub instructions: Option<&'a str>,
}

/// 渲染交接说明
pub fn render_handoff(input: &HandoffInput<'_>) -> AppResult<String> {
    let failed = |e| AppError::template_failed(HANDOFF_TEMPLATE_NAME, e);
    let mut env = Environment::new();
    env.add_template(HANDOFF_TEMPLATE_NAME, HANDOFF_TEMPLATE)
        .map_err(failed)?;

    let pages: Vec<_> = Variant::ALL
        .iter()
        .map(|v| {
            context! {
                file => v.file_name(),
                label => v.switcher_label(),
                brief => variant_brief(*v, input.slug).trim_end().to_string(),
            }
        })
        .collect();

    let notes = if input.request.has_notes() {
        input.request.notes.as_str()
    } else {
        "(none)"
    };
    let instructions = input.instructions.map(str::trim).unwrap_or_default();

    env.get_template(HANDOFF_TEMPLATE_NAME)
        .and_then(|tmpl| {
            tmpl.render(context! {
                slug => input.slug.as_str(),
                query => input.request.effective_query(),
                metadata => metadata_block(input.metadata),
                notes => notes,
                pages => pages,
                badge => input.metadata.badge(),
                tags => crate::models::index_card::DEFAULT_TAGS.join(", "),
                instructions => instructions,
            })
        })
        .map_err(failed)
}

/// 写出交接说明，返回写入路径
pub async fn write_handoff(output_path: &Path, input: &HandoffInput<'_>) -> AppResult<PathBuf> {
    let prompt = render_handoff(input)?;
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::create_dir_failed(parent.display().to_string(), e))?;
    }
    write_file(output_path, &prompt).await?;
    info!("📨 已写出交接说明: {}", output_path.display());
    Ok(output_path.to_path_buf())
}
