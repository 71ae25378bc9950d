//! 首页合并服务 - 业务能力层
//!
//! 把共享首页 `index.html` 解析成 [`IndexDocument`]：
//! 容器之前的标记、容器内按顺序排列的条目、容器之后的标记。
//! 去重和插入都是对条目列表的操作，最后整体序列化写回。

use minijinja::{context, value::Value, Environment};
use scraper::{ElementRef, Html, Node};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult, IndexError};
use crate::models::{Audience, IndexCard, Language, Slug, Variant};
use crate::services::asset_provisioner::write_file;

/// `.html` 结尾的模板名会开启 HTML 自动转义，`/` 也会被转义，链接需标记为安全字符串
const CARD_TEMPLATE_NAME: &str = "card.html";

const CARD_TEMPLATE: &str = r#"<a class="paper-card" href="{{ href }}" data-slug="{{ slug }}" data-title="{{ search_title }}" data-tags="{{ tags|join(' ') }}" data-arxiv="{{ arxiv_id }}">
  <h3><span class="lang" data-lang="en">{{ title_en }}</span><span class="lang" data-lang="zh" lang="zh-Hans">{{ title_zh }}</span></h3>
{% for level in levels %}  <div class="level" data-level="{{ level.code }}"><span class="lang" data-lang="en">{{ level.en }}</span><span class="lang" data-lang="zh" lang="zh-Hans">{{ level.zh }}</span></div>
{% endfor %}  <div class="pill-row"><span class="pill">{{ badge }}</span>{% for tag in tags %}<span class="pill">{{ tag }}</span>{% endfor %}</div>
</a>"#;

/// 合并结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Inserted,
    /// 已有条目引用该 slug，文件未改动
    AlreadyPresent,
}

impl MergeOutcome {
    pub fn describe(&self) -> &'static str {
        match self {
            MergeOutcome::Inserted => "card inserted",
            MergeOutcome::AlreadyPresent => "card already present",
        }
    }
}

/// 容器中的一个子节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub markup: String,
    /// 条目内所有 `href`
    pub hrefs: Vec<String>,
    /// 条目内所有 `data-slug`
    pub data_slugs: Vec<String>,
}

impl ListingEntry {
    fn from_element(element: ElementRef<'_>) -> Self {
        let mut hrefs = Vec::new();
        let mut data_slugs = Vec::new();
        for node in element.descendants() {
            if let Some(el) = ElementRef::wrap(node) {
                if let Some(href) = el.value().attr("href") {
                    hrefs.push(href.trim().to_string());
                }
                if let Some(slug) = el.value().attr("data-slug") {
                    data_slugs.push(slug.trim().to_string());
                }
            }
        }
        Self {
            markup: element.html(),
            hrefs,
            data_slugs,
        }
    }

    fn markup_only(markup: String) -> Self {
        Self {
            markup,
            hrefs: Vec::new(),
            data_slugs: Vec::new(),
        }
    }

    /// 条目是否指向该 slug 的页面
    pub fn references(&self, slug: &Slug) -> bool {
        let card_href = slug.card_href();
        let paper_dir = slug.paper_dir_href();
        let bare_dir = format!("{}/", card_href);

        self.data_slugs.iter().any(|s| s == slug.as_str())
            || self
                .hrefs
                .iter()
                .any(|h| *h == card_href || *h == bare_dir || h.starts_with(&paper_dir))
    }
}

/// 共享首页的结构化视图
#[derive(Debug, Clone)]
pub struct IndexDocument {
    /// 文档开头到容器开始标签（含）
    head: String,
    entries: Vec<ListingEntry>,
    /// 容器结束标签（含）到文档末尾
    tail: String,
}

impl IndexDocument {
    /// 解析首页，`container_id` 指定卡片容器
    ///
    /// `path` 只用于错误信息
    pub fn parse(source: &str, container_id: &str, path: &str) -> Result<Self, IndexError> {
        let document = Html::parse_document(source);
        let container = document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().id() == Some(container_id))
            .ok_or_else(|| IndexError::ContainerMissing {
                path: path.to_string(),
                container_id: container_id.to_string(),
            })?;

        let unlocatable = || IndexError::ContainerUnlocatable {
            path: path.to_string(),
            container_id: container_id.to_string(),
        };

        let serialized = document.html();
        let outer = container.html();
        let inner = container.inner_html();
        let close_tag = format!("</{}>", container.value().name());
        if !outer.ends_with(&close_tag) || outer.len() < inner.len() + close_tag.len() {
            return Err(unlocatable());
        }
        let open_len = outer.len() - inner.len() - close_tag.len();
        let start = serialized.find(&outer).ok_or_else(unlocatable)?;

        let entries = container
            .children()
            .filter_map(|child| match child.value() {
                Node::Element(_) => ElementRef::wrap(child).map(ListingEntry::from_element),
                Node::Text(text) if !text.trim().is_empty() => {
                    Some(ListingEntry::markup_only(escape_text(text.trim())))
                }
                Node::Comment(comment) => {
                    Some(ListingEntry::markup_only(format!("<!--{}-->", &**comment)))
                }
                _ => None,
            })
            .collect();

        Ok(Self {
            head: serialized[..start + open_len].to_string(),
            entries,
            tail: serialized[start + outer.len() - close_tag.len()..].to_string(),
        })
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn contains_slug(&self, slug: &Slug) -> bool {
        self.entries.iter().any(|e| e.references(slug))
    }

    /// 插入为容器的第一个条目
    pub fn insert_front(&mut self, entry: ListingEntry) {
        self.entries.insert(0, entry);
    }

    pub fn render(&self) -> String {
        let mut out = self.head.clone();
        for entry in &self.entries {
            out.push('\n');
            out.push_str(&entry.markup);
        }
        out.push('\n');
        out.push_str(&self.tail);
        out
    }
}

/// 渲染首页卡片
pub fn render_card(card: &IndexCard) -> AppResult<String> {
    let failed = |e| AppError::template_failed(CARD_TEMPLATE_NAME, e);
    let mut env = Environment::new();
    env.add_template(CARD_TEMPLATE_NAME, CARD_TEMPLATE)
        .map_err(failed)?;

    let summaries = &card.summaries;
    let levels: Vec<Value> = Audience::ALL
        .into_iter()
        .map(|audience| {
            context! {
                code => audience.level_code(),
                en => summaries.get(Variant::from_parts(audience, Language::English)),
                zh => summaries.get(Variant::from_parts(audience, Language::Chinese)),
            }
        })
        .collect();

    env.get_template(CARD_TEMPLATE_NAME)
        .and_then(|tmpl| {
            tmpl.render(context! {
                href => Value::from_safe_string(card.slug.card_href()),
                slug => card.slug.as_str(),
                search_title => card.search_title(),
                tags => &card.tags,
                arxiv_id => &card.arxiv_id,
                title_en => &card.title_en,
                title_zh => &card.title_zh,
                levels => levels,
                badge => &card.badge,
            })
        })
        .map_err(failed)
}

/// 首页合并服务
pub struct IndexMerger {
    index_path: PathBuf,
    container_id: String,
}

impl IndexMerger {
    pub fn new(repo_path: &Path, container_id: impl Into<String>) -> Self {
        Self {
            index_path: repo_path.join("index.html"),
            container_id: container_id.into(),
        }
    }

    /// 把卡片合并进首页
    ///
    /// 已存在时不写文件；容器缺失是致命错误
    pub async fn merge(&self, card: &IndexCard) -> AppResult<MergeOutcome> {
        let path = self.index_path.display().to_string();
        let source = fs::read_to_string(&self.index_path)
            .await
            .map_err(|e| AppError::file_read_failed(path.clone(), e))?;

        let mut document = IndexDocument::parse(&source, &self.container_id, &path)?;
        debug!("首页已有 {} 个条目", document.entries().len());

        if document.contains_slug(&card.slug) {
            info!("ℹ️ 首页已包含 {}，跳过", card.slug);
            return Ok(MergeOutcome::AlreadyPresent);
        }

        let markup = render_card(card)?;
        document.insert_front(ListingEntry {
            markup,
            hrefs: vec![card.slug.card_href()],
            data_slugs: vec![card.slug.as_str().to_string()],
        });

        write_file(&self.index_path, &document.render()).await?;
        info!("🗂️ 已将 {} 插入首页", card.slug);
        Ok(MergeOutcome::Inserted)
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
