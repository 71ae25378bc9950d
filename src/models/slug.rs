//! 论文 slug：输出目录名，也是首页去重的主键

use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

/// slug 推导结果全部为空时使用的默认值
pub const DEFAULT_SLUG: &str = "paper";

static NON_SLUG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("slug 正则无效"));

/// 把任意文本转为 URL 安全的 slug
///
/// 小写化，非 `[a-z0-9]` 的连续字符折叠为一个 `-`，去掉首尾 `-`，
/// 结果为空时返回 [`DEFAULT_SLUG`]
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let slug = NON_SLUG_RE.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// 已规范化的 slug
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    /// 按优先级推导：显式指定 → 解析出的标题 → 原始 query → 默认值
    pub fn derive(explicit: &str, resolved_title: &str, raw_query: &str) -> Self {
        let candidate = [explicit, resolved_title, raw_query]
            .into_iter()
            .map(str::trim)
            .find(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SLUG);
        Self(slugify(candidate))
    }

    pub fn new(text: &str) -> Self {
        Self(slugify(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 首页卡片链接
    pub fn card_href(&self) -> String {
        format!("/{}", self.0)
    }

    /// 站点内论文目录
    pub fn paper_dir_href(&self) -> String {
        format!("/papers/{}/", self.0)
    }
}

impl Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
