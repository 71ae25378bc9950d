//! 页面版本：受众（高中 / 研究生）× 语言（英文 / 中文）

use super::slug::Slug;
use std::fmt::Display;

/// 受众层级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    HighSchool,
    Graduate,
}

impl Audience {
    /// 首页卡片上的展示顺序
    pub const ALL: [Audience; 2] = [Audience::HighSchool, Audience::Graduate];

    /// 首页卡片上的 `data-level`
    pub fn level_code(self) -> &'static str {
        match self {
            Audience::HighSchool => "hs",
            Audience::Graduate => "grad",
        }
    }
}

/// 页面语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    pub fn lang_tag(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh-Hans",
        }
    }
}

/// 四个固定版本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    HsEn,
    GradEn,
    HsZh,
    GradZh,
}

impl Variant {
    /// 生成顺序
    pub const ALL: [Variant; 4] = [Variant::HsEn, Variant::GradEn, Variant::HsZh, Variant::GradZh];

    pub fn from_parts(audience: Audience, language: Language) -> Self {
        match (audience, language) {
            (Audience::HighSchool, Language::English) => Variant::HsEn,
            (Audience::Graduate, Language::English) => Variant::GradEn,
            (Audience::HighSchool, Language::Chinese) => Variant::HsZh,
            (Audience::Graduate, Language::Chinese) => Variant::GradZh,
        }
    }

    pub fn audience(self) -> Audience {
        match self {
            Variant::HsEn | Variant::HsZh => Audience::HighSchool,
            Variant::GradEn | Variant::GradZh => Audience::Graduate,
        }
    }

    pub fn language(self) -> Language {
        match self {
            Variant::HsEn | Variant::GradEn => Language::English,
            Variant::HsZh | Variant::GradZh => Language::Chinese,
        }
    }

    /// 文件名与链接使用的代码
    pub fn code(self) -> &'static str {
        match self {
            Variant::HsEn => "hs-en",
            Variant::GradEn => "grad-en",
            Variant::HsZh => "hs-zh",
            Variant::GradZh => "grad-zh",
        }
    }

    /// 卡片摘要输出中的行首 key
    pub fn summary_key(self) -> &'static str {
        match self {
            Variant::HsEn => "hs_en",
            Variant::GradEn => "grad_en",
            Variant::HsZh => "hs_zh",
            Variant::GradZh => "grad_zh",
        }
    }

    pub fn lang_tag(self) -> &'static str {
        self.language().lang_tag()
    }

    pub fn audience_label(self) -> &'static str {
        match self {
            Variant::HsEn => "High School",
            Variant::GradEn => "Graduate",
            Variant::HsZh => "高中",
            Variant::GradZh => "研究生",
        }
    }

    /// 版本选择页与版本切换中显示的名称
    pub fn switcher_label(self) -> &'static str {
        match self {
            Variant::HsEn => "HS · EN",
            Variant::GradEn => "Grad · EN",
            Variant::HsZh => "高中 · 中文",
            Variant::GradZh => "研究生 · 中文",
        }
    }

    /// 生成 token 上限，研究生版输出更长
    pub fn max_tokens(self) -> u32 {
        match self.audience() {
            Audience::HighSchool => 3200,
            Audience::Graduate => 5200,
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.html", self.code())
    }

    /// 站点内绝对路径
    pub fn page_path(self, slug: &Slug) -> String {
        format!("/papers/{}/{}", slug, self.file_name())
    }

    /// 其余三个版本
    pub fn siblings(self) -> impl Iterator<Item = Variant> {
        Self::ALL.into_iter().filter(move |v| *v != self)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_codes_and_paths() {
        let slug = Slug::new("example-paper");
        assert_eq!(Variant::HsEn.page_path(&slug), "/papers/example-paper/hs-en.html");
        assert_eq!(Variant::GradZh.page_path(&slug), "/papers/example-paper/grad-zh.html");
        assert_eq!(Variant::HsZh.lang_tag(), "zh-Hans");
        assert_eq!(Variant::GradEn.summary_key(), "grad_en");
    }

    #[test]
    fn test_siblings_cover_the_other_three() {
        for variant in Variant::ALL {
            let siblings: HashSet<Variant> = variant.siblings().collect();
            assert_eq!(siblings.len(), 3);
            assert!(!siblings.contains(&variant));
        }
    }

    #[test]
    fn test_from_parts_inverts_accessors() {
        for variant in Variant::ALL {
            assert_eq!(Variant::from_parts(variant.audience(), variant.language()), variant);
        }
        assert_eq!(Audience::Graduate.level_code(), "grad");
    }

    #[test]
    fn test_graduate_budget_is_larger() {
        assert!(Variant::GradEn.max_tokens() > Variant::HsEn.max_tokens());
        assert_eq!(Variant::HsZh.max_tokens(), Variant::HsEn.max_tokens());
    }
}
