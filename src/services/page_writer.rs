//! 页面写入服务 - 业务能力层
//!
//! 写入四个版本页面和静态的版本选择页，每次运行都直接覆盖

use minijinja::{context, value::Value, Environment};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{GeneratedPage, Slug, Variant};
use crate::services::asset_provisioner::write_file;

const CHOOSER_TEMPLATE_NAME: &str = "chooser.html";

const CHOOSER_TEMPLATE: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>WAP Paper Variants</title>
  <link rel="icon" href="/logo.jpg" type="image/jpeg" />
  <link rel="stylesheet" href="/papers/{{ slug }}/styles.css" />
</head>
<body>
  <main class="page">
    <section class="hero">
      <div class="hero-text">
        <p class="eyebrow">WAP Paper Page</p>
        <h1>Choose a version</h1>
        <p class="lede">Four standalone pages: HS/Grad × EN/中文.</p>
      </div>
    </section>
    <section class="content-grid">
{%- for link in links %}
      <a class="card" href="{{ link.href }}"><h3>{{ link.label }}</h3></a>
{%- endfor %}
    </section>
  </main>
</body>
</html>
"#;

/// 页面写入服务
pub struct PageWriter {
    papers_dir: PathBuf,
}

impl PageWriter {
    pub fn new(repo_path: &Path) -> Self {
        Self {
            papers_dir: repo_path.join("papers"),
        }
    }

    /// 写入某个版本的页面，返回写入路径
    pub async fn write_variant(&self, slug: &Slug, page: &GeneratedPage) -> AppResult<PathBuf> {
        let path = self.papers_dir.join(slug.as_str()).join(page.variant.file_name());
        write_file(&path, &page.html).await?;
        info!("📝 已写入页面: {}", path.display());
        Ok(path)
    }

    /// 渲染版本选择页
    pub fn render_chooser(&self, slug: &Slug) -> AppResult<String> {
        let links: Vec<_> = Variant::ALL
            .iter()
            .map(|v| context! { href => Value::from_safe_string(v.page_path(slug)), label => v.switcher_label() })
            .collect();

        let failed = |e| AppError::template_failed(CHOOSER_TEMPLATE_NAME, e);
        let mut env = Environment::new();
        env.add_template(CHOOSER_TEMPLATE_NAME, CHOOSER_TEMPLATE)
            .map_err(failed)?;
        env.get_template(CHOOSER_TEMPLATE_NAME)
            .and_then(|tmpl| tmpl.render(context! { slug => slug.as_str(), links => links }))
            .map_err(failed)
    }

    /// 写入 `papers/<slug>/index.html`
    pub async fn write_chooser(&self, slug: &Slug) -> AppResult<PathBuf> {
        let html = self.render_chooser(slug)?;
        let path = self.papers_dir.join(slug.as_str()).join("index.html");
        write_file(&path, &html).await?;
        info!("🧭 已写入版本选择页: {}", path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chooser_links_all_variants() {
        let writer = PageWriter::new(Path::new("/tmp/unused"));
        let slug = Slug::new("Example Paper");
        let html = writer.render_chooser(&slug).unwrap();

        assert!(html.contains(r#"href="/papers/example-paper/styles.css""#));
        for v in Variant::ALL {
            assert!(html.contains(&format!(r#"href="{}""#, v.page_path(&slug))));
        }
        assert!(html.contains("研究生 · 中文"));
    }

    #[tokio::test]
    async fn test_write_variant_overwrites() {
        let repo = tempfile::tempdir().unwrap();
        let slug = Slug::new("example");
        tokio::fs::create_dir_all(repo.path().join("papers/example"))
            .await
            .unwrap();
        let writer = PageWriter::new(repo.path());

        for html in ["<html>first</html>", "<html>second</html>"] {
            let page = GeneratedPage {
                variant: Variant::GradEn,
                html: html.to_string(),
            };
            writer.write_variant(&slug, &page).await.unwrap();
        }

        let written = tokio::fs::read_to_string(repo.path().join("papers/example/grad-en.html"))
            .await
            .unwrap();
        assert_eq!(written, "<html>second</html>");
    }
}
