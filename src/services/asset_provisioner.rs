//! 静态资源准备 - 业务能力层
//!
//! 保证 `papers/<slug>/` 下有 `styles.css` 和 `script.js`。
//! 只在文件不存在时创建，已有文件（包括手工修改过的）永远不覆盖。

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::Slug;

pub const STYLES_FILE: &str = "styles.css";
pub const SCRIPT_FILE: &str = "script.js";

/// 基础脚本不存在时的占位内容
pub const SCRIPT_PLACEHOLDER: &str = "// Reserved for per-paper interactions.\n";

/// 版本页面额外需要的样式
pub const VARIANT_PAGE_CSS: &str = r#"
.paper-body {
  display: flex;
  flex-direction: column;
  gap: 24px;
}

.version-switch {
  display: flex;
  flex-wrap: wrap;
  gap: 10px;
  margin-top: 12px;
}

.version-pill {
  padding: 6px 12px;
  border-radius: 999px;
  background: rgba(21, 25, 34, 0.06);
  font-size: 0.85rem;
}
"#;

/// 本次准备创建了哪些文件
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub styles_created: bool,
    pub script_created: bool,
}

/// 静态资源准备服务
pub struct AssetProvisioner {
    papers_dir: PathBuf,
    baseline_slug: String,
}

impl AssetProvisioner {
    /// # 参数
    /// - `repo_path`: 站点仓库根目录
    /// - `baseline_slug`: 提供基础样式和脚本的论文目录名
    pub fn new(repo_path: &Path, baseline_slug: impl Into<String>) -> Self {
        Self {
            papers_dir: repo_path.join("papers"),
            baseline_slug: baseline_slug.into(),
        }
    }

    pub fn paper_dir(&self, slug: &Slug) -> PathBuf {
        self.papers_dir.join(slug.as_str())
    }

    fn baseline_dir(&self) -> PathBuf {
        self.papers_dir.join(&self.baseline_slug)
    }

    /// 确保 slug 目录下的资源存在
    pub async fn ensure_assets(&self, slug: &Slug) -> AppResult<ProvisionReport> {
        let target_dir = self.paper_dir(slug);
        fs::create_dir_all(&target_dir)
            .await
            .map_err(|e| AppError::create_dir_failed(target_dir.display().to_string(), e))?;

        let mut report = ProvisionReport::default();

        let styles_path = target_dir.join(STYLES_FILE);
        if !fs::try_exists(&styles_path).await.unwrap_or(false) {
            let base_css = read_optional(&self.baseline_dir().join(STYLES_FILE))
                .await?
                .unwrap_or_default();
            write_file(&styles_path, &format!("{}\n{}", base_css, VARIANT_PAGE_CSS)).await?;
            report.styles_created = true;
            info!("🎨 已创建样式: {}", styles_path.display());
        } else {
            debug!("样式已存在，保持不变: {}", styles_path.display());
        }

        let script_path = target_dir.join(SCRIPT_FILE);
        if !fs::try_exists(&script_path).await.unwrap_or(false) {
            let script = read_optional(&self.baseline_dir().join(SCRIPT_FILE))
                .await?
                .unwrap_or_else(|| SCRIPT_PLACEHOLDER.to_string());
            write_file(&script_path, &script).await?;
            report.script_created = true;
            info!("📜 已创建脚本: {}", script_path.display());
        } else {
            debug!("脚本已存在，保持不变: {}", script_path.display());
        }

        Ok(report)
    }
}

/// 文件不存在时返回 None，其他读取错误照常返回
async fn read_optional(path: &Path) -> AppResult<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(AppError::file_read_failed(path.display().to_string(), e)),
    }
}

pub(crate) async fn write_file(path: &Path, content: &str) -> AppResult<()> {
    fs::write(path, content)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}
