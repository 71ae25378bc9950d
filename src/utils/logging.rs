/// 日志工具模块
///
/// 提供日志初始化和输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// `RUST_LOG` 优先；否则按 `-v` 次数选择级别。日志写到 stderr，
/// stdout 只留给最终的确认信息。
pub fn init(verbosity: u8) {
    let default_level = match verbosity {
        0 => "wap_paper_pages=info",
        1 => "wap_paper_pages=debug",
        _ => "wap_paper_pages=trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `issue_number`: Issue 编号
/// - `mode`: 运行模式描述
pub fn log_startup(issue_number: u64, mode: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 论文页面生成 - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📌 Issue #{} | 模式: {}", issue_number, mode);
    info!("{}", "=".repeat(60));
}

/// 记录运行完成信息
///
/// # 参数
/// - `slug`: 论文 slug
/// - `pages_written`: 写入的页面数量
/// - `index_note`: 首页合并结果描述
pub fn log_run_complete(slug: &str, pages_written: usize, index_note: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 处理完成: {}", slug);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 页面: {}", pages_written);
    info!("🗂️ 首页: {}", index_note);
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
