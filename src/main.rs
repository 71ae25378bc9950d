use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;

use wap_paper_pages::orchestrator::{App, RunMode};
use wap_paper_pages::utils::logging;
use wap_paper_pages::Config;

/// 根据论文请求 Issue 生成 WAP 论文页面
#[derive(Debug, Parser)]
#[command(name = "wap-paper-pages", version, about)]
struct Cli {
    /// Issue 编号
    #[arg(long)]
    issue: u64,

    /// 站点仓库根目录（直接生成模式）
    #[arg(long, conflicts_with = "output_prompt", requires = "prompt_file")]
    repo_path: Option<PathBuf>,

    /// 写作要求模板
    #[arg(long)]
    prompt_file: Option<PathBuf>,

    /// 只写出交接说明到该文件
    #[arg(long)]
    output_prompt: Option<PathBuf>,

    /// TOML 配置文件
    #[arg(long, env = "WAP_CONFIG")]
    config: Option<PathBuf>,

    /// 日志详细程度（-v debug，-vv trace）
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn run_mode(&self) -> Result<RunMode> {
        match (&self.repo_path, &self.output_prompt, &self.prompt_file) {
            (Some(repo_path), None, Some(prompt_file)) => Ok(RunMode::Generate {
                repo_path: repo_path.clone(),
                prompt_file: prompt_file.clone(),
            }),
            (None, Some(output_path), prompt_file) => Ok(RunMode::PromptHandoff {
                output_path: output_path.clone(),
                prompt_file: prompt_file.clone(),
            }),
            _ => bail!("需要 --repo-path 与 --prompt-file，或者 --output-prompt"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志
    logging::init(cli.verbose);

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;
    let mode = cli.run_mode()?;

    let outcome = App::new(config).run(cli.issue, mode).await?;
    println!("{}", outcome.confirmation());

    Ok(())
}
