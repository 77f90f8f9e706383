// ============================================================================
// UEnergy i18n - CLI 模块
// ============================================================================
//
// 文件: src/cli/mod.rs
// 职责: CLI 命令行接口模块入口和路由
// 边界:
//   - ✅ CLI 结构定义和命令枚举
//   - ✅ 命令行参数解析配置
//   - ✅ 配置与上下文初始化、命令路由分发
//   - ❌ 不应包含具体命令实现逻辑
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含数据模型定义
//
// ============================================================================

pub mod apply;
pub mod check;
pub mod init;
pub mod lang;
pub mod translate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::context::I18nContext;
use crate::models::config::{Config, RuntimeArgs};
use crate::tf;
use crate::utils::constants::CONFIG_FILE;
use crate::utils::logger::{init_tracing, Logger};
use apply::{handle_apply, ApplyArgs};
use check::{handle_check, CheckArgs};
use init::{handle_init, InitArgs};
use lang::{handle_lang, LangArgs};
use translate::{handle_translate, TranslateArgs};

/// UEnergy i18n - U Energy dashboard translation engine
#[derive(Debug, Parser)]
#[command(name = "uenergy-i18n")]
#[command(about = "Translation engine for U Energy dashboard pages")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Global verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Language for this run (zh, en, ja, ko); not saved as preference
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Commands
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a translation key
    Translate(TranslateArgs),
    /// Apply translations to HTML pages
    Apply(ApplyArgs),
    /// Show or change the saved interface language
    Lang(LangArgs),
    /// Check translation coverage of every language
    Check(CheckArgs),
    /// Initialize configuration file
    Init(InitArgs),
}

pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    Config::initialize_from(&cli.config)?;
    // Build runtime args to override config
    Config::merge_runtime_args(build_runtime_args(&cli))?;

    init_tracing(Config::get_verbose());
    Logger::set_colored(Config::get_colored());

    let mut config = Config::snapshot()?;
    if matches!(cli.command, Commands::Lang(_)) {
        // 偏好管理以已保存的语言为准
        config.i18n.language = None;
    }
    let mut ctx = I18nContext::from_config(&config)?;
    if let Some(code) = config.i18n.language.as_deref() {
        if !ctx.is_supported(code) {
            Logger::warn(tf!(ctx, "cli.unknown_language", code = code));
        }
    }

    let result = match cli.command {
        Commands::Translate(args) => handle_translate(&ctx, args),
        Commands::Apply(args) => handle_apply(&mut ctx, args, &config),
        Commands::Lang(args) => handle_lang(&mut ctx, args),
        Commands::Check(args) => handle_check(&ctx, args),
        Commands::Init(args) => handle_init(&ctx, args, &cli.config),
    };

    ctx.teardown();
    result
}

/// Build runtime args from CLI arguments
fn build_runtime_args(cli: &Cli) -> RuntimeArgs {
    RuntimeArgs {
        verbose: cli.verbose.then_some(true),
        colored: cli.no_color.then_some(false),
        language: cli.language.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "uenergy-i18n",
            "translate",
            "nav.home",
            "--language",
            "en",
            "--no-color",
        ])
        .unwrap();

        let args = build_runtime_args(&cli);
        assert_eq!(args.language.as_deref(), Some("en"));
        assert_eq!(args.colored, Some(false));
        assert_eq!(args.verbose, None);
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
    }
}
