// ============================================================================
// UEnergy i18n - CLI Check 命令
// ============================================================================
//
// 文件: src/cli/check.rs
// 职责: 翻译覆盖率检查命令的 CLI 接口层
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 调用覆盖率检查并输出结果
//   - ❌ 不应包含键集合对比逻辑（见 core::coverage）
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::core::context::I18nContext;
use crate::core::coverage::check_coverage;
use crate::models::language::LanguageCode;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 检查翻译覆盖率
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Output format (table, json)
    #[arg(short = 'f', long, default_value = "table")]
    pub format: String,

    /// List every missing key
    #[arg(short = 'd', long)]
    pub detail: bool,

    /// Exit with a non-zero status when keys are missing
    #[arg(long)]
    pub strict: bool,
}

pub fn handle_check(ctx: &I18nContext, args: CheckArgs) -> Result<()> {
    let languages: Vec<LanguageCode> = ctx
        .supported_languages()
        .iter()
        .map(|info| info.code.clone())
        .collect();
    let report = check_coverage(ctx.resolver().table(), &languages, ctx.default_language());

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "table" => {
            Logger::info(tf!(ctx, "cli.check.start", lang = report.default_language));
            summary::print_coverage_table(ctx, &report, args.detail);
        }
        other => anyhow::bail!("Unknown output format: {} (expected table or json)", other),
    }

    if report.is_complete() {
        if args.format != "json" {
            Logger::success(t!(ctx, "cli.check.all_good"));
        }
        return Ok(());
    }

    if args.strict {
        Logger::error(t!(ctx, "cli.check.has_gaps"));
        std::process::exit(1);
    }
    if args.format != "json" {
        Logger::warn(t!(ctx, "cli.check.has_gaps"));
    }
    Ok(())
}
