// ============================================================================
// UEnergy i18n - 页面翻译命令
// ============================================================================
//
// 文件: src/cli/apply.rs
// 职责: 把翻译应用到 HTML 页面文件
// 边界:
//   - ✅ 命令行参数定义和解析
//   - ✅ 逐页挂载、应用、写出
//   - ✅ 处理进度与汇总输出
//   - ❌ 不应包含文本应用规则（见 core::applier）
//   - ❌ 不应包含页面扫描细节（见 core::pages）
//
// ============================================================================

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use crate::core::applier::ApplyReport;
use crate::core::context::I18nContext;
use crate::core::pages::{discover_pages, load_page, write_page, PageEntry};
use crate::models::config::Config;
use crate::ui::summary::{self, ApplySummary};
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 页面翻译参数
#[derive(Debug, Args)]
pub struct ApplyArgs {
    /// HTML files or directories to process
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write results under this directory instead of in place
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Report changes without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Inject the language selector into the page header
    #[arg(long)]
    pub selector: bool,
}

/// 处理页面翻译命令
pub fn handle_apply(ctx: &mut I18nContext, args: ApplyArgs, config: &Config) -> Result<()> {
    Logger::info(tf!(ctx, "cli.apply.start", lang = ctx.current_language()));

    let pages = discover_pages(&args.paths, config)?;
    if pages.is_empty() {
        let inputs: Vec<String> = args.paths.iter().map(|p| p.display().to_string()).collect();
        Logger::warn(tf!(ctx, "cli.apply.no_pages", path = inputs.join(", ")));
        return Ok(());
    }

    let inject = args.selector || config.pages.inject_selector;
    let mut totals = ApplySummary::default();

    for page in &pages {
        let display = page.path.display().to_string();
        match process_page(ctx, page, inject, &args) {
            Ok(report) => {
                summary::print_page_report(ctx, &display, &report, config.output.verbose);
                totals.record(&report);
            }
            Err(e) => {
                Logger::error(tf!(ctx, "cli.apply.failed", path = display, error = format!("{:#}", e)));
                totals.failed += 1;
            }
        }
    }

    summary::render_apply_summary(ctx, &totals);
    if args.dry_run {
        Logger::info(t!(ctx, "cli.apply.dry_run"));
    }

    if totals.failed > 0 {
        anyhow::bail!("{} of {} pages failed", totals.failed, pages.len());
    }
    Ok(())
}

/// 挂载页面、应用翻译并写出
fn process_page(
    ctx: &mut I18nContext,
    page: &PageEntry,
    inject: bool,
    args: &ApplyArgs,
) -> Result<ApplyReport> {
    let doc = load_page(&page.path)?;
    let report = ctx
        .attach(doc, inject)
        .with_context(|| format!("Failed to inject selector into {}", page.path.display()))?;
    let doc = ctx
        .detach()
        .context("Attached page disappeared before it could be written")?;

    if !args.dry_run {
        let target = page.output_path(args.out.as_deref());
        write_page(&target, &doc)?;
        Logger::info(tf!(ctx, "cli.apply.written", path = target.display()));
    }
    Ok(report)
}
