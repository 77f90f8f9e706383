// ============================================================================
// UEnergy i18n - 结果汇总显示
// ============================================================================
//
// 文件: src/ui/summary.rs
// 职责: 命令结果的终端汇总显示
// 边界:
//   - ✅ 页面处理结果汇总
//   - ✅ 覆盖率检查表格
//   - ✅ 语言列表显示
//   - ❌ 不应包含具体业务逻辑
//   - ❌ 不应包含文件操作
//
// ============================================================================

use std::io::{self, Write};

use crate::core::applier::ApplyReport;
use crate::core::context::I18nContext;
use crate::core::coverage::CoverageReport;
use crate::utils::constants::icons;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 页面处理累计结果
#[derive(Debug, Clone, Default)]
pub struct ApplySummary {
    pub files: usize,
    pub changed: usize,
    pub failed: usize,
}

impl ApplySummary {
    pub fn record(&mut self, report: &ApplyReport) {
        self.files += 1;
        self.changed += report.changed;
    }
}

// ============================================================================
// 页面处理
// ============================================================================

/// 打印单个页面的处理结果
pub fn print_page_report(ctx: &I18nContext, path: &str, report: &ApplyReport, verbose: bool) {
    Logger::info(format!(
        "{} {}",
        icons::PAGE,
        tf!(
            ctx,
            "cli.apply.file_done",
            path = path,
            changed = report.changed,
            scanned = report.scanned
        )
    ));

    if report.unresolved.is_empty() {
        return;
    }
    Logger::warn(tf!(
        ctx,
        "cli.apply.unresolved",
        path = path,
        count = report.unresolved.len()
    ));
    if verbose {
        for key in &report.unresolved {
            Logger::warn(tf!(ctx, "cli.apply.unresolved_key", key = key));
        }
    }
}

/// 打印处理汇总
pub fn render_apply_summary(ctx: &I18nContext, summary: &ApplySummary) {
    let lines = vec![
        "".to_string(),
        "═══════════════════════════════════════".to_string(),
        format!(
            "{} {}",
            icons::SUMMARY,
            tf!(
                ctx,
                "cli.apply.summary",
                files = summary.files,
                changed = summary.changed
            )
        ),
    ];
    for line in lines {
        Logger::info(line);
    }
    let _ = io::stdout().flush();
}

// ============================================================================
// 覆盖率检查
// ============================================================================

/// 打印覆盖率表格
pub fn print_coverage_table(ctx: &I18nContext, report: &CoverageReport, detail: bool) {
    Logger::info("");
    Logger::info(Logger::bold(&format!(
        "{:<8} {:>8} {:>8} {:>8}",
        "lang", "keys", "missing", "extra"
    )));
    Logger::info("───────────────────────────────────────");
    Logger::info(format!(
        "{:<8} {:>8} {:>8} {:>8}",
        report.default_language.as_str(),
        report.reference_keys,
        "-",
        "-"
    ));
    for lang in &report.languages {
        Logger::info(format!(
            "{:<8} {:>8} {:>8} {:>8}",
            lang.language.as_str(),
            lang.total,
            lang.missing.len(),
            lang.extra.len()
        ));
    }
    Logger::info("");

    for lang in &report.languages {
        if lang.is_complete() {
            Logger::success(format!(
                "{} {}",
                icons::SUCCESS,
                tf!(ctx, "cli.check.complete", lang = lang.language)
            ));
            continue;
        }
        Logger::warn(format!(
            "{} {}",
            icons::WARNING,
            tf!(
                ctx,
                "cli.check.missing",
                lang = lang.language,
                count = lang.missing.len()
            )
        ));
        if detail {
            for key in &lang.missing {
                Logger::info(format!("    {} {}", icons::ARROW, key));
            }
        }
        if !lang.extra.is_empty() {
            Logger::info(tf!(
                ctx,
                "cli.check.extra",
                lang = lang.language,
                count = lang.extra.len()
            ));
        }
    }
}

// ============================================================================
// 语言列表
// ============================================================================

/// 打印支持的语言，标出当前语言
pub fn print_language_list(ctx: &I18nContext) {
    Logger::info(t!(ctx, "cli.lang.list_header"));
    let current = ctx.current_language();
    for info in ctx.supported_languages() {
        let marker = if &info.code == current {
            icons::LANGUAGE
        } else {
            " "
        };
        Logger::info(format!(
            "  {} {} {:<4} {} ({})",
            marker,
            info.flag,
            info.code.as_str(),
            info.native_name,
            info.name
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_summary_accumulates_reports() {
        let mut summary = ApplySummary::default();
        let report = ApplyReport {
            scanned: 4,
            changed: 3,
            unresolved: BTreeSet::new(),
            title: None,
        };
        summary.record(&report);
        summary.record(&report);

        assert_eq!(summary.files, 2);
        assert_eq!(summary.changed, 6);
        assert_eq!(summary.failed, 0);
    }
}
