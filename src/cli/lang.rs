// ============================================================================
// UEnergy i18n - 语言偏好命令
// ============================================================================
//
// 文件: src/cli/lang.rs
// 职责: 查看、切换、重置已保存的界面语言
// 边界:
//   - ✅ 子命令定义和解析
//   - ✅ 切换结果提示
//   - ❌ 不应包含偏好存储细节（见 core::storage）
//
// ============================================================================

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::core::context::I18nContext;
use crate::core::state::LanguageChange;
use crate::ui::summary;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 语言偏好参数
#[derive(Debug, Args)]
pub struct LangArgs {
    #[command(subcommand)]
    pub action: LangAction,
}

#[derive(Debug, Subcommand)]
pub enum LangAction {
    /// Show the current language
    Get,
    /// Switch to a language and save it as preference
    Set {
        /// Language code (zh, en, ja, ko)
        code: String,
    },
    /// Remove the saved preference and return to the default language
    Reset,
    /// List supported languages
    List,
}

/// 处理语言偏好命令
pub fn handle_lang(ctx: &mut I18nContext, args: LangArgs) -> Result<()> {
    match args.action {
        LangAction::Get => {
            let info = ctx.current_language_info();
            Logger::info(tf!(
                ctx,
                "cli.lang.current",
                flag = info.flag,
                name = info.native_name,
                code = info.code
            ));
        }
        LangAction::Set { code } => {
            let change = ctx.set_language(&code);
            report_change(ctx, change)?;
        }
        LangAction::Reset => {
            let change = ctx.reset_language();
            Logger::success(tf!(ctx, "cli.lang.reset", code = ctx.current_language()));
            if let LanguageChange::Changed { old, new, .. } = &change {
                Logger::info(tf!(ctx, "cli.lang.changed", old = old, new = new));
            }
        }
        LangAction::List => summary::print_language_list(ctx),
    }
    Ok(())
}

fn report_change(ctx: &I18nContext, change: LanguageChange) -> Result<()> {
    match change {
        LanguageChange::Changed {
            old,
            new,
            persisted,
        } => {
            if old == new {
                Logger::info(tf!(ctx, "cli.lang.unchanged", code = new));
            } else {
                Logger::success(tf!(ctx, "cli.lang.changed", old = old, new = new));
            }
            if !persisted {
                Logger::warn(t!(ctx, "cli.lang.storage_failed"));
            }
        }
        LanguageChange::Unchanged(code) => {
            Logger::info(tf!(ctx, "cli.lang.unchanged", code = code));
        }
        LanguageChange::Rejected(code) => {
            anyhow::bail!(tf!(ctx, "cli.lang.rejected", code = code));
        }
    }
    Ok(())
}
