// ============================================================================
// UEnergy i18n - 初始化命令处理
// ============================================================================
//
// 文件: src/cli/init.rs
// 职责: 处理配置文件初始化命令
// 边界:
//   - ✅ 初始化命令参数解析
//   - ✅ 默认配置文件生成
//   - ✅ 配置文件存在性检查
//   - ❌ 不应包含配置文件格式定义
//   - ❌ 不应包含配置验证逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;
use std::path::Path;

use crate::core::context::I18nContext;
use crate::models::config::Config;
use crate::utils::logger::Logger;
use crate::{t, tf};

/// 初始化命令参数
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

/// 处理初始化命令
pub fn handle_init(ctx: &I18nContext, args: InitArgs, config_path: &Path) -> Result<()> {
    // 检查配置文件是否已存在
    if config_path.exists() && !args.force {
        Logger::warn(tf!(ctx, "cli.init.config_exists", path = config_path.display()));
        Logger::info(t!(ctx, "cli.init.use_force_hint"));
        return Ok(());
    }

    // 生成默认配置文件
    match Config::create_default_config_file(config_path) {
        Ok(_) => {
            Logger::success(tf!(ctx, "cli.init.config_created", path = config_path.display()));
        }
        Err(e) => {
            Logger::error(tf!(ctx, "cli.init.create_failed", error = e));
            return Err(e);
        }
    }

    Ok(())
}
