// ============================================================================
// UEnergy i18n - 日志工具
// ============================================================================
//
// 文件: src/utils/logger.rs
// 职责: 日志输出和格式化工具
// 边界:
//   - ✅ 控制台输出格式化
//   - ✅ tracing 订阅器初始化
//   - ✅ 彩色输出开关
//   - ❌ 不应包含业务逻辑
//   - ❌ 不应包含文件日志写入
//   - ❌ 不应包含日志内容生成
//
// ============================================================================

use colored::Colorize;
use tracing_subscriber::EnvFilter;

use super::constants::APP_NAME;

/// 面向用户的控制台输出
pub struct Logger;

impl Logger {
    pub fn info<S: AsRef<str>>(msg: S) {
        println!("{} {}", format!("[{}]", APP_NAME).cyan(), msg.as_ref());
    }

    pub fn warn<S: AsRef<str>>(msg: S) {
        println!("{} {}", "[WARN]".yellow(), msg.as_ref());
    }

    pub fn error<S: AsRef<str>>(msg: S) {
        eprintln!("{} {}", "[ERROR]".red(), msg.as_ref());
    }

    pub fn success<S: AsRef<str>>(msg: S) {
        println!("{} {}", format!("[{}]", APP_NAME).green(), msg.as_ref());
    }

    /// 粗体文本
    pub fn bold(text: &str) -> String {
        text.bold().to_string()
    }

    /// 开关彩色输出
    pub fn set_colored(enabled: bool) {
        colored::control::set_override(enabled);
    }
}

/// 初始化诊断日志
///
/// `RUST_LOG` 优先；否则详细模式为 `debug`，默认只输出 `warn` 及以上。
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // 重复初始化（例如测试中）直接忽略
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
