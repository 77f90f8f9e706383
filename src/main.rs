// ============================================================================
// UEnergy i18n - 程序入口
// ============================================================================
//
// 文件: src/main.rs
// 职责: 命令行程序入口
// 边界:
//   - ✅ 调用 CLI 路由
//   - ✅ 顶层错误输出与退出码
//   - ❌ 不应包含命令实现
//
// ============================================================================

use uenergy_i18n::cli;
use uenergy_i18n::utils::logger::Logger;

fn main() {
    if let Err(e) = cli::run_cli() {
        Logger::error(format!("{:#}", e));
        std::process::exit(1);
    }
}
