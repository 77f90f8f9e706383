// ============================================================================
// UEnergy i18n - 翻译查询命令
// ============================================================================
//
// 文件: src/cli/translate.rs
// 职责: 解析单个翻译键并输出结果
// 边界:
//   - ✅ 查询参数解析（name=value）
//   - ✅ 结果输出到标准输出
//   - ❌ 不应包含键查找逻辑
//
// ============================================================================

use anyhow::Result;
use clap::Args;

use crate::core::context::I18nContext;
use crate::i18n::Params;

/// 翻译查询参数
#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Dotted translation key, e.g. nav.home
    pub key: String,

    /// Placeholder value, e.g. -p count=5 (repeatable)
    #[arg(short, long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,
}

/// 解析 `name=value`
fn parse_param(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", raw)),
    }
}

/// 处理翻译查询命令
pub fn handle_translate(ctx: &I18nContext, args: TranslateArgs) -> Result<()> {
    let params: Params = args.params.into_iter().collect();
    // 输出保持纯文本，便于脚本使用
    println!("{}", ctx.translate_with(&args.key, &params));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(
            parse_param("count=5").unwrap(),
            ("count".to_string(), "5".to_string())
        );
        assert_eq!(
            parse_param("date=2025-07-07=x").unwrap(),
            ("date".to_string(), "2025-07-07=x".to_string())
        );
        assert!(parse_param("count").is_err());
        assert!(parse_param("=5").is_err());
    }
}
