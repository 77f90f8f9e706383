// ============================================================================
// UEnergy i18n - 国际化模块
// ============================================================================
//
// 文件: src/i18n/mod.rs
// 职责: 翻译表与解析器模块入口、翻译宏定义
// 边界:
//   - ✅ 翻译表初始化和管理
//   - ✅ 翻译宏定义和实现
//   - ✅ 参数化翻译支持
//   - ❌ 不应包含具体翻译内容（见 locales/*.json）
//   - ❌ 不应包含语言切换状态
//   - ❌ 不应包含页面更新逻辑
//
// ============================================================================

pub mod catalog;
pub mod resolver;

pub use catalog::TranslationTable;
pub use resolver::{interpolate, Params, Resolver};

/// 简单翻译宏
///
/// `t!(ctx, "nav.home")`，`ctx` 为 [`crate::core::context::I18nContext`]。
#[macro_export]
macro_rules! t {
    ($ctx:expr, $key:expr) => {
        $ctx.translate($key)
    };
}

/// 带命名参数的翻译宏
///
/// `tf!(ctx, "search.foundMatches", count = 5)` 替换模板中的 `{count}`。
#[macro_export]
macro_rules! tf {
    ($ctx:expr, $key:expr, $($name:ident = $value:expr),+ $(,)?) => {{
        let mut params = $crate::i18n::Params::new();
        $( params.insert(stringify!($name).to_string(), format!("{}", $value)); )+
        $ctx.translate_with($key, &params)
    }};
}
