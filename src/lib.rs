// ============================================================================
// UEnergy i18n - 库入口
// ============================================================================
//
// 文件: src/lib.rs
// 职责: 模块声明与常用类型导出
// 边界:
//   - ✅ 模块声明
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含业务实现
//
// ============================================================================

pub mod cli;
pub mod core;
pub mod error;
pub mod i18n;
pub mod models;
pub mod ui;
pub mod utils;

pub use crate::core::{ContextOptions, I18nContext, LanguageChange, LanguageChanged};
pub use crate::error::{I18nError, MarkupError, StorageError};
pub use crate::i18n::{Params, Resolver, TranslationTable};
pub use crate::models::document::Document;
pub use crate::models::language::{LanguageCode, LanguageInfo};
