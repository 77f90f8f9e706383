// ============================================================================
// UEnergy i18n - Core 核心模块
// ============================================================================
//
// 文件: src/core/mod.rs
// 职责: 核心业务逻辑模块入口和导出
// 边界:
//   - ✅ 核心子模块导出
//   - ✅ 常用类型重新导出
//   - ❌ 不应包含具体业务实现
//   - ❌ 不应包含 CLI 相关逻辑
//   - ❌ 不应包含 UI 相关逻辑
//
// ============================================================================

pub mod applier;
pub mod context;
pub mod coverage;
pub mod events;
pub mod format;
pub mod markup;
pub mod pages;
pub mod selector;
pub mod state;
pub mod storage;
pub mod watcher;

// 重新导出常用类型
pub use applier::{ApplyReport, TextApplier};
pub use context::{ContextOptions, I18nContext};
pub use coverage::{check_coverage, CoverageReport, LanguageCoverage};
pub use events::{EventBus, LanguageChanged, ListenerId};
pub use selector::LanguageSelector;
pub use state::{LanguageChange, LanguageState, ObserverId};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use watcher::MutationWatcher;
