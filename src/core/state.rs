// ============================================================================
// UEnergy i18n - 语言状态管理
// ============================================================================
//
// 文件: src/core/state.rs
// 职责: 当前语言状态、持久化与观察者通知
// 边界:
//   - ✅ 启动时语言恢复（覆盖值 → 已保存偏好 → 默认语言）
//   - ✅ 语言切换与偏好持久化
//   - ✅ 观察者注册与隔离通知
//   - ❌ 不应包含翻译查找逻辑
//   - ❌ 不应包含页面更新逻辑
//
// ============================================================================

use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, info, warn};

use super::storage::{MemoryStore, PreferenceStore};
use crate::error::I18nError;
use crate::models::language::{LanguageCode, LanguageInfo};

/// 语言变化观察者，参数为 (新语言, 旧语言)
pub type Observer = Box<dyn FnMut(&LanguageCode, &LanguageCode) -> anyhow::Result<()>>;

/// 观察者 id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// 语言切换结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageChange {
    /// 已选择语言（与当前语言相同时 `old == new`）
    Changed {
        old: LanguageCode,
        new: LanguageCode,
        /// 偏好是否成功写入存储
        persisted: bool,
    },
    /// 重置时已经处于默认语言
    Unchanged(LanguageCode),
    /// 不支持的语言，状态未变
    Rejected(String),
}

impl LanguageChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, LanguageChange::Changed { .. })
    }
}

/// 语言状态管理器
pub struct LanguageState {
    languages: Vec<LanguageInfo>,
    current: usize,
    default: usize,
    store: Box<dyn PreferenceStore>,
    storage_key: String,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl std::fmt::Debug for LanguageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageState")
            .field("current", self.current_language())
            .field("default", self.default_language())
            .field("storage_key", &self.storage_key)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LanguageState {
    /// 恢复启动语言
    ///
    /// 顺序：有效的覆盖值 → 有效的已保存偏好 → 默认语言。
    /// 存储读取失败时记录警告，本次会话使用默认语言。
    pub fn restore(
        languages: Vec<LanguageInfo>,
        default_language: &str,
        store: Box<dyn PreferenceStore>,
        storage_key: impl Into<String>,
        language_override: Option<&str>,
    ) -> Result<Self, I18nError> {
        if languages.is_empty() {
            return Err(I18nError::NoLanguages);
        }
        let default = position_of(&languages, default_language)
            .ok_or_else(|| I18nError::UnsupportedLanguage(default_language.to_string()))?;

        let storage_key = storage_key.into();
        let mut state = Self {
            languages,
            current: default,
            default,
            store,
            storage_key,
            observers: Vec::new(),
            next_observer: 0,
        };
        state.current = state.startup_position(language_override);
        info!(language = %state.current_language(), "language restored");
        Ok(state)
    }

    /// 使用内存存储创建（测试与一次性处理）
    pub fn in_memory(languages: Vec<LanguageInfo>, default_language: &str) -> Result<Self, I18nError> {
        Self::restore(
            languages,
            default_language,
            Box::new(MemoryStore::new()),
            crate::utils::constants::DEFAULT_STORAGE_KEY,
            None,
        )
    }

    fn startup_position(&self, language_override: Option<&str>) -> usize {
        if let Some(code) = language_override {
            match position_of(&self.languages, code) {
                Some(position) => return position,
                None => warn!(language = code, "ignoring unsupported language override"),
            }
        }

        match self.store.get(&self.storage_key) {
            Ok(Some(stored)) => match position_of(&self.languages, &stored) {
                Some(position) => return position,
                None => warn!(language = %stored, "ignoring unsupported stored language"),
            },
            Ok(None) => debug!(key = %self.storage_key, "no stored language preference"),
            Err(e) => warn!(error = %e, "failed to load language preference, using default"),
        }

        self.default
    }

    pub fn current_language(&self) -> &LanguageCode {
        &self.languages[self.current].code
    }

    pub fn current_info(&self) -> &LanguageInfo {
        &self.languages[self.current]
    }

    pub fn default_language(&self) -> &LanguageCode {
        &self.languages[self.default].code
    }

    pub fn supported_languages(&self) -> &[LanguageInfo] {
        &self.languages
    }

    pub fn language_info(&self, code: &str) -> Option<&LanguageInfo> {
        position_of(&self.languages, code).map(|position| &self.languages[position])
    }

    pub fn is_supported(&self, code: &str) -> bool {
        position_of(&self.languages, code).is_some()
    }

    /// 切换语言并持久化
    ///
    /// 选择当前语言同样会写入偏好，首次选择即创建存储记录。
    /// 只负责状态与存储；页面更新和观察者通知由调用方在之后进行。
    pub fn set_language(&mut self, code: &str) -> LanguageChange {
        let Some(position) = position_of(&self.languages, code) else {
            warn!(language = code, "language is not supported");
            return LanguageChange::Rejected(code.to_string());
        };

        let old = self.current_language().clone();
        self.current = position;
        let new = self.current_language().clone();
        let persisted = self.persist(&new);
        info!(%old, %new, "language changed");

        LanguageChange::Changed { old, new, persisted }
    }

    /// 删除已保存的偏好并回到默认语言
    pub fn reset_language(&mut self) -> LanguageChange {
        if let Err(e) = self.store.remove(&self.storage_key) {
            warn!(error = %e, "failed to remove language preference");
        }

        let old = self.current_language().clone();
        self.current = self.default;
        let new = self.current_language().clone();
        if old == new {
            LanguageChange::Unchanged(new)
        } else {
            LanguageChange::Changed {
                old,
                new,
                persisted: false,
            }
        }
    }

    fn persist(&mut self, code: &LanguageCode) -> bool {
        match self.store.set(&self.storage_key, code.as_str()) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "failed to save language preference");
                false
            }
        }
    }

    /// 注册观察者
    pub fn add_observer<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&LanguageCode, &LanguageCode) -> anyhow::Result<()> + 'static,
    {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// 移除观察者，返回是否存在
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// 通知全部观察者，返回成功执行的数量
    ///
    /// 单个观察者返回错误或 panic 只记录日志，不影响其余观察者。
    pub fn notify_observers(&mut self, new: &LanguageCode, old: &LanguageCode) -> usize {
        let mut succeeded = 0;
        for (id, observer) in self.observers.iter_mut() {
            match panic::catch_unwind(AssertUnwindSafe(|| observer(new, old))) {
                Ok(Ok(())) => succeeded += 1,
                Ok(Err(e)) => error!(observer = id.0, error = %e, "language observer failed"),
                Err(_) => error!(observer = id.0, "language observer panicked"),
            }
        }
        succeeded
    }
}

fn position_of(languages: &[LanguageInfo], code: &str) -> Option<usize> {
    let code = LanguageCode::new(code);
    languages.iter().position(|info| info.code == code)
}
