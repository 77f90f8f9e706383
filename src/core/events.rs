// ============================================================================
// UEnergy i18n - 语言切换事件
// ============================================================================
//
// 文件: src/core/events.rs
// 职责: languageChanged 事件定义与订阅分发
// 边界:
//   - ✅ 事件载荷定义与自定义事件序列化
//   - ✅ 监听器订阅/取消订阅
//   - ✅ 隔离单个监听器失败的分发
//   - ❌ 不应包含语言状态逻辑
//   - ❌ 不应包含页面更新逻辑
//
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error};

use crate::models::language::LanguageCode;
use crate::utils::constants::LANGUAGE_CHANGED_EVENT;

/// 语言切换事件载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageChanged {
    pub new_language: LanguageCode,
    pub old_language: LanguageCode,
}

impl LanguageChanged {
    /// 事件名
    pub const NAME: &'static str = LANGUAGE_CHANGED_EVENT;

    pub fn new(new_language: LanguageCode, old_language: LanguageCode) -> Self {
        Self {
            new_language,
            old_language,
        }
    }

    /// 序列化为 `{ "type": "languageChanged", "detail": { ... } }`
    pub fn to_custom_event(&self) -> Value {
        json!({
            "type": Self::NAME,
            "detail": self,
        })
    }
}

/// 事件监听器
pub type Listener = Box<dyn FnMut(&LanguageChanged) -> anyhow::Result<()>>;

/// 监听器 id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// languageChanged 事件总线
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&LanguageChanged) -> anyhow::Result<()> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// 分发事件，返回被调用的监听器数量
    ///
    /// 失败或 panic 的监听器只记录日志，其余监听器照常调用。
    pub fn dispatch(&mut self, event: &LanguageChanged) -> usize {
        debug!(
            new = %event.new_language,
            old = %event.old_language,
            listeners = self.listeners.len(),
            "dispatching {}",
            LanguageChanged::NAME
        );

        for (id, listener) in self.listeners.iter_mut() {
            match panic::catch_unwind(AssertUnwindSafe(|| listener(event))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!(listener = id.0, error = %e, "languageChanged listener failed"),
                Err(_) => error!(listener = id.0, "languageChanged listener panicked"),
            }
        }
        self.listeners.len()
    }
}
