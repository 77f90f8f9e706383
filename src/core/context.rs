// ============================================================================
// UEnergy i18n - 国际化上下文
// ============================================================================
//
// 文件: src/core/context.rs
// 职责: 持有翻译、语言状态、事件与当前页面的显式上下文
// 边界:
//   - ✅ 上下文初始化与销毁
//   - ✅ 翻译查询入口
//   - ✅ 语言切换编排（状态 → 页面 → 选择器 → 观察者 → 事件）
//   - ✅ 页面挂载与内容就绪处理
//   - ❌ 不应包含键查找细节（见 i18n::resolver）
//   - ❌ 不应包含终端输出
//
// ============================================================================

use chrono::{DateTime, TimeZone};
use tracing::{debug, info};

use super::applier::{ApplyReport, TextApplier};
use super::events::{EventBus, LanguageChanged, ListenerId};
use super::format;
use super::markup::parse_fragment;
use super::selector::LanguageSelector;
use super::state::{LanguageChange, LanguageState, ObserverId};
use super::storage::{FileStore, PreferenceStore};
use super::watcher::MutationWatcher;
use crate::error::I18nError;
use crate::i18n::{Params, Resolver, TranslationTable};
use crate::models::config::Config;
use crate::models::document::{Document, NodeId};
use crate::models::language::{builtin_languages, LanguageCode, LanguageInfo};
use crate::utils::constants::{DEFAULT_LANGUAGE, DEFAULT_SELECTOR_ID, DEFAULT_STORAGE_KEY};

/// 上下文初始化参数
#[derive(Debug, Clone)]
pub struct ContextOptions {
    /// 支持的语言
    pub languages: Vec<LanguageInfo>,
    /// 回退语言
    pub default_language: String,
    /// 偏好存储键
    pub storage_key: String,
    /// 本次会话固定使用的语言（不写入存储）
    pub language_override: Option<String>,
    /// 语言选择器容器 id
    pub selector_id: String,
    /// 翻译表，缺省时使用内置资源
    pub table: Option<TranslationTable>,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            languages: builtin_languages(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            language_override: None,
            selector_id: DEFAULT_SELECTOR_ID.to_string(),
            table: None,
        }
    }
}

impl ContextOptions {
    /// 由配置生成参数，配置了资源目录时合并到内置翻译之上
    pub fn from_config(config: &Config) -> Result<Self, I18nError> {
        let mut table = TranslationTable::bundled()?;
        if let Some(dir) = &config.i18n.locales_dir {
            let loaded = table.load_dir(std::path::Path::new(dir))?;
            debug!(dir = %dir, loaded, "translation overrides loaded");
        }

        Ok(Self {
            languages: config.i18n.languages.clone(),
            default_language: config.i18n.default_language.clone(),
            storage_key: config.storage.key.clone(),
            language_override: config.i18n.language.clone(),
            selector_id: config.i18n.selector_id.clone(),
            table: Some(table),
        })
    }
}

/// 国际化上下文
#[derive(Debug)]
pub struct I18nContext {
    resolver: Resolver,
    state: LanguageState,
    events: EventBus,
    watcher: MutationWatcher,
    selector: LanguageSelector,
    document: Option<Document>,
}

impl I18nContext {
    // ========================================================================
    // 生命周期
    // ========================================================================

    /// 创建上下文并恢复启动语言
    pub fn init(options: ContextOptions, store: Box<dyn PreferenceStore>) -> Result<Self, I18nError> {
        let table = match options.table {
            Some(table) => table,
            None => TranslationTable::bundled()?,
        };
        let state = LanguageState::restore(
            options.languages,
            &options.default_language,
            store,
            options.storage_key,
            options.language_override.as_deref(),
        )?;
        let resolver = Resolver::new(table, state.default_language().clone());

        info!(
            current = %state.current_language(),
            default = %state.default_language(),
            "i18n context initialized"
        );
        Ok(Self {
            resolver,
            state,
            events: EventBus::new(),
            watcher: MutationWatcher::new(),
            selector: LanguageSelector::new(options.selector_id),
            document: None,
        })
    }

    /// 按配置创建上下文（偏好保存在配置的文件中）
    pub fn from_config(config: &Config) -> Result<Self, I18nError> {
        let store = FileStore::new(config.storage_path());
        Self::init(ContextOptions::from_config(config)?, Box::new(store))
    }

    /// 销毁上下文，返回挂载的页面
    pub fn teardown(mut self) -> Option<Document> {
        self.state.clear_observers();
        self.events.clear();
        debug!("i18n context torn down");
        self.document.take()
    }

    // ========================================================================
    // 翻译
    // ========================================================================

    /// 按当前语言翻译
    pub fn translate(&self, key: &str) -> String {
        self.resolver.resolve(self.state.current_language().as_str(), key)
    }

    /// 按当前语言翻译并替换参数
    pub fn translate_with(&self, key: &str, params: &Params) -> String {
        self.resolver
            .resolve_with(self.state.current_language().as_str(), key, params)
    }

    /// 按当前语言取数组翻译（如星期名称）
    pub fn translate_list(&self, key: &str) -> Option<Vec<String>> {
        self.resolver
            .resolve_list(self.state.current_language().as_str(), key)
    }

    /// 按当前语言格式化时间
    pub fn format_time<Tz: TimeZone>(&self, at: &DateTime<Tz>, now: &DateTime<Tz>, relative: bool) -> String {
        format::format_time(
            &self.resolver,
            self.state.current_language().as_str(),
            at,
            now,
            relative,
        )
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    // ========================================================================
    // 语言状态
    // ========================================================================

    pub fn current_language(&self) -> &LanguageCode {
        self.state.current_language()
    }

    pub fn current_language_info(&self) -> &LanguageInfo {
        self.state.current_info()
    }

    pub fn default_language(&self) -> &LanguageCode {
        self.state.default_language()
    }

    pub fn supported_languages(&self) -> &[LanguageInfo] {
        self.state.supported_languages()
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.state.is_supported(code)
    }

    /// 切换语言
    ///
    /// 成功切换后依次：更新挂载页面、刷新选择器、通知观察者、分发事件。
    pub fn set_language(&mut self, code: &str) -> LanguageChange {
        let change = self.state.set_language(code);
        if let LanguageChange::Changed { old, new, .. } = &change {
            self.propagate(new, old);
        }
        change
    }

    /// 清除已保存偏好并回到默认语言
    pub fn reset_language(&mut self) -> LanguageChange {
        let change = self.state.reset_language();
        if let LanguageChange::Changed { old, new, .. } = &change {
            self.propagate(new, old);
        }
        change
    }

    fn propagate(&mut self, new: &LanguageCode, old: &LanguageCode) {
        if let Some(doc) = self.document.as_mut() {
            let report = TextApplier::new(&self.resolver, self.state.current_info()).apply(doc);
            self.selector
                .refresh(doc, self.state.supported_languages(), new);
            debug!(changed = report.changed, "attached page updated");
        }

        let notified = self.state.notify_observers(new, old);
        let dispatched = self
            .events
            .dispatch(&LanguageChanged::new(new.clone(), old.clone()));
        debug!(notified, dispatched, "language change propagated");
    }

    // ========================================================================
    // 观察者与事件
    // ========================================================================

    pub fn add_observer<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&LanguageCode, &LanguageCode) -> anyhow::Result<()> + 'static,
    {
        self.state.add_observer(observer)
    }

    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        self.state.remove_observer(id)
    }

    /// 订阅 languageChanged 事件
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&LanguageChanged) -> anyhow::Result<()> + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // ========================================================================
    // 页面
    // ========================================================================

    pub fn selector(&self) -> &LanguageSelector {
        &self.selector
    }

    /// 挂载页面并立即应用一次翻译
    ///
    /// `inject_selector` 为真时先注入语言选择器。
    pub fn attach(&mut self, mut doc: Document, inject_selector: bool) -> Result<ApplyReport, I18nError> {
        if inject_selector {
            self.selector
                .inject(&mut doc, self.state.supported_languages(), self.state.current_language())?;
        }
        // 挂载时的整页应用已覆盖之前的插入
        doc.take_mutations();
        let report = self.apply_to(&mut doc);
        self.document = Some(doc);
        Ok(report)
    }

    /// 卸载页面
    pub fn detach(&mut self) -> Option<Document> {
        self.document.take()
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn document_mut(&mut self) -> Option<&mut Document> {
        self.document.as_mut()
    }

    /// 用当前语言处理任意页面（不挂载）
    pub fn apply_to(&self, doc: &mut Document) -> ApplyReport {
        TextApplier::new(&self.resolver, self.state.current_info()).apply(doc)
    }

    /// 对挂载页面重新应用
    pub fn apply(&mut self) -> Option<ApplyReport> {
        let doc = self.document.as_mut()?;
        Some(TextApplier::new(&self.resolver, self.state.current_info()).apply(doc))
    }

    /// 向挂载页面插入一段标记，返回新节点
    ///
    /// 插入后需调用 [`I18nContext::content_ready`] 让新内容得到翻译。
    pub fn insert_markup(
        &mut self,
        parent: NodeId,
        before: Option<NodeId>,
        markup: &str,
    ) -> Result<Vec<NodeId>, I18nError> {
        let fragment = parse_fragment(markup)?;
        match self.document.as_mut() {
            Some(doc) => Ok(doc.insert_fragment(parent, before, &fragment)),
            None => Ok(Vec::new()),
        }
    }

    /// 内容就绪信号：新插入的内容含标记元素时执行一次应用
    pub fn content_ready(&mut self) -> Option<ApplyReport> {
        let doc = self.document.as_mut()?;
        let records = doc.take_mutations();
        if !self.watcher.needs_update(doc, &records) {
            return None;
        }
        Some(TextApplier::new(&self.resolver, self.state.current_info()).apply(doc))
    }
}
