// ============================================================================
// UEnergy i18n - 页面文本应用
// ============================================================================
//
// 文件: src/core/applier.rs
// 职责: 扫描文档中的标记元素并写入翻译文本
// 边界:
//   - ✅ 强制中英文本（data-text-zh / data-text-en）
//   - ✅ data-i18n / data-i18n-key 文本与输入框 placeholder
//   - ✅ data-i18n-placeholder / data-i18n-title 属性
//   - ✅ `<html lang>` 更新
//   - ❌ 不应包含语言切换状态
//   - ❌ 不应包含文件读写
//
// ============================================================================

use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, trace};

use crate::i18n::Resolver;
use crate::models::document::{Document, NodeId};
use crate::models::language::LanguageInfo;
use crate::utils::constants::attrs;

/// 一次应用的结果统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// 扫描到的标记元素数
    pub scanned: usize,
    /// 内容发生变化的元素数
    pub changed: usize,
    /// 未能解析的键
    pub unresolved: BTreeSet<String>,
    /// 应用后的文档标题
    pub title: Option<String>,
}

impl ApplyReport {
    pub fn is_clean(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// 页面文本应用器
pub struct TextApplier<'a> {
    resolver: &'a Resolver,
    language: &'a LanguageInfo,
}

/// 一次遍历中的累计状态
#[derive(Default)]
struct Pass {
    scanned: BTreeSet<NodeId>,
    changed: BTreeSet<NodeId>,
    unresolved: BTreeSet<String>,
}

impl Pass {
    fn record(&mut self, id: NodeId, changed: bool) {
        self.scanned.insert(id);
        if changed {
            self.changed.insert(id);
        }
    }
}

impl<'a> TextApplier<'a> {
    pub fn new(resolver: &'a Resolver, language: &'a LanguageInfo) -> Self {
        Self { resolver, language }
    }

    /// 对文档执行一次完整的应用
    ///
    /// 解析结果等于键本身时元素保持不变；重复执行不会产生新的变化。
    pub fn apply(&self, doc: &mut Document) -> ApplyReport {
        let mut pass = Pass::default();

        self.apply_forced(doc, &mut pass);
        self.apply_text(doc, attrs::I18N, true, &mut pass);
        self.apply_text(doc, attrs::I18N_KEY, true, &mut pass);
        self.apply_attribute(doc, attrs::I18N_PLACEHOLDER, "placeholder", &mut pass);
        self.apply_attribute(doc, attrs::I18N_TITLE, "title", &mut pass);
        self.apply_html_lang(doc, &mut pass);

        let report = ApplyReport {
            scanned: pass.scanned.len(),
            changed: pass.changed.len(),
            unresolved: pass.unresolved,
            title: doc.title(),
        };
        debug!(
            language = %self.language.code,
            scanned = report.scanned,
            changed = report.changed,
            unresolved = report.unresolved.len(),
            "applier pass finished"
        );
        report
    }

    /// 解析键，未找到时记录并返回 `None`
    fn lookup(&self, key: &str, pass: &mut Pass) -> Option<String> {
        let text = self.resolver.resolve(self.language.code.as_str(), key);
        if text == key {
            trace!(key, "leaving element untouched");
            pass.unresolved.insert(key.to_string());
            None
        } else {
            Some(text)
        }
    }

    fn apply_forced(&self, doc: &mut Document, pass: &mut Pass) {
        let use_zh = self.language.code == "zh";
        for id in doc.elements_with_attr(attrs::TEXT_ZH) {
            let literal = if use_zh {
                doc.attr(id, attrs::TEXT_ZH)
            } else {
                doc.attr(id, attrs::TEXT_EN)
            };
            let Some(literal) = literal.map(str::to_string) else {
                continue;
            };
            if !doc.has_attr(id, attrs::TEXT_EN) {
                continue;
            }
            let changed = doc.set_text_content(id, &literal);
            pass.record(id, changed);
        }
    }

    /// `skip_forced` 为真时跳过带强制文本的元素
    fn apply_text(&self, doc: &mut Document, attr: &str, skip_forced: bool, pass: &mut Pass) {
        for id in doc.elements_with_attr(attr) {
            if skip_forced && has_forced_pair(doc, id) {
                continue;
            }
            let Some(key) = doc.attr(id, attr).map(str::to_string) else {
                continue;
            };
            let Some(text) = self.lookup(&key, pass) else {
                pass.record(id, false);
                continue;
            };

            let changed = if doc.is_text_input(id) {
                doc.set_attr(id, "placeholder", &text)
            } else {
                doc.set_text_content(id, &text)
            };
            pass.record(id, changed);
        }
    }

    fn apply_attribute(&self, doc: &mut Document, attr: &str, target: &str, pass: &mut Pass) {
        for id in doc.elements_with_attr(attr) {
            let Some(key) = doc.attr(id, attr).map(str::to_string) else {
                continue;
            };
            let changed = match self.lookup(&key, pass) {
                Some(text) => doc.set_attr(id, target, &text),
                None => false,
            };
            pass.record(id, changed);
        }
    }

    fn apply_html_lang(&self, doc: &mut Document, pass: &mut Pass) {
        if let Some(&html) = doc.elements_by_tag("html").first() {
            if doc.set_attr(html, "lang", self.language.html_tag()) {
                pass.changed.insert(html);
            }
        }
    }
}

fn has_forced_pair(doc: &Document, id: NodeId) -> bool {
    doc.has_attr(id, attrs::TEXT_ZH) && doc.has_attr(id, attrs::TEXT_EN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::{parse_document, to_html};
    use crate::i18n::TranslationTable;
    use crate::models::language::builtin_languages;

    const PAGE: &str = r#"<html lang="en"><head><title data-i18n-key="operationLog.title">Operation Log</title></head>
<body>
<span id="home" data-i18n="nav.home">Home</span>
<h3 id="forced" data-i18n="nav.settings" data-text-zh="充电条件" data-text-en="Charge Condition">Charge Condition</h3>
<input id="search" type="text" data-i18n="nav.home">
<input id="box" data-i18n-placeholder="common.back" placeholder="">
<button id="tip" data-i18n-title="refresh">R</button>
<span id="missing" data-i18n="nav.missing">keep me</span>
</body></html>"#;

    fn resolver() -> Resolver {
        Resolver::new(TranslationTable::bundled().unwrap(), "zh")
    }

    fn language(code: &str) -> LanguageInfo {
        builtin_languages()
            .into_iter()
            .find(|info| info.code == code)
            .unwrap()
    }

    fn text(doc: &Document, id: &str) -> String {
        doc.text_content(doc.element_by_id(id).unwrap())
    }

    #[test]
    fn test_switching_to_zh_updates_marked_text() {
        let resolver = resolver();
        let zh = language("zh");
        let mut doc = parse_document(PAGE).unwrap();

        let report = TextApplier::new(&resolver, &zh).apply(&mut doc);

        assert_eq!(text(&doc, "home"), "首页");
        assert_eq!(report.title.as_deref(), Some("操作记录"));
        assert!(report.changed > 0);
        let html = doc.elements_by_tag("html")[0];
        assert_eq!(doc.attr(html, "lang"), Some("zh-CN"));
    }

    #[test]
    fn test_forced_pair_wins_over_lookup() {
        let resolver = resolver();
        let mut doc = parse_document(PAGE).unwrap();

        TextApplier::new(&resolver, &language("zh")).apply(&mut doc);
        assert_eq!(text(&doc, "forced"), "充电条件");

        TextApplier::new(&resolver, &language("ja")).apply(&mut doc);
        assert_eq!(text(&doc, "forced"), "Charge Condition");
    }

    #[test]
    fn test_inputs_receive_placeholder_and_title_attribute() {
        let resolver = resolver();
        let mut doc = parse_document(PAGE).unwrap();

        TextApplier::new(&resolver, &language("en")).apply(&mut doc);

        let search = doc.element_by_id("search").unwrap();
        assert_eq!(doc.attr(search, "placeholder"), Some("Home"));
        assert!(doc.children(search).is_empty());
        let boxed = doc.element_by_id("box").unwrap();
        assert_eq!(doc.attr(boxed, "placeholder"), Some("Back"));
        let tip = doc.element_by_id("tip").unwrap();
        assert_eq!(doc.attr(tip, "title"), Some("Refresh"));
        assert_eq!(text(&doc, "tip"), "R");
    }

    #[test]
    fn test_unresolved_keys_leave_elements_untouched() {
        let resolver = resolver();
        let mut doc = parse_document(PAGE).unwrap();

        let report = TextApplier::new(&resolver, &language("en")).apply(&mut doc);

        assert_eq!(text(&doc, "missing"), "keep me");
        assert!(report.unresolved.contains("nav.missing"));
        assert!(!report.is_clean());
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let resolver = resolver();
        let zh = language("zh");
        let mut doc = parse_document(PAGE).unwrap();
        let applier = TextApplier::new(&resolver, &zh);

        applier.apply(&mut doc);
        let first = to_html(&doc);
        let second = applier.apply(&mut doc);

        assert_eq!(second.changed, 0);
        assert_eq!(to_html(&doc), first);
    }

    #[test]
    fn test_round_trip_restores_texts() {
        let resolver = resolver();
        let mut doc = parse_document(PAGE).unwrap();
        TextApplier::new(&resolver, &language("en")).apply(&mut doc);
        let english = to_html(&doc);

        TextApplier::new(&resolver, &language("zh")).apply(&mut doc);
        TextApplier::new(&resolver, &language("en")).apply(&mut doc);

        assert_eq!(to_html(&doc), english);
    }

    #[test]
    fn test_forced_pair_wins_over_key_attribute() {
        let resolver = resolver();
        let en = language("en");
        let mut doc = parse_document(
            r#"<body><h3 id="title" data-i18n-key="nav.home" data-text-zh="充电条件" data-text-en="Charge Condition">x</h3></body>"#,
        )
        .unwrap();
        let applier = TextApplier::new(&resolver, &en);

        applier.apply(&mut doc);
        assert_eq!(text(&doc, "title"), "Charge Condition");
        assert_eq!(applier.apply(&mut doc).changed, 0);
    }

    #[test]
    fn test_empty_translation_is_stable() {
        let mut table = TranslationTable::new();
        table
            .insert("zh", serde_json::json!({"a": {"b": ""}}))
            .unwrap();
        let resolver = Resolver::new(table, "zh");
        let zh = language("zh");
        let mut doc =
            parse_document(r#"<body><span id="empty" data-i18n="a.b">x</span></body>"#).unwrap();
        let applier = TextApplier::new(&resolver, &zh);

        assert_eq!(applier.apply(&mut doc).changed, 1);
        assert_eq!(text(&doc, "empty"), "");
        assert_eq!(applier.apply(&mut doc).changed, 0);
    }
}
