// ============================================================================
// UEnergy i18n - 翻译解析器
// ============================================================================
//
// 文件: src/i18n/resolver.rs
// 职责: 点分键查找、默认语言回退、参数替换
// 边界:
//   - ✅ 点分键逐段查找
//   - ✅ 默认语言回退，最终返回键本身
//   - ✅ `{name}` 参数替换
//   - ❌ 不应包含当前语言状态
//   - ❌ 不应包含页面更新逻辑
//
// ============================================================================

use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::trace;

use super::catalog::TranslationTable;
use crate::models::language::LanguageCode;

/// 翻译参数
pub type Params = HashMap<String, String>;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{(\w+)\}").expect("placeholder pattern is valid"))
}

/// 翻译解析器
///
/// 查找顺序：请求语言 → 默认语言 → 键本身。
/// 请求语言中找到的非字符串节点（对象、数组）不会回退，直接返回键。
#[derive(Debug, Clone)]
pub struct Resolver {
    table: TranslationTable,
    default_language: LanguageCode,
}

impl Resolver {
    pub fn new(table: TranslationTable, default_language: impl Into<LanguageCode>) -> Self {
        Self {
            table,
            default_language: default_language.into(),
        }
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    pub fn default_language(&self) -> &LanguageCode {
        &self.default_language
    }

    /// 解析键，不做参数替换
    pub fn resolve(&self, language: &str, key: &str) -> String {
        self.resolve_with(language, key, &Params::new())
    }

    /// 解析键并替换 `{name}` 参数
    pub fn resolve_with(&self, language: &str, key: &str, params: &Params) -> String {
        match self.lookup(language, key) {
            Some(Value::String(text)) => interpolate(text, params),
            Some(_) => {
                trace!(key, language, "translation is not a string leaf");
                key.to_string()
            }
            None => {
                trace!(key, language, "translation missing, returning key");
                key.to_string()
            }
        }
    }

    /// 解析数组叶子（如星期名称），查找规则同 [`Resolver::resolve`]
    pub fn resolve_list(&self, language: &str, key: &str) -> Option<Vec<String>> {
        match self.lookup(language, key)? {
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }

    /// 某语言自身是否定义了该键（不回退）
    pub fn contains(&self, language: &str, key: &str) -> bool {
        self.table
            .tree(language)
            .and_then(|tree| walk(tree, key))
            .map(Value::is_string)
            .unwrap_or(false)
    }

    /// 带回退的原始节点查找
    fn lookup(&self, language: &str, key: &str) -> Option<&Value> {
        self.table
            .tree(language)
            .and_then(|tree| walk(tree, key))
            .or_else(|| {
                trace!(key, language, fallback = %self.default_language, "falling back to default language");
                self.table
                    .tree(self.default_language.as_str())
                    .and_then(|tree| walk(tree, key))
            })
    }
}

/// 按 `.` 分段逐级查找；数组节点接受数字下标
fn walk<'a>(tree: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(tree, |node, segment| match node {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|index| items.get(index)),
        _ => None,
    })
}

/// 替换 `{name}`，缺少的参数保留原样；只替换一遍
pub fn interpolate(text: &str, params: &Params) -> String {
    if params.is_empty() {
        return text.to_string();
    }
    placeholder()
        .replace_all(text, |caps: &Captures| match params.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> Resolver {
        let mut table = TranslationTable::new();
        table
            .insert(
                "zh",
                json!({
                    "nav": {"home": "首页", "settings": "设置"},
                    "search": {"foundMatches": "找到 {count} 条匹配记录"},
                    "datePicker": {"weekdays": ["日", "一", "二", "三", "四", "五", "六"]}
                }),
            )
            .unwrap();
        table
            .insert(
                "en",
                json!({
                    "nav": {"home": "Home"},
                    "search": {"foundMatches": "Found {count} matches"},
                    "count": 3
                }),
            )
            .unwrap();
        Resolver::new(table, "zh")
    }

    #[test]
    fn test_resolves_current_language() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("en", "nav.home"), "Home");
        assert_eq!(resolver.resolve("zh", "nav.home"), "首页");
    }

    #[test]
    fn test_falls_back_to_default_language() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("en", "nav.settings"), "设置");
        assert!(!resolver.contains("en", "nav.settings"));
        assert!(resolver.contains("zh", "nav.settings"));
    }

    #[test]
    fn test_unknown_language_uses_default() {
        assert_eq!(resolver().resolve("fr", "nav.home"), "首页");
    }

    #[test]
    fn test_missing_key_returns_key() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("en", "nav.missing"), "nav.missing");
        assert_eq!(resolver.resolve("en", "nav.home.deeper"), "nav.home.deeper");
        assert_eq!(resolver.resolve("en", ""), "");
    }

    #[test]
    fn test_non_string_leaf_returns_key() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("en", "nav"), "nav");
        assert_eq!(resolver.resolve("en", "count"), "count");
        assert_eq!(resolver.resolve("zh", "datePicker.weekdays"), "datePicker.weekdays");
    }

    #[test]
    fn test_array_segments_by_index() {
        let resolver = resolver();
        assert_eq!(resolver.resolve("zh", "datePicker.weekdays.1"), "一");
        assert_eq!(
            resolver.resolve("zh", "datePicker.weekdays.9"),
            "datePicker.weekdays.9"
        );
    }

    #[test]
    fn test_resolve_list_falls_back() {
        let resolver = resolver();
        let weekdays = resolver.resolve_list("en", "datePicker.weekdays").unwrap();
        assert_eq!(weekdays.len(), 7);
        assert_eq!(weekdays[0], "日");
        assert!(resolver.resolve_list("en", "nav.home").is_none());
    }

    #[test]
    fn test_parameter_substitution() {
        let resolver = resolver();
        let params = Params::from([("count".to_string(), "5".to_string())]);
        assert_eq!(
            resolver.resolve_with("en", "search.foundMatches", &params),
            "Found 5 matches"
        );
        assert_eq!(
            resolver.resolve("en", "search.foundMatches"),
            "Found {count} matches"
        );
    }

    #[test]
    fn test_empty_params_match_plain_resolve() {
        let resolver = resolver();
        for key in ["nav.home", "nav.settings", "search.foundMatches", "nav.missing"] {
            assert_eq!(
                resolver.resolve_with("en", key, &Params::new()),
                resolver.resolve("en", key)
            );
        }
    }

    #[test]
    fn test_interpolate_leaves_unknown_placeholders() {
        let params = Params::from([("a".to_string(), "{b}".to_string())]);
        assert_eq!(interpolate("{a} {b} {c d}", &params), "{b} {b} {c d}");
    }

    #[test]
    fn test_bundled_default_keys_resolve_in_every_language() {
        let table = TranslationTable::bundled().unwrap();
        let resolver = Resolver::new(table.clone(), "zh");

        let string_keys: Vec<String> = table
            .leaf_keys("zh")
            .into_iter()
            .filter(|key| resolver.contains("zh", key))
            .collect();
        assert!(!string_keys.is_empty());

        for language in crate::models::language::builtin_languages() {
            for key in &string_keys {
                assert_ne!(
                    resolver.resolve(language.code.as_str(), key),
                    *key,
                    "{} resolves to itself in {}",
                    key,
                    language.code
                );
            }
        }
    }
}
