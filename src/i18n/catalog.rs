// ============================================================================
// UEnergy i18n - 翻译表
// ============================================================================
//
// 文件: src/i18n/catalog.rs
// 职责: 各语言翻译树的加载与存储
// 边界:
//   - ✅ 内置翻译资源加载
//   - ✅ 资源目录覆盖加载与合并
//   - ✅ 叶子键枚举
//   - ❌ 不应包含键查找与回退逻辑
//   - ❌ 不应包含语言切换逻辑
//
// ============================================================================

use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::I18nError;
use crate::models::language::LanguageCode;

/// 内置翻译资源
const BUNDLED: &[(&str, &str)] = &[
    ("zh", include_str!("../../locales/zh.json")),
    ("en", include_str!("../../locales/en.json")),
    ("ja", include_str!("../../locales/ja.json")),
    ("ko", include_str!("../../locales/ko.json")),
];

/// 语言代码 → 点分键树
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    locales: HashMap<LanguageCode, Value>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加载内置的全部语言
    pub fn bundled() -> Result<Self, I18nError> {
        let mut table = Self::new();
        for (code, content) in BUNDLED {
            table.insert(*code, parse_resource(code, content)?)?;
        }
        Ok(table)
    }

    /// 设置某语言的完整翻译树（根节点必须是对象）
    pub fn insert(&mut self, code: impl Into<LanguageCode>, tree: Value) -> Result<(), I18nError> {
        let code = code.into();
        if !tree.is_object() {
            return Err(I18nError::NotAnObject(code.to_string()));
        }
        self.locales.insert(code, tree);
        Ok(())
    }

    /// 把翻译树深度合并到已有语言上，同名叶子以新值为准
    pub fn merge(&mut self, code: impl Into<LanguageCode>, tree: Value) -> Result<(), I18nError> {
        let code = code.into();
        let Value::Object(overrides) = tree else {
            return Err(I18nError::NotAnObject(code.to_string()));
        };
        let target = self
            .locales
            .entry(code)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(existing) = target {
            merge_objects(existing, overrides);
        }
        Ok(())
    }

    /// 从目录加载 `<code>.json` 覆盖文件，返回成功合并的文件数
    ///
    /// 无法解析的文件记录警告后跳过，已加载的翻译保持不变。
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, I18nError> {
        let entries = std::fs::read_dir(dir).map_err(|source| I18nError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let Some(code) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let content = match std::fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to read translation resource");
                    continue;
                }
            };
            match parse_resource(code, &content).and_then(|tree| self.merge(code, tree)) {
                Ok(()) => {
                    debug!(path = %path.display(), language = code, "translation resource merged");
                    loaded += 1;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping translation resource"),
            }
        }
        Ok(loaded)
    }

    /// 某语言的翻译树
    pub fn tree(&self, code: &str) -> Option<&Value> {
        self.locales.get(code)
    }

    pub fn contains_language(&self, code: &str) -> bool {
        self.locales.contains_key(code)
    }

    /// 已加载的语言（排序后）
    pub fn languages(&self) -> Vec<&LanguageCode> {
        let mut codes: Vec<&LanguageCode> = self.locales.keys().collect();
        codes.sort();
        codes
    }

    /// 某语言全部叶子键（字符串或数组）
    pub fn leaf_keys(&self, code: &str) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        if let Some(tree) = self.tree(code) {
            collect_leaf_keys(tree, "", &mut keys);
        }
        keys
    }
}

fn parse_resource(code: &str, content: &str) -> Result<Value, I18nError> {
    serde_json::from_str(content).map_err(|source| I18nError::InvalidResource {
        language: code.to_string(),
        source,
    })
}

fn merge_objects(target: &mut Map<String, Value>, source: Map<String, Value>) {
    for (key, value) in source {
        let slot = target.entry(key).or_insert(Value::Null);
        match (slot, value) {
            (Value::Object(existing), Value::Object(incoming)) => merge_objects(existing, incoming),
            (slot, value) => *slot = value,
        }
    }
}

fn collect_leaf_keys(value: &Value, prefix: &str, keys: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                collect_leaf_keys(child, &path, keys);
            }
        }
        Value::String(_) | Value::Array(_) if !prefix.is_empty() => {
            keys.insert(prefix.to_string());
        }
        _ => {}
    }
}
