// ============================================================================
// UEnergy i18n - 错误类型
// ============================================================================
//
// 文件: src/error.rs
// 职责: 库层错误类型定义
// 边界:
//   - ✅ 翻译资源、偏好存储、页面标记错误定义
//   - ❌ 不应包含错误展示逻辑
//   - ❌ 不应包含 CLI 相关逻辑
//
// ============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// 国际化引擎错误
#[derive(Debug, Error)]
pub enum I18nError {
    /// 语言不在支持列表中
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// 没有配置任何语言
    #[error("no languages configured")]
    NoLanguages,

    /// 翻译资源不是合法 JSON
    #[error("invalid translation resource for '{language}': {source}")]
    InvalidResource {
        language: String,
        #[source]
        source: serde_json::Error,
    },

    /// 翻译资源根节点不是对象
    #[error("translation resource for '{0}' must be a JSON object")]
    NotAnObject(String),

    /// 读取翻译资源目录失败
    #[error("failed to read translation resources at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Markup(#[from] MarkupError),
}

/// 语言偏好存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is corrupted: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize preferences: {0}")]
    Serialize(#[source] serde_json::Error),

    /// 存储不可用（例如被禁用）
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),
}

/// 页面标记解析错误
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("markup syntax error at byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
}
