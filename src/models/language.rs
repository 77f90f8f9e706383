// ============================================================================
// UEnergy i18n - 语言数据模型
// ============================================================================
//
// 文件: src/models/language.rs
// 职责: 语言代码与语言展示信息定义
// 边界:
//   - ✅ 语言代码类型定义
//   - ✅ 语言展示信息（名称、国旗、HTML lang）
//   - ✅ 内置语言列表
//   - ❌ 不应包含翻译查找逻辑
//   - ❌ 不应包含语言切换状态
//
// ============================================================================

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// 语言代码（如 "zh"、"en"）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// 创建语言代码，去除首尾空白并转为小写
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_ascii_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl Borrow<str> for LanguageCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// 语言展示信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// 语言代码
    pub code: LanguageCode,
    /// 英文名称
    pub name: String,
    /// 本地名称（选择器中显示）
    pub native_name: String,
    /// 国旗字符
    #[serde(default)]
    pub flag: String,
    /// `<html lang>` 取值，缺省时使用语言代码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_lang: Option<String>,
}

impl LanguageInfo {
    pub fn new(code: &str, name: &str, native_name: &str, flag: &str) -> Self {
        Self {
            code: LanguageCode::new(code),
            name: name.to_string(),
            native_name: native_name.to_string(),
            flag: flag.to_string(),
            html_lang: None,
        }
    }

    /// 设置 `<html lang>` 取值
    pub fn with_html_lang(mut self, tag: &str) -> Self {
        self.html_lang = Some(tag.to_string());
        self
    }

    /// `<html lang>` 取值
    pub fn html_tag(&self) -> &str {
        self.html_lang.as_deref().unwrap_or(self.code.as_str())
    }
}

/// 内置支持的语言
pub fn builtin_languages() -> Vec<LanguageInfo> {
    vec![
        LanguageInfo::new("zh", "Chinese", "中文", "🇨🇳").with_html_lang("zh-CN"),
        LanguageInfo::new("en", "English", "English", "🇺🇸"),
        LanguageInfo::new("ja", "Japanese", "日本語", "🇯🇵"),
        LanguageInfo::new("ko", "Korean", "한국어", "🇰🇷"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_code_normalizes() {
        let code = LanguageCode::new(" EN ");
        assert_eq!(code.as_str(), "en");
        assert_eq!(code, "en");
    }

    #[test]
    fn test_html_tag_defaults_to_code() {
        let languages = builtin_languages();
        assert_eq!(languages[0].html_tag(), "zh-CN");
        assert_eq!(languages[1].html_tag(), "en");
    }
}
