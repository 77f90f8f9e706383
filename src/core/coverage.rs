// ============================================================================
// UEnergy i18n - 翻译覆盖率检查
// ============================================================================
//
// 文件: src/core/coverage.rs
// 职责: 对比各语言与默认语言的键集合
// 边界:
//   - ✅ 缺失键与多余键统计
//   - ✅ 可序列化的检查报告
//   - ❌ 不应包含输出格式化
//
// ============================================================================

use serde::Serialize;

use crate::i18n::TranslationTable;
use crate::models::language::LanguageCode;

/// 单个语言的覆盖情况
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCoverage {
    pub language: LanguageCode,
    /// 该语言自身定义的键数
    pub total: usize,
    /// 默认语言有而该语言缺少的键
    pub missing: Vec<String>,
    /// 该语言有而默认语言没有的键
    pub extra: Vec<String>,
}

impl LanguageCoverage {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// 覆盖率检查报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub default_language: LanguageCode,
    /// 默认语言的键数
    pub reference_keys: usize,
    pub languages: Vec<LanguageCoverage>,
}

impl CoverageReport {
    /// 所有语言都不缺键
    pub fn is_complete(&self) -> bool {
        self.languages.iter().all(LanguageCoverage::is_complete)
    }

    pub fn missing_total(&self) -> usize {
        self.languages.iter().map(|lang| lang.missing.len()).sum()
    }
}

/// 检查各语言相对默认语言的覆盖情况（默认语言自身不列出）
pub fn check_coverage(
    table: &TranslationTable,
    languages: &[LanguageCode],
    default_language: &LanguageCode,
) -> CoverageReport {
    let reference = table.leaf_keys(default_language.as_str());

    let languages = languages
        .iter()
        .filter(|code| *code != default_language)
        .map(|code| {
            let keys = table.leaf_keys(code.as_str());
            LanguageCoverage {
                language: code.clone(),
                total: keys.len(),
                missing: reference.difference(&keys).cloned().collect(),
                extra: keys.difference(&reference).cloned().collect(),
            }
        })
        .collect();

    CoverageReport {
        default_language: default_language.clone(),
        reference_keys: reference.len(),
        languages,
    }
}
