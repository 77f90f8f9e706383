// ============================================================================
// UEnergy i18n - 语言选择器
// ============================================================================
//
// 文件: src/core/selector.rs
// 职责: 语言选择器标记生成、注入与刷新
// 边界:
//   - ✅ 选择器标记渲染（当前语言 + 下拉选项）
//   - ✅ 注入到页头 `.header-right`（`.message-center` 之前）
//   - ✅ 语言切换后原地刷新当前项与选中状态
//   - ❌ 不应包含语言切换状态
//   - ❌ 不应包含下拉动画等交互逻辑
//
// ============================================================================

use quick_xml::escape::escape;
use std::fmt::Write as _;
use tracing::debug;

use super::markup::parse_fragment;
use crate::error::MarkupError;
use crate::models::document::Document;
use crate::models::language::{LanguageCode, LanguageInfo};

const CURRENT_NAME_ID: &str = "currentLanguageName";
const DROPDOWN_ID: &str = "languageDropdown";
const OPTION_CODE_ATTR: &str = "data-language";

/// 语言选择器
#[derive(Debug, Clone)]
pub struct LanguageSelector {
    container_id: String,
}

impl LanguageSelector {
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
        }
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// 生成选择器标记
    pub fn render(&self, languages: &[LanguageInfo], current: &LanguageCode) -> String {
        let mut html = String::new();
        let active = languages.iter().find(|info| &info.code == current);

        let _ = write!(
            html,
            r#"<div class="language-selector" id="{}"><div class="language-current">"#,
            escape(self.container_id.as_str())
        );
        if let Some(info) = active {
            let _ = write!(
                html,
                r#"<span class="language-flag">{}</span><span class="language-name" id="{}">{}</span>"#,
                escape(info.flag.as_str()),
                CURRENT_NAME_ID,
                escape(info.native_name.as_str())
            );
        }
        let _ = write!(
            html,
            r#"<span class="language-arrow">▼</span></div><div class="language-dropdown" id="{}" style="display: none;">"#,
            DROPDOWN_ID
        );
        for info in languages {
            let class = if &info.code == current {
                "language-option active"
            } else {
                "language-option"
            };
            let _ = write!(
                html,
                r#"<div class="{}" {}="{}"><span class="language-flag">{}</span><span class="language-name">{}</span></div>"#,
                class,
                OPTION_CODE_ATTR,
                escape(info.code.as_str()),
                escape(info.flag.as_str()),
                escape(info.native_name.as_str())
            );
        }
        html.push_str("</div></div>");
        html
    }

    /// 把选择器注入页头，返回是否插入
    ///
    /// 已存在同 id 元素或页面没有 `.header-right` 时不做任何修改。
    pub fn inject(
        &self,
        doc: &mut Document,
        languages: &[LanguageInfo],
        current: &LanguageCode,
    ) -> Result<bool, MarkupError> {
        if doc.element_by_id(&self.container_id).is_some() {
            debug!(id = %self.container_id, "language selector already present");
            return Ok(false);
        }
        let Some(header) = doc.first_with_class(doc.root(), "header-right") else {
            debug!("no .header-right container, selector not injected");
            return Ok(false);
        };

        let fragment = parse_fragment(&self.render(languages, current))?;
        match doc.first_with_class(header, "message-center") {
            Some(anchor) => {
                let parent = doc.parent(anchor).unwrap_or(header);
                doc.insert_fragment(parent, Some(anchor), &fragment);
            }
            None => {
                let first = doc.children(header).first().copied();
                doc.insert_fragment(header, first, &fragment);
            }
        }
        debug!(id = %self.container_id, "language selector injected");
        Ok(true)
    }

    /// 刷新当前语言显示与选中项，返回是否有变化
    pub fn refresh(&self, doc: &mut Document, languages: &[LanguageInfo], current: &LanguageCode) -> bool {
        let Some(container) = doc.element_by_id(&self.container_id) else {
            return false;
        };
        let Some(info) = languages.iter().find(|info| &info.code == current) else {
            return false;
        };

        let mut changed = false;
        if let Some(name) = doc.element_by_id(CURRENT_NAME_ID) {
            changed |= doc.set_text_content(name, &info.native_name);
        }
        let flag = doc
            .first_with_class(container, "language-current")
            .and_then(|current_box| doc.first_with_class(current_box, "language-flag"));
        if let Some(flag) = flag {
            changed |= doc.set_text_content(flag, &info.flag);
        }

        let options = doc.find_within(container, |element| element.has_class("language-option"));
        for option in options {
            let is_active = doc.attr(option, OPTION_CODE_ATTR) == Some(current.as_str());
            changed |= doc.toggle_class(option, "active", is_active);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::parse_document;
    use crate::models::language::builtin_languages;

    const HEADER: &str = r#"<body><div class="header-right"><div class="clock">12:00</div><div class="message-center">3</div></div></body>"#;

    fn selector() -> LanguageSelector {
        LanguageSelector::new("languageSelector")
    }

    #[test]
    fn test_render_marks_active_option() {
        let html = selector().render(&builtin_languages(), &"en".into());
        assert!(html.contains(r#"<div class="language-option active" data-language="en">"#));
        assert!(html.contains(r#"<div class="language-option" data-language="zh">"#));
        assert!(html.contains(r#"id="currentLanguageName">English</span>"#));
    }

    #[test]
    fn test_inject_before_message_center() {
        let mut doc = parse_document(HEADER).unwrap();
        assert!(selector()
            .inject(&mut doc, &builtin_languages(), &"zh".into())
            .unwrap());

        let header = doc.first_with_class(doc.root(), "header-right").unwrap();
        let children = doc.children(header).to_vec();
        assert_eq!(children.len(), 3);
        assert_eq!(doc.attr(children[1], "id"), Some("languageSelector"));
        assert!(doc.element(children[2]).unwrap().has_class("message-center"));
        assert_eq!(doc.take_mutations().len(), 1);
    }

    #[test]
    fn test_inject_is_not_repeated_and_needs_header() {
        let mut doc = parse_document(HEADER).unwrap();
        let languages = builtin_languages();
        assert!(selector().inject(&mut doc, &languages, &"zh".into()).unwrap());
        assert!(!selector().inject(&mut doc, &languages, &"zh".into()).unwrap());

        let mut bare = parse_document("<body><main></main></body>").unwrap();
        assert!(!selector().inject(&mut bare, &languages, &"zh".into()).unwrap());
    }

    #[test]
    fn test_inject_without_message_center_goes_first() {
        let mut doc =
            parse_document(r#"<div class="header-right"><span>user</span></div>"#).unwrap();
        selector()
            .inject(&mut doc, &builtin_languages(), &"zh".into())
            .unwrap();
        let header = doc.first_with_class(doc.root(), "header-right").unwrap();
        let first = doc.children(header)[0];
        assert!(doc.element(first).unwrap().has_class("language-selector"));
    }

    #[test]
    fn test_refresh_updates_current_and_active() {
        let mut doc = parse_document(HEADER).unwrap();
        let languages = builtin_languages();
        selector().inject(&mut doc, &languages, &"zh".into()).unwrap();

        assert!(selector().refresh(&mut doc, &languages, &"ja".into()));

        let name = doc.element_by_id("currentLanguageName").unwrap();
        assert_eq!(doc.text_content(name), "日本語");
        let active = doc.find_within(doc.root(), |e| e.has_class("active"));
        assert_eq!(active.len(), 1);
        assert_eq!(doc.attr(active[0], "data-language"), Some("ja"));
        assert!(!selector().refresh(&mut doc, &languages, &"ja".into()));
    }
}
