// ============================================================================
// UEnergy i18n - 页面标记解析与序列化
// ============================================================================
//
// 文件: src/core/markup.rs
// 职责: HTML 页面标记与文档模型互转
// 边界:
//   - ✅ 宽松的 HTML 标记解析（空元素、未闭合标签、脚本正文）
//   - ✅ 文档序列化（属性与文本转义）
//   - ❌ 不应包含翻译逻辑
//   - ❌ 不应包含文件读写
//
// ============================================================================

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt::Write as _;

use crate::error::MarkupError;
use crate::models::document::{Document, Element, NodeId, NodeKind};

/// 无需结束标签的 HTML 元素
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// 正文按原样保留的元素
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.iter().any(|void| tag.eq_ignore_ascii_case(void))
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.iter().any(|raw| tag.eq_ignore_ascii_case(raw))
}

/// 解析页面标记为文档
pub fn parse_document(input: &str) -> Result<Document, MarkupError> {
    let mut reader = Reader::from_str(input);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut doc = Document::new();
    let mut open: Vec<NodeId> = Vec::new();

    loop {
        let parent = open.last().copied().unwrap_or_else(|| doc.root());
        let event = reader.read_event().map_err(|source| MarkupError::Syntax {
            position: reader.error_position(),
            source,
        })?;

        match event {
            Event::Start(start) => {
                let element = read_element(&start, false)?;
                let tag = element.tag.clone();
                let id = doc.append(parent, NodeKind::Element(element));

                if is_raw_text(&tag) {
                    let body = reader
                        .read_text(start.name())
                        .map_err(|source| MarkupError::Syntax {
                            position: reader.error_position(),
                            source,
                        })?;
                    if !body.is_empty() {
                        doc.append(id, NodeKind::Raw(body.into_owned()));
                    }
                } else if !is_void(&tag) {
                    open.push(id);
                }
            }
            Event::Empty(start) => {
                let element = read_element(&start, true)?;
                doc.append(parent, NodeKind::Element(element));
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                // 关闭最近的同名元素，多余的结束标签直接忽略
                if let Some(position) = open
                    .iter()
                    .rposition(|&id| doc.element(id).map(|e| e.is(&name)).unwrap_or(false))
                {
                    open.truncate(position);
                }
            }
            Event::Text(text) => {
                doc.append(parent, NodeKind::Text(String::from_utf8_lossy(&text).into_owned()));
            }
            Event::CData(data) => {
                let raw = format!("<![CDATA[{}]]>", String::from_utf8_lossy(&data));
                doc.append(parent, NodeKind::Raw(raw));
            }
            Event::Comment(comment) => {
                let raw = format!("<!--{}-->", String::from_utf8_lossy(&comment));
                doc.append(parent, NodeKind::Raw(raw));
            }
            Event::DocType(doctype) => {
                let raw = format!("<!DOCTYPE {}>", String::from_utf8_lossy(&doctype).trim());
                doc.append(parent, NodeKind::Raw(raw));
            }
            Event::Decl(decl) => {
                let raw = format!("<?{}?>", String::from_utf8_lossy(&decl));
                doc.append(parent, NodeKind::Raw(raw));
            }
            Event::PI(pi) => {
                let raw = format!("<?{}?>", String::from_utf8_lossy(&pi));
                doc.append(parent, NodeKind::Raw(raw));
            }
            Event::Eof => break,
        }
    }

    Ok(doc)
}

/// 解析一段标记片段（用于插入到已有文档）
pub fn parse_fragment(input: &str) -> Result<Document, MarkupError> {
    parse_document(input)
}

fn read_element(start: &BytesStart<'_>, self_closing: bool) -> Result<Element, MarkupError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    element.self_closing = self_closing;

    for attr in start.html_attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        };
        element.attrs.push((key, value));
    }

    Ok(element)
}

/// 序列化整个文档
pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();
    write_node(doc, doc.root(), &mut out);
    out
}

/// 序列化单个节点及其子树
pub fn node_to_html(doc: &Document, id: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, id, &mut out);
    out
}

fn write_node(doc: &Document, id: NodeId, out: &mut String) {
    match doc.kind(id) {
        NodeKind::Document => {
            for &child in doc.children(id) {
                write_node(doc, child, out);
            }
        }
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.tag);
            for (key, value) in &element.attrs {
                let _ = write!(out, " {}=\"{}\"", key, escape(value.as_str()));
            }

            let children = doc.children(id);
            if children.is_empty() && element.self_closing {
                out.push_str(" />");
                return;
            }
            out.push('>');
            if children.is_empty() && is_void(&element.tag) {
                return;
            }

            for &child in children {
                write_node(doc, child, out);
            }
            let _ = write!(out, "</{}>", element.tag);
        }
        NodeKind::Text(raw) | NodeKind::Raw(raw) => out.push_str(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="utf-8">
    <title data-i18n-key="operationLog.title">操作记录</title>
    <script>if (a < b && c) { render(); }</script>
</head>
<body>
    <!-- header -->
    <div class="header-right"><span data-i18n="nav.home">首页</span></div>
    <input type="search" data-i18n="operationLog.placeholder.operator" placeholder="">
    <br/>
</body>
</html>
"#;

    #[test]
    fn test_untouched_page_serializes_unchanged() {
        let doc = parse_document(PAGE).unwrap();
        assert_eq!(to_html(&doc), PAGE.replace("<br/>", "<br />"));
    }

    #[test]
    fn test_void_elements_do_not_swallow_siblings() {
        let doc = parse_document(PAGE).unwrap();
        let inputs = doc.elements_by_tag("input");
        assert_eq!(inputs.len(), 1);
        assert!(doc.children(inputs[0]).is_empty());

        let body = doc.elements_by_tag("body")[0];
        assert!(doc.children(body).contains(&inputs[0]));
    }

    #[test]
    fn test_script_body_is_kept_raw() {
        let doc = parse_document(PAGE).unwrap();
        let script = doc.elements_by_tag("script")[0];
        assert_eq!(
            node_to_html(&doc, script),
            "<script>if (a < b && c) { render(); }</script>"
        );
    }

    #[test]
    fn test_title_and_marked_elements() {
        let doc = parse_document(PAGE).unwrap();
        assert_eq!(doc.title().as_deref(), Some("操作记录"));
        assert_eq!(doc.elements_with_attr("data-i18n").len(), 2);
    }

    #[test]
    fn test_unclosed_and_stray_tags_are_tolerated() {
        let doc = parse_document("<div><p>one<p>two</div></span>tail").unwrap();
        let div = doc.elements_by_tag("div")[0];
        assert_eq!(doc.text_content(div), "onetwo");
        assert_eq!(doc.text_content(doc.root()), "onetwotail");
    }

    #[test]
    fn test_text_is_escaped_on_output() {
        let mut doc = parse_document("<span data-i18n=\"x\">old</span>").unwrap();
        let span = doc.elements_by_tag("span")[0];
        doc.set_text_content(span, "A < B & C");
        assert_eq!(to_html(&doc), "<span data-i18n=\"x\">A &lt; B &amp; C</span>");
    }
}
