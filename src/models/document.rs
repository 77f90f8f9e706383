// ============================================================================
// UEnergy i18n - 页面文档模型
// ============================================================================
//
// 文件: src/models/document.rs
// 职责: 内存中的页面节点树
// 边界:
//   - ✅ 元素、文本节点存储
//   - ✅ 按属性、标签、id、class 查询
//   - ✅ 属性与文本内容修改
//   - ✅ 片段插入与变更记录
//   - ❌ 不应包含标记解析/序列化
//   - ❌ 不应包含翻译逻辑
//
// ============================================================================

use std::borrow::Cow;

/// 节点 id（文档内有效）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// 元素节点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// 标签名（保留原始大小写）
    pub tag: String,
    /// 属性（保持源顺序，值已解码）
    pub attrs: Vec<(String, String)>,
    /// 源标记是否为 `<tag/>` 形式
    pub self_closing: bool,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            self_closing: false,
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }
}

/// 节点内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// 文档根
    Document,
    Element(Element),
    /// 文本（保存转义后的标记形式）
    Text(String),
    /// 原样输出的标记（注释、DOCTYPE、脚本正文等）
    Raw(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// 一次节点插入记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRecord {
    /// 插入位置的父节点
    pub parent: NodeId,
    /// 新插入的顶层节点
    pub added: Vec<NodeId>,
}

/// 页面文档
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    mutations: Vec<MutationRecord>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// 创建只有根节点的空文档
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
            mutations: Vec::new(),
        }
    }

    /// 文档根节点
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id.0].kind
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(element) => Some(element),
            _ => None,
        }
    }

    // ========================================================================
    // 构建
    // ========================================================================

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// 在父节点末尾追加新节点（构建用，不产生变更记录）
    pub fn append(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = self.push_node(kind);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// 复制另一文档中的子树，返回新节点 id（尚未挂载）
    fn graft(&mut self, source: &Document, source_id: NodeId) -> NodeId {
        let id = self.push_node(source.kind(source_id).clone());
        for &child in source.children(source_id) {
            let copied = self.graft(source, child);
            self.nodes[copied.0].parent = Some(id);
            self.nodes[id.0].children.push(copied);
        }
        id
    }

    /// 把片段文档根下的节点插入到 `parent` 中 `before` 之前（`None` 时追加到末尾）
    ///
    /// 插入会记录到变更列表，供 [`Document::take_mutations`] 取出。
    pub fn insert_fragment(
        &mut self,
        parent: NodeId,
        before: Option<NodeId>,
        fragment: &Document,
    ) -> Vec<NodeId> {
        let added: Vec<NodeId> = fragment
            .children(fragment.root())
            .iter()
            .map(|&child| self.graft(fragment, child))
            .collect();

        let position = before
            .and_then(|reference| {
                self.nodes[parent.0]
                    .children
                    .iter()
                    .position(|&child| child == reference)
            })
            .unwrap_or(self.nodes[parent.0].children.len());

        for (offset, &id) in added.iter().enumerate() {
            self.nodes[id.0].parent = Some(parent);
            self.nodes[parent.0].children.insert(position + offset, id);
        }

        if !added.is_empty() {
            self.mutations.push(MutationRecord {
                parent,
                added: added.clone(),
            });
        }
        added
    }

    /// 追加片段到父节点末尾
    pub fn append_fragment(&mut self, parent: NodeId, fragment: &Document) -> Vec<NodeId> {
        self.insert_fragment(parent, None, fragment)
    }

    /// 取出并清空变更记录
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.mutations)
    }

    // ========================================================================
    // 查询
    // ========================================================================

    /// 先序遍历 `id` 的所有后代（不含自身）
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        result
    }

    /// `scope` 下满足条件的元素（文档顺序）
    pub fn find_within<F>(&self, scope: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Element) -> bool,
    {
        self.descendants(scope)
            .into_iter()
            .filter(|&id| self.element(id).map(&predicate).unwrap_or(false))
            .collect()
    }

    /// 带有指定属性的元素
    pub fn elements_with_attr(&self, name: &str) -> Vec<NodeId> {
        self.find_within(self.root(), |element| element.has_attr(name))
    }

    /// 指定标签的元素
    pub fn elements_by_tag(&self, tag: &str) -> Vec<NodeId> {
        self.find_within(self.root(), |element| element.is(tag))
    }

    /// 按 id 属性查找元素
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_within(self.root(), |element| element.attr("id") == Some(id))
            .into_iter()
            .next()
    }

    /// `scope` 下第一个带有指定 class 的元素
    pub fn first_with_class(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.find_within(scope, |element| element.has_class(class))
            .into_iter()
            .next()
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attr(name))
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    /// 是否为指定标签的元素
    pub fn is_tag(&self, id: NodeId, tag: &str) -> bool {
        self.element(id).map(|element| element.is(tag)).unwrap_or(false)
    }

    /// 是否为文本/搜索输入框（未声明 type 时按 text 处理）
    pub fn is_text_input(&self, id: NodeId) -> bool {
        match self.element(id) {
            Some(element) if element.is("input") => {
                let input_type = element.attr("type").unwrap_or("text");
                input_type.eq_ignore_ascii_case("text") || input_type.eq_ignore_ascii_case("search")
            }
            _ => false,
        }
    }

    /// 节点的文本内容（解码后）
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        if let NodeKind::Text(raw) = self.kind(id) {
            text.push_str(&decode_text(raw));
        }
        for descendant in self.descendants(id) {
            if let NodeKind::Text(raw) = self.kind(descendant) {
                text.push_str(&decode_text(raw));
            }
        }
        text
    }

    /// 文档标题（第一个 `<title>` 的文本）
    pub fn title(&self) -> Option<String> {
        self.elements_by_tag("title")
            .first()
            .map(|&id| self.text_content(id))
    }

    // ========================================================================
    // 修改
    // ========================================================================

    /// 设置属性，返回值是否发生变化
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> bool {
        let Some(element) = self.element_mut(id) else {
            return false;
        };
        match element
            .attrs
            .iter_mut()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
        {
            Some((_, current)) if current == value => false,
            Some((_, current)) => {
                *current = value.to_string();
                true
            }
            None => {
                element.attrs.push((name.to_string(), value.to_string()));
                true
            }
        }
    }

    /// 用单个文本节点替换元素的全部子节点，返回内容是否发生变化
    ///
    /// 已有唯一文本子节点时原地改写，反复切换语言不会增加节点。
    /// 没有子节点与只有一个空文本节点都视为内容 `""`。
    pub fn set_text_content(&mut self, id: NodeId, text: &str) -> bool {
        if self.element(id).is_none() {
            return false;
        }

        if let [only] = self.nodes[id.0].children[..] {
            if let NodeKind::Text(raw) = &mut self.nodes[only.0].kind {
                if decode_text(raw.as_str()) == text {
                    return false;
                }
                *raw = quick_xml::escape::escape(text).into_owned();
                return true;
            }
        }
        if text.is_empty() && self.nodes[id.0].children.is_empty() {
            return false;
        }

        // 被替换的子节点仍留在 arena 中，只是与树断开
        for child in std::mem::take(&mut self.nodes[id.0].children) {
            self.nodes[child.0].parent = None;
        }
        if !text.is_empty() {
            let escaped = quick_xml::escape::escape(text).into_owned();
            self.append(id, NodeKind::Text(escaped));
        }
        true
    }

    /// 设置 class 属性中某个 class 的有无，返回是否变化
    pub fn toggle_class(&mut self, id: NodeId, class: &str, present: bool) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        if element.has_class(class) == present {
            return false;
        }
        let mut classes: Vec<String> = element
            .attr("class")
            .unwrap_or("")
            .split_whitespace()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        if present {
            classes.push(class.to_string());
        }
        self.set_attr(id, "class", &classes.join(" "))
    }
}

/// 解码文本中的实体，无法识别的实体保留原样
fn decode_text(raw: &str) -> Cow<'_, str> {
    quick_xml::escape::unescape(raw).unwrap_or(Cow::Borrowed(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId) {
        let mut doc = Document::new();
        let body = doc.append(doc.root(), NodeKind::Element(Element::new("body")));
        let span = doc.append(
            body,
            NodeKind::Element(Element::new("span").with_attr("data-i18n", "nav.home")),
        );
        doc.append(span, NodeKind::Text("Home &amp; Away".to_string()));
        (doc, body, span)
    }

    #[test]
    fn test_text_content_is_decoded() {
        let (doc, body, span) = sample();
        assert_eq!(doc.text_content(span), "Home & Away");
        assert_eq!(doc.text_content(body), "Home & Away");
    }

    #[test]
    fn test_set_text_content_reports_changes() {
        let (mut doc, _, span) = sample();
        assert!(doc.set_text_content(span, "首页"));
        assert!(!doc.set_text_content(span, "首页"));
        assert_eq!(doc.text_content(span), "首页");
        assert_eq!(doc.children(span).len(), 1);
    }

    #[test]
    fn test_set_text_content_rewrites_text_node_in_place() {
        let (mut doc, _, span) = sample();
        let text_node = doc.children(span)[0];

        for text in ["Home", "首页", "ホーム", "Home"] {
            doc.set_text_content(span, text);
        }
        assert_eq!(doc.children(span), [text_node]);
        assert_eq!(doc.text_content(span), "Home");
    }

    #[test]
    fn test_empty_text_is_unchanged_on_repeat() {
        let (mut doc, body, span) = sample();
        assert!(doc.set_text_content(span, ""));
        assert!(!doc.set_text_content(span, ""));
        assert_eq!(doc.text_content(span), "");

        let empty = doc.append(body, NodeKind::Element(Element::new("i")));
        assert!(!doc.set_text_content(empty, ""));
        assert!(doc.children(empty).is_empty());
    }

    #[test]
    fn test_set_attr_reports_changes() {
        let (mut doc, _, span) = sample();
        assert!(doc.set_attr(span, "title", "Home"));
        assert!(!doc.set_attr(span, "title", "Home"));
        assert_eq!(doc.attr(span, "title"), Some("Home"));
    }

    #[test]
    fn test_input_without_type_is_text_input() {
        let mut doc = Document::new();
        let plain = doc.append(doc.root(), NodeKind::Element(Element::new("input")));
        let search = doc.append(
            doc.root(),
            NodeKind::Element(Element::new("INPUT").with_attr("type", "search")),
        );
        let checkbox = doc.append(
            doc.root(),
            NodeKind::Element(Element::new("input").with_attr("type", "checkbox")),
        );
        assert!(doc.is_text_input(plain));
        assert!(doc.is_text_input(search));
        assert!(!doc.is_text_input(checkbox));
    }

    #[test]
    fn test_insert_fragment_records_mutation() {
        let (mut doc, body, span) = sample();
        let mut fragment = Document::new();
        let div = fragment.append(fragment.root(), NodeKind::Element(Element::new("div")));
        fragment.append(div, NodeKind::Text("new".to_string()));

        let added = doc.insert_fragment(body, Some(span), &fragment);

        assert_eq!(added.len(), 1);
        assert_eq!(doc.children(body)[0], added[0]);
        assert_eq!(doc.text_content(added[0]), "new");
        let mutations = doc.take_mutations();
        assert_eq!(mutations.len(), 1);
        assert_eq!(mutations[0].parent, body);
        assert!(doc.take_mutations().is_empty());
    }

    #[test]
    fn test_toggle_class() {
        let mut doc = Document::new();
        let option = doc.append(
            doc.root(),
            NodeKind::Element(Element::new("div").with_attr("class", "language-option")),
        );
        assert!(doc.toggle_class(option, "active", true));
        assert_eq!(doc.attr(option, "class"), Some("language-option active"));
        assert!(!doc.toggle_class(option, "active", true));
        assert!(doc.toggle_class(option, "active", false));
        assert_eq!(doc.attr(option, "class"), Some("language-option"));
    }
}
