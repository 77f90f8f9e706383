// ============================================================================
// UEnergy i18n - 内容变更监视
// ============================================================================
//
// 文件: src/core/watcher.rs
// 职责: 判断新插入的内容是否需要重新应用翻译
// 边界:
//   - ✅ 变更记录检查
//   - ❌ 不应直接执行翻译应用
//   - ❌ 不应包含定时重试逻辑
//
// ============================================================================

use tracing::trace;

use crate::models::document::{Document, MutationRecord, NodeId};
use crate::utils::constants::attrs;

/// 内容变更监视器
#[derive(Debug, Clone)]
pub struct MutationWatcher {
    watched: Vec<String>,
}

impl Default for MutationWatcher {
    fn default() -> Self {
        Self {
            watched: attrs::WATCHED.iter().map(|attr| attr.to_string()).collect(),
        }
    }
}

impl MutationWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 任一插入的子树中含有标记元素时返回 true
    pub fn needs_update(&self, doc: &Document, records: &[MutationRecord]) -> bool {
        let hit = records
            .iter()
            .flat_map(|record| record.added.iter().copied())
            .any(|id| self.subtree_is_marked(doc, id));
        trace!(records = records.len(), hit, "mutation records inspected");
        hit
    }

    fn subtree_is_marked(&self, doc: &Document, id: NodeId) -> bool {
        std::iter::once(id)
            .chain(doc.descendants(id))
            .any(|node| self.watched.iter().any(|attr| doc.has_attr(node, attr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::{parse_document, parse_fragment};

    #[test]
    fn test_marked_insertions_need_update() {
        let mut doc = parse_document("<body><div id=\"list\"></div></body>").unwrap();
        let list = doc.element_by_id("list").unwrap();
        let fragment =
            parse_fragment("<ul><li><span data-i18n=\"nav.home\">Home</span></li></ul>").unwrap();
        doc.append_fragment(list, &fragment);

        let records = doc.take_mutations();
        assert!(MutationWatcher::new().needs_update(&doc, &records));
    }

    #[test]
    fn test_plain_insertions_are_ignored() {
        let mut doc = parse_document("<body><div id=\"list\"></div></body>").unwrap();
        let list = doc.element_by_id("list").unwrap();
        doc.append_fragment(list, &parse_fragment("<p>42 kWh</p>").unwrap());

        let records = doc.take_mutations();
        assert!(!MutationWatcher::new().needs_update(&doc, &records));
        assert!(!MutationWatcher::new().needs_update(&doc, &[]));
    }
}
