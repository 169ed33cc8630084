//! Arena Document
//!
//! The whole input is turned into a tree of nodes held in one `Vec`, linked
//! by `NodeId`. Built from scanner events by `TreeBuilder`; adjacent text
//! events are merged so every run of character data is a single text node,
//! regardless of how the scanner split it. A CDATA section is its own node
//! and splits the text around it.

use super::node::{NodeId, XmlNode};
use super::strings::StringPool;
use crate::core::ScanHandler;
use crate::error::ParseError;
use crate::reader::scan_slice;

/// A fully materialised document
#[derive(Debug)]
pub struct XmlDocument {
    /// Node arena; index 0 is the document node
    nodes: Vec<XmlNode>,
    strings: StringPool,
    root_element: Option<NodeId>,
}

impl XmlDocument {
    /// Parse a complete document into a tree
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        let mut builder = TreeBuilder::new(input.len());
        scan_slice(input, &mut builder)?;
        Ok(builder.finish())
    }

    fn with_capacity(estimated_nodes: usize) -> Self {
        let mut nodes = Vec::with_capacity(estimated_nodes.max(1));
        nodes.push(XmlNode::document());
        XmlDocument {
            nodes,
            strings: StringPool::new(),
            root_element: None,
        }
    }

    /// Document node ID (always 0)
    #[inline]
    pub fn document_id(&self) -> NodeId {
        0
    }

    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    /// Tag name of an element node
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        node.is_element().then(|| self.strings.get(node.value_id))
    }

    /// Content of a text or CDATA node; None for elements and the document
    pub fn node_value(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        node.has_value().then(|| self.strings.get(node.value_id))
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get_node(id)?.first_child
    }

    /// Iterate over all descendants of a node, depth-first in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut iter = DescendantIter {
            doc: self,
            stack: Vec::new(),
        };
        iter.push_children(id);
        iter
    }

    /// Descendant elements named `name`, in document order
    pub fn elements_by_tag_name(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        // A name never interned appears on no element
        let Some(name_id) = self.strings.lookup(name) else {
            return Vec::new();
        };
        self.descendants(id)
            .filter(|&d| {
                self.get_node(d)
                    .is_some_and(|n| n.is_element() && n.value_id == name_id)
            })
            .collect()
    }

    /// First descendant element named `name`
    pub fn first_element_by_tag_name(&self, id: NodeId, name: &str) -> Option<NodeId> {
        let name_id = self.strings.lookup(name)?;
        self.descendants(id).find(|&d| {
            self.get_node(d)
                .is_some_and(|n| n.is_element() && n.value_id == name_id)
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Bytes of names and text held by the tree
    pub fn text_bytes(&self) -> usize {
        self.strings.bytes_used()
    }

    fn append_child(&mut self, parent_id: NodeId, node: XmlNode) -> NodeId {
        let child_id = self.nodes.len() as NodeId;
        self.nodes.push(node);

        let last_child = self.nodes[parent_id as usize].last_child;
        if let Some(last_child_id) = last_child {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
        child_id
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'d> {
    doc: &'d XmlDocument,
    stack: Vec<NodeId>,
}

impl DescendantIter<'_> {
    /// Push children in reverse so the first child is popped first
    fn push_children(&mut self, id: NodeId) {
        let mut child = self.doc.get_node(id).and_then(|n| n.last_child);
        while let Some(cid) = child {
            self.stack.push(cid);
            child = self.doc.get_node(cid).and_then(|n| n.prev_sibling);
        }
    }
}

impl Iterator for DescendantIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        self.push_children(current);
        Some(current)
    }
}

/// Builds an `XmlDocument` from scanner events
pub struct TreeBuilder {
    doc: XmlDocument,
    /// Open elements, innermost last; the document node is the implicit base
    stack: Vec<NodeId>,
    pending_text: String,
}

impl TreeBuilder {
    /// `input_len` sizes the arena up front
    pub fn new(input_len: usize) -> Self {
        TreeBuilder {
            doc: XmlDocument::with_capacity(input_len / 32),
            stack: Vec::with_capacity(16),
            pending_text: String::new(),
        }
    }

    pub fn finish(mut self) -> XmlDocument {
        self.flush_text();
        self.doc
    }

    #[inline]
    fn parent(&self) -> NodeId {
        self.stack.last().copied().unwrap_or(0)
    }

    #[inline]
    fn depth(&self) -> u16 {
        (self.stack.len() + 1).min(u16::MAX as usize) as u16
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        // Character data outside the root is whitespace and not kept
        if !self.stack.is_empty() {
            let parent = self.parent();
            let text_id = self.doc.strings.push(&self.pending_text);
            let node = XmlNode::text(text_id, parent, self.depth());
            self.doc.append_child(parent, node);
        }
        self.pending_text.clear();
    }
}

impl ScanHandler for TreeBuilder {
    fn start_element(&mut self, name: &str) {
        self.flush_text();
        let name_id = self.doc.strings.intern(name);
        let parent = self.parent();
        let node = XmlNode::element(name_id, parent, self.depth());
        let id = self.doc.append_child(parent, node);
        if parent == 0 && self.doc.root_element.is_none() {
            self.doc.root_element = Some(id);
        }
        self.stack.push(id);
    }

    fn text(&mut self, text: &str) {
        self.pending_text.push_str(text);
    }

    fn cdata(&mut self, text: &str) {
        self.flush_text();
        if self.stack.is_empty() {
            return;
        }
        let parent = self.parent();
        let text_id = self.doc.strings.push(text);
        let node = XmlNode::cdata(text_id, parent, self.depth());
        self.doc.append_child(parent, node);
    }

    fn end_element(&mut self, _name: &str) {
        self.flush_text();
        self.stack.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::NodeKind;
    use crate::reader::ChunkedReader;

    const SAMPLE: &[u8] = b"<obo>\n\
        <term><id>GO:1</id><name>a</name><is_a>GO:2</is_a><is_a>GO:3</is_a></term>\n\
        <term><id>GO:2</id><name>b</name></term>\n\
        </obo>";

    fn child_ids(doc: &XmlDocument, id: NodeId) -> Vec<NodeId> {
        std::iter::successors(doc.first_child(id), |&c| doc.get_node(c)?.next_sibling).collect()
    }

    #[test]
    fn test_parse_structure() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("obo"));
        assert_eq!(doc.get_node(root).unwrap().kind, NodeKind::Element);

        let terms = doc.elements_by_tag_name(root, "term");
        assert_eq!(terms.len(), 2);
        assert_eq!(doc.elements_by_tag_name(terms[0], "is_a").len(), 2);
        assert_eq!(doc.elements_by_tag_name(terms[1], "is_a").len(), 0);
        assert!(doc.elements_by_tag_name(root, "namespace").is_empty());
    }

    #[test]
    fn test_text_nodes() {
        let doc = XmlDocument::parse(SAMPLE).unwrap();
        let root = doc.root_element_id().unwrap();
        let name = doc.first_element_by_tag_name(root, "name").unwrap();
        let text = doc.first_child(name).unwrap();
        assert_eq!(doc.node_value(text), Some("a"));
        assert_eq!(doc.node_name(text), None);
        assert_eq!(doc.node_value(name), None);
    }

    #[test]
    fn test_adjacent_text_merged() {
        let doc = XmlDocument::parse(b"<n>R&amp;D &lt;x&gt; unit</n>").unwrap();
        let root = doc.root_element_id().unwrap();
        let children = child_ids(&doc, root);
        assert_eq!(children.len(), 1);
        assert_eq!(doc.node_value(children[0]), Some("R&D <x> unit"));
    }

    #[test]
    fn test_cdata_is_separate_node() {
        let doc = XmlDocument::parse(b"<n>a <![CDATA[b]]> c<![CDATA[]]></n>").unwrap();
        let root = doc.root_element_id().unwrap();
        let kinds: Vec<_> = child_ids(&doc, root)
            .into_iter()
            .map(|id| (doc.get_node(id).unwrap().kind, doc.node_value(id).unwrap()))
            .collect();
        assert_eq!(
            kinds,
            [
                (NodeKind::Text, "a "),
                (NodeKind::CData, "b"),
                (NodeKind::Text, " c"),
                (NodeKind::CData, ""),
            ]
        );
    }

    #[test]
    fn test_split_text_merged_when_streamed() {
        let mut builder = TreeBuilder::new(0);
        let input: &[u8] = b"<n>mitochondrial inner membrane</n>";
        let mut reader = ChunkedReader::with_capacity(input, 4);
        reader.drive(&mut builder).unwrap();
        let doc = builder.finish();
        let root = doc.root_element_id().unwrap();
        let text = doc.first_child(root).unwrap();
        assert_eq!(doc.node_value(text), Some("mitochondrial inner membrane"));
        assert!(doc.get_node(text).unwrap().next_sibling.is_none());
    }

    #[test]
    fn test_descendants_document_order() {
        let doc = XmlDocument::parse(b"<a><b><c/></b><d/></a>").unwrap();
        let names: Vec<_> = doc
            .descendants(doc.document_id())
            .filter_map(|id| doc.node_name(id))
            .collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_sibling_links() {
        let doc = XmlDocument::parse(b"<a><b/><c/></a>").unwrap();
        let root = doc.root_element_id().unwrap();
        let b = doc.first_child(root).unwrap();
        let c = doc.get_node(b).unwrap().next_sibling.unwrap();
        assert_eq!(doc.get_node(c).unwrap().prev_sibling, Some(b));
        assert_eq!(doc.get_node(c).unwrap().depth, 2);
        assert_eq!(doc.node_count(), 4);
    }

    #[test]
    fn test_malformed_rejected() {
        let err = XmlDocument::parse(b"<obo><term></obo>").unwrap_err();
        assert!(err.message.contains("mismatched"));
    }
}
