//! Tree node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Character data
    Text,
    /// CDATA section, kept apart from neighbouring text
    CData,
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct XmlNode {
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// String pool ID: element name, or content for text and CDATA nodes
    pub value_id: u32,
    /// Depth in document tree (document node is 0)
    pub depth: u16,
}

impl XmlNode {
    fn new(kind: NodeKind, value_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        XmlNode {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            value_id,
            depth,
        }
    }

    pub fn document() -> Self {
        Self::new(NodeKind::Document, 0, None, 0)
    }

    pub fn element(name_id: u32, parent: NodeId, depth: u16) -> Self {
        Self::new(NodeKind::Element, name_id, Some(parent), depth)
    }

    pub fn text(text_id: u32, parent: NodeId, depth: u16) -> Self {
        Self::new(NodeKind::Text, text_id, Some(parent), depth)
    }

    pub fn cdata(text_id: u32, parent: NodeId, depth: u16) -> Self {
        Self::new(NodeKind::CData, text_id, Some(parent), depth)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    /// Text or CDATA: a node carrying character data
    #[inline]
    pub fn has_value(&self) -> bool {
        matches!(self.kind, NodeKind::Text | NodeKind::CData)
    }
}
