//! The `Document` arena and its construction API.
//!
//! Unlike an owned tree of elements, every node and attribute lives in a
//! contiguous `Vec` owned by the document and links to its neighbours by
//! index. Parent, sibling and attribute-chain navigation is O(1), and
//! dropping the `Document` frees everything at once.

use crate::handle::{Attr, Node};
use crate::types::{AttrData, AttrId, NodeData, NodeId, NodeKind};

/// An XML document: the owner of every node and attribute.
///
/// # Examples
///
/// ```
/// use quarto_xml_tree::{Document, NodeKind};
///
/// let doc = Document::new();
/// assert_eq!(doc.root().kind(), NodeKind::Document);
/// assert_eq!(doc.root().name(), "");
/// assert!(doc.root().parent().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    attrs: Vec<AttrData>,
    root: NodeId,
}

impl Document {
    /// Creates an empty document holding only the document node.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(NodeData::new(NodeKind::Document, String::new(), String::new()));
        Self {
            nodes,
            attrs: Vec::new(),
            root: NodeId::ROOT,
        }
    }

    /// The document node.
    pub fn root(&self) -> Node<'_> {
        self.node(self.root)
    }

    /// The id of the document node.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The first element child of the document node, if any.
    pub fn root_element(&self) -> Option<Node<'_>> {
        let mut child = self.root().first_child();
        while let Some(node) = child {
            if node.kind().is_element() {
                return Some(node);
            }
            child = node.next_sibling();
        }
        None
    }

    /// A borrowing handle to the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    pub fn node(&self, id: NodeId) -> Node<'_> {
        debug_assert!(id.as_index() < self.nodes.len(), "node id out of range");
        Node::new(self, id)
    }

    /// A borrowing handle to the attribute with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this document.
    pub fn attr(&self, id: AttrId) -> Attr<'_> {
        debug_assert!(id.as_index() < self.attrs.len(), "attribute id out of range");
        Attr::new(self, id)
    }

    /// Number of nodes, the document node included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of attributes across all nodes.
    pub fn attribute_count(&self) -> usize {
        self.attrs.len()
    }

    // ---------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------

    /// Creates a detached node of any kind.
    pub fn create_node(
        &mut self,
        kind: NodeKind,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> NodeId {
        self.push_node(NodeData::new(kind, name.into(), value.into()))
    }

    /// Creates a detached element with an empty value.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.create_node(NodeKind::Element, name, String::new())
    }

    /// Creates an element and appends it as the last child of `parent`.
    pub fn append_element(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let child = self.create_element(name);
        self.append_child(parent, child);
        child
    }

    /// Replaces the value of a node.
    pub fn set_value(&mut self, id: NodeId, value: impl Into<String>) {
        self.nodes[id.as_index()].value = value.into();
    }

    /// Sets the namespace prefix of a node.
    pub fn set_prefix(&mut self, id: NodeId, prefix: Option<String>) {
        self.nodes[id.as_index()].prefix = prefix;
    }

    /// Appends `child` as the last child of `parent`.
    ///
    /// The child must be detached (freshly created).
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(
            self.nodes[child.as_index()].parent.is_none() && child != self.root,
            "append_child expects a detached node"
        );
        debug_assert!(
            !self.is_ancestor_or_self(child, parent),
            "append_child would create a cycle"
        );

        let old_last = self.nodes[parent.as_index()].last_child;
        {
            let data = &mut self.nodes[child.as_index()];
            data.parent = Some(parent);
            data.prev_sibling = old_last;
            data.next_sibling = None;
        }
        match old_last {
            Some(last) => self.nodes[last.as_index()].next_sibling = Some(child),
            None => self.nodes[parent.as_index()].first_child = Some(child),
        }
        self.nodes[parent.as_index()].last_child = Some(child);
    }

    /// Whether `node` is `of` or one of its ancestors.
    fn is_ancestor_or_self(&self, node: NodeId, of: NodeId) -> bool {
        let mut next = Some(of);
        while let Some(id) = next {
            if id == node {
                return true;
            }
            next = self.nodes[id.as_index()].parent;
        }
        false
    }

    /// Appends an attribute to the end of a node's attribute chain.
    ///
    /// Names are not required to be unique; lookups return the first match.
    pub fn append_attribute(
        &mut self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> AttrId {
        self.append_prefixed_attribute(node, None, name, value)
    }

    /// Appends an attribute carrying a namespace prefix.
    pub fn append_prefixed_attribute(
        &mut self,
        node: NodeId,
        prefix: Option<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> AttrId {
        let old_last = self.nodes[node.as_index()].last_attr;
        let id = self.next_attr_id();
        self.attrs.push(AttrData {
            name: name.into(),
            value: value.into(),
            prefix,
            owner: node,
            prev: old_last,
            next: None,
        });
        match old_last {
            Some(last) => self.attrs[last.as_index()].next = Some(id),
            None => self.nodes[node.as_index()].first_attr = Some(id),
        }
        self.nodes[node.as_index()].last_attr = Some(id);
        id
    }

    pub(crate) fn node_data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.as_index()]
    }

    pub(crate) fn attr_data(&self, id: AttrId) -> &AttrData {
        &self.attrs[id.as_index()]
    }

    fn push_node(&mut self, data: NodeData) -> NodeId {
        #[allow(clippy::expect_used)]
        let id = NodeId::from_index(self.nodes.len()).expect("node arena exceeds u32 range");
        self.nodes.push(data);
        id
    }

    fn next_attr_id(&self) -> AttrId {
        #[allow(clippy::expect_used)]
        AttrId::from_index(self.attrs.len()).expect("attribute arena exceeds u32 range")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
