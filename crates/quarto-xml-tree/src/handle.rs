//! Borrowing handles for navigating a [`Document`].
//!
//! A handle pairs a `&Document` with an id. Handles are `Copy`, cannot
//! outlive the document, and compare by identity: two handles are equal when
//! they point into the same document at the same id.

use crate::document::Document;
use crate::types::{AttrId, NodeId, NodeKind};
use std::fmt;

/// A read-only view of one node.
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

/// A read-only view of one attribute.
#[derive(Clone, Copy)]
pub struct Attr<'a> {
    doc: &'a Document,
    id: AttrId,
}

impl<'a> Node<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn document(self) -> &'a Document {
        self.doc
    }

    pub fn kind(self) -> NodeKind {
        self.doc.node_data(self.id).kind
    }

    /// The node name. Empty for the document node and for character data.
    pub fn name(self) -> &'a str {
        &self.doc.node_data(self.id).name
    }

    /// The node's text payload. For elements this is their direct text.
    pub fn value(self) -> &'a str {
        &self.doc.node_data(self.id).value
    }

    pub fn prefix(self) -> Option<&'a str> {
        self.doc.node_data(self.id).prefix.as_deref()
    }

    /// The parent node, or `None` for the document node and detached nodes.
    pub fn parent(self) -> Option<Node<'a>> {
        self.link(self.doc.node_data(self.id).parent)
    }

    pub fn first_child(self) -> Option<Node<'a>> {
        self.link(self.doc.node_data(self.id).first_child)
    }

    pub fn last_child(self) -> Option<Node<'a>> {
        self.link(self.doc.node_data(self.id).last_child)
    }

    pub fn next_sibling(self) -> Option<Node<'a>> {
        self.link(self.doc.node_data(self.id).next_sibling)
    }

    pub fn previous_sibling(self) -> Option<Node<'a>> {
        self.link(self.doc.node_data(self.id).prev_sibling)
    }

    /// The earliest child whose name is exactly `name`.
    pub fn first_child_named(self, name: &str) -> Option<Node<'a>> {
        let first = self.first_child()?;
        if first.name() == name {
            Some(first)
        } else {
            first.next_sibling_named(name)
        }
    }

    /// The nearest following sibling whose name is exactly `name`.
    pub fn next_sibling_named(self, name: &str) -> Option<Node<'a>> {
        let mut sibling = self.next_sibling();
        while let Some(node) = sibling {
            if node.name() == name {
                return Some(node);
            }
            sibling = node.next_sibling();
        }
        None
    }

    pub fn first_attribute(self) -> Option<Attr<'a>> {
        self.doc
            .node_data(self.id)
            .first_attr
            .map(|id| Attr::new(self.doc, id))
    }

    pub fn last_attribute(self) -> Option<Attr<'a>> {
        self.doc
            .node_data(self.id)
            .last_attr
            .map(|id| Attr::new(self.doc, id))
    }

    /// The earliest attribute whose name is exactly `name`.
    pub fn first_attribute_named(self, name: &str) -> Option<Attr<'a>> {
        let first = self.first_attribute()?;
        if first.name() == name {
            Some(first)
        } else {
            first.next_attribute_named(name)
        }
    }

    fn link(self, id: Option<NodeId>) -> Option<Node<'a>> {
        id.map(|id| Node::new(self.doc, id))
    }
}

impl<'a> Attr<'a> {
    pub(crate) fn new(doc: &'a Document, id: AttrId) -> Self {
        Self { doc, id }
    }

    pub fn id(self) -> AttrId {
        self.id
    }

    pub fn document(self) -> &'a Document {
        self.doc
    }

    pub fn name(self) -> &'a str {
        &self.doc.attr_data(self.id).name
    }

    pub fn value(self) -> &'a str {
        &self.doc.attr_data(self.id).value
    }

    pub fn prefix(self) -> Option<&'a str> {
        self.doc.attr_data(self.id).prefix.as_deref()
    }

    /// The node carrying this attribute.
    pub fn owner(self) -> Node<'a> {
        Node::new(self.doc, self.doc.attr_data(self.id).owner)
    }

    pub fn next_attribute(self) -> Option<Attr<'a>> {
        self.doc
            .attr_data(self.id)
            .next
            .map(|id| Attr::new(self.doc, id))
    }

    pub fn previous_attribute(self) -> Option<Attr<'a>> {
        self.doc
            .attr_data(self.id)
            .prev
            .map(|id| Attr::new(self.doc, id))
    }

    /// The nearest following attribute whose name is exactly `name`.
    pub fn next_attribute_named(self, name: &str) -> Option<Attr<'a>> {
        let mut attr = self.next_attribute();
        while let Some(a) = attr {
            if a.name() == name {
                return Some(a);
            }
            attr = a.next_attribute();
        }
        None
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl PartialEq for Attr<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Attr<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id.into_raw())
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

impl fmt::Debug for Attr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attr")
            .field("id", &self.id.into_raw())
            .field("name", &self.name())
            .field("value", &self.value())
            .finish()
    }
}
