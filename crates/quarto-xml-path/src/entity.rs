//! Resolution results: a node or an attribute.

use quarto_xml_tree::{Attr, Node};
use serde::Deserialize;
use std::fmt;

/// What kind of entity a lookup is allowed to produce.
///
/// The mode decides how a trailing `:name` clause is treated and whether a
/// path that ends on a node counts as a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtractMode {
    /// Only nodes. A `:name` clause is a malformed query.
    Node,
    /// Only attributes. A path that ends on a node misses.
    Attribute,
    /// Whatever the path addresses.
    Either,
}

impl fmt::Display for ExtractMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExtractMode::Node => "node",
            ExtractMode::Attribute => "attribute",
            ExtractMode::Either => "node or attribute",
        })
    }
}

/// A node or an attribute of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity<'a> {
    Node(Node<'a>),
    Attribute(Attr<'a>),
}

impl<'a> Entity<'a> {
    pub fn name(self) -> &'a str {
        match self {
            Entity::Node(node) => node.name(),
            Entity::Attribute(attr) => attr.name(),
        }
    }

    pub fn value(self) -> &'a str {
        match self {
            Entity::Node(node) => node.value(),
            Entity::Attribute(attr) => attr.value(),
        }
    }

    /// The node itself, or the node carrying the attribute.
    pub fn owner(self) -> Node<'a> {
        match self {
            Entity::Node(node) => node,
            Entity::Attribute(attr) => attr.owner(),
        }
    }

    pub fn as_node(self) -> Option<Node<'a>> {
        match self {
            Entity::Node(node) => Some(node),
            Entity::Attribute(_) => None,
        }
    }

    pub fn as_attribute(self) -> Option<Attr<'a>> {
        match self {
            Entity::Node(_) => None,
            Entity::Attribute(attr) => Some(attr),
        }
    }

    pub fn is_attribute(self) -> bool {
        matches!(self, Entity::Attribute(_))
    }
}

impl<'a> From<Node<'a>> for Entity<'a> {
    fn from(node: Node<'a>) -> Self {
        Entity::Node(node)
    }
}

impl<'a> From<Attr<'a>> for Entity<'a> {
    fn from(attr: Attr<'a>) -> Self {
        Entity::Attribute(attr)
    }
}
