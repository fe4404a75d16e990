//! Reverse lookup: from an entity back to a path.
//!
//! [`locate`] produces the absolute path of a node or attribute. For any
//! entity in a tree without duplicate names, resolving the located path from
//! anywhere in the same document yields the entity again.

use crate::entity::Entity;
use crate::options::Options;
use quarto_xml_tree::{Node, NodeKind};

/// Which end of the ancestor chain comes first. Defaults to root-first,
/// the order a located path is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    /// Immediate parent first, document node last.
    NearestFirst,
    /// Document node first, immediate parent last.
    #[default]
    RootFirst,
}

/// The ancestors of `entity`.
///
/// For a node the chain starts at its parent; for an attribute it starts at
/// the attribute's owner. The entity itself is never included.
pub fn parents<'a>(entity: impl Into<Entity<'a>>, order: Order) -> Vec<Node<'a>> {
    let mut chain = Vec::new();
    let mut next = match entity.into() {
        Entity::Node(node) => node.parent(),
        Entity::Attribute(attr) => Some(attr.owner()),
    };
    while let Some(node) = next {
        chain.push(node);
        next = node.parent();
    }
    if order == Order::RootFirst {
        chain.reverse();
    }
    chain
}

/// The absolute path of `entity`.
///
/// ```rust
/// use quarto_xml_path::{locate, parse};
///
/// let doc = parse(r#"<root><a alt="1"><b>txt</b></a></root>"#).unwrap();
/// let a = doc.root_element().unwrap().first_child_named("a").unwrap();
///
/// assert_eq!(locate(a.first_child_named("b").unwrap()), "/root/a/b");
/// assert_eq!(locate(a.first_attribute_named("alt").unwrap()), "/root/a:alt");
/// assert_eq!(locate(doc.root()), "/");
/// ```
pub fn locate<'a>(entity: impl Into<Entity<'a>>) -> String {
    locate_with(entity, &Options::default())
}

/// [`locate`] with explicit options.
///
/// With [`Options::kind_heuristic`] set, a node whose kind is outside the
/// element class is written as if it were an attribute. The document node is
/// one such kind and locates as `":"`.
pub fn locate_with<'a>(entity: impl Into<Entity<'a>>, options: &Options) -> String {
    let entity = entity.into();
    let ancestors = parents(entity, Order::RootFirst);

    let mut located = String::new();
    if ancestors.is_empty() {
        located.push('/');
    }
    for ancestor in &ancestors {
        located.push_str(ancestor.name());
        located.push('/');
    }

    if attribute_like(entity, options) {
        located.pop();
        located.push(':');
    }
    located.push_str(entity.name());
    located
}

fn attribute_like(entity: Entity<'_>, options: &Options) -> bool {
    match entity {
        Entity::Attribute(_) => true,
        Entity::Node(node) if options.kind_heuristic => !is_element_class(node.kind()),
        Entity::Node(_) => false,
    }
}

/// Kinds that occupy a place in the child structure by name.
fn is_element_class(kind: NodeKind) -> bool {
    kind != NodeKind::Document && kind.code() <= NodeKind::ProcessingInstruction.code()
}
