//! Core types for the document arena.

use std::num::NonZeroU32;

/// A typed index into the document's node arena.
///
/// `NodeId` wraps a `NonZeroU32`, so `Option<NodeId>` is the same size as
/// `NodeId`. The raw value is the arena position plus one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

/// A typed index into the document's attribute arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct AttrId(NonZeroU32);

macro_rules! arena_index {
    ($ty:ident) => {
        impl $ty {
            /// Builds an id from an arena position.
            pub(crate) fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index)
                    .ok()
                    .and_then(|i| i.checked_add(1))
                    .and_then(NonZeroU32::new)
                    .map(Self)
            }

            pub(crate) fn as_index(self) -> usize {
                (self.0.get() - 1) as usize
            }

            /// Converts this id to its raw, always non-zero, value.
            #[must_use]
            pub fn into_raw(self) -> u32 {
                self.0.get()
            }

            /// Creates an id from a raw value, if non-zero.
            #[must_use]
            pub fn from_raw(raw: u32) -> Option<Self> {
                NonZeroU32::new(raw).map(Self)
            }
        }
    };
}

arena_index!(NodeId);
arena_index!(AttrId);

impl NodeId {
    /// The document node always occupies the first arena slot.
    pub(crate) const ROOT: Self = Self(NonZeroU32::MIN);
}

/// The kind of a node.
///
/// The declaration order is meaningful: [`NodeKind::code`] exposes it as a
/// coarse discriminant, and everything other than [`NodeKind::Element`] is
/// outside the ordinary element class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    /// The document node. There is exactly one per [`Document`](crate::Document).
    Document,
    /// An element, e.g. `<macro name="x">`.
    Element,
    /// A character data node.
    Data,
    /// A CDATA section.
    CData,
    /// A comment.
    Comment,
    /// An XML declaration.
    Declaration,
    /// A DOCTYPE declaration.
    Doctype,
    /// A processing instruction.
    ProcessingInstruction,
}

impl NodeKind {
    /// The discriminant of this kind, in declaration order.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Whether this kind belongs to the ordinary element class.
    #[must_use]
    pub fn is_element(self) -> bool {
        self == NodeKind::Element
    }
}

/// Storage for a single node.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub kind: NodeKind,
    pub name: String,
    pub value: String,
    pub prefix: Option<String>,
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    pub first_attr: Option<AttrId>,
    pub last_attr: Option<AttrId>,
}

impl NodeData {
    pub fn new(kind: NodeKind, name: String, value: String) -> Self {
        Self {
            kind,
            name,
            value,
            prefix: None,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            first_attr: None,
            last_attr: None,
        }
    }
}

/// Storage for a single attribute.
#[derive(Debug, Clone)]
pub(crate) struct AttrData {
    pub name: String,
    pub value: String,
    pub prefix: Option<String>,
    pub owner: NodeId,
    pub prev: Option<AttrId>,
    pub next: Option<AttrId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes_follow_declaration_order() {
        assert_eq!(NodeKind::Document.code(), 0);
        assert_eq!(NodeKind::Element.code(), 1);
        assert_eq!(NodeKind::ProcessingInstruction.code(), 7);
        assert!(NodeKind::Comment > NodeKind::Element);
    }

    #[test]
    fn test_only_element_is_element() {
        assert!(NodeKind::Element.is_element());
        assert!(!NodeKind::Document.is_element());
        assert!(!NodeKind::Data.is_element());
    }

    #[test]
    fn test_raw_roundtrip_rejects_zero() {
        assert_eq!(NodeId::from_raw(0), None);
        let id = NodeId::from_raw(7).unwrap();
        assert_eq!(id.into_raw(), 7);
        assert_eq!(id.as_index(), 6);
        assert_eq!(AttrId::from_index(0).map(AttrId::into_raw), Some(1));
    }
}
