//! Bidirectional iteration over child and attribute chains.
//!
//! A [`Cursor`] sits on one element of a chain or on the end sentinel past
//! the last element. Stepping back from the sentinel lands on the last
//! element, so a cursor carries the chain's owner. A [`Range`] pairs the
//! begin and end cursors of one chain and iterates it in either direction:
//!
//! ```rust
//! use quarto_xml_path::{children, parse};
//!
//! let doc = parse("<layout><a/><b/><c/></layout>").unwrap();
//! let layout = doc.root_element().unwrap();
//!
//! let forward: Vec<_> = children(layout).into_iter().map(|n| n.name()).collect();
//! let backward: Vec<_> = children(layout).into_iter().rev().map(|n| n.name()).collect();
//! assert_eq!(forward, ["a", "b", "c"]);
//! assert_eq!(backward, ["c", "b", "a"]);
//! ```

use quarto_xml_tree::{Attr, Node};
use std::iter::FusedIterator;

/// An element of a doubly linked chain owned by a node.
pub trait Chain<'a>: Copy + PartialEq {
    /// The first element of `owner`'s chain.
    fn first_in(owner: Node<'a>) -> Option<Self>;

    /// The last element of `owner`'s chain.
    fn last_in(owner: Node<'a>) -> Option<Self>;

    fn following(self) -> Option<Self>;

    fn preceding(self) -> Option<Self>;
}

impl<'a> Chain<'a> for Node<'a> {
    fn first_in(owner: Node<'a>) -> Option<Self> {
        owner.first_child()
    }

    fn last_in(owner: Node<'a>) -> Option<Self> {
        owner.last_child()
    }

    fn following(self) -> Option<Self> {
        self.next_sibling()
    }

    fn preceding(self) -> Option<Self> {
        self.previous_sibling()
    }
}

impl<'a> Chain<'a> for Attr<'a> {
    fn first_in(owner: Node<'a>) -> Option<Self> {
        owner.first_attribute()
    }

    fn last_in(owner: Node<'a>) -> Option<Self> {
        owner.last_attribute()
    }

    fn following(self) -> Option<Self> {
        self.next_attribute()
    }

    fn preceding(self) -> Option<Self> {
        self.previous_attribute()
    }
}

/// A position in a chain: an element or the end sentinel.
///
/// Two cursors are equal when they sit on the same element, or both sit on
/// the end sentinel.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a, T> {
    owner: Node<'a>,
    current: Option<T>,
}

impl<'a, T: Chain<'a>> Cursor<'a, T> {
    /// The element under the cursor; `None` at the end.
    pub fn get(&self) -> Option<T> {
        self.current
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// Steps to the following element, or to the end sentinel after the last.
    ///
    /// Advancing the end sentinel is a caller error.
    pub fn advance(&mut self) {
        debug_assert!(self.current.is_some(), "advance past the end of a chain");
        self.current = self.current.and_then(T::following);
    }

    /// Steps to the preceding element. From the end sentinel this is the
    /// last element of the chain.
    ///
    /// Retreating from the first element is a caller error; optimized builds
    /// leave the cursor on the end sentinel.
    pub fn retreat(&mut self) {
        self.current = match self.current {
            None => T::last_in(self.owner),
            Some(current) => {
                let preceding = current.preceding();
                debug_assert!(
                    preceding.is_some(),
                    "retreat before the start of a chain"
                );
                preceding
            }
        };
    }
}

impl<T: PartialEq> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl<T: Eq> Eq for Cursor<'_, T> {}

/// The whole chain of one owner.
#[derive(Debug, Clone, Copy)]
pub struct Range<'a, T> {
    owner: Node<'a>,
    marker: std::marker::PhantomData<T>,
}

impl<'a, T: Chain<'a>> Range<'a, T> {
    pub fn new(owner: Node<'a>) -> Self {
        Self {
            owner,
            marker: std::marker::PhantomData,
        }
    }

    pub fn owner(&self) -> Node<'a> {
        self.owner
    }

    pub fn begin(&self) -> Cursor<'a, T> {
        Cursor {
            owner: self.owner,
            current: T::first_in(self.owner),
        }
    }

    pub fn end(&self) -> Cursor<'a, T> {
        Cursor {
            owner: self.owner,
            current: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.begin() == self.end()
    }

    pub fn iter(&self) -> ChainIter<'a, T> {
        ChainIter {
            front: T::first_in(self.owner),
            back: T::last_in(self.owner),
            finished: false,
            marker: std::marker::PhantomData,
        }
    }
}

impl<'a, T: Chain<'a>> IntoIterator for Range<'a, T> {
    type Item = T;
    type IntoIter = ChainIter<'a, T>;

    fn into_iter(self) -> ChainIter<'a, T> {
        self.iter()
    }
}

/// The children of `node`, in document order.
pub fn children(node: Node<'_>) -> Range<'_, Node<'_>> {
    Range::new(node)
}

/// The attributes of `node`, in insertion order.
pub fn attributes(node: Node<'_>) -> Range<'_, Attr<'_>> {
    Range::new(node)
}

/// Iterator over a [`Range`], from either end.
#[derive(Debug, Clone)]
pub struct ChainIter<'a, T> {
    front: Option<T>,
    back: Option<T>,
    finished: bool,
    marker: std::marker::PhantomData<Node<'a>>,
}

impl<'a, T: Chain<'a>> ChainIter<'a, T> {
    fn visit(&mut self, item: T) -> T {
        if self.back == Some(item) && self.front == Some(item) {
            self.finished = true;
        }
        item
    }
}

impl<'a, T: Chain<'a>> Iterator for ChainIter<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.finished {
            return None;
        }
        let item = self.front?;
        let item = self.visit(item);
        self.front = item.following();
        Some(item)
    }
}

impl<'a, T: Chain<'a>> DoubleEndedIterator for ChainIter<'a, T> {
    fn next_back(&mut self) -> Option<T> {
        if self.finished {
            return None;
        }
        let item = self.back?;
        let item = self.visit(item);
        self.back = item.preceding();
        Some(item)
    }
}

impl<'a, T: Chain<'a>> FusedIterator for ChainIter<'a, T> {}
