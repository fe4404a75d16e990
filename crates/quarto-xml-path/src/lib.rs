//! Path lookups over `quarto-xml-tree` documents.
//!
//! A path names one node or attribute relative to a start node:
//!
//! - `a/b` descends to the first child `a`, then its first child `b`;
//! - `..` steps to the parent;
//! - a leading `/` starts over from the document node;
//! - a trailing `:name` picks an attribute of the node reached so far.
//!
//! [`locate`] goes the other way and writes the absolute path of an entity,
//! so `get(any, &locate(e), ExtractMode::Either)` finds `e` again in a tree
//! without duplicate names.
//!
//! On top of lookups sit the value accessors ([`value_at`], [`valuex`],
//! [`valuefb`]) and bidirectional iteration over child and attribute chains
//! ([`children`], [`attributes`]).
//!
//! # Example
//!
//! ```rust
//! use quarto_xml_path::{getnode, locate, parse, value_at, ExtractMode, get};
//!
//! let doc = parse(r#"<root><a alt="1"><b>txt</b></a></root>"#).unwrap();
//! let root = doc.root_element().unwrap();
//!
//! let b = getnode(root, "a/b").unwrap();
//! assert_eq!(locate(b), "/root/a/b");
//! assert_eq!(value_at(b, "../:alt").unwrap(), "1");
//! assert_eq!(get(b, "/root/a:alt", ExtractMode::Attribute).map(|e| e.value()), Some("1"));
//! ```
//!
//! # Failures
//!
//! Lookups that return `Option` just miss. The `_or` and `_with` forms pass
//! the failure context to a strategy ([`NotFoundHandler`],
//! [`NoMatchHandler`]) and return its error; the default strategies produce
//! [`Error`]. [`valuefb`] is the only accessor that always returns a value.

pub mod entity;
pub mod error;
pub mod failure;
pub mod iter;
pub mod locate;
pub mod options;
pub mod path;
pub mod resolve;
pub mod value;

// Re-export main types
pub use entity::{Entity, ExtractMode};
pub use error::{Error, Result};
pub use failure::{
    Miss, NoMatch, NoMatchFn, NoMatchHandler, NotFound, NotFoundFn, NotFoundHandler, RaiseNoMatch,
    RaiseNotFound, no_match_fn, not_found_fn,
};
pub use iter::{Chain, ChainIter, Cursor, Range, attributes, children};
pub use locate::{Order, locate, locate_with, parents};
pub use options::{DuplicatePolicy, Options};
pub use path::{Segment, Segments, Step};
pub use resolve::{Resolver, get, get_or, getattr, getattr_or, getnode, getnode_or, try_get};
pub use value::{
    Checker, Pattern, Predicate, value, value_at, value_with, valuefb, valuefb_checked, valuex,
    valuex_with,
};

pub use quarto_xml_tree::{Attr, Document, Node, NodeKind, parse};
