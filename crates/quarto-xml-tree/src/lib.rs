//! Arena-backed XML document tree.
//!
//! This crate provides the document model that path queries walk over. All
//! nodes and attributes live in two arenas owned by a [`Document`] and are
//! addressed by typed indices ([`NodeId`], [`AttrId`]). Every node knows its
//! parent, its first and last child, its neighbouring siblings and its
//! attribute chain; every attribute knows its owner and its neighbours.
//!
//! Navigation goes through the borrowing handles [`Node`] and [`Attr`], which
//! pair a `&Document` with an id. Construction goes through `&mut Document`.
//!
//! # Example
//!
//! ```rust
//! use quarto_xml_tree::parse;
//!
//! let doc = parse(r#"<style version="1.0">
//!   <macro name="author">
//!     <text variable="author"/>
//!   </macro>
//! </style>"#).unwrap();
//!
//! let style = doc.root_element().unwrap();
//! assert_eq!(style.name(), "style");
//! assert_eq!(style.first_attribute_named("version").map(|a| a.value()), Some("1.0"));
//!
//! let macro_node = style.first_child_named("macro").unwrap();
//! assert_eq!(macro_node.parent(), Some(style));
//! ```
//!
//! # Building by hand
//!
//! ```rust
//! use quarto_xml_tree::Document;
//!
//! let mut doc = Document::new();
//! let root = doc.root_id();
//! let a = doc.append_element(root, "a");
//! doc.append_attribute(a, "alt", "1");
//! let b = doc.append_element(a, "b");
//! doc.set_value(b, "txt");
//!
//! assert_eq!(doc.node(b).value(), "txt");
//! assert_eq!(doc.node(b).parent().map(|p| p.name()), Some("a"));
//! ```

pub mod document;
pub mod error;
pub mod handle;
pub mod parser;
pub mod types;

// Re-export main types
pub use document::Document;
pub use error::{Error, Result};
pub use handle::{Attr, Node};
pub use parser::parse;
pub use types::{AttrId, NodeId, NodeKind};
