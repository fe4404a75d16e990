//! Error types for building a document from markup.

use thiserror::Error;

/// Result type alias for quarto-xml-tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing markup into a [`Document`](crate::Document).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// XML syntax error reported by quick-xml.
    #[error("XML syntax error: {message}{}", .position.map(|p| format!(" at byte {}", p)).unwrap_or_default())]
    XmlSyntax {
        message: String,
        /// Byte offset where the error occurred.
        position: Option<u64>,
    },

    /// Input ended while an element was still open.
    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: String },

    /// An end tag did not match the open element.
    #[error("Mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    /// Structurally invalid markup, e.g. a stray closing tag.
    #[error("Invalid XML structure: {message}")]
    InvalidStructure { message: String },

    /// No root element.
    #[error("Empty XML document: no root element found")]
    EmptyDocument,

    /// More than one root element.
    #[error("Invalid XML: multiple root elements (second one is <{name}>)")]
    MultipleRoots { name: String },
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlSyntax {
            message: err.to_string(),
            position: None,
        }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlSyntax {
            message: format!("Attribute error: {}", err),
            position: None,
        }
    }
}
