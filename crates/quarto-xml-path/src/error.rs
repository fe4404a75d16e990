//! Error types for path lookups and value checks.

use crate::failure::Miss;
use thiserror::Error;

/// Result type alias for quarto-xml-path operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors produced by the default failure strategies.
///
/// Paths are reported as located paths (see [`locate`](crate::locate)) so
/// the message names a place in the document rather than a handle.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A child, parent or attribute step had no match, or the path ended on
    /// the wrong kind of entity.
    #[error("failed to find entity `{path}` from `{start}`: {miss} (stopped at `{at}`)")]
    NotFound {
        /// The path as given by the caller.
        path: String,
        /// Located path of the node the lookup started from.
        start: String,
        /// Located path of the node where the walk stopped.
        at: String,
        /// The unconsumed part of the path, starting at the failing segment.
        remaining: String,
        miss: Miss,
    },

    /// A resolved value was rejected by its checker.
    #[error("value {value:?} of `{at}` does not match the expected pattern")]
    NoMatch {
        value: String,
        /// The path as given by the caller.
        path: String,
        /// Located path of the resolved entity.
        at: String,
    },

    /// A pattern source failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, Error::NoMatch { .. })
    }
}
