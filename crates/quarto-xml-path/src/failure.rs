//! Failure contexts and the strategies that turn them into errors.
//!
//! Lookups that can fail hand a context ([`NotFound`] or [`NoMatch`]) to a
//! caller-supplied strategy. The strategy produces the caller's error value,
//! which the lookup returns through `Err`; control never continues past the
//! failure. [`RaiseNotFound`] and [`RaiseNoMatch`] are the defaults and
//! produce [`Error`].
//!
//! ```rust
//! use quarto_xml_path::{getnode_or, not_found_fn, parse};
//!
//! let doc = parse("<style><info/></style>").unwrap();
//! let style = doc.root_element().unwrap();
//!
//! let missing = getnode_or(style, "citation", not_found_fn(|f| format!("no {}", f.remaining)));
//! assert_eq!(missing.unwrap_err(), "no citation");
//! ```

use crate::entity::{Entity, ExtractMode};
use crate::error::Error;
use crate::locate::locate;
use quarto_xml_tree::Node;
use std::fmt;

/// Why a lookup missed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Miss {
    /// No child with this name.
    Child { name: String },
    /// `..` at a node without a parent.
    Parent,
    /// No attribute with this name.
    Attribute { name: String },
    /// The path addressed a different kind of entity than was requested.
    KindMismatch { mode: ExtractMode },
    /// Several entities carry this name and duplicates are rejected.
    Ambiguous { name: String },
}

impl fmt::Display for Miss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Miss::Child { name } => write!(f, "no child named `{}`", name),
            Miss::Parent => write!(f, "node has no parent"),
            Miss::Attribute { name } => write!(f, "no attribute named `{}`", name),
            Miss::KindMismatch { mode } => {
                write!(f, "path does not address the requested {}", mode)
            }
            Miss::Ambiguous { name } => write!(f, "more than one entity named `{}`", name),
        }
    }
}

/// Context of a failed lookup.
#[derive(Debug, Clone)]
pub struct NotFound<'a, 'p> {
    /// The node the lookup started from.
    pub start: Node<'a>,
    /// The node where the walk stopped.
    pub at: Node<'a>,
    /// The full path.
    pub path: &'p str,
    /// The unconsumed path, starting at the failing segment.
    pub remaining: &'p str,
    pub miss: Miss,
}

impl NotFound<'_, '_> {
    pub fn to_error(&self) -> Error {
        Error::NotFound {
            path: self.path.to_string(),
            start: locate(self.start),
            at: locate(self.at),
            remaining: self.remaining.to_string(),
            miss: self.miss.clone(),
        }
    }
}

impl fmt::Display for NotFound<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}`: {} at `{}`", self.path, self.miss, self.remaining)
    }
}

/// Context of a value rejected by its checker.
#[derive(Debug, Clone)]
pub struct NoMatch<'a, 'p> {
    /// The rejected text.
    pub value: &'a str,
    /// The node the lookup started from.
    pub node: Node<'a>,
    /// The entity that carried the value.
    pub entity: Entity<'a>,
    pub path: &'p str,
}

impl NoMatch<'_, '_> {
    pub fn to_error(&self) -> Error {
        Error::NoMatch {
            value: self.value.to_string(),
            path: self.path.to_string(),
            at: locate(self.entity),
        }
    }
}

/// Strategy invoked when a lookup misses.
pub trait NotFoundHandler<'a> {
    type Error;

    fn not_found(&self, failure: &NotFound<'a, '_>) -> Self::Error;
}

/// Strategy invoked when a checker rejects a value.
pub trait NoMatchHandler<'a> {
    type Error;

    fn no_match(&self, failure: &NoMatch<'a, '_>) -> Self::Error;
}

/// The default not-found strategy: [`Error::NotFound`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RaiseNotFound;

/// The default no-match strategy: [`Error::NoMatch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RaiseNoMatch;

impl<'a> NotFoundHandler<'a> for RaiseNotFound {
    type Error = Error;

    fn not_found(&self, failure: &NotFound<'a, '_>) -> Error {
        failure.to_error()
    }
}

impl<'a> NoMatchHandler<'a> for RaiseNoMatch {
    type Error = Error;

    fn no_match(&self, failure: &NoMatch<'a, '_>) -> Error {
        failure.to_error()
    }
}

/// A not-found strategy backed by a closure. See [`not_found_fn`].
#[derive(Clone, Copy)]
pub struct NotFoundFn<F>(F);

/// A no-match strategy backed by a closure. See [`no_match_fn`].
#[derive(Clone, Copy)]
pub struct NoMatchFn<F>(F);

/// Wraps a closure as a [`NotFoundHandler`].
pub fn not_found_fn<'a, F, E>(f: F) -> NotFoundFn<F>
where
    F: Fn(&NotFound<'a, '_>) -> E,
{
    NotFoundFn(f)
}

/// Wraps a closure as a [`NoMatchHandler`].
pub fn no_match_fn<'a, F, E>(f: F) -> NoMatchFn<F>
where
    F: Fn(&NoMatch<'a, '_>) -> E,
{
    NoMatchFn(f)
}

impl<'a, F, E> NotFoundHandler<'a> for NotFoundFn<F>
where
    F: Fn(&NotFound<'a, '_>) -> E,
{
    type Error = E;

    fn not_found(&self, failure: &NotFound<'a, '_>) -> E {
        (self.0)(failure)
    }
}

impl<'a, F, E> NoMatchHandler<'a> for NoMatchFn<F>
where
    F: Fn(&NoMatch<'a, '_>) -> E,
{
    type Error = E;

    fn no_match(&self, failure: &NoMatch<'a, '_>) -> E {
        (self.0)(failure)
    }
}

impl<F> fmt::Debug for NotFoundFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotFoundFn").finish_non_exhaustive()
    }
}

impl<F> fmt::Debug for NoMatchFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoMatchFn").finish_non_exhaustive()
    }
}
