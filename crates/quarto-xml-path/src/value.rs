//! Value access with optional checks and fallbacks.
//!
//! - [`value`] reads an entity's text.
//! - [`value_at`] and [`value_with`] resolve a path first; a `:name` clause
//!   in the path addresses an attribute.
//! - [`valuex`] and [`valuex_with`] additionally run a [`Checker`] over the
//!   text and hand rejected values to a [`NoMatchHandler`].
//! - [`valuefb`] and [`valuefb_checked`] never fail: any miss, rejection or
//!   bad pattern yields the caller's fallback.
//!
//! ```rust
//! use quarto_xml_path::{parse, valuefb, valuex, Pattern};
//!
//! let doc = parse(r#"<style version="1.0"><info><title>APA</title></info></style>"#).unwrap();
//! let style = doc.root_element().unwrap();
//!
//! let version = Pattern::new(r"\d+\.\d+").unwrap();
//! assert_eq!(valuex(style, ":version", &version).unwrap(), "1.0");
//! assert_eq!(valuefb(style, "info/subtitle", "none"), "none");
//! ```

use crate::entity::{Entity, ExtractMode};
use crate::error::{Error, Result};
use crate::failure::{NoMatch, NoMatchHandler, NotFoundHandler, RaiseNoMatch, RaiseNotFound};
use crate::resolve::Resolver;
use once_cell::sync::OnceCell;
use quarto_xml_tree::Node;
use regex::{Regex, RegexBuilder};

/// Validates the text of a resolved entity.
pub trait Checker {
    /// `Ok(true)` accepts the value. `Err` only reports a checker that could
    /// not run, such as a pattern that fails to compile.
    fn check(&self, value: &str) -> Result<bool>;
}

/// A checker backed by a plain function or closure.
///
/// ```rust
/// use quarto_xml_path::{Checker, Predicate};
///
/// let non_empty = Predicate(|v: &str| !v.is_empty());
/// assert!(non_empty.check("x").unwrap());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Predicate<F>(pub F);

impl<F> Checker for Predicate<F>
where
    F: Fn(&str) -> bool,
{
    fn check(&self, value: &str) -> Result<bool> {
        Ok((self.0)(value))
    }
}

/// A compiled regex is used as built, flags included: it accepts a value
/// when its leftmost match covers all of it. With alternations that prefer a
/// shorter branch (`a|ab` against `"ab"`) the leftmost match stops early and
/// the value is rejected; use [`Pattern`] to require a whole-value match.
impl Checker for Regex {
    fn check(&self, value: &str) -> Result<bool> {
        Ok(self
            .find(value)
            .is_some_and(|found| found.start() == 0 && found.end() == value.len()))
    }
}

/// A pattern source, compiled on every check.
impl Checker for str {
    fn check(&self, value: &str) -> Result<bool> {
        Ok(anchored(self)?.is_match(value))
    }
}

impl Checker for String {
    fn check(&self, value: &str) -> Result<bool> {
        self.as_str().check(value)
    }
}

impl<C: Checker + ?Sized> Checker for &C {
    fn check(&self, value: &str) -> Result<bool> {
        (**self).check(value)
    }
}

/// A pattern that must match a value in full.
///
/// [`Pattern::new`] compiles up front and reports a bad source right away.
/// [`Pattern::lazy`] defers compilation to the first check and keeps the
/// result, including a compile error, for later checks.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: OnceCell<std::result::Result<Regex, regex::Error>>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let source = source.into();
        let regex = anchored(&source)?;
        Ok(Self {
            source,
            compiled: OnceCell::with_value(Ok(regex)),
        })
    }

    /// Compiles up front with builder options such as case folding. The
    /// whole-value anchoring is applied around `source` before the options.
    ///
    /// ```rust
    /// use quarto_xml_path::{Checker, Pattern};
    ///
    /// let yes = Pattern::with_builder("y|yes", |b| b.case_insensitive(true)).unwrap();
    /// assert!(yes.check("YES").unwrap());
    /// ```
    pub fn with_builder<F>(source: impl Into<String>, configure: F) -> Result<Self>
    where
        F: FnOnce(&mut RegexBuilder) -> &mut RegexBuilder,
    {
        let source = source.into();
        let mut builder = RegexBuilder::new(&anchored_source(&source));
        let regex = configure(&mut builder).build()?;
        Ok(Self {
            source,
            compiled: OnceCell::with_value(Ok(regex)),
        })
    }

    pub fn lazy(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            compiled: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The anchored regex, compiling it on first use.
    pub fn regex(&self) -> Result<&Regex> {
        self.compiled
            .get_or_init(|| {
                tracing::trace!(source = %self.source, "compiling value pattern");
                anchored(&self.source)
            })
            .as_ref()
            .map_err(|err| Error::InvalidPattern(err.clone()))
    }
}

impl Checker for Pattern {
    fn check(&self, value: &str) -> Result<bool> {
        Ok(self.regex()?.is_match(value))
    }
}

fn anchored_source(source: &str) -> String {
    format!("^(?:{})$", source)
}

fn anchored(source: &str) -> std::result::Result<Regex, regex::Error> {
    Regex::new(&anchored_source(source))
}

/// The entity's text, verbatim.
pub fn value<'a>(entity: impl Into<Entity<'a>>) -> &'a str {
    entity.into().value()
}

impl Resolver {
    /// Resolves `path` from `node` and returns the entity's value.
    pub fn value_with<'a, H>(
        &self,
        node: Node<'a>,
        path: &str,
        on_not_found: H,
    ) -> Result<&'a str, H::Error>
    where
        H: NotFoundHandler<'a>,
    {
        self.get_or(node, path, ExtractMode::Either, on_not_found)
            .map(Entity::value)
    }

    pub fn value_at<'a>(&self, node: Node<'a>, path: &str) -> Result<&'a str> {
        self.value_with(node, path, RaiseNotFound)
    }

    /// Resolves `path` from `node` and validates the value with `checker`.
    ///
    /// A checker that cannot run (an invalid pattern source) is reported
    /// through `E: From<Error>`, bypassing both handlers.
    pub fn valuex_with<'a, C, N, M, E>(
        &self,
        node: Node<'a>,
        path: &str,
        checker: C,
        on_not_found: N,
        on_no_match: M,
    ) -> Result<&'a str, E>
    where
        C: Checker,
        N: NotFoundHandler<'a, Error = E>,
        M: NoMatchHandler<'a, Error = E>,
        E: From<Error>,
    {
        let entity = self.get_or(node, path, ExtractMode::Either, on_not_found)?;
        let value = entity.value();
        if checker.check(value)? {
            return Ok(value);
        }

        tracing::debug!(path, value, "value rejected by checker");
        Err(on_no_match.no_match(&NoMatch {
            value,
            node,
            entity,
            path,
        }))
    }

    pub fn valuex<'a, C: Checker>(
        &self,
        node: Node<'a>,
        path: &str,
        checker: C,
    ) -> Result<&'a str> {
        self.valuex_with(node, path, checker, RaiseNotFound, RaiseNoMatch)
    }

    /// The value at `path`, or `fallback` when the path misses.
    pub fn valuefb<'a>(&self, node: Node<'a>, path: &str, fallback: &'a str) -> &'a str {
        match self.try_get(node, path, ExtractMode::Either) {
            Ok(entity) => entity.value(),
            Err(failure) => {
                tracing::debug!(path, miss = %failure.miss, "using fallback value");
                fallback
            }
        }
    }

    /// The value at `path` if it passes `checker`, otherwise `fallback`.
    pub fn valuefb_checked<'a, C: Checker>(
        &self,
        node: Node<'a>,
        path: &str,
        fallback: &'a str,
        checker: C,
    ) -> &'a str {
        let value = match self.try_get(node, path, ExtractMode::Either) {
            Ok(entity) => entity.value(),
            Err(failure) => {
                tracing::debug!(path, miss = %failure.miss, "using fallback value");
                return fallback;
            }
        };
        match checker.check(value) {
            Ok(true) => value,
            Ok(false) => {
                tracing::debug!(path, value, "value rejected by checker, using fallback");
                fallback
            }
            Err(err) => {
                tracing::debug!(path, error = %err, "checker failed, using fallback");
                fallback
            }
        }
    }
}

/// [`Resolver::value_with`] with default options.
pub fn value_with<'a, H>(node: Node<'a>, path: &str, on_not_found: H) -> Result<&'a str, H::Error>
where
    H: NotFoundHandler<'a>,
{
    Resolver::default().value_with(node, path, on_not_found)
}

/// [`Resolver::value_at`] with default options.
pub fn value_at<'a>(node: Node<'a>, path: &str) -> Result<&'a str> {
    Resolver::default().value_at(node, path)
}

/// [`Resolver::valuex_with`] with default options.
pub fn valuex_with<'a, C, N, M, E>(
    node: Node<'a>,
    path: &str,
    checker: C,
    on_not_found: N,
    on_no_match: M,
) -> Result<&'a str, E>
where
    C: Checker,
    N: NotFoundHandler<'a, Error = E>,
    M: NoMatchHandler<'a, Error = E>,
    E: From<Error>,
{
    Resolver::default().valuex_with(node, path, checker, on_not_found, on_no_match)
}

/// [`Resolver::valuex`] with default options.
pub fn valuex<'a, C: Checker>(node: Node<'a>, path: &str, checker: C) -> Result<&'a str> {
    Resolver::default().valuex(node, path, checker)
}

/// [`Resolver::valuefb`] with default options.
pub fn valuefb<'a>(node: Node<'a>, path: &str, fallback: &'a str) -> &'a str {
    Resolver::default().valuefb(node, path, fallback)
}

/// [`Resolver::valuefb_checked`] with default options.
pub fn valuefb_checked<'a, C: Checker>(
    node: Node<'a>,
    path: &str,
    fallback: &'a str,
    checker: C,
) -> &'a str {
    Resolver::default().valuefb_checked(node, path, fallback, checker)
}
