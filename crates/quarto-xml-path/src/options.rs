//! Lookup options.
//!
//! Options deserialize from kebab-case keys so a host application can keep
//! them in its own configuration file:
//!
//! ```rust
//! use quarto_xml_path::{DuplicatePolicy, Options};
//!
//! let options: Options = serde_json::from_str(r#"{ "duplicates": "reject" }"#).unwrap();
//! assert_eq!(options.duplicates, DuplicatePolicy::Reject);
//! assert!(!options.kind_heuristic);
//! ```

use serde::Deserialize;

/// How a name lookup treats several children (or attributes) with the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
    /// The earliest match in insertion order wins; later ones are unreachable by name.
    #[default]
    FirstMatch,
    /// A name matching more than one entity is a miss.
    Reject,
}

/// Options shared by resolution and locate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Options {
    pub duplicates: DuplicatePolicy,

    /// Treat nodes whose kind lies outside the element class as
    /// attribute-like when locating them.
    ///
    /// This is an approximation for callers that cannot tell attributes and
    /// nodes apart statically. It is wrong for the document node, which it
    /// locates as `":"` instead of `"/"`.
    pub kind_heuristic: bool,
}

impl Options {
    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn with_kind_heuristic(mut self, enabled: bool) -> Self {
        self.kind_heuristic = enabled;
        self
    }
}
