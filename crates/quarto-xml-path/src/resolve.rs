//! Path resolution.
//!
//! A lookup walks from a start node one segment at a time: a leading `/`
//! jumps to the document node, `..` moves to the parent, a name descends to
//! the first child with that name, and a trailing `:name` picks the first
//! attribute with that name. Every step is O(1) or a scan of one sibling or
//! attribute chain; there is no backtracking.
//!
//! Each lookup comes in three shapes:
//!
//! - `get`/`getnode`/`getattr` return `Option` and never report why;
//! - `try_get` returns the [`NotFound`] context;
//! - `get_or`/`getnode_or`/`getattr_or` pass the context to a
//!   [`NotFoundHandler`] and return its error.
//!
//! The free functions use [`Options::default`]; a [`Resolver`] carries
//! explicit options.

use crate::entity::{Entity, ExtractMode};
use crate::failure::{Miss, NotFound, NotFoundHandler};
use crate::locate;
use crate::options::{DuplicatePolicy, Options};
use crate::path::{Segment, Segments, Step};
use quarto_xml_tree::{Attr, Node};

/// Resolves paths with a fixed set of [`Options`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    options: Options,
}

impl Resolver {
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Resolves `path` from `start`, reporting the failure context on a miss.
    pub fn try_get<'a, 'p>(
        &self,
        start: Node<'a>,
        path: &'p str,
        mode: ExtractMode,
    ) -> Result<Entity<'a>, NotFound<'a, 'p>> {
        match mode {
            ExtractMode::Node => self.node_at(start, path).map(Entity::Node),
            ExtractMode::Attribute => self.attribute_at(start, path).map(Entity::Attribute),
            ExtractMode::Either => {
                let walk = self.walk(start, path)?;
                match walk.clause {
                    None => Ok(Entity::Node(walk.node)),
                    Some(clause) => self
                        .clause_attribute(start, path, walk.node, clause)
                        .map(Entity::Attribute),
                }
            }
        }
    }

    pub fn get<'a>(&self, start: Node<'a>, path: &str, mode: ExtractMode) -> Option<Entity<'a>> {
        self.try_get(start, path, mode).ok()
    }

    /// Resolves a path that must end on a node. A `:name` clause is a
    /// malformed query here.
    pub fn getnode<'a>(&self, start: Node<'a>, path: &str) -> Option<Node<'a>> {
        self.node_at(start, path).ok()
    }

    /// Resolves a path that must end on an attribute.
    pub fn getattr<'a>(&self, start: Node<'a>, path: &str) -> Option<Attr<'a>> {
        self.attribute_at(start, path).ok()
    }

    pub fn get_or<'a, H>(
        &self,
        start: Node<'a>,
        path: &str,
        mode: ExtractMode,
        on_not_found: H,
    ) -> Result<Entity<'a>, H::Error>
    where
        H: NotFoundHandler<'a>,
    {
        self.try_get(start, path, mode)
            .map_err(|failure| on_not_found.not_found(&failure))
    }

    pub fn getnode_or<'a, H>(
        &self,
        start: Node<'a>,
        path: &str,
        on_not_found: H,
    ) -> Result<Node<'a>, H::Error>
    where
        H: NotFoundHandler<'a>,
    {
        self.node_at(start, path)
            .map_err(|failure| on_not_found.not_found(&failure))
    }

    pub fn getattr_or<'a, H>(
        &self,
        start: Node<'a>,
        path: &str,
        on_not_found: H,
    ) -> Result<Attr<'a>, H::Error>
    where
        H: NotFoundHandler<'a>,
    {
        self.attribute_at(start, path)
            .map_err(|failure| on_not_found.not_found(&failure))
    }

    /// The located path of `entity`, honouring the kind heuristic option.
    pub fn locate<'a>(&self, entity: impl Into<Entity<'a>>) -> String {
        locate::locate_with(entity, &self.options)
    }

    fn node_at<'a, 'p>(
        &self,
        start: Node<'a>,
        path: &'p str,
    ) -> Result<Node<'a>, NotFound<'a, 'p>> {
        let walk = self.walk(start, path)?;
        debug_assert!(
            walk.clause.is_none(),
            "attribute clause in a node-only path: `{}`",
            path
        );
        match walk.clause {
            None => Ok(walk.node),
            Some((_, offset)) => Err(missed(
                start,
                path,
                walk.node,
                offset,
                Miss::KindMismatch {
                    mode: ExtractMode::Node,
                },
            )),
        }
    }

    fn attribute_at<'a, 'p>(
        &self,
        start: Node<'a>,
        path: &'p str,
    ) -> Result<Attr<'a>, NotFound<'a, 'p>> {
        let walk = self.walk(start, path)?;
        match walk.clause {
            Some(clause) => self.clause_attribute(start, path, walk.node, clause),
            None => Err(missed(
                start,
                path,
                walk.node,
                path.len(),
                Miss::KindMismatch {
                    mode: ExtractMode::Attribute,
                },
            )),
        }
    }

    /// Follows the node segments of `path`, stopping before an attribute
    /// clause.
    fn walk<'a, 'p>(
        &self,
        start: Node<'a>,
        path: &'p str,
    ) -> Result<Walk<'a, 'p>, NotFound<'a, 'p>> {
        let mut current = start;
        for Step { segment, offset } in Segments::new(path) {
            tracing::trace!(?segment, at = current.name(), "path step");
            match segment {
                Segment::Root => current = document_node(current),
                Segment::Parent => match current.parent() {
                    Some(parent) => current = parent,
                    None => return Err(missed(start, path, current, offset, Miss::Parent)),
                },
                Segment::Child(name) => match self.child(current, name) {
                    Ok(child) => current = child,
                    Err(miss) => return Err(missed(start, path, current, offset, miss)),
                },
                Segment::Attribute(name) => {
                    return Ok(Walk {
                        node: current,
                        clause: Some((name, offset)),
                    });
                }
            }
        }
        Ok(Walk {
            node: current,
            clause: None,
        })
    }

    fn clause_attribute<'a, 'p>(
        &self,
        start: Node<'a>,
        path: &'p str,
        node: Node<'a>,
        (name, offset): (&'p str, usize),
    ) -> Result<Attr<'a>, NotFound<'a, 'p>> {
        self.attribute(node, name)
            .map_err(|miss| missed(start, path, node, offset, miss))
    }

    fn child<'a>(&self, node: Node<'a>, name: &str) -> Result<Node<'a>, Miss> {
        let child = node.first_child_named(name).ok_or_else(|| Miss::Child {
            name: name.to_string(),
        })?;
        if self.options.duplicates == DuplicatePolicy::Reject
            && child.next_sibling_named(name).is_some()
        {
            return Err(Miss::Ambiguous {
                name: name.to_string(),
            });
        }
        Ok(child)
    }

    fn attribute<'a>(&self, node: Node<'a>, name: &str) -> Result<Attr<'a>, Miss> {
        let attr = node
            .first_attribute_named(name)
            .ok_or_else(|| Miss::Attribute {
                name: name.to_string(),
            })?;
        if self.options.duplicates == DuplicatePolicy::Reject
            && attr.next_attribute_named(name).is_some()
        {
            return Err(Miss::Ambiguous {
                name: name.to_string(),
            });
        }
        Ok(attr)
    }
}

/// The node a walk stopped on and the attribute clause left after it, with
/// the clause's offset in the path.
struct Walk<'a, 'p> {
    node: Node<'a>,
    clause: Option<(&'p str, usize)>,
}

fn missed<'a, 'p>(
    start: Node<'a>,
    path: &'p str,
    at: Node<'a>,
    offset: usize,
    miss: Miss,
) -> NotFound<'a, 'p> {
    let remaining = &path[offset..];
    tracing::debug!(path, remaining, %miss, "path lookup missed");
    NotFound {
        start,
        at,
        path,
        remaining,
        miss,
    }
}

/// The topmost ancestor of `node`: the document node for attached nodes.
fn document_node(node: Node<'_>) -> Node<'_> {
    let mut top = node;
    while let Some(parent) = top.parent() {
        top = parent;
    }
    top
}

pub fn try_get<'a, 'p>(
    start: Node<'a>,
    path: &'p str,
    mode: ExtractMode,
) -> Result<Entity<'a>, NotFound<'a, 'p>> {
    Resolver::default().try_get(start, path, mode)
}

/// Resolves `path` from `start`; `None` on any miss.
///
/// ```rust
/// use quarto_xml_path::{get, parse, ExtractMode};
///
/// let doc = parse(r#"<root><a alt="1"><b>txt</b></a></root>"#).unwrap();
/// let root = doc.root_element().unwrap();
///
/// assert_eq!(get(root, "a:alt", ExtractMode::Either).map(|e| e.value()), Some("1"));
/// assert_eq!(get(root, "a/b", ExtractMode::Either).map(|e| e.value()), Some("txt"));
/// assert!(get(root, "a/c", ExtractMode::Either).is_none());
/// ```
pub fn get<'a>(start: Node<'a>, path: &str, mode: ExtractMode) -> Option<Entity<'a>> {
    Resolver::default().get(start, path, mode)
}

pub fn getnode<'a>(start: Node<'a>, path: &str) -> Option<Node<'a>> {
    Resolver::default().getnode(start, path)
}

pub fn getattr<'a>(start: Node<'a>, path: &str) -> Option<Attr<'a>> {
    Resolver::default().getattr(start, path)
}

pub fn get_or<'a, H>(
    start: Node<'a>,
    path: &str,
    mode: ExtractMode,
    on_not_found: H,
) -> Result<Entity<'a>, H::Error>
where
    H: NotFoundHandler<'a>,
{
    Resolver::default().get_or(start, path, mode, on_not_found)
}

pub fn getnode_or<'a, H>(start: Node<'a>, path: &str, on_not_found: H) -> Result<Node<'a>, H::Error>
where
    H: NotFoundHandler<'a>,
{
    Resolver::default().getnode_or(start, path, on_not_found)
}

pub fn getattr_or<'a, H>(start: Node<'a>, path: &str, on_not_found: H) -> Result<Attr<'a>, H::Error>
where
    H: NotFoundHandler<'a>,
{
    Resolver::default().getattr_or(start, path, on_not_found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::failure::RaiseNotFound;
    use quarto_xml_tree::{Document, NodeId};

    /// document -> root -> a[alt="1", c="attr"] -> { b("txt"), c("child") }
    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let top = doc.root_id();
        let root = doc.append_element(top, "root");
        let a = doc.append_element(root, "a");
        doc.append_attribute(a, "alt", "1");
        doc.append_attribute(a, "c", "attr");
        let b = doc.append_element(a, "b");
        doc.set_value(b, "txt");
        let c = doc.append_element(a, "c");
        doc.set_value(c, "child");
        (doc, root, a, b)
    }

    #[test]
    fn test_empty_path_is_identity() {
        let (doc, root, ..) = sample();
        let start = doc.node(root);
        assert_eq!(getnode(start, ""), Some(start));
        assert_eq!(getnode(doc.root(), ""), Some(doc.root()));
    }

    #[test]
    fn test_slash_rebases_to_document_node() {
        let (doc, _, _, b) = sample();
        assert_eq!(getnode(doc.node(b), "/"), Some(doc.root()));
        assert_eq!(getnode(doc.root(), "/"), Some(doc.root()));
        assert_eq!(getnode(doc.node(b), "/root/a/b"), Some(doc.node(b)));
    }

    #[test]
    fn test_child_descent() {
        let (doc, root, _, b) = sample();
        let found = getnode(doc.node(root), "a/b").unwrap();
        assert_eq!(found, doc.node(b));
        assert_eq!(found.value(), "txt");
    }

    #[test]
    fn test_attribute_lookup_ignores_same_named_child() {
        let (doc, root, ..) = sample();
        let start = doc.node(root);
        assert_eq!(getattr(start, "a:c").map(|a| a.value()), Some("attr"));
        assert_eq!(
            get(start, "a/c", ExtractMode::Either).map(|e| e.value()),
            Some("child")
        );
        assert!(getattr(start, "a/b:c").is_none());
    }

    #[test]
    fn test_attribute_on_start_node() {
        let (doc, _, a, _) = sample();
        assert_eq!(getattr(doc.node(a), ":alt").map(|a| a.value()), Some("1"));
        assert!(getattr(doc.node(a), ":missing").is_none());
    }

    #[test]
    fn test_parent_steps() {
        let (doc, root, a, _) = sample();
        assert_eq!(getnode(doc.node(root), "a/.."), Some(doc.node(root)));
        assert_eq!(getnode(doc.node(a), "b/../../a"), Some(doc.node(a)));
        assert_eq!(getnode(doc.node(root), ".."), Some(doc.root()));
    }

    #[test]
    fn test_parent_above_document_node_misses() {
        let (doc, root, ..) = sample();
        let failure = try_get(doc.node(root), "/..", ExtractMode::Node).unwrap_err();
        assert_eq!(failure.miss, Miss::Parent);
        assert_eq!(failure.at, doc.root());
        assert_eq!(failure.remaining, "..");
        assert!(getnode(doc.node(root), "a/../../..").is_none());
    }

    #[test]
    fn test_missing_child_reports_context() {
        let (doc, root, a, _) = sample();
        let failure = try_get(doc.node(root), "a/missing/b", ExtractMode::Either).unwrap_err();
        assert_eq!(failure.start, doc.node(root));
        assert_eq!(failure.at, doc.node(a));
        assert_eq!(failure.remaining, "missing/b");
        assert_eq!(
            failure.miss,
            Miss::Child {
                name: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_missing_attribute_reports_context() {
        let (doc, root, a, _) = sample();
        let failure = try_get(doc.node(root), "a:nope", ExtractMode::Attribute).unwrap_err();
        assert_eq!(failure.at, doc.node(a));
        assert_eq!(failure.remaining, "nope");
        assert_eq!(
            failure.miss,
            Miss::Attribute {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_attribute_mode_rejects_node_result() {
        let (doc, root, a, _) = sample();
        let failure = try_get(doc.node(root), "a", ExtractMode::Attribute).unwrap_err();
        assert_eq!(failure.at, doc.node(a));
        assert_eq!(failure.remaining, "");
        assert_eq!(
            failure.miss,
            Miss::KindMismatch {
                mode: ExtractMode::Attribute
            }
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "attribute clause in a node-only path")]
    fn test_node_mode_with_attribute_clause_asserts() {
        let (doc, root, ..) = sample();
        let _ = getnode(doc.node(root), "a:alt");
    }

    #[test]
    fn test_first_match_among_duplicates() {
        let mut doc = Document::new();
        let top = doc.root_id();
        let list = doc.append_element(top, "list");
        let first = doc.append_element(list, "item");
        doc.append_element(list, "item");
        doc.append_attribute(list, "k", "1");
        doc.append_attribute(list, "k", "2");

        let start = doc.node(list);
        assert_eq!(getnode(start, "item"), Some(doc.node(first)));
        assert_eq!(getattr(start, ":k").map(|a| a.value()), Some("1"));
    }

    #[test]
    fn test_reject_policy_misses_on_duplicates() {
        let mut doc = Document::new();
        let top = doc.root_id();
        let list = doc.append_element(top, "list");
        doc.append_element(list, "item");
        doc.append_element(list, "item");
        doc.append_element(list, "single");
        doc.append_attribute(list, "k", "1");
        doc.append_attribute(list, "k", "2");

        let resolver = Resolver::new(Options::default().with_duplicates(DuplicatePolicy::Reject));
        let start = doc.node(list);
        let failure = resolver
            .try_get(start, "item", ExtractMode::Node)
            .unwrap_err();
        assert_eq!(
            failure.miss,
            Miss::Ambiguous {
                name: "item".to_string()
            }
        );
        assert!(resolver.getattr(start, ":k").is_none());
        assert!(resolver.getnode(start, "single").is_some());
    }

    #[test]
    fn test_reference_style_lookups() {
        let (doc, root, _, b) = sample();
        let start = doc.node(root);

        assert_eq!(getnode_or(start, "a/b", RaiseNotFound).unwrap(), doc.node(b));
        assert_eq!(getattr_or(start, "a:alt", RaiseNotFound).unwrap().value(), "1");

        let err = getnode_or(start, "a/x", RaiseNotFound).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @"failed to find entity `a/x` from `/root`: no child named `x` (stopped at `/root/a`)"
        );

        let err = getattr_or(start, "a/b", RaiseNotFound).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_get_or_with_custom_handler() {
        #[derive(Debug, PartialEq)]
        struct Missing(String);

        struct Collect;
        impl<'a> NotFoundHandler<'a> for Collect {
            type Error = Missing;

            fn not_found(&self, failure: &NotFound<'a, '_>) -> Missing {
                Missing(format!("{}|{}", failure.at.name(), failure.remaining))
            }
        }

        let (doc, root, ..) = sample();
        let result = get_or(doc.node(root), "a/b/c", ExtractMode::Either, Collect);
        assert_eq!(result.unwrap_err(), Missing("b|c".to_string()));
    }

    #[test]
    fn test_detached_node_has_no_document_above() {
        let mut doc = Document::new();
        let loose = doc.create_element("loose");
        assert_eq!(getnode(doc.node(loose), "/"), Some(doc.node(loose)));
        assert!(getnode(doc.node(loose), "..").is_none());
    }
}
