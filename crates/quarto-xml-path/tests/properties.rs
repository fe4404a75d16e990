//! Behavioural properties of resolution, locate, value access and iteration.

use quarto_xml_path::{
    Cursor, Document, DuplicatePolicy, Entity, ExtractMode, Node, Options, Resolver, attributes,
    children, get, getattr, getnode, locate, locate_with, parse, value_at, valuefb,
    valuefb_checked,
};
use quarto_xml_tree::NodeId;

/// document -> root -> a[alt="1"] -> b("txt")
fn end_to_end() -> (Document, NodeId) {
    let mut doc = Document::new();
    let top = doc.root_id();
    let root = doc.append_element(top, "root");
    let a = doc.append_element(root, "a");
    doc.append_attribute(a, "alt", "1");
    let b = doc.append_element(a, "b");
    doc.set_value(b, "txt");
    (doc, root)
}

/// Every node and attribute under `node`, depth first.
fn entities(node: Node<'_>) -> Vec<Entity<'_>> {
    let mut found = vec![Entity::Node(node)];
    found.extend(attributes(node).into_iter().map(Entity::Attribute));
    for child in children(node) {
        found.extend(entities(child));
    }
    found
}

#[test]
fn test_end_to_end_tree() {
    let (doc, root) = end_to_end();
    let root = doc.node(root);

    assert_eq!(get(root, "a:alt", ExtractMode::Either).map(|e| e.value()), Some("1"));

    let b = getnode(root, "a/b").unwrap();
    assert_eq!(b.value(), "txt");
    assert_eq!(locate(b), "/root/a/b");
    assert_eq!(valuefb(root, "a/missing", "dflt"), "dflt");
}

#[test]
fn test_located_paths_resolve_back() {
    let doc = parse(
        r#"<style version="1.0">
             <info><title>T</title><id>x</id></info>
             <macro name="m"><text variable="title" font-style="italic"/></macro>
           </style>"#,
    )
    .unwrap();

    let all = entities(doc.root());
    assert_eq!(all.len(), 11);
    for entity in all {
        let located = locate(entity);
        assert_eq!(
            get(doc.root(), &located, ExtractMode::Either),
            Some(entity),
            "{located}"
        );
    }
}

#[test]
fn test_heuristic_only_misfires_at_document_node() {
    let (doc, root) = end_to_end();
    let options = Options::default().with_kind_heuristic(true);

    for entity in entities(doc.node(root)) {
        assert_eq!(locate_with(entity, &options), locate(entity));
    }
    assert_eq!(locate_with(doc.root(), &options), ":");
    assert_eq!(locate(doc.root()), "/");
}

#[test]
fn test_empty_and_slash_paths_return_root() {
    let (doc, _) = end_to_end();
    assert_eq!(getnode(doc.root(), ""), Some(doc.root()));
    assert_eq!(getnode(doc.root(), "/"), Some(doc.root()));
}

#[test]
fn test_attribute_clause_ignores_children_of_the_same_name() {
    // a -> b[c="attr"] -> c("child")
    let mut doc = Document::new();
    let top = doc.root_id();
    let a = doc.append_element(top, "a");
    let b = doc.append_element(a, "b");
    doc.append_attribute(b, "c", "attr");
    let c = doc.append_element(b, "c");
    doc.set_value(c, "child");

    let a_node = doc.node(a);
    assert_eq!(value_at(a_node, "b:c").unwrap(), "attr");
    assert_eq!(value_at(a_node, "b/c").unwrap(), "child");

    // b2 has the child but no attribute
    let b2 = doc.append_element(a, "b2");
    doc.append_element(b2, "c");
    let a_node = doc.node(a);
    assert!(getattr(a_node, "b2:c").is_none());
    assert!(getnode(a_node, "b2/c").is_some());
}

#[test]
fn test_child_then_parent_returns_start() {
    let (doc, root) = end_to_end();
    let root = doc.node(root);
    assert_eq!(getnode(root, "a/.."), Some(root));
    let a = getnode(root, "a").unwrap();
    assert_eq!(getnode(a, "b/.."), Some(a));
}

#[test]
fn test_parent_above_top_fails() {
    let (doc, root) = end_to_end();
    assert!(getnode(doc.root(), "/..").is_none());
    assert!(getnode(doc.node(root), "a/../../..").is_none());

    let mut loose = Document::new();
    let node = loose.create_element("node");
    loose.append_element(node, "a");
    assert!(getnode(loose.node(node), "a/../..").is_none());
}

#[test]
fn test_valuefb_equals_fallback_exactly_on_failure() {
    let (doc, root) = end_to_end();
    let root = doc.node(root);

    let cases = [
        ("a/b", "fb", "[a-z]+", "txt"),
        ("a/b", "fb", "[0-9]+", "fb"),
        ("a:alt", "fb", "[0-9]", "1"),
        ("a:gone", "fb", ".*", "fb"),
        ("a/b/c", "fb", ".*", "fb"),
    ];
    for (path, fallback, pattern, expected) in cases {
        assert_eq!(valuefb_checked(root, path, fallback, pattern), expected, "{path}");
    }
    assert_eq!(valuefb(root, "a/b", "fb"), "txt");
}

#[test]
fn test_cursors_visit_children_in_both_directions() {
    let doc = parse("<list><i1/><i2/><i3/><i4/></list>").unwrap();
    let list = doc.root_element().unwrap();
    let range = children(list);

    let mut forward = Vec::new();
    let mut cursor = range.begin();
    while cursor != range.end() {
        forward.extend(cursor.get().map(|n| n.name()));
        cursor.advance();
    }
    assert_eq!(forward, ["i1", "i2", "i3", "i4"]);

    let mut backward = Vec::new();
    let mut cursor: Cursor<'_, Node<'_>> = range.end();
    while cursor != range.begin() {
        cursor.retreat();
        backward.extend(cursor.get().map(|n| n.name()));
    }
    assert_eq!(backward, ["i4", "i3", "i2", "i1"]);
}

#[test]
fn test_reject_policy_is_opt_in() {
    let doc = parse("<list><item>1</item><item>2</item></list>").unwrap();
    let list = doc.root_element().unwrap();

    assert_eq!(value_at(list, "item").unwrap(), "1");
    let strict = Resolver::new(Options::default().with_duplicates(DuplicatePolicy::Reject));
    assert!(strict.value_at(list, "item").unwrap_err().is_not_found());
}
