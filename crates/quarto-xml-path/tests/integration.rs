//! Integration tests for quarto-xml-path.
//!
//! These tests run lookups, locate and value access over a parsed CSL style.
//! Test files are stored in test-data/ within this crate.

use quarto_xml_path::{
    DuplicatePolicy, Entity, ExtractMode, Options, Pattern, RaiseNotFound, Resolver, attributes,
    children, get, getattr, getnode, getnode_or, locate, parse, value_at, valuefb, valuex,
};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Get the test-data directory path.
fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test-data")
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quarto_xml_path=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_test_writer())
        .try_init();
}

fn minimal_style() -> quarto_xml_path::Document {
    let path = test_data_dir().join("minimal.csl");
    let content = fs::read_to_string(&path).expect("Failed to read minimal CSL");
    parse(&content).expect("Failed to parse minimal CSL")
}

#[test]
fn test_lookup_style_metadata() {
    init_tracing();
    let doc = minimal_style();
    let style = doc.root_element().unwrap();

    assert_eq!(value_at(style, ":version").unwrap(), "1.0");
    assert_eq!(value_at(style, ":class").unwrap(), "in-text");
    assert_eq!(value_at(style, "info/title").unwrap(), "Minimal Author-Date");
    assert_eq!(
        value_at(style, "info/category:citation-format").unwrap(),
        "author-date"
    );

    // The first of several links wins
    assert_eq!(value_at(style, "info/link:rel").unwrap(), "self");
}

#[test]
fn test_absolute_paths_from_deep_nodes() {
    let doc = minimal_style();
    let style = doc.root_element().unwrap();
    let name = getnode(style, "macro/names/name").unwrap();

    assert_eq!(getnode(name, "/style"), Some(style));
    assert_eq!(value_at(name, "/style/info/id").unwrap(), "http://example.org/styles/minimal");
    assert_eq!(value_at(name, "../../..:default-locale").unwrap(), "en-US");
}

#[test]
fn test_locate_round_trip_over_style() {
    let doc = minimal_style();
    let style = doc.root_element().unwrap();

    let layout = getnode(style, "citation/layout").unwrap();
    insta::assert_snapshot!(locate(layout), @"/style/citation/layout");

    let delimiter = getattr(layout, ":delimiter").unwrap();
    insta::assert_snapshot!(locate(delimiter), @"/style/citation/layout:delimiter");

    for entity in [Entity::Node(layout), Entity::Attribute(delimiter)] {
        let located = locate(entity);
        assert_eq!(get(doc.root(), &located, ExtractMode::Either), Some(entity));
        assert_eq!(get(style, &located, ExtractMode::Either), Some(entity));
    }
}

#[test]
fn test_iterate_layout_children() {
    let doc = minimal_style();
    let style = doc.root_element().unwrap();
    let group = getnode(style, "bibliography/layout/group").unwrap();

    let macros: Vec<&str> = children(group)
        .into_iter()
        .map(|text| text.first_attribute().map_or("", |a| a.value()))
        .collect();
    assert_eq!(macros, ["author", "issued", "title"]);

    let issued = children(group).into_iter().nth(1).unwrap();
    let reversed: Vec<&str> = attributes(issued).into_iter().rev().map(|a| a.name()).collect();
    assert_eq!(reversed, ["suffix", "prefix", "macro"]);

    // The same name resolves to the first sibling only
    assert_ne!(getnode(issued, "../text"), Some(issued));
}

#[test]
fn test_checked_values() {
    let doc = minimal_style();
    let style = doc.root_element().unwrap();
    let date = Pattern::new(r"\d{4}-\d{2}-\d{2}T.*").unwrap();

    assert_eq!(
        valuex(style, "info/updated", &date).unwrap(),
        "2024-01-15T00:00:00+00:00"
    );

    let err = valuex(style, "citation:et-al-min", &date).unwrap_err();
    assert!(err.is_no_match());
    insta::assert_snapshot!(
        err.to_string(),
        @r#"value "3" of `/style/citation:et-al-min` does not match the expected pattern"#
    );

    assert_eq!(valuefb(style, "citation:et-al-use-last", "false"), "false");
}

#[test]
fn test_missing_section_error() {
    init_tracing();
    let doc = minimal_style();
    let style = doc.root_element().unwrap();

    let err = getnode_or(style, "locale/terms", RaiseNotFound).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"failed to find entity `locale/terms` from `/style`: no child named `locale` (stopped at `/style`)"
    );
}

#[test]
fn test_reject_duplicates_from_config() {
    let doc = minimal_style();
    let style = doc.root_element().unwrap();

    let options: Options = serde_json::from_str(r#"{ "duplicates": "reject" }"#).unwrap();
    assert_eq!(options.duplicates, DuplicatePolicy::Reject);
    let strict = Resolver::new(options);

    assert!(strict.getnode(style, "macro").is_none());
    assert!(strict.getnode(style, "info/link").is_none());
    assert_eq!(strict.value_at(style, "info/title").unwrap(), "Minimal Author-Date");
    assert!(Resolver::default().getnode(style, "macro").is_some());
}
