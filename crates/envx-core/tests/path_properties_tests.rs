#![allow(clippy::unwrap_used, clippy::expect_used)]

use envx_core::path::{resolve, PathSegment, PropertyPath};
use envx_core::value::Value;
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = PathSegment> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}".prop_map(PathSegment::Key),
        "[a-z.\\[\\] \"\\\\-]{1,8}".prop_map(PathSegment::Key),
        (0usize..1000).prop_map(PathSegment::Index),
    ]
}

fn path() -> impl Strategy<Value = PropertyPath> {
    prop::collection::vec(segment(), 0..6).prop_map(|segments| segments.into_iter().collect())
}

/// Build a tree in which `path` leads to `leaf`
fn tree_along(path: &PropertyPath, leaf: Value) -> Value {
    path.segments().iter().rev().fold(leaf, |child, segment| match segment {
        PathSegment::Key(key) => Value::object([(key.clone(), child)]),
        PathSegment::Index(index) => {
            let mut items = vec![Value::null(); *index];
            items.push(child);
            Value::array(items)
        }
    })
}

proptest! {
    #[test]
    fn display_then_parse_is_identity(path in path()) {
        let reparsed = PropertyPath::parse(&path.to_string()).unwrap();
        prop_assert_eq!(reparsed, path);
    }

    #[test]
    fn resolve_finds_leaf_built_along_path(path in path(), leaf in "[a-z]{0,12}") {
        let leaf = Value::string(leaf);
        let tree = tree_along(&path, leaf.clone());
        let (found, hit) = resolve(&tree, &path);
        prop_assert!(hit);
        prop_assert_eq!(found, leaf);
    }

    #[test]
    fn resolve_miss_is_canonical_undefined(path in path(), extra in "[a-z]{1,6}") {
        let tree = tree_along(&path, Value::number(1));
        let longer = path.clone().push(PathSegment::Key(extra));
        let (found, hit) = resolve(&tree, &longer);
        prop_assert!(!hit);
        prop_assert!(found.is_undefined());
    }

    #[test]
    fn parse_never_panics(text in "\\PC{0,24}") {
        let _ = PropertyPath::parse(&text);
    }
}
