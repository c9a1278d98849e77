//! Property-based tests for nesting and merging.
//!
//! These tests use proptest to generate random field paths and schema sets
//! and verify that invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::merge::{dedup_and_merge_lists, merge_trees};
    use crate::nesting::{deep_nesting_representation, nest_fields};
    use crate::reader::RawSchemas;
    use crate::tree::{CanonicalTree, FieldNode};
    use proptest::prelude::*;
    use serde_yaml::{Mapping, Value};

    fn segment() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,5}"
    }

    fn dotted_path() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(segment(), 1..5)
    }

    fn definition(name: &str, kind: &str) -> Value {
        let mut mapping = Mapping::new();
        mapping.insert("name".into(), name.into());
        mapping.insert("type".into(), kind.into());
        Value::Mapping(mapping)
    }

    fn named(name: &str) -> Value {
        let mut mapping = Mapping::new();
        mapping.insert("name".into(), name.into());
        Value::Mapping(mapping)
    }

    fn schema_set(names: &[String]) -> RawSchemas {
        names
            .iter()
            .map(|name| {
                let mut record = Mapping::new();
                record.insert("name".into(), name.as_str().into());
                record.insert(
                    "fields".into(),
                    Value::Sequence(vec![definition(&format!("{}.id", name), "keyword")]),
                );
                (name.clone(), record)
            })
            .collect()
    }

    // ============================================================================
    // nest_fields property tests
    // ============================================================================

    proptest! {
        /// Property: the leaf of a dotted path keeps the whole definition
        #[test]
        fn leaf_keeps_definition(segments in dotted_path()) {
            let dotted = segments.join(".");
            let fields = nest_fields(&[definition(&dotted, "keyword")]).unwrap();

            let first = &fields[segments[0].as_str()];
            let leaf = if segments.len() == 1 {
                first
            } else {
                first.descendant(&segments[1..].join(".")).unwrap()
            };
            prop_assert_eq!(leaf.detail_str("name"), Some(dotted.as_str()));
            prop_assert_eq!(leaf.detail_str("node_name"), segments.last().map(String::as_str));
            prop_assert_eq!(leaf.detail_str("type"), Some("keyword"));
            prop_assert!(leaf.fields.is_empty());
        }

        /// Property: every undeclared ancestor is an intermediate object named by its prefix
        #[test]
        fn ancestors_are_intermediate_objects(segments in dotted_path()) {
            let fields = nest_fields(&[definition(&segments.join("."), "long")]).unwrap();

            let mut node: Option<&FieldNode> = None;
            for depth in 0..segments.len() - 1 {
                let current = match node {
                    None => &fields[segments[0].as_str()],
                    Some(parent) => &parent.fields[segments[depth].as_str()],
                };
                let prefix = segments[..=depth].join(".");
                prop_assert_eq!(current.detail_str("type"), Some("object"));
                prop_assert_eq!(current.detail_str("name"), Some(prefix.as_str()));
                prop_assert_eq!(current.detail_str("node_name"), Some(segments[depth].as_str()));
                prop_assert_eq!(current.field_details.get("intermediate"), Some(&Value::Bool(true)));
                node = Some(current);
            }
        }

        /// Property: nesting is deterministic
        #[test]
        fn nesting_is_deterministic(paths in prop::collection::vec(dotted_path(), 0..8)) {
            let definitions: Vec<Value> = paths
                .iter()
                .map(|segments| definition(&segments.join("."), "keyword"))
                .collect();
            prop_assert_eq!(nest_fields(&definitions).unwrap(), nest_fields(&definitions).unwrap());
        }
    }

    // ============================================================================
    // merge property tests
    // ============================================================================

    proptest! {
        /// Property: merging with an empty tree changes nothing, on either side
        #[test]
        fn empty_tree_is_merge_identity(names in prop::collection::btree_set(segment(), 0..6)) {
            let names: Vec<String> = names.into_iter().collect();
            let tree = deep_nesting_representation(&schema_set(&names)).unwrap();
            let empty = CanonicalTree::new();

            prop_assert_eq!(&merge_trees(&tree, &empty).unwrap(), &tree);
            prop_assert_eq!(&merge_trees(&empty, &tree).unwrap(), &tree);
        }

        /// Property: merged multi_fields are sorted by name and unique
        #[test]
        fn multi_fields_sorted_and_unique(
            base in prop::collection::vec(segment(), 0..6),
            overlay in prop::collection::vec(segment(), 0..6),
        ) {
            let base_entries: Vec<Value> = base.iter().map(|name| named(name)).collect();
            let overlay_entries: Vec<Value> = overlay.iter().map(|name| named(name)).collect();

            let merged = dedup_and_merge_lists(base_entries, overlay_entries, "field").unwrap();
            let names: Vec<&str> = merged
                .iter()
                .map(|entry| entry["name"].as_str().unwrap())
                .collect();

            let mut expected: Vec<&str> = base.iter().chain(overlay.iter()).map(String::as_str).collect();
            expected.sort_unstable();
            expected.dedup();
            prop_assert_eq!(names, expected);
        }
    }
}
