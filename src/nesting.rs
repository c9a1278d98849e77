//! Deep nesting of flat field definitions
//!
//! Field definitions name their position with a dotted path
//! (`dns.answers.name`). [`nest_fields`] turns a flat list of them into a
//! tree, creating `object` nodes for every ancestor that is not declared
//! explicitly. [`deep_nesting_representation`] does the same for whole
//! schemas and splits their schema-level metadata off into
//! [`SchemaDetails`].

use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::reader::RawSchemas;
use crate::tree::{value_kind, CanonicalTree, FieldMap, FieldNode, SchemaDetails};

/// Keys that only make sense on a schema root.
pub const SCHEMA_KEYS: [&str; 6] = ["root", "group", "reusable", "title", "settings", "aliases"];

/// Ancestor types that mark an explicitly declared container.
const CONTAINER_TYPES: [&str; 2] = ["object", "nested"];

fn key(name: &str) -> Value {
    Value::String(name.to_string())
}

fn set_default(details: &mut Mapping, name: &str, value: Value) {
    if !details.contains_key(name) {
        details.insert(key(name), value);
    }
}

/// Nest a flat list of dotted field definitions.
///
/// The leaf node of each definition receives the whole definition as its
/// `field_details`, plus `node_name`. Ancestors that were not declared with
/// type `object` or `nested` are stamped as intermediate objects, first writer
/// wins.
pub fn nest_fields(definitions: &[Value]) -> Result<FieldMap> {
    let mut root = FieldMap::new();
    for definition in definitions {
        let Value::Mapping(details) = definition else {
            return Err(Error::shape(
                "fields",
                format!(
                    "expected a field definition mapping, found {}",
                    value_kind(definition)
                ),
            ));
        };
        let name = details
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::shape("fields", "field definition needs a string 'name'"))?;

        let segments: Vec<&str> = name.split('.').collect();
        let Some((leaf, parents)) = segments.split_last() else {
            continue;
        };

        let mut cursor = &mut root;
        for (idx, level) in parents.iter().enumerate() {
            let node = cursor.entry(level.to_string()).or_default();
            stamp_ancestor(&mut node.field_details, level, &parents[..=idx].join("."));
            cursor = &mut node.fields;
        }

        let mut details = details.clone();
        details.insert(key("node_name"), key(leaf));
        cursor.entry(leaf.to_string()).or_default().field_details = details;
    }
    Ok(root)
}

fn stamp_ancestor(details: &mut Mapping, level: &str, dotted: &str) {
    details.insert(key("node_name"), key(level));
    let declared = details
        .get("type")
        .and_then(Value::as_str)
        .is_some_and(|kind| CONTAINER_TYPES.contains(&kind));
    if declared {
        set_default(details, "intermediate", Value::Bool(false));
    } else {
        set_default(details, "type", key("object"));
        set_default(details, "name", key(dotted));
        set_default(details, "intermediate", Value::Bool(true));
    }
}

/// Split a raw schema record into schema-level keys and everything else.
///
/// Returns two new mappings; the record itself is left untouched.
pub fn partition_schema_keys(record: &Mapping) -> (Mapping, Mapping) {
    let mut schema_keys = Mapping::new();
    let mut rest = Mapping::new();
    for (name, value) in record {
        if name.as_str().is_some_and(|name| SCHEMA_KEYS.contains(&name)) {
            schema_keys.insert(name.clone(), value.clone());
        } else {
            rest.insert(name.clone(), value.clone());
        }
    }
    (schema_keys, rest)
}

/// Build the canonical tree for a set of raw schemas.
///
/// Every schema lands under its name; each of its `aliases` is registered as
/// an alias resolving to the same node.
pub fn deep_nesting_representation(schemas: &RawSchemas) -> Result<CanonicalTree> {
    let mut tree = CanonicalTree::new();
    for (name, record) in schemas {
        let node = assemble_schema(name, record)?;
        let aliases = node
            .schema_details
            .as_ref()
            .and_then(|details| details.aliases.clone())
            .unwrap_or_default();
        tree.insert_node(name.clone(), node);
        for alias in aliases {
            tree.insert_alias(alias, name.clone());
        }
    }
    Ok(tree)
}

fn assemble_schema(name: &str, record: &Mapping) -> Result<FieldNode> {
    let (schema_keys, rest) = partition_schema_keys(record);

    let mut field_details = Mapping::new();
    let mut definitions = None;
    for (attribute, value) in rest {
        if attribute.as_str() == Some("fields") {
            definitions = Some(value);
        } else {
            field_details.insert(attribute, value);
        }
    }
    field_details.insert(key("node_name"), key(name));

    let fields = match definitions {
        None | Some(Value::Null) => FieldMap::new(),
        Some(Value::Sequence(definitions)) => nest_fields(&definitions)?,
        Some(other) => {
            return Err(Error::shape(
                format!("{}.fields", name),
                format!("expected a list of fields, found {}", value_kind(&other)),
            ))
        }
    };

    let schema_details: SchemaDetails = serde_yaml::from_value(Value::Mapping(schema_keys))
        .map_err(|err| Error::SchemaDetails {
            schema: name.to_string(),
            message: err.to_string(),
        })?;

    Ok(FieldNode {
        schema_details: Some(schema_details),
        field_details,
        fields,
    })
}
