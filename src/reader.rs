//! Reading raw schema records
//!
//! Raw schema files are a list of schema records, usually one per file:
//!
//! ```yaml
//! - name: base
//!   title: Base
//!   root: true
//!   fields:
//!     - name: "@timestamp"
//!       type: date
//! ```
//!
//! This module keys those records by their `name`. Records for the same
//! schema coming from several files are deep-merged, with the later file
//! overriding scalar and list values of the earlier one.

use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::tree::value_kind;

/// Raw schema records keyed by schema name, in first-seen order.
pub type RawSchemas = IndexMap<String, Mapping>;

/// Key a list of raw schema records by their `name`.
///
/// `source` names the file the records came from and is reported when a
/// record lacks its name.
pub fn nest_schema(records: Vec<Value>, source: &str) -> Result<RawSchemas> {
    let mut schemas = RawSchemas::new();
    for record in records {
        let Value::Mapping(record) = record else {
            return Err(Error::shape(
                source,
                format!("expected a schema mapping, found {}", value_kind(&record)),
            ));
        };
        let name = match record.get("name") {
            None => {
                return Err(Error::MissingName {
                    source_name: source.to_string(),
                })
            }
            Some(Value::String(name)) => name.clone(),
            Some(other) => {
                return Err(Error::shape(
                    source,
                    format!("schema 'name' must be a string, found {}", value_kind(other)),
                ))
            }
        };
        schemas.insert(name, record);
    }
    Ok(schemas)
}

/// Parse the YAML text of one schema file and key its records by name.
pub fn read_schema_str(content: &str, source: &str) -> Result<RawSchemas> {
    if content.trim().is_empty() {
        return Ok(RawSchemas::new());
    }
    match serde_yaml::from_str::<Value>(content)? {
        Value::Null => Ok(RawSchemas::new()),
        Value::Sequence(records) => nest_schema(records, source),
        other => Err(Error::shape(
            source,
            format!("expected a list of schemas, found {}", value_kind(&other)),
        )),
    }
}

/// Read a raw schema file into a map keyed by schema name.
pub fn read_schema_file(path: &Path) -> Result<RawSchemas> {
    let content = std::fs::read_to_string(path)?;
    read_schema_str(&content, &path.display().to_string())
}

/// Combine raw schemas from two sources, `later` on top of `earlier`.
///
/// Schemas only present on one side are kept as they are. Records of the same
/// schema are deep-merged with [`merge_raw_values`].
pub fn merge_raw_schemas(earlier: RawSchemas, later: RawSchemas, later_source: &str) -> RawSchemas {
    let mut merged = earlier;
    for (name, record) in later {
        match merged.get_mut(&name) {
            Some(existing) => merge_raw_mappings(existing, record, &name, later_source),
            None => {
                merged.insert(name, record);
            }
        }
    }
    merged
}

/// Structural deep-merge of two raw YAML values.
///
/// Mappings combine key by key; any other value from `source` replaces the
/// one in `target`.
pub fn merge_raw_values(target: &mut Value, source: Value, path: &str, src_file: &str) {
    match (target, source) {
        (Value::Mapping(target_map), Value::Mapping(source_map)) => {
            merge_raw_mappings(target_map, source_map, path, src_file);
        }
        (target, source) => {
            debug!(
                "{}: Overriding value at path '{}': {} -> {}",
                src_file,
                path,
                value_kind(target),
                value_kind(&source)
            );
            *target = source;
        }
    }
}

fn merge_raw_mappings(target: &mut Mapping, source: Mapping, path: &str, src_file: &str) {
    for (key, value) in source {
        let key_str = match &key {
            Value::String(s) => s.clone(),
            other => format!("{:?}", other),
        };
        let new_path = if path.is_empty() {
            key_str
        } else {
            format!("{}.{}", path, key_str)
        };

        match target.get_mut(&key) {
            Some(existing) => merge_raw_values(existing, value, &new_path, src_file),
            None => {
                target.insert(key, value);
            }
        }
    }
}
