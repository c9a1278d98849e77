//! Merging canonical trees
//!
//! [`merge_trees`] layers one canonical tree on top of another, for example a
//! set of custom fields on top of the base schemas. The overlay wins on plain
//! attributes, but a few attributes are combined instead of overwritten:
//!
//! - `normalize` lists are concatenated.
//! - `multi_fields` are deduplicated by `name` and sorted.
//! - `reusable.expected` lists are concatenated.
//! - `settings` and child `fields` are merged recursively.
//!
//! Both inputs are borrowed and the result is built from owned copies, so a
//! merge never affects the trees it was given.

use std::collections::BTreeMap;

use log::warn;
use serde_yaml::{Mapping, Value};

use crate::error::{Error, Result};
use crate::tree::{
    value_kind, CanonicalTree, FieldDetails, FieldMap, FieldNode, Reusable, SchemaDetails,
    TreeEntry,
};

/// Merge `overlay` on top of `base`.
///
/// Keys only present in `overlay` are inserted as they are. A key that is an
/// alias in `base` merges into the schema the alias resolves to. An overlay
/// alias whose key already exists in `base` merges the overlay schema it
/// names into whatever that key resolves to in `base`.
pub fn merge_trees(base: &CanonicalTree, overlay: &CanonicalTree) -> Result<CanonicalTree> {
    let mut merged = base.clone();
    for (key, entry) in overlay.entries() {
        match entry {
            TreeEntry::Node(node) => match merged.get_mut(key) {
                Some(existing) => merge_node(existing, node.clone(), key)?,
                None => {
                    merged.insert_node(key, node.clone());
                }
            },
            TreeEntry::Alias(target) => {
                if !merged.contains_key(key) {
                    merged.insert_alias(key, target.clone());
                    continue;
                }
                // Already merged through the owner when both keys meet there.
                if merged.resolve(key) == merged.resolve(target) {
                    continue;
                }
                let Some(node) = overlay.get(key) else {
                    warn!("Alias '{}' points to missing schema '{}', skipping", key, target);
                    continue;
                };
                if let Some(existing) = merged.get_mut(key) {
                    merge_node(existing, node.clone(), key)?;
                }
            }
        }
    }
    Ok(merged)
}

/// Merge two child maps (or two `settings` maps) with the node merge rules.
pub fn merge_fields(base: &FieldMap, overlay: &FieldMap) -> Result<FieldMap> {
    let mut merged = base.clone();
    merge_field_maps(&mut merged, overlay.clone(), "")?;
    Ok(merged)
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", parent, name)
    }
}

fn merge_field_maps(target: &mut FieldMap, overlay: FieldMap, parent: &str) -> Result<()> {
    for (name, node) in overlay {
        let path = child_path(parent, &name);
        match target.get_mut(&name) {
            Some(existing) => merge_node(existing, node, &path)?,
            None => {
                target.insert(name, node);
            }
        }
    }
    Ok(())
}

fn merge_node(target: &mut FieldNode, overlay: FieldNode, path: &str) -> Result<()> {
    let FieldNode {
        schema_details,
        field_details,
        fields,
    } = overlay;

    merge_field_details(&mut target.field_details, field_details, path)?;
    if let Some(details) = schema_details {
        let existing = target.schema_details.get_or_insert_with(SchemaDetails::default);
        merge_schema_details(existing, details, path)?;
    }
    merge_field_maps(&mut target.fields, fields, path)
}

fn merge_field_details(target: &mut FieldDetails, overlay: FieldDetails, path: &str) -> Result<()> {
    for (attribute, value) in overlay {
        match attribute.as_str() {
            Some("normalize") => append_normalize(target, value, path)?,
            Some("multi_fields") => merge_multi_fields(target, value, path)?,
            _ => {
                target.insert(attribute, value);
            }
        }
    }
    Ok(())
}

fn expect_list(value: Value, path: &str, attribute: &str) -> Result<Vec<Value>> {
    match value {
        Value::Sequence(items) => Ok(items),
        other => Err(Error::shape(
            path,
            format!("'{}' must be a list, found {}", attribute, value_kind(&other)),
        )),
    }
}

fn append_normalize(target: &mut Mapping, value: Value, path: &str) -> Result<()> {
    let extra = expect_list(value, path, "normalize")?;
    let existing = target
        .entry(Value::String("normalize".into()))
        .or_insert(Value::Sequence(Vec::new()));
    match existing {
        Value::Sequence(items) => {
            items.extend(extra);
            Ok(())
        }
        other => Err(Error::shape(
            path,
            format!("'normalize' must be a list, found {}", value_kind(other)),
        )),
    }
}

fn merge_multi_fields(target: &mut Mapping, value: Value, path: &str) -> Result<()> {
    let incoming = expect_list(value, path, "multi_fields")?;
    let current = match target.get("multi_fields") {
        Some(existing) => expect_list(existing.clone(), path, "multi_fields")?,
        None => Vec::new(),
    };
    let merged = dedup_and_merge_lists(current, incoming, path)?;
    target.insert(
        Value::String("multi_fields".into()),
        Value::Sequence(merged),
    );
    Ok(())
}

/// Merge two lists of `{name, ...}` mappings.
///
/// Entries of `overlay` replace same-named entries of `base`. Within one list
/// the last entry with a given name wins. The result is sorted by name.
pub fn dedup_and_merge_lists(base: Vec<Value>, overlay: Vec<Value>, path: &str) -> Result<Vec<Value>> {
    let mut by_name = BTreeMap::new();
    for entry in base.into_iter().chain(overlay) {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::shape(path, "every multi_fields entry needs a string 'name'"))?
            .to_string();
        by_name.insert(name, entry);
    }
    Ok(by_name.into_values().collect())
}

fn merge_schema_details(target: &mut SchemaDetails, overlay: SchemaDetails, path: &str) -> Result<()> {
    let SchemaDetails {
        root,
        group,
        reusable,
        title,
        settings,
        aliases,
    } = overlay;

    if let Some(reusable) = reusable {
        merge_reusable(target.reusable.get_or_insert_with(Reusable::default), reusable);
    }
    if let Some(settings) = settings {
        let existing = target.settings.get_or_insert_with(FieldMap::new);
        merge_field_maps(existing, settings, &child_path(path, "settings"))?;
    }
    if root.is_some() {
        target.root = root;
    }
    if group.is_some() {
        target.group = group;
    }
    if title.is_some() {
        target.title = title;
    }
    if aliases.is_some() {
        target.aliases = aliases;
    }
    Ok(())
}

fn merge_reusable(target: &mut Reusable, overlay: Reusable) {
    match overlay.top_level {
        Some(top_level) => target.top_level = Some(top_level),
        None => {
            target.top_level.get_or_insert(true);
        }
    }
    if overlay.order.is_some() {
        target.order = overlay.order;
    }
    if let Some(expected) = overlay.expected {
        target.expected.get_or_insert_with(Vec::new).extend(expected);
    }
    for (key, value) in overlay.extra {
        target.extra.insert(key, value);
    }
}
