//! # Canonical Tree Model
//!
//! The loader turns flat dotted field definitions into a tree of
//! [`FieldNode`]s. Each node has up to three parts:
//!
//! ```yaml
//! dns:
//!   schema_details:      # only on schema roots
//!     reusable: ...
//!   field_details:       # attributes of the node itself
//!     type: ...
//!   fields:              # children keyed by node name
//!     answers:
//!       field_details: { ... }
//!       fields:
//!         name:
//!           field_details: { ... }
//! ```
//!
//! Leaf fields only populate `field_details`. Intermediate fields populate
//! `fields`, and sometimes `field_details` too (`dns.answers` for example).
//!
//! A [`CanonicalTree`] maps schema names to nodes. Aliases are stored as an
//! explicit [`TreeEntry::Alias`] pointing at the owning key, so every alias
//! resolves to the very same node as its schema.

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_yaml::{Mapping, Value};

/// Attributes of a single node other than its children.
pub type FieldDetails = Mapping;

/// Children of a node, in first-insertion order.
pub type FieldMap = IndexMap<String, FieldNode>;

/// Placement rules for a schema that can be nested under other schemas.
///
/// Keys other than the three reconciled on merge are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reusable {
    /// Whether the schema also appears at the top level of the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_level: Option<bool>,
    /// Relative order in which reusable schemas are nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    /// Locations the schema is expected to be nested at.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Mapping,
}

/// Metadata attached only to the root node of a schema.
///
/// Absent keys stay absent; nothing here is defaulted at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reusable: Option<Reusable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Custom settings fields, in canonical (nested) form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<FieldMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

/// One node of the canonical tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_details: Option<SchemaDetails>,
    #[serde(default)]
    pub field_details: FieldDetails,
    #[serde(default)]
    pub fields: FieldMap,
}

impl FieldNode {
    /// Look up a string attribute in `field_details`.
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.field_details.get(key).and_then(Value::as_str)
    }

    /// Follow a dotted path (`answers.name`) through nested `fields`.
    pub fn descendant(&self, dotted: &str) -> Option<&FieldNode> {
        dotted
            .split('.')
            .try_fold(self, |node, segment| node.fields.get(segment))
    }
}

/// An entry of a [`CanonicalTree`].
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEntry {
    /// A schema owned under this key.
    Node(FieldNode),
    /// Another name for the schema owned under the given key.
    Alias(String),
}

/// Schema name (or alias) to node mapping, in first-insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanonicalTree {
    entries: IndexMap<String, TreeEntry>,
}

impl CanonicalTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys, aliases included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Store a node under `name`, replacing whatever was there.
    pub fn insert_node(&mut self, name: impl Into<String>, node: FieldNode) -> Option<TreeEntry> {
        self.entries.insert(name.into(), TreeEntry::Node(node))
    }

    /// Register `alias` as another name for `target`.
    ///
    /// A target that is itself an alias is followed, so alias entries always
    /// point at an owning key.
    pub fn insert_alias(&mut self, alias: impl Into<String>, target: impl Into<String>) {
        let target = target.into();
        let target = match self.entries.get(&target) {
            Some(TreeEntry::Alias(owner)) => owner.clone(),
            _ => target,
        };
        self.entries.insert(alias.into(), TreeEntry::Alias(target));
    }

    /// Raw entry for `key`, without alias resolution.
    pub fn entry(&self, key: &str) -> Option<&TreeEntry> {
        self.entries.get(key)
    }

    /// The key that owns the node reachable under `key`.
    pub fn resolve<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        match self.entries.get(key)? {
            TreeEntry::Node(_) => Some(key),
            TreeEntry::Alias(owner) => match self.entries.get(owner.as_str())? {
                TreeEntry::Node(_) => Some(owner.as_str()),
                TreeEntry::Alias(_) => None,
            },
        }
    }

    /// The node reachable under `key`, following aliases.
    pub fn get(&self, key: &str) -> Option<&FieldNode> {
        match self.entries.get(self.resolve(key)?)? {
            TreeEntry::Node(node) => Some(node),
            TreeEntry::Alias(_) => None,
        }
    }

    /// Mutable access to the node reachable under `key`, following aliases.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut FieldNode> {
        let owner = self.resolve(key)?.to_string();
        match self.entries.get_mut(&owner)? {
            TreeEntry::Node(node) => Some(node),
            TreeEntry::Alias(_) => None,
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// True when `key` owns a node (as opposed to being an alias).
    pub fn owns(&self, key: &str) -> bool {
        matches!(self.entries.get(key), Some(TreeEntry::Node(_)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &TreeEntry)> {
        self.entries.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Every key with the node it resolves to. Dangling aliases are skipped.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldNode)> {
        self.keys()
            .filter_map(move |key| self.get(key).map(|node| (key, node)))
    }

    /// Owned schemas only, without alias keys.
    pub fn schemas(&self) -> impl Iterator<Item = (&str, &FieldNode)> {
        self.entries.iter().filter_map(|(key, entry)| match entry {
            TreeEntry::Node(node) => Some((key.as_str(), node)),
            TreeEntry::Alias(_) => None,
        })
    }

    /// Alias keys that resolve to `name`.
    pub fn aliases_of(&self, name: &str) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|(key, entry)| match entry {
                TreeEntry::Alias(owner) if owner == name => Some(key.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Serialized as a plain mapping; alias keys repeat their schema's node.
impl Serialize for CanonicalTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, node) in self.iter() {
            map.serialize_entry(key, node)?;
        }
        map.end()
    }
}

/// Human-readable type name of a YAML value, for diagnostics.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Sequence(_) => "Sequence",
        Value::Mapping(_) => "Mapping",
        Value::Tagged(_) => "Tagged",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(kind: &str) -> FieldNode {
        let mut node = FieldNode::default();
        node.field_details
            .insert(Value::String("type".into()), Value::String(kind.into()));
        node
    }

    #[test]
    fn test_alias_resolves_to_same_node() {
        let mut tree = CanonicalTree::new();
        tree.insert_node("base", leaf("keyword"));
        tree.insert_alias("x", "base");

        let base = tree.get("base").unwrap();
        let alias = tree.get("x").unwrap();
        assert!(std::ptr::eq(base, alias));
        assert_eq!(tree.resolve("x"), Some("base"));
        assert_eq!(tree.aliases_of("base"), vec!["x"]);
    }

    #[test]
    fn test_alias_of_alias_points_at_owner() {
        let mut tree = CanonicalTree::new();
        tree.insert_node("base", leaf("keyword"));
        tree.insert_alias("x", "base");
        tree.insert_alias("y", "x");

        assert_eq!(tree.entry("y"), Some(&TreeEntry::Alias("base".into())));
    }

    #[test]
    fn test_mutation_through_alias_is_visible_under_owner() {
        let mut tree = CanonicalTree::new();
        tree.insert_node("base", leaf("keyword"));
        tree.insert_alias("x", "base");

        tree.get_mut("x").unwrap().field_details.insert(
            Value::String("type".into()),
            Value::String("date".into()),
        );
        assert_eq!(tree.get("base").unwrap().detail_str("type"), Some("date"));
    }

    #[test]
    fn test_dangling_alias_is_skipped() {
        let mut tree = CanonicalTree::new();
        tree.insert_alias("ghost", "missing");
        assert!(tree.get("ghost").is_none());
        assert_eq!(tree.iter().count(), 0);
        assert!(tree.contains_key("ghost"));
        assert!(!tree.owns("ghost"));
    }

    #[test]
    fn test_serialize_repeats_node_under_alias() {
        let mut tree = CanonicalTree::new();
        tree.insert_node("base", leaf("keyword"));
        tree.insert_alias("x", "base");

        let rendered: Value = serde_yaml::to_value(&tree).unwrap();
        assert_eq!(rendered["base"], rendered["x"]);
        assert_eq!(
            rendered["x"]["field_details"]["type"],
            Value::String("keyword".into())
        );
    }

    #[test]
    fn test_descendant_follows_dotted_path() {
        let mut child = FieldNode::default();
        child.fields.insert("c".into(), leaf("keyword"));
        let mut root = FieldNode::default();
        root.fields.insert("b".into(), child);

        assert_eq!(
            root.descendant("b.c").unwrap().detail_str("type"),
            Some("keyword")
        );
        assert!(root.descendant("b.missing").is_none());
    }

    #[test]
    fn test_schema_details_reject_unknown_keys() {
        let yaml = "title: Geo\nunexpected: 1\n";
        assert!(serde_yaml::from_str::<SchemaDetails>(yaml).is_err());
    }

    #[test]
    fn test_reusable_keeps_unknown_keys() {
        let yaml = "reusable:\n  top_level: false\n  note: nested only\n";
        let details: SchemaDetails = serde_yaml::from_str(yaml).unwrap();
        let reusable = details.reusable.unwrap();
        assert_eq!(reusable.top_level, Some(false));
        assert_eq!(reusable.extra["note"], Value::String("nested only".into()));

        let rendered = serde_yaml::to_value(&reusable).unwrap();
        assert_eq!(rendered["note"], Value::String("nested only".into()));
    }

    #[test]
    fn test_reusable_without_expected_stays_absent() {
        let details: SchemaDetails =
            serde_yaml::from_str("reusable:\n  top_level: true\n").unwrap();
        let reusable = details.reusable.unwrap();
        assert!(reusable.expected.is_none());

        let rendered = serde_yaml::to_value(&reusable).unwrap();
        assert_eq!(rendered, serde_yaml::from_str::<Value>("{top_level: true}").unwrap());
    }

    #[test]
    fn test_value_kind_all_types() {
        assert_eq!(value_kind(&Value::Null), "Null");
        assert_eq!(value_kind(&Value::Bool(true)), "Bool");
        assert_eq!(value_kind(&Value::Number(42.into())), "Number");
        assert_eq!(value_kind(&Value::String("test".into())), "String");
        assert_eq!(value_kind(&Value::Sequence(vec![])), "Sequence");
        assert_eq!(value_kind(&Value::Mapping(Mapping::new())), "Mapping");
    }
}
