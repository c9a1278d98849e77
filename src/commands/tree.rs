//! # Tree Command Implementation
//!
//! This module implements the `tree` subcommand, which displays the nested
//! field hierarchy of the loaded schemas.
//!
//! ## Functionality
//!
//! - **Field Hierarchy Visualization**: One branch per schema, one node per field
//! - **Depth Control**: Supports `--depth` flag to limit tree depth
//! - **Type Display**: Shows each field's `type` and marks intermediate objects
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::{anyhow, Result};
use clap::Args;
use ptree::{print_tree, TreeItem};
use serde_yaml::Value;

use schema_loader::tree::{CanonicalTree, FieldNode};

use super::SourceArgs;

/// Display the nested field hierarchy of the loaded schemas
#[derive(Args, Debug)]
pub struct TreeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Maximum depth to display in the tree.
    ///
    /// If not specified, displays the full tree.
    /// Use 0 to show only the schemas, 1 to show their top-level fields, etc.
    #[arg(long, value_name = "NUM")]
    pub depth: Option<usize>,

    /// Show only this schema (a schema name or one of its aliases).
    #[arg(short, long, value_name = "NAME")]
    pub schema: Option<String>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs) -> Result<()> {
    let tree = args.source.load()?;
    let root = build_root(&tree, args.schema.as_deref(), args.depth.unwrap_or(usize::MAX))?;
    print_tree(&root).map_err(|e| anyhow!("Failed to display tree: {}", e))?;
    Ok(())
}

fn build_root(tree: &CanonicalTree, schema: Option<&str>, max_depth: usize) -> Result<TreeNode> {
    let children = match schema {
        Some(name) => {
            let owner = tree
                .resolve(name)
                .ok_or_else(|| anyhow!("Schema '{}' not found", name))?;
            let node = tree
                .get(owner)
                .ok_or_else(|| anyhow!("Schema '{}' not found", name))?;
            vec![build_schema_node(tree, owner, node, max_depth)]
        }
        None => tree
            .schemas()
            .map(|(name, node)| build_schema_node(tree, name, node, max_depth))
            .collect(),
    };
    Ok(TreeNode {
        label: "schemas".to_string(),
        children,
    })
}

fn build_schema_node(tree: &CanonicalTree, name: &str, node: &FieldNode, max_depth: usize) -> TreeNode {
    let aliases = tree.aliases_of(name);
    let label = if aliases.is_empty() {
        name.to_string()
    } else {
        format!("{} (aliases: {})", name, aliases.join(", "))
    };
    TreeNode {
        label,
        children: build_children(node, max_depth, 0),
    }
}

/// Build a tree node for every child field of `node`.
fn build_children(node: &FieldNode, max_depth: usize, current_depth: usize) -> Vec<TreeNode> {
    if current_depth >= max_depth {
        return vec![];
    }
    node.fields
        .iter()
        .map(|(name, child)| TreeNode {
            label: field_label(name, child),
            children: build_children(child, max_depth, current_depth + 1),
        })
        .collect()
}

fn field_label(name: &str, node: &FieldNode) -> String {
    let intermediate = node.field_details.get("intermediate") == Some(&Value::Bool(true));
    match (node.detail_str("type"), intermediate) {
        (Some(kind), true) => format!("{} [{}, intermediate]", name, kind),
        (Some(kind), false) => format!("{} [{}]", name, kind),
        (None, _) => name.to_string(),
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
