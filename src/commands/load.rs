//! # Load Command Implementation
//!
//! This module implements the `load` subcommand, which runs the full loading
//! pipeline and prints the merged canonical tree.
//!
//! ## Functionality
//!
//! - **Full Tree Output**: Prints every schema, alias keys included
//! - **Single Schema Output**: `--schema` restricts the output to one schema
//!   (aliases are accepted)
//! - **Output Formats**: YAML (default) or JSON
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::{anyhow, Context, Result};
use clap::{Args, ValueEnum};

use schema_loader::tree::CanonicalTree;

use super::SourceArgs;

/// Serialization format for the printed tree.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Load, nest and merge the schemas and print the resulting tree
#[derive(Args, Debug)]
pub struct LoadArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: OutputFormat,

    /// Print only this schema (a schema name or one of its aliases).
    #[arg(short, long, value_name = "NAME")]
    pub schema: Option<String>,
}

/// Execute the `load` command.
pub fn execute(args: LoadArgs) -> Result<()> {
    let tree = args.source.load()?;
    let output = render(&tree, args.schema.as_deref(), args.format)?;
    print!("{}", output);
    Ok(())
}

/// Serialize the whole tree, or a single schema of it.
fn render(tree: &CanonicalTree, schema: Option<&str>, format: OutputFormat) -> Result<String> {
    match schema {
        Some(name) => {
            let node = tree
                .get(name)
                .ok_or_else(|| anyhow!("Schema '{}' not found", name))?;
            serialize(node, format)
        }
        None => serialize(tree, format),
    }
}

fn serialize<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to serialize as YAML"),
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map(|json| format!("{}\n", json))
            .context("Failed to serialize as JSON"),
    }
}
