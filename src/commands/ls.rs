//! # Ls Command Implementation
//!
//! This module implements the `ls` subcommand, which lists the schemas the
//! loading pipeline produced.
//!
//! ## Functionality
//!
//! - **Schema Listing**: One owned schema per line, in load order
//! - **Alias Display**: Aliases are shown next to the schema they resolve to
//! - **Long Format**: `--long` adds the title and the number of top-level fields
//! - **Count**: `--count` prints only the number of schemas
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use clap::Args;

use schema_loader::tree::CanonicalTree;

use super::SourceArgs;

/// List the loaded schemas and their aliases
#[derive(Args, Debug)]
pub struct LsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Use long listing format showing titles and field counts.
    #[arg(short, long)]
    pub long: bool,

    /// Show only the total count of schemas.
    #[arg(long)]
    pub count: bool,
}

/// Execute the `ls` command.
pub fn execute(args: LsArgs) -> Result<()> {
    let tree = args.source.load()?;
    if args.count {
        println!("{}", tree.schemas().count());
        return Ok(());
    }
    for line in listing(&tree, args.long) {
        println!("{}", line);
    }
    Ok(())
}

fn listing(tree: &CanonicalTree, long: bool) -> Vec<String> {
    tree.schemas()
        .map(|(name, node)| {
            let mut line = name.to_string();
            let aliases = tree.aliases_of(name);
            if !aliases.is_empty() {
                line.push_str(&format!(" (aliases: {})", aliases.join(", ")));
            }
            if long {
                let title = node
                    .schema_details
                    .as_ref()
                    .and_then(|details| details.title.as_deref())
                    .unwrap_or("-");
                line = format!("{:<40} {:>5} fields  {}", line, node.fields.len(), title);
            }
            line
        })
        .collect()
}
