//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Schema Loader - Nest and merge dotted field schemas
#[derive(Parser, Debug)]
#[command(name = "schema-loader")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load, nest and merge the schemas and print the resulting tree
    Load(commands::load::LoadArgs),

    /// Display the nested field hierarchy of the loaded schemas
    Tree(commands::tree::TreeArgs),

    /// List the loaded schemas and their aliases
    Ls(commands::ls::LsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        match self.command {
            Commands::Load(args) => commands::load::execute(args),
            Commands::Tree(args) => commands::tree::execute(args),
            Commands::Ls(args) => commands::ls::execute(args),
        }
    }
}

/// Install `env_logger` at the given level; `RUST_LOG` takes precedence.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
