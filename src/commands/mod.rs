//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the
//! `schema-loader` command-line tool. Each subcommand is defined in its own
//! file.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct, derived using `clap`, that flattens the shared
//!   [`SourceArgs`].
//! - An `execute` function that loads the schemas through the
//!   `schema_loader` library and prints them.

pub mod load;
pub mod ls;
pub mod tree;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use schema_loader::config::{self, LoaderConfig};
use schema_loader::defaults::DEFAULT_CONFIG_FILENAME;
use schema_loader::loader;
use schema_loader::tree::CanonicalTree;

/// Options selecting the schema sources, shared by every command.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Path to a configuration file.
    ///
    /// Defaults to `.schema-loader.yaml` in the current directory when that
    /// file exists. Flags below override values from the file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the base schema files.
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<String>,

    /// Git revision to read the base schemas from.
    #[arg(long = "ref", value_name = "REF", env = "SCHEMA_LOADER_REF")]
    pub git_ref: Option<String>,

    /// Git repository the revision is resolved in.
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,

    /// Extension files, directories or glob patterns (repeatable).
    #[arg(short, long, value_name = "PATTERN")]
    pub include: Vec<String>,
}

impl SourceArgs {
    /// Build the loader configuration from the config file and the flags.
    pub fn resolve(&self) -> Result<LoaderConfig> {
        let default_path = PathBuf::from(DEFAULT_CONFIG_FILENAME);
        let config_path = match &self.config {
            Some(path) => Some(path.clone()),
            None if default_path.exists() => Some(default_path),
            None => None,
        };

        let mut resolved = match config_path {
            Some(path) => config::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => LoaderConfig::default(),
        };

        if let Some(dir) = &self.schema_dir {
            resolved.schema_dir = dir.clone();
        }
        if let Some(git_ref) = &self.git_ref {
            resolved.git_ref = Some(git_ref.clone());
        }
        if let Some(repo) = &self.repo {
            resolved.repo = repo.clone();
        }
        resolved.include.extend(self.include.iter().cloned());
        Ok(resolved)
    }

    /// Resolve the configuration and run the loading pipeline.
    pub fn load(&self) -> Result<CanonicalTree> {
        let config = self.resolve()?;
        loader::load_schemas(&config).context("Failed to load schemas")
    }
}
