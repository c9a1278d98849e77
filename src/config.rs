//! # Loader Configuration
//!
//! This module defines where schemas are loaded from. A configuration can be
//! read from a `.schema-loader.yaml` file and then adjusted by command-line
//! flags:
//!
//! ```yaml
//! schema_dir: schemas
//! ref: v8.11.0
//! repo: .
//! include:
//!   - custom/
//!   - experimental/schemas
//! ```
//!
//! Every key is optional. Without a `ref` the base schemas are read from
//! `schema_dir` on disk; with one they are read from that revision of `repo`.
//! Included files are always read from disk, except for the experimental
//! schema directory which follows `ref` when it is set.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_REPO, DEFAULT_SCHEMA_DIR};
use crate::error::{Error, Result};

/// Where to load the base schemas and the extensions from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
    /// Directory of the base schema files (on disk or inside the git tree).
    pub schema_dir: String,
    /// Git revision to read the base schemas from.
    #[serde(rename = "ref", alias = "git_ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    /// Repository that `ref` is resolved in.
    pub repo: PathBuf,
    /// Extension files, directories or glob patterns, merged in order.
    pub include: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            schema_dir: DEFAULT_SCHEMA_DIR.to_string(),
            git_ref: None,
            repo: PathBuf::from(DEFAULT_REPO),
            include: Vec::new(),
        }
    }
}

impl LoaderConfig {
    pub fn with_schema_dir(mut self, dir: impl Into<String>) -> Self {
        self.schema_dir = dir.into();
        self
    }

    pub fn with_git_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }

    pub fn with_repo(mut self, repo: impl Into<PathBuf>) -> Self {
        self.repo = repo.into();
        self
    }

    pub fn with_include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }
}

/// Parse a YAML configuration. An empty document yields the defaults.
pub fn parse(yaml_content: &str) -> Result<LoaderConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(LoaderConfig::default());
    }
    serde_yaml::from_str::<Option<LoaderConfig>>(yaml_content)
        .map(Option::unwrap_or_default)
        .map_err(|err| Error::ConfigParse {
            message: err.to_string(),
        })
}

/// Read and parse a configuration file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<LoaderConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}
