//! # Schema Loading Pipeline
//!
//! Loads the base schemas and the optional extension sets, turns each of them
//! into a canonical tree and merges the trees in order:
//!
//! 1. **Base schemas**: read from `schema_dir` on disk, or from that directory
//!    of a git revision when a `ref` is configured.
//! 2. **Experimental schemas**: when a `ref` is configured and the includes
//!    name `experimental/schemas`, that directory is read from the same
//!    revision and merged on top of the base.
//! 3. **Custom schemas**: the remaining includes are expanded from disk and
//!    merged last.
//!
//! Nothing here fills in defaults or checks whether fields make sense; the
//! result is just the nested and merged content of the sources.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_yaml::Value;

use crate::config::LoaderConfig;
use crate::defaults::EXPERIMENTAL_SCHEMA_DIR;
use crate::error::Result;
use crate::merge::merge_trees;
use crate::nesting::deep_nesting_representation;
use crate::path::glob_yaml_files;
use crate::reader::{merge_raw_schemas, read_schema_str, RawSchemas};
use crate::source::{FileSource, GitSource, SchemaSource};
use crate::tree::CanonicalTree;

/// Load the base schemas and every configured extension, nested and merged.
pub fn load_schemas(config: &LoaderConfig) -> Result<CanonicalTree> {
    let base_raw = match &config.git_ref {
        Some(git_ref) => load_schemas_from_git(&config.repo, git_ref, &config.schema_dir)?,
        None => load_schema_files(&glob_yaml_files(&[config.schema_dir.as_str()])?)?,
    };
    let mut fields = deep_nesting_representation(&base_raw)?;

    if config.include.is_empty() {
        return Ok(fields);
    }
    info!("Loading user defined schemas: {:?}", config.include);

    let mut includes = config.include.clone();
    if let Some(git_ref) = &config.git_ref {
        let experimental = includes
            .iter()
            .position(|include| include.trim_end_matches('/') == EXPERIMENTAL_SCHEMA_DIR);
        if let Some(position) = experimental {
            let raw = load_schemas_from_git(&config.repo, git_ref, EXPERIMENTAL_SCHEMA_DIR)?;
            fields = merge_trees(&fields, &deep_nesting_representation(&raw)?)?;
            includes.remove(position);
        }
    }

    // Remaining custom files are never read from a git revision.
    let custom_files = glob_yaml_files(&includes)?;
    let custom_fields = deep_nesting_representation(&load_schema_files(&custom_files)?)?;
    merge_trees(&fields, &custom_fields)
}

/// Read every file of a source and combine the schemas they define.
pub fn load_from_source(source: &dyn SchemaSource) -> Result<RawSchemas> {
    debug!("Loading schemas from {}", source.describe());
    let mut schemas = RawSchemas::new();
    for file in source.read_files()? {
        let new_schemas = read_schema_str(&file.content, &file.identifier)?;
        schemas = merge_raw_schemas(schemas, new_schemas, &file.identifier);
    }
    Ok(schemas)
}

/// Load raw schemas from local files, later files layered on earlier ones.
pub fn load_schema_files(files: &[PathBuf]) -> Result<RawSchemas> {
    load_from_source(&FileSource::new(files.to_vec()))
}

/// Load raw schemas from a directory of a git revision.
pub fn load_schemas_from_git(repo: &Path, git_ref: &str, target_dir: &str) -> Result<RawSchemas> {
    load_from_source(&GitSource::new(repo, git_ref, target_dir))
}

/// Parse any YAML file into a raw value.
pub fn load_yaml_file(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Load every YAML file matched by the given patterns, in sorted order.
pub fn load_definitions<S: AsRef<str>>(file_globs: &[S]) -> Result<Vec<Value>> {
    glob_yaml_files(file_globs)?
        .iter()
        .map(|path| load_yaml_file(path))
        .collect()
}
