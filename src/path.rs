//! File discovery for schema sources
//!
//! Expands user-supplied paths and glob patterns into concrete files. A
//! pattern that matches nothing is reported with a warning and skipped.

use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::Result;

/// File extensions recognized as schema files.
pub const YAML_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

/// True when the path has a `.yml` or `.yaml` extension.
pub fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| YAML_EXTENSIONS.contains(&ext))
}

fn expand(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) => matches.push(path),
            Err(err) => debug!("Skipping unreadable match for '{}': {}", pattern, err),
        }
    }
    Ok(matches)
}

/// Expand glob patterns or file names into the files they match.
///
/// A pattern ending in `/` matches everything in that directory.
pub fn eval_globs<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut all_files = Vec::new();
    for pattern in patterns {
        let mut pattern = pattern.as_ref().to_string();
        if pattern.ends_with('/') {
            pattern.push('*');
        }
        let matches = expand(&pattern)?;
        if matches.is_empty() {
            warn!("{} did not match any files", pattern);
        } else {
            all_files.extend(matches);
        }
    }
    Ok(all_files)
}

/// Collect the YAML files named by a list of directories, files or globs.
///
/// Directories contribute their `*.yml` and `*.yaml` files (not recursive).
/// Anything that is not a YAML file is dropped. The result is sorted and
/// free of duplicates.
pub fn glob_yaml_files<S: AsRef<str>>(paths: &[S]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in paths {
        let entry = entry.as_ref();
        let candidates = if Path::new(entry).is_dir() {
            let dir = entry.trim_end_matches('/');
            let mut found = Vec::new();
            for ext in YAML_EXTENSIONS {
                found.extend(expand(&format!("{}/*.{}", dir, ext))?);
            }
            found
        } else {
            expand(entry)?
        };

        let yaml: Vec<PathBuf> = candidates
            .into_iter()
            .filter(|path| path.is_file() && is_yaml_file(path))
            .collect();
        if yaml.is_empty() {
            warn!("{} did not match any files", entry);
        }
        files.extend(yaml);
    }
    files.sort();
    files.dedup();
    Ok(files)
}
