//! Raw schema sources
//!
//! A [`SchemaSource`] hands out the raw YAML text of schema files together
//! with an identifier used in error messages. Sources read everything up
//! front and release their file handles or git processes before returning.

use std::path::PathBuf;

use log::debug;

use crate::error::{Error, Result};
use crate::git;
use crate::path::glob_yaml_files;

/// The raw content of one schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSchemaFile {
    /// Where the content came from, e.g. a path or `"dns.yml (git ref v1)"`.
    pub identifier: String,
    pub content: String,
}

/// Something that can supply raw schema files.
pub trait SchemaSource {
    /// Short description for log output.
    fn describe(&self) -> String;

    /// Read every schema file of this source, in load order.
    fn read_files(&self) -> Result<Vec<RawSchemaFile>>;
}

/// Schema files on the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    files: Vec<PathBuf>,
}

impl FileSource {
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self { files }
    }

    /// Build a source from directories, files or glob patterns.
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        Ok(Self::new(glob_yaml_files(patterns)?))
    }
}

impl SchemaSource for FileSource {
    fn describe(&self) -> String {
        format!("{} local file(s)", self.files.len())
    }

    fn read_files(&self) -> Result<Vec<RawSchemaFile>> {
        self.files
            .iter()
            .map(|path| -> Result<RawSchemaFile> {
                debug!("Reading schema file {}", path.display());
                Ok(RawSchemaFile {
                    identifier: path.display().to_string(),
                    content: std::fs::read_to_string(path)?,
                })
            })
            .collect()
    }
}

/// The `.yml` files directly under a directory of a git revision.
#[derive(Debug, Clone)]
pub struct GitSource {
    repo: PathBuf,
    git_ref: String,
    dir: String,
}

impl GitSource {
    pub fn new(repo: impl Into<PathBuf>, git_ref: impl Into<String>, dir: impl Into<String>) -> Self {
        Self {
            repo: repo.into(),
            git_ref: git_ref.into(),
            dir: dir.into(),
        }
    }
}

impl SchemaSource for GitSource {
    fn describe(&self) -> String {
        format!("'{}' at git ref '{}'", self.dir, self.git_ref)
    }

    fn read_files(&self) -> Result<Vec<RawSchemaFile>> {
        if !git::path_exists_in_tree(&self.repo, &self.git_ref, &self.dir)? {
            return Err(Error::MissingSourceDirectory {
                dir: self.dir.trim_matches('/').to_string(),
                git_ref: self.git_ref.clone(),
            });
        }

        let mut files = Vec::new();
        for blob in git::list_blobs(&self.repo, &self.git_ref, &self.dir)? {
            if !blob.ends_with(".yml") {
                continue;
            }
            debug!("Reading schema blob {} at {}", blob, self.git_ref);
            let name = blob.rsplit('/').next().unwrap_or(&blob);
            files.push(RawSchemaFile {
                identifier: format!("{} (git ref {})", name, self.git_ref),
                content: git::read_blob(&self.repo, &self.git_ref, &blob)?,
            });
        }
        Ok(files)
    }
}
