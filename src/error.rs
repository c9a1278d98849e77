//! # Error Handling
//!
//! This module defines the centralized error type for schema loading. It uses
//! the `thiserror` library to describe every failure mode of the reader, the
//! nester, the merger and the I/O shims around them.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum. Structural problems in the input (a record
//!   without a `name`, a `normalize` value that is not a list, a missing
//!   directory in a git revision) each get their own variant so callers can
//!   tell them apart.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Input shape errors are never repaired silently. They abort the load so a
//! malformed source cannot produce a partially built tree.
//!
//! A file pattern that matches nothing is not an error: it is reported with
//! `log::warn!` and loading continues.

use thiserror::Error;

/// Main error type for schema loading operations
#[derive(Error, Debug)]
pub enum Error {
    /// A raw schema record does not carry the mandatory `name` attribute.
    #[error("Schema file {source_name} is missing mandatory attribute 'name'")]
    MissingName {
        /// The file (or git blob description) the record came from.
        source_name: String,
    },

    /// A requested directory does not exist in the given git revision.
    #[error("Target directory './{dir}' not present in git ref '{git_ref}'!")]
    MissingSourceDirectory { dir: String, git_ref: String },

    /// The input has the wrong shape at the given location.
    #[error("Unexpected shape at '{path}': {message}")]
    Shape { path: String, message: String },

    /// Schema-level keys that could not be read as schema details.
    #[error("Invalid schema details for '{schema}': {message}")]
    SchemaDetails { schema: String, message: String },

    /// An error occurred while parsing the loader configuration file.
    #[error("Configuration parsing error: {message}")]
    ConfigParse { message: String },

    /// A `git` command failed or could not be spawned.
    #[error("Git command failed in {repo}: {command} - {stderr}")]
    GitCommand {
        command: String,
        repo: String,
        stderr: String,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

impl Error {
    /// Build a [`Error::Shape`] for the given location.
    pub(crate) fn shape(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Shape {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
