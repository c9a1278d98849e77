//! Default values for schema-loader configuration.
//!
//! This module provides centralized default values used by the library and
//! the CLI, ensuring consistency and avoiding duplication.

/// Name of the optional configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILENAME: &str = ".schema-loader.yaml";

/// Directory holding the base schema files.
pub const DEFAULT_SCHEMA_DIR: &str = "schemas";

/// Directory of experimental schemas, read from the same git revision as the
/// base schemas when it is listed among the includes.
pub const EXPERIMENTAL_SCHEMA_DIR: &str = "experimental/schemas";

/// Repository used for git revisions when none is configured.
pub const DEFAULT_REPO: &str = ".";
