//! Shared test utilities for integration and E2E tests.
//!
//! This module provides common fixtures, schema snippets and git helpers
//! to reduce duplication across test files.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_schema("base.yml", schemas::BASE);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::{git_available, init_git_repo};
    #[allow(unused_imports)]
    pub use super::schemas;
    pub use super::TestFixture;
}

/// Schema file snippets used across tests.
#[allow(dead_code)]
pub mod schemas {
    /// A root schema with one nested field.
    pub const BASE: &str = r#"
- name: base
  title: Base
  root: true
  fields:
    - name: labels
      type: object
    - name: message
      type: match_only_text
"#;

    /// A reusable schema with an alias and dotted fields.
    pub const USER: &str = r#"
- name: user
  title: User
  aliases: [account]
  reusable:
    top_level: true
    expected:
      - client
  fields:
    - name: id
      type: keyword
      normalize: [array]
    - name: name
      type: keyword
      multi_fields:
        - name: text
          type: match_only_text
    - name: group.id
      type: keyword
"#;

    /// Extension of `user` adding fields and multi-fields.
    pub const CUSTOM_USER: &str = r#"
- name: user
  reusable:
    expected:
      - server
  fields:
    - name: id
      normalize: [lowercase]
    - name: name
      multi_fields:
        - name: caseless
          type: keyword
    - name: pod.uid
      type: keyword
"#;

    /// An experimental schema.
    pub const EXPERIMENTAL: &str = r#"
- name: gen_ai
  title: GenAI
  fields:
    - name: request.model
      type: keyword
"#;
}

/// True when a usable `git` binary is on the PATH.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

/// Commit everything under `repo` and tag it `v1`.
#[allow(dead_code)]
pub fn init_git_repo(repo: &Path) {
    for args in [
        &["init", "-q"][..],
        &["add", "."],
        &["commit", "-q", "-m", "schemas"],
        &["tag", "v1"],
    ] {
        let output = Command::new("git")
            .arg("-C")
            .arg(repo)
            .args(["-c", "user.name=Schema Tests", "-c", "user.email=tests@example.com"])
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(output.status.success(), "git {:?} failed", args);
    }
}

/// A test fixture that provides a temporary directory with schema files.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_schema("base.yml", schemas::BASE)
///     .with_file("custom/user.yml", schemas::CUSTOM_USER);
///
/// fixture.command().arg("ls").assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add a schema file under the default `schemas/` directory.
    pub fn with_schema(self, name: &str, content: &str) -> Self {
        self.with_file(&format!("schemas/{}", name), content)
    }

    /// Add a `.schema-loader.yaml` configuration file with the given content.
    pub fn with_config(self, content: &str) -> Self {
        self.with_file(".schema-loader.yaml", content)
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// A `schema-loader` command running inside the temp directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("schema-loader");
        cmd.current_dir(self.path());
        cmd.env_remove("SCHEMA_LOADER_REF");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
