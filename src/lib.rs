//! # Schema Loader Library
//!
//! This library loads a taxonomy of typed data fields described as flat,
//! dot-delimited definitions grouped into named schemas, nests every schema
//! into a tree, and merges extension sets on top of the base taxonomy.
//!
//! ## Quick Example
//!
//! ```
//! use schema_loader::merge::merge_trees;
//! use schema_loader::nesting::deep_nesting_representation;
//! use schema_loader::reader::read_schema_str;
//!
//! let base = read_schema_str(
//!     "- name: dns\n  fields:\n    - name: answers.ttl\n      type: long\n",
//!     "dns.yml",
//! )
//! .unwrap();
//! let custom = read_schema_str(
//!     "- name: dns\n  fields:\n    - name: answers.ttl\n      normalize: [array]\n",
//!     "custom.yml",
//! )
//! .unwrap();
//!
//! let merged = merge_trees(
//!     &deep_nesting_representation(&base).unwrap(),
//!     &deep_nesting_representation(&custom).unwrap(),
//! )
//! .unwrap();
//!
//! let ttl = merged.get("dns").unwrap().descendant("answers.ttl").unwrap();
//! assert_eq!(ttl.detail_str("type"), Some("long"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Reader (`reader`)**: keys raw schema records by name and combines
//!   records coming from several files.
//! - **Nesting (`nesting`)**: turns dotted field names into nested nodes and
//!   splits schema-level metadata from field attributes.
//! - **Canonical tree (`tree`)**: the nested representation, with aliases as
//!   explicit references to their schema.
//! - **Merge (`merge`)**: layers one canonical tree on top of another.
//! - **Sources (`source`, `git`, `path`)**: read raw schema files from disk,
//!   glob patterns or a git revision.
//!
//! ## Execution Flow
//!
//! [`loader::load_schemas`] reads the base schemas, nests them, then merges
//! the experimental and custom extension sets on top, in that order.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod loader;
pub mod merge;
pub mod nesting;
pub mod path;
pub mod reader;
pub mod source;
pub mod tree;

#[cfg(test)]
mod nesting_proptest;
