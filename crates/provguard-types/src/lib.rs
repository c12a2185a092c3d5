//! Stable DTOs and IDs used across the provguard workspace.
//!
//! This crate is intentionally boring:
//! - data types for violations and the synthesized manifest
//! - stable rule ID strings
//! - canonical construct-tree path handling
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod ids;
pub mod manifest;
pub mod path;
pub mod violation;

pub use explain::{Explanation, all_rule_ids, lookup_explanation};
pub use manifest::{Manifest, ResourceRecord, SCHEMA_MANIFEST_V1, ToolMeta};
pub use path::NodePath;
pub use violation::Violation;
