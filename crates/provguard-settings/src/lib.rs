//! Enforcement-policy parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves policy
//! provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{PolicyFileV1, RuleConfig};
pub use resolve::{Overrides, ResolvedPolicy};

/// Parse `provguard.toml` (or equivalent) into a typed model.
pub fn parse_policy_toml(input: &str) -> anyhow::Result<PolicyFileV1> {
    let file: PolicyFileV1 = toml::from_str(input)?;
    Ok(file)
}

/// Resolve the effective enforcement policy used at synthesis.
pub fn resolve_policy(file: PolicyFileV1, overrides: Overrides) -> anyhow::Result<ResolvedPolicy> {
    resolve::resolve_policy(file, overrides)
}
