//! Pure defaulting-and-deferred-validation engine (no IO).
//!
//! Construction merges organization defaults with caller overrides and
//! registers validation closures against a construct tree; nothing is
//! evaluated until [`synthesize`] walks the whole tree once and either
//! produces a manifest or rejects with every violation aggregated.

#![forbid(unsafe_code)]

pub mod error;
pub mod overlay;
pub mod policy;
pub mod property;
pub mod rules;
pub mod tree;

mod engine;

pub use engine::synthesize;
pub use error::{ConfigError, SynthesisError};
pub use overlay::Attributes;
pub use policy::EnforcementPolicy;
pub use property::{Property, Setting, Template};
pub use rules::{Rule, RuleSet};
pub use tree::{Scope, Tree};

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;
