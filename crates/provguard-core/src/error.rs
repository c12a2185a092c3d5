use provguard_types::{NodePath, Violation};

/// Structural problems detected at construction time, before any merge.
///
/// These are raised immediately and synchronously; policy failures never
/// surface here (they are deferred to synthesis by design).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("construct id must not be empty (parent: {parent})")]
    EmptyId { parent: NodePath },

    #[error("construct '{id}' already exists under {parent}")]
    DuplicateChild { parent: NodePath, id: String },

    #[error("node {path} already has a registered resource")]
    AlreadyRegistered { path: NodePath },

    #[error("tree is sealed; attributes can no longer be modified")]
    Sealed,

    #[error("failed to snapshot merged configuration: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// The aggregated outcome of a rejected synthesis pass.
///
/// Carries every violation from the whole tree, sorted for deterministic
/// output. Display renders one contiguous report, never only the first
/// failure.
#[derive(Debug)]
pub struct SynthesisError {
    pub violations: Vec<Violation>,
}

impl std::fmt::Display for SynthesisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "synthesis rejected: {} violation(s)",
            self.violations.len()
        )?;
        for v in &self.violations {
            writeln!(f, "  {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SynthesisError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesis_error_lists_every_violation() {
        let err = SynthesisError {
            violations: vec![
                Violation::new(
                    NodePath::new("app/bucket"),
                    "bucket.encryption",
                    "bucket must be encrypted",
                ),
                Violation::new(
                    NodePath::new("app/db"),
                    "database.multi_az",
                    "production instances must be multi-AZ",
                ),
            ],
        };
        let text = err.to_string();
        assert!(text.starts_with("synthesis rejected: 2 violation(s)"));
        assert!(text.contains("app/bucket: [bucket.encryption]"));
        assert!(text.contains("app/db: [database.multi_az]"));
    }
}
