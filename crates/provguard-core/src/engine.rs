use crate::error::SynthesisError;
use crate::policy::EnforcementPolicy;
use crate::tree::Tree;
use provguard_types::{Manifest, ResourceRecord, SCHEMA_MANIFEST_V1, ToolMeta, Violation};
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Walk the whole tree once, invoke every registered validation closure,
/// and either produce the manifest artifact or reject with every violation.
///
/// The walk visits all nodes regardless of earlier failures; the result is
/// sorted by (path, rule, message) so reports are deterministic. A failed
/// synthesis leaves the tree amendable (overlay fixes may be applied and
/// synthesis re-run); a successful one seals it permanently. Re-running
/// against an unchanged tree is idempotent. A panicking rule is a defect
/// and aborts the pass.
pub fn synthesize(tree: &Tree, policy: &EnforcementPolicy) -> Result<Manifest, SynthesisError> {
    let started_at = OffsetDateTime::now_utc();
    let already_sealed = tree.seal().is_sealed();
    tree.seal().seal();

    let state = tree.state().borrow();
    debug!(nodes = state.nodes.len(), "synthesizing construct tree");

    let mut violations: Vec<Violation> = Vec::new();
    for node in &state.nodes {
        let Some(registration) = &node.registration else {
            continue;
        };
        violations.extend((registration.validate)(policy));
    }

    if !violations.is_empty() {
        violations.sort_by(compare_violations);
        warn!(
            violations = violations.len(),
            "synthesis rejected construct tree"
        );
        drop(state);
        // Only a successful pass seals for good.
        if !already_sealed {
            tree.seal().unseal();
        }
        return Err(SynthesisError { violations });
    }

    let resources: Vec<ResourceRecord> = state
        .nodes
        .iter()
        .filter_map(|node| {
            node.registration.as_ref().map(|r| ResourceRecord {
                path: node.path.clone(),
                kind: r.kind.to_string(),
                config: r.config.clone(),
                attributes: r.attributes.snapshot(),
            })
        })
        .collect();

    info!(resources = resources.len(), "synthesis produced manifest");
    Ok(Manifest {
        schema: SCHEMA_MANIFEST_V1.to_string(),
        tool: ToolMeta {
            name: "provguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        resources,
    })
}

fn compare_violations(a: &Violation, b: &Violation) -> std::cmp::Ordering {
    a.path
        .cmp(&b.path)
        .then_with(|| a.rule.cmp(&b.rule))
        .then_with(|| a.message.cmp(&b.message))
}
