//! Explain registry for policy rules.
//!
//! Maps rule IDs to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the rule.
    pub title: &'static str,
    /// What the rule requires and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
}

/// Look up an explanation by rule ID.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(rule_id: &str) -> Option<Explanation> {
    ENTRIES
        .iter()
        .find(|(id, _)| *id == rule_id)
        .map(|(_, e)| e.clone())
}

/// List all known rule IDs.
pub fn all_rule_ids() -> Vec<&'static str> {
    ENTRIES.iter().map(|(id, _)| *id).collect()
}

const ENTRIES: &[(&str, Explanation)] = &[
    (
        ids::RULE_BUCKET_TRANSPORT_ENCRYPTION,
        Explanation {
            title: "Bucket transport encryption",
            description: "Storage buckets must deny unencrypted transport; plaintext access \
                          leaks object data and credentials in transit.",
            remediation: "Leave `enforce_transport_encryption` at its default, or set it back \
                          to true.",
        },
    ),
    (
        ids::RULE_BUCKET_PUBLIC_ACCESS,
        Explanation {
            title: "Bucket public access block",
            description: "Every public-access vector must be blocked. Anything short of the \
                          maximally restrictive mode can expose objects through ACLs or \
                          policies.",
            remediation: "Set `public_access` to `BlockAll`.",
        },
    ),
    (
        ids::RULE_BUCKET_ENCRYPTION,
        Explanation {
            title: "Bucket encryption at rest",
            description: "Buckets must be encrypted at rest. An unencrypted or explicitly \
                          cleared encryption mode fails.",
            remediation: "Use `ServiceManaged` or key-backed encryption.",
        },
    ),
    (
        ids::RULE_KEY_ROTATION,
        Explanation {
            title: "Key rotation",
            description: "Encryption keys must rotate automatically so a leaked key ages out.",
            remediation: "Leave `rotation_enabled` at its default, or set it back to true.",
        },
    ),
    (
        ids::RULE_DISTRIBUTION_PROTOCOL_POLICY,
        Explanation {
            title: "Distribution viewer protocol",
            description: "No behavior of a content distribution may serve plaintext to \
                          viewers. The rule fans out over every additional behavior.",
            remediation: "Use `RedirectToHttps` or `HttpsOnly` for each behavior.",
        },
    ),
    (
        ids::RULE_DISTRIBUTION_LOGGING,
        Explanation {
            title: "Distribution access logging",
            description: "Distributions must keep access logs for audit trails.",
            remediation: "Leave `logging_enabled` at its default, or set it back to true.",
        },
    ),
    (
        ids::RULE_DISTRIBUTION_WEB_ACL,
        Explanation {
            title: "Distribution web ACL",
            description: "Every distribution must sit behind a web ACL.",
            remediation: "Set `web_acl` to the ACL identifier.",
        },
    ),
    (
        ids::RULE_DATABASE_PUBLICLY_ACCESSIBLE,
        Explanation {
            title: "Database not publicly accessible",
            description: "Database instances must not be reachable from the public internet.",
            remediation: "Leave `publicly_accessible` at its default of false.",
        },
    ),
    (
        ids::RULE_DATABASE_STORAGE_ENCRYPTED,
        Explanation {
            title: "Database storage encryption",
            description: "Database storage must be encrypted at rest.",
            remediation: "Leave `storage_encrypted` at its default, or set it back to true.",
        },
    ),
    (
        ids::RULE_DATABASE_IAM_AUTHENTICATION,
        Explanation {
            title: "Database IAM authentication",
            description: "Identity-based authentication must be enabled instead of static \
                          database passwords.",
            remediation: "Leave `iam_authentication` at its default, or set it back to true.",
        },
    ),
    (
        ids::RULE_DATABASE_AUTO_MINOR_VERSION_UPGRADE,
        Explanation {
            title: "Database minor-version upgrades",
            description: "Automatic minor-version upgrades keep security patches applied.",
            remediation: "Leave `auto_minor_version_upgrade` at its default.",
        },
    ),
    (
        ids::RULE_DATABASE_COPY_TAGS_TO_SNAPSHOT,
        Explanation {
            title: "Database snapshot tags",
            description: "Snapshots must inherit instance tags so ownership and retention \
                          policies follow the data.",
            remediation: "Leave `copy_tags_to_snapshot` at its default.",
        },
    ),
    (
        ids::RULE_DATABASE_DELETION_PROTECTION,
        Explanation {
            title: "Database deletion protection",
            description: "Deletion protection guards production data against accidental \
                          teardown.",
            remediation: "Leave `deletion_protection` at its default.",
        },
    ),
    (
        ids::RULE_DATABASE_MULTI_AZ,
        Explanation {
            title: "Production multi-AZ",
            description: "Production databases must be deployed across availability zones. \
                          Non-production instances may be single-AZ.",
            remediation: "Set `multi_az` to true, or tag the instance `NotProduction`.",
        },
    ),
    (
        ids::RULE_CLUSTER_STORAGE_ENCRYPTED,
        Explanation {
            title: "Cluster storage encryption",
            description: "Database cluster storage must be encrypted at rest.",
            remediation: "Leave `storage_encrypted` at its default.",
        },
    ),
    (
        ids::RULE_CLUSTER_IAM_AUTHENTICATION,
        Explanation {
            title: "Cluster IAM authentication",
            description: "Clusters must use identity-based authentication.",
            remediation: "Leave `iam_authentication` at its default.",
        },
    ),
    (
        ids::RULE_CLUSTER_COPY_TAGS_TO_SNAPSHOT,
        Explanation {
            title: "Cluster snapshot tags",
            description: "Cluster snapshots must inherit tags.",
            remediation: "Leave `copy_tags_to_snapshot` at its default.",
        },
    ),
    (
        ids::RULE_CLUSTER_DELETION_PROTECTION,
        Explanation {
            title: "Cluster deletion protection",
            description: "Clusters must be protected against accidental teardown.",
            remediation: "Leave `deletion_protection` at its default.",
        },
    ),
    (
        ids::RULE_CLUSTER_INSTANCE_PUBLICLY_ACCESSIBLE,
        Explanation {
            title: "Cluster instances not public",
            description: "Instances inside a cluster must not be publicly reachable. The \
                          cluster validates its embedded instance configuration directly.",
            remediation: "Leave the nested `publicly_accessible` at its default of false.",
        },
    ),
    (
        ids::RULE_CLUSTER_INSTANCE_AUTO_MINOR_VERSION_UPGRADE,
        Explanation {
            title: "Cluster instance minor-version upgrades",
            description: "Instances inside a cluster must take automatic minor-version \
                          upgrades.",
            remediation: "Leave the nested `auto_minor_version_upgrade` at its default.",
        },
    ),
    (
        ids::RULE_QUEUE_ENCRYPTION,
        Explanation {
            title: "Queue encryption",
            description: "Queues must be encrypted at rest; `Unencrypted` and an explicitly \
                          cleared mode both fail.",
            remediation: "Use `KeyManaged` or key-backed encryption.",
        },
    ),
    (
        ids::RULE_TOPIC_ENCRYPTION_KEY,
        Explanation {
            title: "Topic encryption key",
            description: "Topics must be encrypted with a named key.",
            remediation: "Set `encryption_key` to the key identifier.",
        },
    ),
    (
        ids::RULE_LOAD_BALANCER_ACCESS_LOGS,
        Explanation {
            title: "Load balancer access logs",
            description: "Access logging is enabled by a post-construction call and recorded \
                          in the attribute overlay; absence at synthesis time fails.",
            remediation: "Call `enable_access_logs` with a destination before synthesizing.",
        },
    ),
    (
        ids::RULE_LOAD_BALANCER_DROP_INVALID_HEADERS,
        Explanation {
            title: "Drop invalid HTTP headers",
            description: "The balancer must drop malformed HTTP headers; construction seeds \
                          this attribute, so only an explicit clear can fail it.",
            remediation: "Do not clear `routing.drop_invalid_headers`, or set it back to \
                          \"true\".",
        },
    ),
    (
        ids::RULE_LOAD_BALANCER_DELETION_PROTECTION,
        Explanation {
            title: "Load balancer deletion protection",
            description: "Balancers must be protected against accidental teardown.",
            remediation: "Leave `deletion_protection` at its default.",
        },
    ),
    (
        ids::RULE_COMPUTE_IMDSV2,
        Explanation {
            title: "Instance metadata v2",
            description: "Compute instances must require the session-oriented metadata \
                          service; v1 is credential-theft prone.",
            remediation: "Leave `require_imdsv2` at its default.",
        },
    ),
    (
        ids::RULE_COMPUTE_NO_SSH_KEY,
        Explanation {
            title: "No SSH key pairs",
            description: "Long-lived SSH key pairs are forbidden; use the session manager \
                          instead.",
            remediation: "Remove `ssh_key_name` from the configuration.",
        },
    ),
    (
        ids::RULE_COMPUTE_INSTANCE_CLASS,
        Explanation {
            title: "Current instance classes",
            description: "Instance types must come from a current-generation class.",
            remediation: "Pick an instance type whose class prefix is in the approved list.",
        },
    ),
    (
        ids::RULE_FUNCTION_RUNTIME,
        Explanation {
            title: "Function runtime currency",
            description: "Deprecated runtimes are deny-listed; the violation names the \
                          deprecated value and the recommended replacement.",
            remediation: "Upgrade to the replacement runtime named in the message.",
        },
    ),
    (
        ids::RULE_LOG_GROUP_RETENTION,
        Explanation {
            title: "Log retention",
            description: "Log groups must have a retention period; unbounded retention and \
                          an explicitly cleared period both fail.",
            remediation: "Leave `retention_days` at its default, or set a period.",
        },
    ),
];
