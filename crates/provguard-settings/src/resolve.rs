use crate::model::PolicyFileV1;
use anyhow::Context;
use provguard_core::EnforcementPolicy;
use provguard_types::explain::all_rule_ids;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedPolicy {
    pub effective: EnforcementPolicy,
}

pub fn resolve_policy(file: PolicyFileV1, overrides: Overrides) -> anyhow::Result<ResolvedPolicy> {
    let profile = overrides
        .profile
        .or(file.profile)
        .unwrap_or_else(|| "strict".to_string());
    if profile != "strict" {
        anyhow::bail!("unknown profile: {profile} (expected 'strict')");
    }

    let mut effective = EnforcementPolicy::strict();

    for (rule_id, rc) in file.rules.iter() {
        validate_rule_id(rule_id).with_context(|| format!("invalid rule entry '{rule_id}'"))?;
        if rc.enabled == Some(false) {
            effective.disable(rule_id);
        }
    }

    Ok(ResolvedPolicy { effective })
}

fn validate_rule_id(rule_id: &str) -> anyhow::Result<()> {
    if all_rule_ids().iter().any(|id| *id == rule_id) {
        Ok(())
    } else {
        anyhow::bail!("unknown rule id")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_policy_toml;

    #[test]
    fn empty_file_resolves_to_strict() {
        let resolved = resolve_policy(PolicyFileV1::default(), Overrides::default()).unwrap();
        assert_eq!(resolved.effective.profile, "strict");
        assert!(resolved.effective.is_enforced("bucket.encryption"));
    }

    #[test]
    fn disabled_rules_carry_through() {
        let file = parse_policy_toml(
            r#"
schema = "provguard.policy.v1"

[rules."bucket.encryption"]
enabled = false
"#,
        )
        .unwrap();
        let resolved = resolve_policy(file, Overrides::default()).unwrap();
        assert!(!resolved.effective.is_enforced("bucket.encryption"));
        assert!(resolved.effective.is_enforced("bucket.public_access"));
    }

    #[test]
    fn unknown_rule_id_is_a_resolution_error() {
        let file = parse_policy_toml(
            r#"
[rules."bucket.nonsense"]
enabled = false
"#,
        )
        .unwrap();
        let err = resolve_policy(file, Overrides::default()).unwrap_err();
        assert!(err.to_string().contains("bucket.nonsense"));
    }

    #[test]
    fn unknown_profile_is_rejected() {
        let file = PolicyFileV1 {
            profile: Some("lenient".to_string()),
            ..PolicyFileV1::default()
        };
        assert!(resolve_policy(file, Overrides::default()).is_err());
    }

    #[test]
    fn override_profile_beats_file_profile() {
        let file = PolicyFileV1 {
            profile: Some("lenient".to_string()),
            ..PolicyFileV1::default()
        };
        let resolved = resolve_policy(
            file,
            Overrides {
                profile: Some("strict".to_string()),
            },
        )
        .unwrap();
        assert_eq!(resolved.effective.profile, "strict");
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(parse_policy_toml("rules = 3").is_err());
    }
}
