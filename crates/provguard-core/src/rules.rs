//! Named, ordered policy rules per resource kind.
//!
//! A rule is data, not virtual dispatch: a stable ID plus a pure function
//! over the merged configuration and the attribute overlay. Selecting the
//! rules for a resource kind is a lookup in the catalog, not an override
//! chain.

use crate::overlay::Attributes;
use crate::policy::EnforcementPolicy;
use provguard_types::{NodePath, Violation};

/// One pure predicate. Returns zero messages on success; each message is
/// fully formed and names the offending field and the required condition.
pub struct Rule<C> {
    pub id: &'static str,
    pub run: fn(&C, &Attributes) -> Vec<String>,
}

impl<C> Rule<C> {
    pub fn new(id: &'static str, run: fn(&C, &Attributes) -> Vec<String>) -> Self {
        Self { id, run }
    }
}

/// The ordered rule list for one resource kind.
pub struct RuleSet<C> {
    kind: &'static str,
    rules: Vec<Rule<C>>,
}

impl<C> RuleSet<C> {
    pub fn new(kind: &'static str, rules: Vec<Rule<C>>) -> Self {
        Self { kind, rules }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id).collect()
    }

    /// Evaluate every enforced rule against one node's merged configuration
    /// and overlay, tagging results with the node path. Evaluation never
    /// short-circuits.
    pub fn evaluate(
        &self,
        policy: &EnforcementPolicy,
        path: &NodePath,
        config: &C,
        attributes: &Attributes,
    ) -> Vec<Violation> {
        let mut out = Vec::new();
        for rule in &self.rules {
            if !policy.is_enforced(rule.id) {
                continue;
            }
            for message in (rule.run)(config, attributes) {
                out.push(Violation::new(path.clone(), rule.id, message));
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::{Attributes, Seal};

    struct Cfg {
        ok: bool,
    }

    fn check_ok(cfg: &Cfg, _attrs: &Attributes) -> Vec<String> {
        if cfg.ok {
            Vec::new()
        } else {
            vec!["ok must be true".to_string()]
        }
    }

    fn check_flag(_cfg: &Cfg, attrs: &Attributes) -> Vec<String> {
        if attrs.is("flag", "true") {
            Vec::new()
        } else {
            vec!["flag not set".to_string()]
        }
    }

    fn rule_set() -> RuleSet<Cfg> {
        RuleSet::new(
            "test",
            vec![
                Rule::new("test.ok", check_ok),
                Rule::new("test.flag", check_flag),
            ],
        )
    }

    #[test]
    fn evaluation_collects_from_every_rule() {
        let attrs = Attributes::new(Seal::default());
        let violations = rule_set().evaluate(
            &EnforcementPolicy::default(),
            &NodePath::new("app/x"),
            &Cfg { ok: false },
            &attrs,
        );
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].rule, "test.ok");
        assert_eq!(violations[1].rule, "test.flag");
        assert_eq!(violations[0].path, NodePath::new("app/x"));
    }

    #[test]
    fn disabled_rules_are_skipped() {
        let mut policy = EnforcementPolicy::strict();
        policy.disable("test.flag");
        let attrs = Attributes::new(Seal::default());
        let violations = rule_set().evaluate(
            &policy,
            &NodePath::new("app/x"),
            &Cfg { ok: true },
            &attrs,
        );
        assert!(violations.is_empty());
    }

    #[test]
    fn overlay_state_is_read_at_evaluation_time() {
        let attrs = Attributes::new(Seal::default());
        attrs.set("flag", Some("true")).unwrap();
        let violations = rule_set().evaluate(
            &EnforcementPolicy::default(),
            &NodePath::new("app/x"),
            &Cfg { ok: true },
            &attrs,
        );
        assert!(violations.is_empty());
    }
}
