//! Compliant log group: a retention period is always configured.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "log_group";

#[derive(Clone, Debug)]
pub struct LogGroupDefaults {
    pub retention_days: u32,
}

pub fn defaults() -> LogGroupDefaults {
    LogGroupDefaults { retention_days: 30 }
}

#[derive(Clone, Debug, Default)]
pub struct LogGroupProps {
    pub retention_days: Property<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LogGroupConfig {
    pub retention_days: Setting<u32>,
}

impl Template for LogGroupDefaults {
    type Override = LogGroupProps;
    type Config = LogGroupConfig;

    fn merge(&self, overrides: LogGroupProps) -> LogGroupConfig {
        LogGroupConfig {
            retention_days: overrides.retention_days.merge(self.retention_days),
        }
    }
}

fn check_retention(cfg: &LogGroupConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.retention_days.is_absent() {
        vec!["retention_days must be set: logs must not be kept forever".to_string()]
    } else {
        Vec::new()
    }
}

pub fn rule_set() -> RuleSet<LogGroupConfig> {
    RuleSet::new(
        KIND,
        vec![Rule::new(ids::RULE_LOG_GROUP_RETENTION, check_retention)],
    )
}

/// Compliant log group handle.
pub struct LogGroup {
    scope: Scope,
    config: Rc<LogGroupConfig>,
    attributes: Attributes,
}

impl LogGroup {
    pub fn new(parent: &Scope, id: &str, props: LogGroupProps) -> Result<Self, ConfigError> {
        let scope = parent.child(id)?;
        let config = Rc::new(defaults().merge(props));
        let attributes = scope.attributes();
        register(&scope, &config, &attributes, rule_set())?;
        Ok(Self {
            scope,
            config,
            attributes,
        })
    }

    pub fn config(&self) -> &LogGroupConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use provguard_core::{EnforcementPolicy, Tree, synthesize};

    #[test]
    fn defaults_pass() {
        let tree = Tree::new();
        LogGroup::new(&tree.root(), "logs", LogGroupProps::default()).unwrap();
        assert!(synthesize(&tree, &EnforcementPolicy::default()).is_ok());
    }

    #[test]
    fn explicit_retention_passes() {
        let tree = Tree::new();
        LogGroup::new(
            &tree.root(),
            "logs",
            LogGroupProps {
                retention_days: Property::Value(365),
            },
        )
        .unwrap();
        assert!(synthesize(&tree, &EnforcementPolicy::default()).is_ok());
    }

    #[test]
    fn cleared_retention_fails_once() {
        let tree = Tree::new();
        LogGroup::new(
            &tree.root(),
            "logs",
            LogGroupProps {
                retention_days: Property::Absent,
            },
        )
        .unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, ids::RULE_LOG_GROUP_RETENTION);
        assert!(err.violations[0].message.contains("retention_days"));
    }
}
