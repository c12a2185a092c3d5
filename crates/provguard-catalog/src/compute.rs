//! Compliant compute instance: metadata v2 required, no SSH key pairs,
//! current-generation instance classes only.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "compute";

/// Current-generation instance class prefixes.
pub const INSTANCE_CLASSES: &[&str] = &["t3", "t4g", "m6i", "m7g", "c6i", "c7g", "r6i", "r7g"];

#[derive(Clone, Debug)]
pub struct ComputeDefaults {
    pub require_imdsv2: bool,
}

pub fn defaults() -> ComputeDefaults {
    ComputeDefaults {
        require_imdsv2: true,
    }
}

#[derive(Clone, Debug, Default)]
pub struct ComputeProps {
    pub require_imdsv2: Property<bool>,
    pub instance_type: Property<String>,
    pub ssh_key_name: Property<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComputeConfig {
    pub require_imdsv2: Setting<bool>,
    pub instance_type: Setting<String>,
    pub ssh_key_name: Setting<String>,
}

impl Template for ComputeDefaults {
    type Override = ComputeProps;
    type Config = ComputeConfig;

    fn merge(&self, overrides: ComputeProps) -> ComputeConfig {
        ComputeConfig {
            require_imdsv2: overrides.require_imdsv2.merge(self.require_imdsv2),
            instance_type: overrides.instance_type.merge_optional(),
            ssh_key_name: overrides.ssh_key_name.merge_optional(),
        }
    }
}

fn check_imdsv2(cfg: &ComputeConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.require_imdsv2.is_true() {
        Vec::new()
    } else {
        vec!["require_imdsv2 must not be unset nor false".to_string()]
    }
}

fn check_no_ssh_key(cfg: &ComputeConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.ssh_key_name.value().is_some() {
        vec!["use the session manager rather than SSH: ssh_key_name must not be set".to_string()]
    } else {
        Vec::new()
    }
}

fn check_instance_class(cfg: &ComputeConfig, _attrs: &Attributes) -> Vec<String> {
    match cfg.instance_type.value() {
        None => vec!["instance_type must be configured".to_string()],
        Some(t) if INSTANCE_CLASSES.iter().any(|class| t.starts_with(class)) => Vec::new(),
        Some(t) => vec![format!(
            "use current instance types: '{t}' is not a current-generation class"
        )],
    }
}

pub fn rule_set() -> RuleSet<ComputeConfig> {
    RuleSet::new(
        KIND,
        vec![
            Rule::new(ids::RULE_COMPUTE_IMDSV2, check_imdsv2),
            Rule::new(ids::RULE_COMPUTE_NO_SSH_KEY, check_no_ssh_key),
            Rule::new(ids::RULE_COMPUTE_INSTANCE_CLASS, check_instance_class),
        ],
    )
}

/// Compliant compute instance handle.
pub struct ComputeInstance {
    scope: Scope,
    config: Rc<ComputeConfig>,
    attributes: Attributes,
}

impl ComputeInstance {
    pub fn new(parent: &Scope, id: &str, props: ComputeProps) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &ComputeConfig {
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

    fn current_type() -> ComputeProps {
        ComputeProps {
            instance_type: Property::Value("m7g.large".to_string()),
            ..ComputeProps::default()
        }
    }

    #[test]
    fn current_generation_instance_passes() {
        let tree = Tree::new();
        ComputeInstance::new(&tree.root(), "vm", current_type()).unwrap();
        assert!(synthesize(&tree, &EnforcementPolicy::default()).is_ok());
    }

    #[test]
    fn stale_instance_class_fails_and_names_the_type() {
        let tree = Tree::new();
        ComputeInstance::new(
            &tree.root(),
            "vm",
            ComputeProps {
                instance_type: Property::Value("m4.large".to_string()),
                ..ComputeProps::default()
            },
        )
        .unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, ids::RULE_COMPUTE_INSTANCE_CLASS);
        assert!(err.violations[0].message.contains("m4.large"));
    }

    #[test]
    fn ssh_key_is_rejected() {
        let tree = Tree::new();
        let mut props = current_type();
        props.ssh_key_name = Property::Value("ops-key".to_string());
        ComputeInstance::new(&tree.root(), "vm", props).unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, ids::RULE_COMPUTE_NO_SSH_KEY);
    }

    #[test]
    fn imdsv2_cleared_fails() {
        let tree = Tree::new();
        let mut props = current_type();
        props.require_imdsv2 = Property::Absent;
        ComputeInstance::new(&tree.root(), "vm", props).unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, ids::RULE_COMPUTE_IMDSV2);
    }

    #[test]
    fn missing_instance_type_fails() {
        let tree = Tree::new();
        ComputeInstance::new(&tree.root(), "vm", ComputeProps::default()).unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, ids::RULE_COMPUTE_INSTANCE_CLASS);
    }
}
