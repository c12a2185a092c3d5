//! Compliant encryption key: rotation stays on.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "crypto_key";

#[derive(Clone, Debug)]
pub struct CryptoKeyDefaults {
    pub rotation_enabled: bool,
}

pub fn defaults() -> CryptoKeyDefaults {
    CryptoKeyDefaults {
        rotation_enabled: true,
    }
}

#[derive(Clone, Debug, Default)]
pub struct CryptoKeyProps {
    pub rotation_enabled: Property<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CryptoKeyConfig {
    pub rotation_enabled: Setting<bool>,
}

impl Template for CryptoKeyDefaults {
    type Override = CryptoKeyProps;
    type Config = CryptoKeyConfig;

    fn merge(&self, overrides: CryptoKeyProps) -> CryptoKeyConfig {
        CryptoKeyConfig {
            rotation_enabled: overrides.rotation_enabled.merge(self.rotation_enabled),
        }
    }
}

fn check_rotation(cfg: &CryptoKeyConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.rotation_enabled.is_true() {
        Vec::new()
    } else {
        vec!["rotation_enabled must not be unset nor false".to_string()]
    }
}

pub fn rule_set() -> RuleSet<CryptoKeyConfig> {
    RuleSet::new(KIND, vec![Rule::new(ids::RULE_KEY_ROTATION, check_rotation)])
}

/// Compliant encryption key handle.
pub struct CryptoKey {
    scope: Scope,
    config: Rc<CryptoKeyConfig>,
    attributes: Attributes,
}

impl CryptoKey {
    pub fn new(parent: &Scope, id: &str, props: CryptoKeyProps) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &CryptoKeyConfig {
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
        CryptoKey::new(&tree.root(), "key", CryptoKeyProps::default()).unwrap();
        assert!(synthesize(&tree, &EnforcementPolicy::default()).is_ok());
    }

    #[test]
    fn rotation_off_fails_once() {
        let tree = Tree::new();
        CryptoKey::new(
            &tree.root(),
            "key",
            CryptoKeyProps {
                rotation_enabled: Property::Value(false),
            },
        )
        .unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, ids::RULE_KEY_ROTATION);
        assert!(err.violations[0].message.contains("rotation_enabled"));
    }

    #[test]
    fn rotation_cleared_fails_like_false() {
        let tree = Tree::new();
        CryptoKey::new(
            &tree.root(),
            "key",
            CryptoKeyProps {
                rotation_enabled: Property::Absent,
            },
        )
        .unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
    }
}
