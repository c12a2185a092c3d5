//! Compliant message queue: encrypted at rest.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "queue";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueEncryption {
    Unencrypted,
    KeyManaged,
    CustomerKey,
}

#[derive(Clone, Debug)]
pub struct QueueDefaults {
    pub encryption: QueueEncryption,
}

pub fn defaults() -> QueueDefaults {
    QueueDefaults {
        encryption: QueueEncryption::KeyManaged,
    }
}

#[derive(Clone, Debug, Default)]
pub struct QueueProps {
    pub encryption: Property<QueueEncryption>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueueConfig {
    pub encryption: Setting<QueueEncryption>,
}

impl Template for QueueDefaults {
    type Override = QueueProps;
    type Config = QueueConfig;

    fn merge(&self, overrides: QueueProps) -> QueueConfig {
        QueueConfig {
            encryption: overrides.encryption.merge(self.encryption),
        }
    }
}

fn check_encryption(cfg: &QueueConfig, _attrs: &Attributes) -> Vec<String> {
    match cfg.encryption.value() {
        Some(QueueEncryption::Unencrypted) | None => {
            vec!["queue must be encrypted: encryption must not be unset nor unencrypted".to_string()]
        }
        Some(_) => Vec::new(),
    }
}

pub fn rule_set() -> RuleSet<QueueConfig> {
    RuleSet::new(
        KIND,
        vec![Rule::new(ids::RULE_QUEUE_ENCRYPTION, check_encryption)],
    )
}

/// Compliant queue handle.
pub struct Queue {
    scope: Scope,
    config: Rc<QueueConfig>,
    attributes: Attributes,
}

impl Queue {
    pub fn new(parent: &Scope, id: &str, props: QueueProps) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
