//! Compliant notification topic: encrypted with a named key.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "topic";

/// Topics carry no defaulted policy fields; the encryption key has no
/// sensible organization-wide default and must be supplied per topic.
#[derive(Clone, Debug)]
pub struct TopicDefaults;

pub fn defaults() -> TopicDefaults {
    TopicDefaults
}

#[derive(Clone, Debug, Default)]
pub struct TopicProps {
    pub encryption_key: Property<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopicConfig {
    pub encryption_key: Setting<String>,
}

impl Template for TopicDefaults {
    type Override = TopicProps;
    type Config = TopicConfig;

    fn merge(&self, overrides: TopicProps) -> TopicConfig {
        TopicConfig {
            encryption_key: overrides.encryption_key.merge_optional(),
        }
    }
}

fn check_encryption_key(cfg: &TopicConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.encryption_key.is_absent() {
        vec!["encryption_key must be configured".to_string()]
    } else {
        Vec::new()
    }
}

pub fn rule_set() -> RuleSet<TopicConfig> {
    RuleSet::new(
        KIND,
        vec![Rule::new(ids::RULE_TOPIC_ENCRYPTION_KEY, check_encryption_key)],
    )
}

/// Compliant topic handle.
pub struct Topic {
    scope: Scope,
    config: Rc<TopicConfig>,
    attributes: Attributes,
}

impl Topic {
    pub fn new(parent: &Scope, id: &str, props: TopicProps) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &TopicConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
