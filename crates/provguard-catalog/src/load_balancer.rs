//! Compliant load balancer.
//!
//! Access logging is a post-construction call, so its state lives in the
//! attribute overlay and is judged at synthesis time: construct, call
//! [`LoadBalancer::enable_access_logs`], then synthesize. Construction
//! seeds the drop-invalid-headers attribute; only an explicit clear can
//! fail that rule.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "load_balancer";

pub const ATTR_ACCESS_LOGS_ENABLED: &str = "access_logs.enabled";
pub const ATTR_ACCESS_LOGS_DESTINATION: &str = "access_logs.destination";
pub const ATTR_DROP_INVALID_HEADERS: &str = "routing.drop_invalid_headers";

#[derive(Clone, Debug)]
pub struct LoadBalancerDefaults {
    pub deletion_protection: bool,
}

pub fn defaults() -> LoadBalancerDefaults {
    LoadBalancerDefaults {
        deletion_protection: true,
    }
}

#[derive(Clone, Debug, Default)]
pub struct LoadBalancerProps {
    pub deletion_protection: Property<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoadBalancerConfig {
    pub deletion_protection: Setting<bool>,
}

impl Template for LoadBalancerDefaults {
    type Override = LoadBalancerProps;
    type Config = LoadBalancerConfig;

    fn merge(&self, overrides: LoadBalancerProps) -> LoadBalancerConfig {
        LoadBalancerConfig {
            deletion_protection: overrides
                .deletion_protection
                .merge(self.deletion_protection),
        }
    }
}

fn check_access_logs(_cfg: &LoadBalancerConfig, attrs: &Attributes) -> Vec<String> {
    if attrs.is(ATTR_ACCESS_LOGS_ENABLED, "true") {
        Vec::new()
    } else {
        vec!["access logs not enabled: call enable_access_logs before synthesis".to_string()]
    }
}

fn check_drop_invalid_headers(_cfg: &LoadBalancerConfig, attrs: &Attributes) -> Vec<String> {
    if attrs.is(ATTR_DROP_INVALID_HEADERS, "true") {
        Vec::new()
    } else {
        vec!["not configured to drop invalid HTTP headers".to_string()]
    }
}

fn check_deletion_protection(cfg: &LoadBalancerConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.deletion_protection.is_true() {
        Vec::new()
    } else {
        vec!["deletion_protection must not be unset nor false".to_string()]
    }
}

pub fn rule_set() -> RuleSet<LoadBalancerConfig> {
    RuleSet::new(
        KIND,
        vec![
            Rule::new(ids::RULE_LOAD_BALANCER_ACCESS_LOGS, check_access_logs),
            Rule::new(
                ids::RULE_LOAD_BALANCER_DROP_INVALID_HEADERS,
                check_drop_invalid_headers,
            ),
            Rule::new(
                ids::RULE_LOAD_BALANCER_DELETION_PROTECTION,
                check_deletion_protection,
            ),
        ],
    )
}

/// Compliant load balancer handle.
pub struct LoadBalancer {
    scope: Scope,
    config: Rc<LoadBalancerConfig>,
    attributes: Attributes,
}

impl LoadBalancer {
    pub fn new(parent: &Scope, id: &str, props: LoadBalancerProps) -> Result<Self, ConfigError> {
        let scope = parent.child(id)?;
        let config = Rc::new(defaults().merge(props));
        let attributes = scope.attributes();
        attributes.set(ATTR_DROP_INVALID_HEADERS, Some("true"))?;
        register(&scope, &config, &attributes, rule_set())?;
        Ok(Self {
            scope,
            config,
            attributes,
        })
    }

    /// Raw attribute access; last write wins, `None` clears.
    pub fn set_attribute(&self, key: &str, value: Option<&str>) -> Result<(), ConfigError> {
        self.attributes.set(key, value)
    }

    /// Record an access-log destination and mark logging enabled.
    pub fn enable_access_logs(&self, destination: &str) -> Result<(), ConfigError> {
        self.attributes
            .set(ATTR_ACCESS_LOGS_DESTINATION, Some(destination))?;
        self.attributes.set(ATTR_ACCESS_LOGS_ENABLED, Some("true"))
    }

    pub fn config(&self) -> &LoadBalancerConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
