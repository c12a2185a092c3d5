//! Compliant content distribution: no plaintext viewers anywhere, access
//! logging on, a web ACL attached.
//!
//! The behavior template is embedded in the distribution template: the
//! default behavior and every additional behavior merge DEEP against it, so
//! overriding one behavior field preserves its sibling defaults. The
//! protocol rule fans out over the additional-behavior map.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::collections::BTreeMap;
use std::rc::Rc;

const KIND: &str = "distribution";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerProtocol {
    AllowAll,
    RedirectToHttps,
    HttpsOnly,
}

/// Default sub-record embedded in the distribution template.
#[derive(Clone, Debug)]
pub struct BehaviorDefaults {
    pub viewer_protocol: ViewerProtocol,
}

#[derive(Clone, Debug, Default)]
pub struct BehaviorProps {
    pub origin: Property<String>,
    pub viewer_protocol: Property<ViewerProtocol>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BehaviorConfig {
    pub origin: Setting<String>,
    pub viewer_protocol: Setting<ViewerProtocol>,
}

impl Template for BehaviorDefaults {
    type Override = BehaviorProps;
    type Config = BehaviorConfig;

    fn merge(&self, overrides: BehaviorProps) -> BehaviorConfig {
        BehaviorConfig {
            origin: overrides.origin.merge_optional(),
            viewer_protocol: overrides.viewer_protocol.merge(self.viewer_protocol),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DistributionDefaults {
    pub default_root_object: String,
    pub logging_enabled: bool,
    pub behavior: BehaviorDefaults,
}

pub fn defaults() -> DistributionDefaults {
    DistributionDefaults {
        default_root_object: "index.html".to_string(),
        logging_enabled: true,
        behavior: BehaviorDefaults {
            viewer_protocol: ViewerProtocol::RedirectToHttps,
        },
    }
}

#[derive(Clone, Debug, Default)]
pub struct DistributionProps {
    pub default_root_object: Property<String>,
    pub logging_enabled: Property<bool>,
    pub web_acl: Property<String>,
    pub default_behavior: BehaviorProps,
    pub additional_behaviors: BTreeMap<String, BehaviorProps>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DistributionConfig {
    pub default_root_object: Setting<String>,
    pub logging_enabled: Setting<bool>,
    pub web_acl: Setting<String>,
    pub default_behavior: BehaviorConfig,
    pub additional_behaviors: BTreeMap<String, BehaviorConfig>,
}

impl Template for DistributionDefaults {
    type Override = DistributionProps;
    type Config = DistributionConfig;

    fn merge(&self, overrides: DistributionProps) -> DistributionConfig {
        DistributionConfig {
            default_root_object: overrides
                .default_root_object
                .merge(self.default_root_object.clone()),
            logging_enabled: overrides.logging_enabled.merge(self.logging_enabled),
            web_acl: overrides.web_acl.merge_optional(),
            default_behavior: self.behavior.merge(overrides.default_behavior),
            additional_behaviors: overrides
                .additional_behaviors
                .into_iter()
                .map(|(key, props)| (key, self.behavior.merge(props)))
                .collect(),
        }
    }
}

fn behavior_protocol_message(cfg: &BehaviorConfig) -> Option<String> {
    match cfg.viewer_protocol.value() {
        Some(ViewerProtocol::AllowAll) | None => {
            Some("viewer_protocol must not be unset nor allow_all".to_string())
        }
        Some(_) => None,
    }
}

fn check_protocol_policy(cfg: &DistributionConfig, _attrs: &Attributes) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(msg) = behavior_protocol_message(&cfg.default_behavior) {
        out.push(format!("default behavior: {msg}"));
    }
    for (key, behavior) in &cfg.additional_behaviors {
        if let Some(msg) = behavior_protocol_message(behavior) {
            out.push(format!("additional behavior '{key}': {msg}"));
        }
    }
    out
}

fn check_logging(cfg: &DistributionConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.logging_enabled.is_true() {
        Vec::new()
    } else {
        vec!["logging_enabled must not be unset nor false".to_string()]
    }
}

fn check_web_acl(cfg: &DistributionConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.web_acl.is_absent() {
        vec!["web_acl must be configured".to_string()]
    } else {
        Vec::new()
    }
}

pub fn rule_set() -> RuleSet<DistributionConfig> {
    RuleSet::new(
        KIND,
        vec![
            Rule::new(ids::RULE_DISTRIBUTION_PROTOCOL_POLICY, check_protocol_policy),
            Rule::new(ids::RULE_DISTRIBUTION_LOGGING, check_logging),
            Rule::new(ids::RULE_DISTRIBUTION_WEB_ACL, check_web_acl),
        ],
    )
}

/// Compliant distribution handle.
pub struct Distribution {
    scope: Scope,
    config: Rc<DistributionConfig>,
    attributes: Attributes,
}

impl Distribution {
    pub fn new(parent: &Scope, id: &str, props: DistributionProps) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &DistributionConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
