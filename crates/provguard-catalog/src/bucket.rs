//! Compliant storage bucket: transport encryption enforced, public access
//! blocked, encrypted at rest.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "bucket";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicAccess {
    BlockAll,
    BlockAcls,
    Allow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketEncryption {
    Unencrypted,
    ServiceManaged,
    KeyManaged,
}

/// Organization default template. Loaded once per kind, read-only.
#[derive(Clone, Debug)]
pub struct BucketDefaults {
    pub enforce_transport_encryption: bool,
    pub public_access: PublicAccess,
    pub encryption: BucketEncryption,
}

pub fn defaults() -> BucketDefaults {
    BucketDefaults {
        enforce_transport_encryption: true,
        public_access: PublicAccess::BlockAll,
        encryption: BucketEncryption::ServiceManaged,
    }
}

/// Caller-supplied overrides; every field optional.
#[derive(Clone, Debug, Default)]
pub struct BucketProps {
    pub enforce_transport_encryption: Property<bool>,
    pub public_access: Property<PublicAccess>,
    pub encryption: Property<BucketEncryption>,
}

/// Merged configuration, computed once at construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BucketConfig {
    pub enforce_transport_encryption: Setting<bool>,
    pub public_access: Setting<PublicAccess>,
    pub encryption: Setting<BucketEncryption>,
}

impl Template for BucketDefaults {
    type Override = BucketProps;
    type Config = BucketConfig;

    fn merge(&self, overrides: BucketProps) -> BucketConfig {
        BucketConfig {
            enforce_transport_encryption: overrides
                .enforce_transport_encryption
                .merge(self.enforce_transport_encryption),
            public_access: overrides.public_access.merge(self.public_access),
            encryption: overrides.encryption.merge(self.encryption),
        }
    }
}

fn check_transport_encryption(cfg: &BucketConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.enforce_transport_encryption.is_true() {
        Vec::new()
    } else {
        vec!["enforce_transport_encryption must not be unset nor false".to_string()]
    }
}

fn check_public_access(cfg: &BucketConfig, _attrs: &Attributes) -> Vec<String> {
    if cfg.public_access.is(&PublicAccess::BlockAll) {
        Vec::new()
    } else {
        vec!["public_access must be block_all".to_string()]
    }
}

fn check_encryption(cfg: &BucketConfig, _attrs: &Attributes) -> Vec<String> {
    match cfg.encryption.value() {
        Some(BucketEncryption::Unencrypted) | None => {
            vec!["bucket must be encrypted: encryption must not be unset nor unencrypted".to_string()]
        }
        Some(_) => Vec::new(),
    }
}

pub fn rule_set() -> RuleSet<BucketConfig> {
    RuleSet::new(
        KIND,
        vec![
            Rule::new(ids::RULE_BUCKET_TRANSPORT_ENCRYPTION, check_transport_encryption),
            Rule::new(ids::RULE_BUCKET_PUBLIC_ACCESS, check_public_access),
            Rule::new(ids::RULE_BUCKET_ENCRYPTION, check_encryption),
        ],
    )
}

/// Compliant storage bucket handle.
#[derive(Debug)]
pub struct Bucket {
    scope: Scope,
    config: Rc<BucketConfig>,
    attributes: Attributes,
}

impl Bucket {
    pub fn new(parent: &Scope, id: &str, props: BucketProps) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &BucketConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
