//! Compliant relational databases: the standalone instance and the cluster
//! composite.
//!
//! The cluster owns an embedded instance configuration: its template embeds
//! the instance template, the merge recurses, and the cluster's own rules
//! read the nested merged config directly rather than requiring the nested
//! shape to self-register.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const INSTANCE_KIND: &str = "database_instance";
const CLUSTER_KIND: &str = "database_cluster";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Production,
    NotProduction,
}

// ---------------------------------------------------------------------------
// standalone instance
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct DatabaseInstanceDefaults {
    pub publicly_accessible: bool,
    pub storage_encrypted: bool,
    pub iam_authentication: bool,
    pub auto_minor_version_upgrade: bool,
    pub copy_tags_to_snapshot: bool,
    pub deletion_protection: bool,
    pub multi_az: bool,
    pub environment: Environment,
}

pub fn instance_defaults() -> DatabaseInstanceDefaults {
    DatabaseInstanceDefaults {
        publicly_accessible: false,
        storage_encrypted: true,
        iam_authentication: true,
        auto_minor_version_upgrade: true,
        copy_tags_to_snapshot: true,
        deletion_protection: true,
        multi_az: true,
        environment: Environment::Production,
    }
}

#[derive(Clone, Debug, Default)]
pub struct DatabaseInstanceProps {
    pub publicly_accessible: Property<bool>,
    pub storage_encrypted: Property<bool>,
    pub iam_authentication: Property<bool>,
    pub auto_minor_version_upgrade: Property<bool>,
    pub copy_tags_to_snapshot: Property<bool>,
    pub deletion_protection: Property<bool>,
    pub multi_az: Property<bool>,
    pub environment: Property<Environment>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatabaseInstanceConfig {
    pub publicly_accessible: Setting<bool>,
    pub storage_encrypted: Setting<bool>,
    pub iam_authentication: Setting<bool>,
    pub auto_minor_version_upgrade: Setting<bool>,
    pub copy_tags_to_snapshot: Setting<bool>,
    pub deletion_protection: Setting<bool>,
    pub multi_az: Setting<bool>,
    pub environment: Setting<Environment>,
}

impl Template for DatabaseInstanceDefaults {
    type Override = DatabaseInstanceProps;
    type Config = DatabaseInstanceConfig;

    fn merge(&self, overrides: DatabaseInstanceProps) -> DatabaseInstanceConfig {
        DatabaseInstanceConfig {
            publicly_accessible: overrides
                .publicly_accessible
                .merge(self.publicly_accessible),
            storage_encrypted: overrides.storage_encrypted.merge(self.storage_encrypted),
            iam_authentication: overrides.iam_authentication.merge(self.iam_authentication),
            auto_minor_version_upgrade: overrides
                .auto_minor_version_upgrade
                .merge(self.auto_minor_version_upgrade),
            copy_tags_to_snapshot: overrides
                .copy_tags_to_snapshot
                .merge(self.copy_tags_to_snapshot),
            deletion_protection: overrides
                .deletion_protection
                .merge(self.deletion_protection),
            multi_az: overrides.multi_az.merge(self.multi_az),
            environment: overrides.environment.merge(self.environment),
        }
    }
}

fn must_be_false(setting: &Setting<bool>, field: &str) -> Vec<String> {
    if setting.is_false() {
        Vec::new()
    } else {
        vec![format!("{field} must not be unset nor true")]
    }
}

fn must_be_true(setting: &Setting<bool>, field: &str) -> Vec<String> {
    if setting.is_true() {
        Vec::new()
    } else {
        vec![format!("{field} must not be unset nor false")]
    }
}

fn check_publicly_accessible(cfg: &DatabaseInstanceConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_false(&cfg.publicly_accessible, "publicly_accessible")
}

fn check_storage_encrypted(cfg: &DatabaseInstanceConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_true(&cfg.storage_encrypted, "storage_encrypted")
}

fn check_iam_authentication(cfg: &DatabaseInstanceConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_true(&cfg.iam_authentication, "iam_authentication")
}

fn check_auto_minor_version_upgrade(
    cfg: &DatabaseInstanceConfig,
    _attrs: &Attributes,
) -> Vec<String> {
    must_be_true(&cfg.auto_minor_version_upgrade, "auto_minor_version_upgrade")
}

fn check_copy_tags_to_snapshot(cfg: &DatabaseInstanceConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_true(&cfg.copy_tags_to_snapshot, "copy_tags_to_snapshot")
}

fn check_deletion_protection(cfg: &DatabaseInstanceConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_true(&cfg.deletion_protection, "deletion_protection")
}

fn check_multi_az(cfg: &DatabaseInstanceConfig, _attrs: &Attributes) -> Vec<String> {
    // Only an explicit NotProduction tag relaxes the requirement.
    if cfg.environment.is(&Environment::NotProduction) || cfg.multi_az.is_true() {
        Vec::new()
    } else {
        vec!["production instances must be multi-AZ: multi_az must not be unset nor false".to_string()]
    }
}

pub fn instance_rule_set() -> RuleSet<DatabaseInstanceConfig> {
    RuleSet::new(
        INSTANCE_KIND,
        vec![
            Rule::new(ids::RULE_DATABASE_PUBLICLY_ACCESSIBLE, check_publicly_accessible),
            Rule::new(ids::RULE_DATABASE_STORAGE_ENCRYPTED, check_storage_encrypted),
            Rule::new(ids::RULE_DATABASE_IAM_AUTHENTICATION, check_iam_authentication),
            Rule::new(
                ids::RULE_DATABASE_AUTO_MINOR_VERSION_UPGRADE,
                check_auto_minor_version_upgrade,
            ),
            Rule::new(ids::RULE_DATABASE_COPY_TAGS_TO_SNAPSHOT, check_copy_tags_to_snapshot),
            Rule::new(ids::RULE_DATABASE_DELETION_PROTECTION, check_deletion_protection),
            Rule::new(ids::RULE_DATABASE_MULTI_AZ, check_multi_az),
        ],
    )
}

/// Compliant database instance handle.
pub struct DatabaseInstance {
    scope: Scope,
    config: Rc<DatabaseInstanceConfig>,
    attributes: Attributes,
}

impl DatabaseInstance {
    pub fn new(
        parent: &Scope,
        id: &str,
        props: DatabaseInstanceProps,
    ) -> Result<Self, ConfigError> {
        let scope = parent.child(id)?;
        let config = Rc::new(instance_defaults().merge(props));
        let attributes = scope.attributes();
        register(&scope, &config, &attributes, instance_rule_set())?;
        Ok(Self {
            scope,
            config,
            attributes,
        })
    }

    pub fn config(&self) -> &DatabaseInstanceConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}

// ---------------------------------------------------------------------------
// cluster composite
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct ClusterInstanceDefaults {
    pub publicly_accessible: bool,
    pub auto_minor_version_upgrade: bool,
}

#[derive(Clone, Debug, Default)]
pub struct ClusterInstanceProps {
    pub publicly_accessible: Property<bool>,
    pub auto_minor_version_upgrade: Property<bool>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClusterInstanceConfig {
    pub publicly_accessible: Setting<bool>,
    pub auto_minor_version_upgrade: Setting<bool>,
}

impl Template for ClusterInstanceDefaults {
    type Override = ClusterInstanceProps;
    type Config = ClusterInstanceConfig;

    fn merge(&self, overrides: ClusterInstanceProps) -> ClusterInstanceConfig {
        ClusterInstanceConfig {
            publicly_accessible: overrides
                .publicly_accessible
                .merge(self.publicly_accessible),
            auto_minor_version_upgrade: overrides
                .auto_minor_version_upgrade
                .merge(self.auto_minor_version_upgrade),
        }
    }
}

#[derive(Clone, Debug)]
pub struct DatabaseClusterDefaults {
    pub storage_encrypted: bool,
    pub iam_authentication: bool,
    pub copy_tags_to_snapshot: bool,
    pub deletion_protection: bool,
    pub instances: ClusterInstanceDefaults,
}

pub fn cluster_defaults() -> DatabaseClusterDefaults {
    DatabaseClusterDefaults {
        storage_encrypted: true,
        iam_authentication: true,
        copy_tags_to_snapshot: true,
        deletion_protection: true,
        instances: ClusterInstanceDefaults {
            publicly_accessible: false,
            auto_minor_version_upgrade: true,
        },
    }
}

#[derive(Clone, Debug, Default)]
pub struct DatabaseClusterProps {
    pub storage_encrypted: Property<bool>,
    pub iam_authentication: Property<bool>,
    pub copy_tags_to_snapshot: Property<bool>,
    pub deletion_protection: Property<bool>,
    /// Embedded instance configuration, merged DEEP.
    pub instances: ClusterInstanceProps,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DatabaseClusterConfig {
    pub storage_encrypted: Setting<bool>,
    pub iam_authentication: Setting<bool>,
    pub copy_tags_to_snapshot: Setting<bool>,
    pub deletion_protection: Setting<bool>,
    pub instances: ClusterInstanceConfig,
}

impl Template for DatabaseClusterDefaults {
    type Override = DatabaseClusterProps;
    type Config = DatabaseClusterConfig;

    fn merge(&self, overrides: DatabaseClusterProps) -> DatabaseClusterConfig {
        DatabaseClusterConfig {
            storage_encrypted: overrides.storage_encrypted.merge(self.storage_encrypted),
            iam_authentication: overrides.iam_authentication.merge(self.iam_authentication),
            copy_tags_to_snapshot: overrides
                .copy_tags_to_snapshot
                .merge(self.copy_tags_to_snapshot),
            deletion_protection: overrides
                .deletion_protection
                .merge(self.deletion_protection),
            instances: self.instances.merge(overrides.instances),
        }
    }
}

fn check_cluster_storage_encrypted(cfg: &DatabaseClusterConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_true(&cfg.storage_encrypted, "storage_encrypted")
}

fn check_cluster_iam_authentication(
    cfg: &DatabaseClusterConfig,
    _attrs: &Attributes,
) -> Vec<String> {
    must_be_true(&cfg.iam_authentication, "iam_authentication")
}

fn check_cluster_copy_tags(cfg: &DatabaseClusterConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_true(&cfg.copy_tags_to_snapshot, "copy_tags_to_snapshot")
}

fn check_cluster_deletion_protection(
    cfg: &DatabaseClusterConfig,
    _attrs: &Attributes,
) -> Vec<String> {
    must_be_true(&cfg.deletion_protection, "deletion_protection")
}

fn check_cluster_instance_public(cfg: &DatabaseClusterConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_false(
        &cfg.instances.publicly_accessible,
        "instances.publicly_accessible",
    )
}

fn check_cluster_instance_upgrade(cfg: &DatabaseClusterConfig, _attrs: &Attributes) -> Vec<String> {
    must_be_true(
        &cfg.instances.auto_minor_version_upgrade,
        "instances.auto_minor_version_upgrade",
    )
}

pub fn cluster_rule_set() -> RuleSet<DatabaseClusterConfig> {
    RuleSet::new(
        CLUSTER_KIND,
        vec![
            Rule::new(ids::RULE_CLUSTER_STORAGE_ENCRYPTED, check_cluster_storage_encrypted),
            Rule::new(ids::RULE_CLUSTER_IAM_AUTHENTICATION, check_cluster_iam_authentication),
            Rule::new(ids::RULE_CLUSTER_COPY_TAGS_TO_SNAPSHOT, check_cluster_copy_tags),
            Rule::new(ids::RULE_CLUSTER_DELETION_PROTECTION, check_cluster_deletion_protection),
            Rule::new(
                ids::RULE_CLUSTER_INSTANCE_PUBLICLY_ACCESSIBLE,
                check_cluster_instance_public,
            ),
            Rule::new(
                ids::RULE_CLUSTER_INSTANCE_AUTO_MINOR_VERSION_UPGRADE,
                check_cluster_instance_upgrade,
            ),
        ],
    )
}

/// Compliant database cluster handle.
pub struct DatabaseCluster {
    scope: Scope,
    config: Rc<DatabaseClusterConfig>,
    attributes: Attributes,
}

impl DatabaseCluster {
    pub fn new(
        parent: &Scope,
        id: &str,
        props: DatabaseClusterProps,
    ) -> Result<Self, ConfigError> {
        let scope = parent.child(id)?;
        let config = Rc::new(cluster_defaults().merge(props));
        let attributes = scope.attributes();
        register(&scope, &config, &attributes, cluster_rule_set())?;
        Ok(Self {
            scope,
            config,
            attributes,
        })
    }

    pub fn config(&self) -> &DatabaseClusterConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
