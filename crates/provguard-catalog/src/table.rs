//! Key-value table.
//!
//! Tables carry no hard policy rules. Provisioned billing is allowed but
//! tracked: construction seeds an overlay tag so downstream tooling can see
//! the choice was deliberate (pay-per-request is the recommendation).

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, RuleSet, Scope, Setting, Template};
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "table";

pub const ATTR_PROVISIONED_ALLOWED: &str = "billing.provisioned_allowed";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingMode {
    Provisioned,
    PayPerRequest,
}

#[derive(Clone, Debug)]
pub struct TableDefaults;

pub fn defaults() -> TableDefaults {
    TableDefaults
}

#[derive(Clone, Debug, Default)]
pub struct TableProps {
    pub billing_mode: Property<BillingMode>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableConfig {
    pub billing_mode: Setting<BillingMode>,
}

impl Template for TableDefaults {
    type Override = TableProps;
    type Config = TableConfig;

    fn merge(&self, overrides: TableProps) -> TableConfig {
        TableConfig {
            billing_mode: overrides.billing_mode.merge_optional(),
        }
    }
}

pub fn rule_set() -> RuleSet<TableConfig> {
    RuleSet::new(KIND, Vec::new())
}

/// Table handle.
pub struct Table {
    scope: Scope,
    config: Rc<TableConfig>,
    attributes: Attributes,
}

impl Table {
    pub fn new(parent: &Scope, id: &str, props: TableProps) -> Result<Self, ConfigError> {
        let scope = parent.child(id)?;
        let config = Rc::new(defaults().merge(props));
        let attributes = scope.attributes();
        match config.billing_mode.value() {
            Some(BillingMode::Provisioned) | None => {
                attributes.set(ATTR_PROVISIONED_ALLOWED, Some("true"))?;
            }
            Some(BillingMode::PayPerRequest) => {}
        }
        register(&scope, &config, &attributes, rule_set())?;
        Ok(Self {
            scope,
            config,
            attributes,
        })
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }
}
