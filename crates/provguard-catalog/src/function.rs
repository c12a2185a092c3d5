//! Compliant serverless function: deny-listed runtimes are rejected at
//! synthesis, with the replacement named in the message.

use crate::support::register;
use provguard_core::{Attributes, ConfigError, Property, Rule, RuleSet, Scope, Setting, Template};
use provguard_types::ids;
use serde::Serialize;
use std::rc::Rc;

const KIND: &str = "function";

/// Deprecated runtime -> recommended replacement.
pub fn runtime_upgrades() -> &'static [(&'static str, &'static str)] {
    &[
        ("nodejs12", "nodejs20"),
        ("nodejs14", "nodejs20"),
        ("nodejs16", "nodejs20"),
        ("python3.7", "python3.12"),
        ("python3.8", "python3.12"),
        ("python3.9", "python3.12"),
        ("java8", "java21"),
        ("java11", "java21"),
        ("ruby2.7", "ruby3.3"),
        ("dotnet6", "dotnet8"),
    ]
}

fn replacement_for(runtime: &str) -> Option<&'static str> {
    runtime_upgrades()
        .iter()
        .find(|(deprecated, _)| *deprecated == runtime)
        .map(|(_, replacement)| *replacement)
}

/// Functions have no defaulted policy fields; the runtime is the caller's
/// choice and is judged against the deny-list.
#[derive(Clone, Debug)]
pub struct FunctionDefaults;

pub fn defaults() -> FunctionDefaults {
    FunctionDefaults
}

#[derive(Clone, Debug, Default)]
pub struct FunctionProps {
    pub runtime: Property<String>,
    pub handler: Property<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FunctionConfig {
    pub runtime: Setting<String>,
    pub handler: Setting<String>,
}

impl Template for FunctionDefaults {
    type Override = FunctionProps;
    type Config = FunctionConfig;

    fn merge(&self, overrides: FunctionProps) -> FunctionConfig {
        FunctionConfig {
            runtime: overrides.runtime.merge_optional(),
            handler: overrides.handler.merge_optional(),
        }
    }
}

fn check_runtime(cfg: &FunctionConfig, _attrs: &Attributes) -> Vec<String> {
    match cfg.runtime.value() {
        None => vec!["runtime must be configured".to_string()],
        Some(runtime) => match replacement_for(runtime) {
            Some(replacement) => vec![format!(
                "runtime must be the latest available for its language: found {runtime}, use {replacement} instead"
            )],
            None => Vec::new(),
        },
    }
}

pub fn rule_set() -> RuleSet<FunctionConfig> {
    RuleSet::new(
        KIND,
        vec![Rule::new(ids::RULE_FUNCTION_RUNTIME, check_runtime)],
    )
}

/// Compliant function handle.
pub struct Function {
    scope: Scope,
    config: Rc<FunctionConfig>,
    attributes: Attributes,
}

impl Function {
    pub fn new(parent: &Scope, id: &str, props: FunctionProps) -> Result<Self, ConfigError> {
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

    pub fn config(&self) -> &FunctionConfig {
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
    fn current_runtime_passes() {
        let tree = Tree::new();
        Function::new(
            &tree.root(),
            "fn",
            FunctionProps {
                runtime: Property::Value("nodejs20".to_string()),
                handler: Property::Value("index.handler".to_string()),
            },
        )
        .unwrap();
        assert!(synthesize(&tree, &EnforcementPolicy::default()).is_ok());
    }

    #[test]
    fn deprecated_runtime_names_value_and_replacement() {
        let tree = Tree::new();
        Function::new(
            &tree.root(),
            "fn",
            FunctionProps {
                runtime: Property::Value("python3.8".to_string()),
                ..FunctionProps::default()
            },
        )
        .unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert_eq!(err.violations[0].rule, ids::RULE_FUNCTION_RUNTIME);
        assert!(err.violations[0].message.contains("python3.8"));
        assert!(err.violations[0].message.contains("python3.12"));
    }

    #[test]
    fn missing_runtime_fails() {
        let tree = Tree::new();
        Function::new(&tree.root(), "fn", FunctionProps::default()).unwrap();
        let err = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        assert_eq!(err.violations.len(), 1);
        assert!(err.violations[0].message.contains("runtime must be configured"));
    }

    #[test]
    fn construction_never_rejects_a_deprecated_runtime() {
        // the check is deferred like every other rule
        let tree = Tree::new();
        let result = Function::new(
            &tree.root(),
            "fn",
            FunctionProps {
                runtime: Property::Value("java8".to_string()),
                ..FunctionProps::default()
            },
        );
        assert!(result.is_ok());
    }
}
