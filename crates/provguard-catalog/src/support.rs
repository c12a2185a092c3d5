use provguard_core::{Attributes, ConfigError, EnforcementPolicy, RuleSet, Scope};
use serde::Serialize;
use std::rc::Rc;

/// Register one resource node: snapshot the merged config for the manifest
/// and wire the kind's rule set into a deferred validation closure. The
/// closure captures the immutable config and the overlay handle; nothing
/// else mutable.
pub(crate) fn register<C: Serialize + 'static>(
    scope: &Scope,
    config: &Rc<C>,
    attributes: &Attributes,
    rules: RuleSet<C>,
) -> Result<(), ConfigError> {
    let kind = rules.kind();
    let snapshot = serde_json::to_value(config.as_ref())?;
    let validate = {
        let config = Rc::clone(config);
        let attributes = attributes.clone();
        let path = scope.path();
        move |policy: &EnforcementPolicy| rules.evaluate(policy, &path, &config, &attributes)
    };
    scope.register_resource(kind, snapshot, attributes.clone(), validate)
}
