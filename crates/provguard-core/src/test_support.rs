use crate::policy::EnforcementPolicy;
use crate::tree::Scope;
use provguard_types::Violation;

/// Attach a resource whose single rule always fires (unless disabled).
pub fn failing_resource(scope: &Scope, id: &str, rule: &'static str, message: &'static str) {
    let s = scope.child(id).unwrap();
    let attrs = s.attributes();
    let path = s.path();
    s.register_resource(
        "test",
        serde_json::json!({}),
        attrs,
        move |policy: &EnforcementPolicy| {
            if !policy.is_enforced(rule) {
                return Vec::new();
            }
            vec![Violation::new(path.clone(), rule, message)]
        },
    )
    .unwrap();
}

/// Attach a resource that never produces violations.
pub fn passing_resource(scope: &Scope, id: &str) {
    let s = scope.child(id).unwrap();
    let attrs = s.attributes();
    s.register_resource("test", serde_json::json!({}), attrs, |_| Vec::new())
        .unwrap();
}
