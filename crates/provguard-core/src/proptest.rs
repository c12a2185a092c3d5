//! Property-based tests for the core engine.
//!
//! These tests use proptest to verify invariants around:
//! - REPLACE-merge resolution of tri-state properties
//! - Overlay last-write-wins semantics
//! - Violation ordering determinism

use crate::overlay::{Attributes, Seal};
use crate::policy::EnforcementPolicy;
use crate::property::{Property, Setting};
use crate::test_support::failing_resource;
use crate::tree::Tree;
use crate::{SynthesisError, synthesize};
use proptest::prelude::*;

fn arb_property() -> impl Strategy<Value = Property<u32>> {
    prop_oneof![
        Just(Property::Unset),
        Just(Property::Absent),
        any::<u32>().prop_map(Property::Value),
    ]
}

fn arb_key() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9_.]{0,15}").unwrap()
}

proptest! {
    #[test]
    fn merge_is_idempotent(p in arb_property(), default in any::<u32>()) {
        let first = p.merge(default);
        let second = p.merge(default);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn merge_never_invents_values(p in arb_property(), default in any::<u32>()) {
        match p.merge(default) {
            Setting::Value(v) => prop_assert!(v == default || Property::Value(v) == p),
            Setting::Absent => prop_assert_eq!(p, Property::Absent),
        }
    }

    #[test]
    fn overlay_last_write_wins(key in arb_key(), writes in prop::collection::vec(prop::option::of("[a-z0-9]{1,8}"), 1..8)) {
        let attrs = Attributes::new(Seal::default());
        for w in &writes {
            attrs.set(&key, w.as_deref()).unwrap();
        }
        prop_assert_eq!(attrs.get(&key), writes.last().cloned().flatten());
    }

    #[test]
    fn violation_report_is_sorted_whatever_the_attach_order(ids in prop::collection::btree_set("[a-z]{1,6}", 2..6)) {
        let tree = Tree::new();
        let root = tree.root();
        // attach in reverse order; the report must still come out sorted
        let ordered: Vec<String> = ids.iter().cloned().collect();
        for id in ids.iter().rev() {
            // leak is fine in tests: rule ids are &'static in the API
            let rule: &'static str = Box::leak(format!("test.{id}").into_boxed_str());
            failing_resource(&root, id, rule, "always fails");
        }
        let SynthesisError { violations } = synthesize(&tree, &EnforcementPolicy::default()).unwrap_err();
        let got: Vec<String> = violations.iter().map(|v| v.path.as_str().to_string()).collect();
        prop_assert_eq!(got, ordered);
    }
}
