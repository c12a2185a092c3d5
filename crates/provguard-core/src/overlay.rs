//! Post-construction attribute overlay.
//!
//! Some compliance-relevant state is set via calls on an already-constructed
//! resource rather than initial configuration (an access-log destination on
//! a load balancer, a backup-plan tag). Rules read this overlay at
//! evaluation time, so whatever state exists when synthesis runs is what is
//! judged. Mutation after the tree seals is a [`ConfigError`], which gives
//! the single-writer-before-reader discipline without locks.

use crate::error::ConfigError;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Shared seal flag: set while synthesis walks the tree, and permanently
/// once a synthesis succeeds.
#[derive(Clone, Debug, Default)]
pub(crate) struct Seal(Rc<Cell<bool>>);

impl Seal {
    pub(crate) fn is_sealed(&self) -> bool {
        self.0.get()
    }

    pub(crate) fn seal(&self) {
        self.0.set(true);
    }

    pub(crate) fn unseal(&self) {
        self.0.set(false);
    }
}

/// Mutable key/value state owned by one resource instance.
///
/// Last write wins; a value may be explicitly cleared by setting `None`.
/// Handles are cheap clones sharing the same state.
#[derive(Clone, Debug)]
pub struct Attributes {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
    seal: Seal,
}

impl Attributes {
    pub(crate) fn new(seal: Seal) -> Self {
        Self {
            entries: Rc::new(RefCell::new(BTreeMap::new())),
            seal,
        }
    }

    /// Set or clear one attribute. Fails once the tree is sealed.
    pub fn set(&self, key: &str, value: Option<&str>) -> Result<(), ConfigError> {
        if self.seal.is_sealed() {
            return Err(ConfigError::Sealed);
        }
        let mut entries = self.entries.borrow_mut();
        match value {
            Some(v) => {
                entries.insert(key.to_string(), v.to_string());
            }
            None => {
                entries.remove(key);
            }
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// True when the attribute holds exactly `expected`.
    pub fn is(&self, key: &str, expected: &str) -> bool {
        self.entries.borrow().get(key).map(String::as_str) == Some(expected)
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let attrs = Attributes::new(Seal::default());
        attrs.set("access_logs.enabled", Some("false")).unwrap();
        attrs.set("access_logs.enabled", Some("true")).unwrap();
        assert_eq!(attrs.get("access_logs.enabled").as_deref(), Some("true"));
    }

    #[test]
    fn clearing_removes_the_entry() {
        let attrs = Attributes::new(Seal::default());
        attrs.set("backup.plan", Some("Standard")).unwrap();
        attrs.set("backup.plan", None).unwrap();
        assert_eq!(attrs.get("backup.plan"), None);
        assert!(attrs.snapshot().is_empty());
    }

    #[test]
    fn sealed_overlay_rejects_writes() {
        let seal = Seal::default();
        let attrs = Attributes::new(seal.clone());
        seal.seal();
        let err = attrs.set("k", Some("v")).unwrap_err();
        assert!(matches!(err, ConfigError::Sealed));
        // reads still work
        assert_eq!(attrs.get("k"), None);
    }

    #[test]
    fn handles_share_state() {
        let attrs = Attributes::new(Seal::default());
        let other = attrs.clone();
        attrs.set("routing.drop_invalid_headers", Some("true")).unwrap();
        assert!(other.is("routing.drop_invalid_headers", "true"));
    }
}
