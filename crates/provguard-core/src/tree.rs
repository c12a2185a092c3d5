//! The construct tree: a hierarchical registry of resources and their
//! deferred validation closures.
//!
//! Construction attaches nodes and registers closures; nothing is evaluated
//! until [`crate::synthesize`] walks the tree. Closures capture immutable
//! merged-config snapshots plus an [`Attributes`] handle; the overlay is
//! the only sanctioned post-registration mutation path.

use crate::error::ConfigError;
use crate::overlay::{Attributes, Seal};
use crate::policy::EnforcementPolicy;
use provguard_types::{NodePath, Violation};
use serde_json::Value as JsonValue;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

pub(crate) struct Registration {
    pub(crate) kind: &'static str,
    pub(crate) config: JsonValue,
    pub(crate) attributes: Attributes,
    pub(crate) validate: Box<dyn Fn(&EnforcementPolicy) -> Vec<Violation>>,
}

pub(crate) struct Node {
    pub(crate) path: NodePath,
    pub(crate) children: Vec<String>,
    pub(crate) registration: Option<Registration>,
}

pub(crate) struct TreeState {
    pub(crate) nodes: Vec<Node>,
}

/// The shared construct tree. Handles are cheap clones; the tree is built
/// single-threaded during a construction pass and walked once at synthesis.
#[derive(Clone)]
pub struct Tree {
    state: Rc<RefCell<TreeState>>,
    seal: Seal,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl Tree {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(TreeState {
                nodes: vec![Node {
                    path: NodePath::root(),
                    children: Vec::new(),
                    registration: None,
                }],
            })),
            seal: Seal::default(),
        }
    }

    /// Scope of the root node; resources attach beneath it.
    pub fn root(&self) -> Scope {
        Scope {
            tree: self.clone(),
            node: 0,
        }
    }

    pub(crate) fn seal(&self) -> &Seal {
        &self.seal
    }

    pub(crate) fn state(&self) -> &Rc<RefCell<TreeState>> {
        &self.state
    }

    fn attach(&self, parent: usize, id: &str) -> Result<usize, ConfigError> {
        let mut state = self.state.borrow_mut();
        let parent_node = &state.nodes[parent];
        if id.is_empty() {
            return Err(ConfigError::EmptyId {
                parent: parent_node.path.clone(),
            });
        }
        if parent_node.children.iter().any(|c| c == id) {
            return Err(ConfigError::DuplicateChild {
                parent: parent_node.path.clone(),
                id: id.to_string(),
            });
        }
        let path = parent_node.path.join(id);
        debug!(node = %path, "attached construct node");
        state.nodes[parent].children.push(id.to_string());
        state.nodes.push(Node {
            path,
            children: Vec::new(),
            registration: None,
        });
        Ok(state.nodes.len() - 1)
    }
}

/// Identifies one node in the tree; resource constructors take a parent
/// scope and return handles exposing their own.
#[derive(Clone)]
pub struct Scope {
    tree: Tree,
    node: usize,
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("node", &self.node)
            .field("path", &self.path())
            .finish()
    }
}

impl Scope {
    pub fn path(&self) -> NodePath {
        self.tree.state.borrow().nodes[self.node].path.clone()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Attach a child node. Fails immediately on an empty or duplicate
    /// sibling id, which is a structural problem rather than a policy
    /// violation.
    pub fn child(&self, id: &str) -> Result<Scope, ConfigError> {
        let node = self.tree.attach(self.node, id)?;
        Ok(Scope {
            tree: self.tree.clone(),
            node,
        })
    }

    /// A fresh attribute overlay wired to this tree's seal.
    pub fn attributes(&self) -> Attributes {
        Attributes::new(self.tree.seal.clone())
    }

    /// Register this node's resource: its kind, the immutable config
    /// snapshot for the manifest, its overlay, and the single validation
    /// closure. The closure is not invoked here.
    pub fn register_resource(
        &self,
        kind: &'static str,
        config: JsonValue,
        attributes: Attributes,
        validate: impl Fn(&EnforcementPolicy) -> Vec<Violation> + 'static,
    ) -> Result<(), ConfigError> {
        let mut state = self.tree.state.borrow_mut();
        let node = &mut state.nodes[self.node];
        if node.registration.is_some() {
            return Err(ConfigError::AlreadyRegistered {
                path: node.path.clone(),
            });
        }
        node.registration = Some(Registration {
            kind,
            config,
            attributes,
            validate: Box::new(validate),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_builds_nested_paths() {
        let tree = Tree::new();
        let app = tree.root().child("app").unwrap();
        let db = app.child("db").unwrap();
        assert_eq!(db.path(), NodePath::new("app/db"));
    }

    #[test]
    fn duplicate_sibling_id_is_a_config_error() {
        let tree = Tree::new();
        let root = tree.root();
        root.child("bucket").unwrap();
        let err = root.child("bucket").unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateChild { .. }));
    }

    #[test]
    fn same_id_under_different_parents_is_fine() {
        let tree = Tree::new();
        let a = tree.root().child("a").unwrap();
        let b = tree.root().child("b").unwrap();
        a.child("db").unwrap();
        b.child("db").unwrap();
    }

    #[test]
    fn empty_id_is_a_config_error() {
        let tree = Tree::new();
        let err = tree.root().child("").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyId { .. }));
    }

    #[test]
    fn a_node_registers_exactly_one_resource() {
        let tree = Tree::new();
        let scope = tree.root().child("q").unwrap();
        let attrs = scope.attributes();
        scope
            .register_resource("queue", serde_json::json!({}), attrs.clone(), |_| Vec::new())
            .unwrap();
        let err = scope
            .register_resource("queue", serde_json::json!({}), attrs, |_| Vec::new())
            .unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyRegistered { .. }));
    }
}
