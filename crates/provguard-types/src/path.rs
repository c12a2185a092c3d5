use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Canonical construct-tree path used in violations and manifest records.
///
/// Normalization rules are intentionally simple and deterministic:
/// - segments joined with `/`
/// - no leading or trailing `/`
/// - the root is the empty path, printed as `<root>`
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct NodePath(String);

impl Default for NodePath {
    fn default() -> Self {
        NodePath::root()
    }
}

impl NodePath {
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let v = s
            .as_ref()
            .split('/')
            .filter(|seg| !seg.is_empty())
            .collect::<Vec<_>>()
            .join("/");
        Self(v)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of a child node. Empty segments collapse away.
    pub fn join(&self, segment: &str) -> NodePath {
        if self.0.is_empty() {
            NodePath::new(segment)
        } else {
            NodePath::new(format!("{}/{}", self.0, segment))
        }
    }
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("<root>")
        } else {
            f.write_str(&self.0)
        }
    }
}
