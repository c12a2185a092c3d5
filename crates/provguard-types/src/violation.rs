use crate::NodePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One policy-rule failure, produced only during synthesis.
///
/// The message is fully formed and human readable: it names the offending
/// field and the required condition. `rule` is a stable dotted ID from
/// [`crate::ids`], usable with [`crate::lookup_explanation`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Violation {
    pub path: NodePath,
    pub rule: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: NodePath, rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path,
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: [{}] {}", self.path, self.rule, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_node_rule_and_message() {
        let v = Violation::new(
            NodePath::new("app/bucket"),
            "bucket.encryption",
            "bucket must be encrypted",
        );
        assert_eq!(
            v.to_string(),
            "app/bucket: [bucket.encryption] bucket must be encrypted"
        );
    }
}
