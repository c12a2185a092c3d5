use crate::NodePath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// Stable schema identifier for synthesized manifests.
pub const SCHEMA_MANIFEST_V1: &str = "provguard.manifest.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// One provisioned resource in the synthesized manifest: the node it came
/// from, its kind, the merged configuration snapshot, and whatever overlay
/// attributes were set before synthesis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceRecord {
    pub path: NodePath,
    pub kind: String,
    pub config: JsonValue,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
}

/// The artifact of a successful synthesis pass.
///
/// Produced only when every registered validation returned no violations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Manifest {
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub resources: Vec<ResourceRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn manifest_round_trips_through_json() {
        let manifest = Manifest {
            schema: SCHEMA_MANIFEST_V1.to_string(),
            tool: ToolMeta {
                name: "provguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: datetime!(2026-01-02 03:04:05 UTC),
            finished_at: datetime!(2026-01-02 03:04:06 UTC),
            resources: vec![ResourceRecord {
                path: NodePath::new("app/bucket"),
                kind: "bucket".to_string(),
                config: serde_json::json!({"encryption": "service_managed"}),
                attributes: BTreeMap::new(),
            }],
        };

        let text = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&text).unwrap();
        assert_eq!(back, manifest);
        assert!(text.contains("provguard.manifest.v1"));
        assert!(text.contains("2026-01-02T03:04:05Z"));
    }

    #[test]
    fn empty_attributes_are_omitted() {
        let record = ResourceRecord {
            path: NodePath::new("app/queue"),
            kind: "queue".to_string(),
            config: serde_json::json!({}),
            attributes: BTreeMap::new(),
        };
        let text = serde_json::to_string(&record).unwrap();
        assert!(!text.contains("attributes"));
    }
}
