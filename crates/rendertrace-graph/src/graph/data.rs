use chrono::{DateTime, Utc};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{ComponentEdge, ComponentNode};
use crate::error::InvariantViolation;

/// Run-level facts attached to an assembled graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    pub project_name: String,
    pub repository_url: String,
    pub commit_hash: String,
    #[serde(with = "iso_millis")]
    pub analyzed_at: DateTime<Utc>,
    pub total_components: usize,
    pub total_edges: usize,
}

/// The graph artifact handed to persistence and transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<ComponentNode>,
    pub edges: Vec<ComponentEdge>,
    pub metadata: GraphMetadata,
}

impl GraphData {
    /// Check every structural invariant of the graph.
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let mut ids = FxHashSet::default();
        for node in &self.nodes {
            if !ids.insert(node.id.as_str()) {
                return Err(InvariantViolation::DuplicateNode {
                    id: node.id.clone(),
                });
            }
        }

        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint.as_str()) {
                    return Err(InvariantViolation::DanglingEdge {
                        edge: edge.id.clone(),
                        endpoint: endpoint.clone(),
                    });
                }
            }
        }

        if self.metadata.total_components != self.nodes.len() {
            return Err(InvariantViolation::CountMismatch {
                field: "totalComponents",
                recorded: self.metadata.total_components,
                actual: self.nodes.len(),
            });
        }
        if self.metadata.total_edges != self.edges.len() {
            return Err(InvariantViolation::CountMismatch {
                field: "totalEdges",
                recorded: self.metadata.total_edges,
                actual: self.edges.len(),
            });
        }

        Ok(())
    }

    pub fn node(&self, id: &str) -> Option<&ComponentNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// ISO-8601 UTC timestamps with millisecond precision (`2024-05-01T12:00:00.000Z`).
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
