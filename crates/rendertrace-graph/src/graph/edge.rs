use serde::{Deserialize, Serialize};

/// Relationship carried by an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Parent renders the child and passes props to it.
    Props,
    /// A component references a component imported from another file.
    Import,
    /// A component provides or consumes a context.
    Context,
    /// A parent hands one of its state bindings to a child.
    State,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Props => "props",
            EdgeType::Import => "import",
            EdgeType::Context => "context",
            EdgeType::State => "state",
        }
    }
}

/// A directed edge between two graph nodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    /// Prop names carried across the edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_name: Option<String>,
}

impl ComponentEdge {
    /// Deterministic edge id: `{source}->{target}:{type}`.
    pub fn make_id(source: &str, target: &str, edge_type: EdgeType) -> String {
        format!("{source}->{target}:{}", edge_type.as_str())
    }

    pub fn new(source: impl Into<String>, target: impl Into<String>, edge_type: EdgeType) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: Self::make_id(&source, &target, edge_type),
            source,
            target,
            edge_type,
            props: None,
            context_name: None,
        }
    }

    pub fn with_props(mut self, props: Vec<String>) -> Self {
        self.props = Some(props);
        self
    }

    pub fn with_context(mut self, name: impl Into<String>) -> Self {
        self.context_name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_are_omitted() {
        let edge = ComponentEdge::new("a", "b", EdgeType::Import);
        let value = serde_json::to_value(&edge).unwrap();

        assert_eq!(value["id"], "a->b:import");
        assert_eq!(value["type"], "import");
        assert!(value.get("props").is_none());
        assert!(value.get("contextName").is_none());
    }

    #[test]
    fn context_edge_carries_context_name() {
        let edge = ComponentEdge::new("ctx", "consumer", EdgeType::Context).with_context("Theme");
        let value = serde_json::to_value(&edge).unwrap();
        assert_eq!(value["contextName"], "Theme");
    }
}
