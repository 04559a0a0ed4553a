//! Graph data model: component nodes, relationship edges, and the assembled
//! [`GraphData`] artifact.
//!
//! The JSON shape produced by serde here is the one serialization contract the
//! core owns (camelCase fields, `type` discriminators, optional edge fields
//! omitted when absent).

mod data;
mod edge;
mod node;

pub use data::{GraphData, GraphMetadata};
pub use edge::{ComponentEdge, EdgeType};
pub use node::{ANONYMOUS_COMPONENT, ComponentNode, HookUsage, NodeType};
