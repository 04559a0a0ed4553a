//! Graph assembly: run metadata, recomputed counts, invariant check.

use chrono::{DateTime, Utc};

use crate::error::InvariantViolation;
use crate::graph::{ComponentEdge, ComponentNode, GraphData, GraphMetadata};
use crate::metadata::RunMetadata;

/// Source of the `analyzedAt` timestamp.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant, for reproducible output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Build the final graph from merged nodes and edges.
///
/// Counts always come from the sequences themselves. The timestamp is
/// truncated to milliseconds, the precision it is serialized with.
pub fn assemble(
    nodes: Vec<ComponentNode>,
    edges: Vec<ComponentEdge>,
    run: &RunMetadata,
    clock: &dyn Clock,
) -> Result<GraphData, InvariantViolation> {
    let now = clock.now();
    let analyzed_at = DateTime::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now);

    let graph = GraphData {
        metadata: GraphMetadata {
            project_name: run.project_name.clone(),
            repository_url: run.repository_url.clone(),
            commit_hash: run.commit_hash.clone(),
            analyzed_at,
            total_components: nodes.len(),
            total_edges: edges.len(),
        },
        nodes,
        edges,
    };

    graph.validate()?;
    Ok(graph)
}
