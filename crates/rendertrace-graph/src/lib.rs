//! # rendertrace-graph
//!
//! Static analysis core that turns React/JSX/TypeScript sources into a
//! component dependency graph.
//!
//! The crate performs no I/O: callers hand it `(path, text)` pairs and get
//! back a [`GraphData`] value. Detection is syntactic. A component is a
//! top-level function whose body builds markup, and memoization is a
//! `<Ns>.memo(...)` call. Names are never resolved semantically, so the graph
//! is an approximation that tolerates unresolved imports.
//!
//! ## Pipeline
//!
//! ```text
//!   SourceFile ──► parser ──► detect ──► extract ──┐   (per file, on rayon)
//!                                                  │
//!                     edges::build_edges ◄── FileFacts
//!                              │
//!                aggregate ────┴──► assemble ──► GraphData
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rendertrace_graph::{RunMetadata, SourceFile, analyze};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let files = vec![
//!     SourceFile::new("src/App.tsx", "import { Button } from './Button';\nexport function App() { return <Button label=\"Hi\"/>; }"),
//!     SourceFile::new("src/Button.tsx", "export const Button = ({ label }) => <button>{label}</button>;"),
//! ];
//! let run = RunMetadata::from_repository_url("https://github.com/acme/shop", None)?;
//!
//! let graph = analyze(&files, &run)?;
//! assert_eq!(graph.metadata.total_components, 2);
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod analyzer;
pub mod assemble;
pub mod config;
pub mod detect;
pub mod edges;
pub mod error;
pub mod extract;
pub mod graph;
pub mod metadata;
pub mod parser;
pub mod source;

#[cfg(test)]
mod tests;

pub use aggregate::{Aggregate, FileWarning, retain_resolved_edges, retain_unique_nodes};
pub use analyzer::{AnalysisReport, Analyzer, analyze};
pub use assemble::{Clock, FixedClock, SystemClock, assemble};
pub use config::{AnalyzerConfig, HookCategory, MAX_FILE_SIZE};
pub use error::{
    AnalyzeError, ExtractionError, FileError, InvariantViolation, MetadataError, ParseError,
};
pub use graph::{
    ANONYMOUS_COMPONENT, ComponentEdge, ComponentNode, EdgeType, GraphData, GraphMetadata,
    HookUsage, NodeType,
};
pub use metadata::{RepositoryRef, RunMetadata, UNKNOWN_REVISION};
pub use parser::Location;
pub use source::{SourceFile, SourceFilter};
