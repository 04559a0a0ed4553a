//! File-set aggregation.
//!
//! Files are parsed and extracted independently on the rayon pool; each
//! returns an owned [`FileAnalysis`]. The merge below is the only place the
//! per-file results are combined, and it runs after every file has finished.

use oxc_allocator::Allocator;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::AnalyzerConfig;
use crate::detect::scan_module;
use crate::edges::build_edges;
use crate::edges::facts::FileFacts;
use crate::error::FileError;
use crate::extract::{extract_component, extract_context};
use crate::graph::{ComponentEdge, ComponentNode};
use crate::parser::parse;
use crate::source::SourceFile;

/// A file that contributed nothing because it could not be analyzed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileWarning {
    pub path: String,
    pub message: String,
}

impl From<&FileError> for FileWarning {
    fn from(err: &FileError) -> Self {
        Self {
            path: err.path().to_string(),
            message: err.to_string(),
        }
    }
}

/// Nodes and linking facts of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    pub nodes: Vec<ComponentNode>,
    pub facts: FileFacts,
}

/// Parse one file and extract its components and contexts.
///
/// The allocator and syntax tree are dropped before this returns.
pub fn analyze_file(file: &SourceFile, config: &AnalyzerConfig) -> Result<FileAnalysis, FileError> {
    if file.text.len() > config.max_file_size {
        return Err(FileError::TooLarge {
            path: file.path.clone(),
            size: file.text.len(),
            max: config.max_file_size,
        });
    }

    let allocator = Allocator::default();
    let tree = parse(&allocator, &file.path, &file.text)?;
    let scan = scan_module(&tree, config);

    let mut nodes = Vec::new();
    let mut facts = FileFacts::new(file.path.as_str());

    for candidate in scan.components(config) {
        let extracted = extract_component(&tree, candidate, config)?;
        nodes.push(extracted.node);
        facts.components.push(extracted.facts);
    }

    for name in &scan.memo_marks {
        for node in nodes.iter_mut().filter(|node| &node.name == name) {
            node.is_memoized = true;
        }
    }

    for site in &scan.contexts {
        let (node, context) = extract_context(&tree, site)?;
        nodes.push(node);
        facts.contexts.push(context);
    }

    // Discovery order is source order.
    nodes.sort_by_key(|node| (node.line_number, node.column_number));

    facts.imports = scan.imports;
    facts.exports = scan.exports;
    facts.aliases = scan.aliases;

    debug!(path = %file.path, nodes = nodes.len(), "analyzed file");
    Ok(FileAnalysis { nodes, facts })
}

/// Merged result of a whole file set, before assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub nodes: Vec<ComponentNode>,
    pub edges: Vec<ComponentEdge>,
    pub warnings: Vec<FileWarning>,
}

/// Analyze every file and merge the results in input order.
///
/// Runs on the current rayon pool; wrap in `ThreadPool::install` to bound
/// the fan-out.
pub fn aggregate(files: &[SourceFile], config: &AnalyzerConfig) -> Aggregate {
    let results: Vec<Result<FileAnalysis, FileError>> = files
        .par_iter()
        .map(|file| analyze_file(file, config))
        .collect();

    let mut batches = Vec::with_capacity(results.len());
    let mut facts = Vec::with_capacity(results.len());
    let mut warnings = Vec::new();

    for result in results {
        match result {
            Ok(analysis) => {
                batches.push(analysis.nodes);
                facts.push(analysis.facts);
            }
            Err(err) => {
                warn!(path = %err.path(), error = %err, "skipping file");
                warnings.push(FileWarning::from(&err));
            }
        }
    }

    let nodes = retain_unique_nodes(batches.into_iter().flatten());
    let edges = retain_resolved_edges(&nodes, build_edges(&facts, config));

    Aggregate {
        nodes,
        edges,
        warnings,
    }
}

/// Keep the first node for every id.
pub fn retain_unique_nodes(nodes: impl IntoIterator<Item = ComponentNode>) -> Vec<ComponentNode> {
    let mut seen = FxHashSet::default();
    nodes
        .into_iter()
        .filter(|node| {
            let fresh = seen.insert(node.id.clone());
            if !fresh {
                warn!(id = %node.id, "dropping duplicate node");
            }
            fresh
        })
        .collect()
}

/// Keep edges whose endpoints are both present in `nodes`, first per id.
pub fn retain_resolved_edges(
    nodes: &[ComponentNode],
    edges: impl IntoIterator<Item = ComponentEdge>,
) -> Vec<ComponentEdge> {
    let ids: FxHashSet<&str> = nodes.iter().map(|node| node.id.as_str()).collect();
    let mut seen = FxHashSet::default();

    edges
        .into_iter()
        .filter(|edge| {
            if !ids.contains(edge.source.as_str()) || !ids.contains(edge.target.as_str()) {
                warn!(edge = %edge.id, "dropping edge with unresolved endpoint");
                return false;
            }
            seen.insert(edge.id.clone())
        })
        .collect()
}
