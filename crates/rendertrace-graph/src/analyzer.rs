//! The `analyze()` entry point.

use std::sync::Arc;

use rayon::ThreadPoolBuilder;
use tracing::info;

use crate::aggregate::{FileWarning, aggregate};
use crate::assemble::{Clock, SystemClock, assemble};
use crate::config::AnalyzerConfig;
use crate::error::{AnalyzeError, Result};
use crate::graph::GraphData;
use crate::metadata::RunMetadata;
use crate::source::SourceFile;

/// A graph plus the files that were skipped while building it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisReport {
    pub graph: GraphData,
    pub warnings: Vec<FileWarning>,
}

/// Configured analyzer.
///
/// ```rust,no_run
/// use rendertrace_graph::{Analyzer, AnalyzerConfig, RunMetadata, SourceFile};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let files = vec![SourceFile::new("src/App.tsx", "export const App = () => <main/>;")];
/// let run = RunMetadata::new("demo", "", "unknown");
///
/// let report = Analyzer::new(AnalyzerConfig::default()).analyze(&files, &run)?;
/// println!("{}", report.graph.to_pretty_json()?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Analyzer {
    config: AnalyzerConfig,
    clock: Arc<dyn Clock>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use `clock` for the `analyzedAt` timestamp.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a file set.
    ///
    /// Files that fail to parse or extract are reported in
    /// [`AnalysisReport::warnings`] and contribute nothing. The call itself
    /// fails only for an empty file set or a violated graph invariant.
    pub fn analyze(&self, files: &[SourceFile], run: &RunMetadata) -> Result<AnalysisReport> {
        if files.is_empty() {
            return Err(AnalyzeError::EmptyFileSet);
        }

        info!(
            files = files.len(),
            project = %run.project_name,
            "analyzing file set"
        );

        let merged = match self.config.max_parallelism {
            Some(threads) => {
                let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
                pool.install(|| aggregate(files, &self.config))
            }
            None => aggregate(files, &self.config),
        };

        let graph = assemble(merged.nodes, merged.edges, run, self.clock.as_ref())?;

        info!(
            components = graph.metadata.total_components,
            edges = graph.metadata.total_edges,
            skipped = merged.warnings.len(),
            "analysis complete"
        );

        Ok(AnalysisReport {
            graph,
            warnings: merged.warnings,
        })
    }
}

/// Analyze `files` with the default configuration and the system clock.
pub fn analyze(files: &[SourceFile], run: &RunMetadata) -> Result<GraphData> {
    Analyzer::default()
        .analyze(files, run)
        .map(|report| report.graph)
}
