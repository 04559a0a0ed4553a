//! Analyze command implementation.
//!
//! Runs one job: gather sources, analyze under a timeout, persist the graph,
//! and record the final job state next to it. A failed job is persisted too,
//! but never alongside a graph.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rendertrace_graph::{AnalysisReport, Analyzer, RunMetadata, SourceFile, UNKNOWN_REVISION};
use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::cli::AnalyzeArgs;
use crate::config::RendertraceConfig;
use crate::error::{CliError, Result};
use crate::job::{Job, Stage};
use crate::source;
use crate::store::GraphStore;
use crate::ui::{self, JobProgress};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct AnalyzeOutcome {
    pub job: Job,
    pub graph_path: PathBuf,
    pub job_path: PathBuf,
    pub components: usize,
    pub edges: usize,
    pub skipped_files: usize,
}

/// Execute the analyze command.
///
/// # Errors
///
/// Configuration, gathering, analysis, timeout and persistence failures. The
/// job record is written for every failure after the job was created; a
/// failure to write it is logged and the original error is returned.
pub async fn execute(args: AnalyzeArgs, quiet: bool) -> Result<()> {
    let outcome = run(&args, quiet).await?;

    if !quiet {
        ui::success(&format!(
            "Analyzed {} components and {} edges (job {})",
            outcome.components, outcome.edges, outcome.job.id
        ));
        if outcome.skipped_files > 0 {
            ui::warning(&format!("{} file(s) skipped", outcome.skipped_files));
        }
    }
    println!("{}", outcome.graph_path.display());
    Ok(())
}

/// Run the analysis job and return where its outputs landed.
pub async fn run(args: &AnalyzeArgs, quiet: bool) -> Result<AnalyzeOutcome> {
    let config = effective_config(args)?;
    let metadata = run_metadata(args)?;
    let store = GraphStore::new(config.output.dir.clone());
    let progress = JobProgress::new(quiet);

    let mut job = Job::new(metadata.repository_url.clone());
    info!(job = %job.id, input = %args.path.display(), "analysis job created");

    match process(&mut job, args, config, metadata, &store, &progress).await {
        Ok((graph_path, report)) => {
            job.complete()?;
            let job_path = store.save_job(&job).await?;
            progress.finish("Done");
            Ok(AnalyzeOutcome {
                components: report.graph.nodes.len(),
                edges: report.graph.edges.len(),
                skipped_files: report.warnings.len(),
                job,
                graph_path,
                job_path,
            })
        }
        Err(err) => {
            job.fail(err.to_string())?;
            if let Err(save_err) = store.save_job(&job).await {
                warn!(job = %job.id, error = %save_err, "failed to record job failure");
            }
            progress.fail("Analysis failed");
            Err(err)
        }
    }
}

async fn process(
    job: &mut Job,
    args: &AnalyzeArgs,
    config: RendertraceConfig,
    metadata: RunMetadata,
    store: &GraphStore,
    progress: &JobProgress,
) -> Result<(PathBuf, AnalysisReport)> {
    advance(job, progress, Stage::Started)?;

    advance(job, progress, Stage::Gathering)?;
    let input = args.path.clone();
    let filter = config.source.clone();
    let files = tokio::task::spawn_blocking(move || source::gather(&input, &filter)).await??;
    if files.is_empty() {
        return Err(CliError::NoSources(args.path.clone()));
    }
    info!(job = %job.id, files = files.len(), "sources gathered");

    advance(job, progress, Stage::Analyzing)?;
    let report = analyze_with_timeout(
        Analyzer::new(config.analyzer),
        files,
        metadata,
        Duration::from_secs(args.timeout_secs),
    )
    .await?;
    for warning in &report.warnings {
        warn!(path = %warning.path, "{}", warning.message);
    }

    advance(job, progress, Stage::Persisting)?;
    let graph_path = store
        .save_graph(job.id, &report.graph, config.output.pretty)
        .await?;
    info!(job = %job.id, path = %graph_path.display(), "graph written");

    Ok((graph_path, report))
}

fn advance(job: &mut Job, progress: &JobProgress, stage: Stage) -> Result<()> {
    job.advance(stage)?;
    progress.stage(stage);
    Ok(())
}

/// Analyze on a dedicated thread so an expired run is abandoned, not awaited.
async fn analyze_with_timeout(
    analyzer: Analyzer,
    files: Vec<SourceFile>,
    metadata: RunMetadata,
    limit: Duration,
) -> Result<AnalysisReport> {
    let (tx, rx) = oneshot::channel();
    std::thread::Builder::new()
        .name("rendertrace-analyze".to_string())
        .spawn(move || {
            let _ = tx.send(analyzer.analyze(&files, &metadata));
        })?;

    match tokio::time::timeout(limit, rx).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(_)) => Err(CliError::Custom(
            "analysis worker stopped without a result".to_string(),
        )),
        Err(_) => Err(CliError::Timeout(limit.as_secs())),
    }
}

/// Config file and environment, then this command's flags.
pub fn effective_config(args: &AnalyzeArgs) -> Result<RendertraceConfig> {
    let mut config = RendertraceConfig::load(args.config.as_deref())?;

    if let Some(dir) = &args.out_dir {
        config.output.dir = dir.clone();
    }
    if let Some(jobs) = args.jobs {
        config.analyzer.max_parallelism = Some(usize::try_from(jobs).unwrap_or(usize::MAX));
    }
    if args.compact {
        config.output.pretty = false;
    }

    config.validate()?;
    Ok(config)
}

/// Repository URL metadata when given, otherwise named after the input.
pub fn run_metadata(args: &AnalyzeArgs) -> Result<RunMetadata> {
    let mut metadata = match &args.repository_url {
        Some(url) => RunMetadata::from_repository_url(url, args.revision.as_deref())?,
        None => RunMetadata::new(
            project_name_for(&args.path),
            "",
            args.revision.as_deref().unwrap_or(UNKNOWN_REVISION),
        ),
    };
    if let Some(name) = &args.project_name {
        metadata.project_name = name.clone();
    }
    Ok(metadata)
}

fn project_name_for(path: &Path) -> String {
    let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name
        .strip_suffix(".tar.gz")
        .or_else(|| name.strip_suffix(".tgz"))
        .unwrap_or(&name);

    if name.is_empty() {
        "project".to_string()
    } else {
        name.to_string()
    }
}
