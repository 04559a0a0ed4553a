//! Error taxonomy for the analysis core.
//!
//! Per-file errors ([`ParseError`], [`ExtractionError`], wrapped in
//! [`FileError`]) are recovered by the aggregator and downgraded to warnings.
//! Only [`AnalyzeError`] ever reaches the caller of `analyze()`.

use miette::Diagnostic;
use thiserror::Error;

use crate::parser::Location;

/// One file's text does not conform to the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("failed to parse {path}: {message}")]
#[diagnostic(code(rendertrace::parse_error))]
pub struct ParseError {
    /// Path of the file that failed to parse.
    pub path: String,
    /// Human-readable message taken from the first parser diagnostic.
    pub message: String,
    /// Source location, when the failure can be pinned to one.
    pub location: Option<Location>,
}

impl ParseError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }
}

/// A parsed tree could not be walked safely.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ExtractionError {
    /// A span points outside the file's text.
    #[error("invalid location in {path}: byte offset {offset} is outside a {len}-byte file")]
    #[diagnostic(code(rendertrace::extract::invalid_location))]
    InvalidLocation { path: String, offset: u32, len: usize },
}

/// Why a single file contributed nothing to the graph.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum FileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("file too large: {path} is {size} bytes (max: {max} bytes)")]
    #[diagnostic(code(rendertrace::file_too_large))]
    TooLarge { path: String, size: usize, max: usize },
}

impl FileError {
    /// Path of the file the error belongs to.
    pub fn path(&self) -> &str {
        match self {
            FileError::Parse(err) => &err.path,
            FileError::Extraction(ExtractionError::InvalidLocation { path, .. }) => path,
            FileError::TooLarge { path, .. } => path,
        }
    }
}

/// A structural invariant of the graph does not hold.
///
/// The aggregator's construction discipline makes these unreachable; seeing
/// one means a logic defect, not bad input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum InvariantViolation {
    #[error("edge {edge} references missing node {endpoint}")]
    #[diagnostic(code(rendertrace::invariant::dangling_edge))]
    DanglingEdge { edge: String, endpoint: String },

    #[error("node id {id} appears more than once")]
    #[diagnostic(code(rendertrace::invariant::duplicate_node))]
    DuplicateNode { id: String },

    #[error("{field} is {recorded} but the graph holds {actual}")]
    #[diagnostic(code(rendertrace::invariant::count_mismatch))]
    CountMismatch {
        field: &'static str,
        recorded: usize,
        actual: usize,
    },
}

/// Failure of a whole `analyze()` run.
#[derive(Debug, Error, Diagnostic)]
pub enum AnalyzeError {
    #[error("no source files were supplied")]
    #[diagnostic(
        code(rendertrace::empty_file_set),
        help("check the extension and directory filters applied before analysis")
    )]
    EmptyFileSet,

    #[error("graph invariant violated: {0}")]
    #[diagnostic(code(rendertrace::invariant))]
    Invariant(#[from] InvariantViolation),

    #[error("failed to start analysis worker pool: {0}")]
    #[diagnostic(code(rendertrace::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Run metadata could not be derived.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MetadataError {
    #[error("invalid repository URL: {0}")]
    #[diagnostic(
        code(rendertrace::invalid_repository_url),
        help("expected a URL of the form https://github.com/<owner>/<repo>")
    )]
    InvalidRepositoryUrl(String),
}

/// Result alias for analysis runs.
pub type Result<T> = std::result::Result<T, AnalyzeError>;
