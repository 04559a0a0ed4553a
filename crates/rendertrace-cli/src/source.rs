//! Gathering analyzable sources from a directory or a gzipped tarball.
//!
//! Paths handed to the analyzer are relative to the project root and use `/`
//! separators. Archives are expected in GitHub tarball layout, so their
//! single top-level directory is stripped. Entries that are not valid UTF-8
//! are skipped with a warning.

use std::fs::File;
use std::io::Read;
use std::path::{Component, Path};

use flate2::read::GzDecoder;
use rendertrace_graph::{SourceFile, SourceFilter};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Directory,
    Archive,
}

impl InputKind {
    pub fn detect(path: &Path) -> Option<Self> {
        if path.is_dir() {
            return Some(InputKind::Directory);
        }
        let name = path.file_name()?.to_str()?;
        (path.is_file() && (name.ends_with(".tar.gz") || name.ends_with(".tgz")))
            .then_some(InputKind::Archive)
    }
}

/// Collect every eligible file under `path`, sorted by relative path.
pub fn gather(path: &Path, filter: &SourceFilter) -> Result<Vec<SourceFile>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.to_path_buf()));
    }

    let mut files = match InputKind::detect(path) {
        Some(InputKind::Directory) => gather_directory(path, filter)?,
        Some(InputKind::Archive) => gather_archive(path, filter)?,
        None => return Err(CliError::UnsupportedInput(path.to_path_buf())),
    };

    files.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(count = files.len(), input = %path.display(), "gathered sources");
    Ok(files)
}

fn gather_directory(root: &Path, filter: &SourceFilter) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_excluded_dir(entry, filter));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(relative) = relative_path(entry.path().strip_prefix(root).unwrap_or(entry.path()))
        else {
            warn!(path = %entry.path().display(), "skipping path that is not valid UTF-8");
            continue;
        };
        if !filter.is_eligible(&relative) {
            continue;
        }
        let bytes = std::fs::read(entry.path())?;
        files.extend(decode(relative, bytes));
    }

    Ok(files)
}

fn gather_archive(archive_path: &Path, filter: &SourceFilter) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    let mut archive = tar::Archive::new(GzDecoder::new(File::open(archive_path)?));

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }

        let path = entry.path()?.into_owned();
        let Some(relative) = relative_path(&strip_top_dir(&path)) else {
            continue;
        };
        if relative.is_empty() || !filter.is_eligible(&relative) {
            continue;
        }

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;
        files.extend(decode(relative, bytes));
    }

    Ok(files)
}

fn is_excluded_dir(entry: &DirEntry, filter: &SourceFilter) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| filter.excluded_dirs.iter().any(|dir| dir == name))
}

fn strip_top_dir(path: &Path) -> std::path::PathBuf {
    path.components().skip(1).collect()
}

/// Join normal components with `/`; `None` if any is not UTF-8.
fn relative_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        if let Component::Normal(part) = component {
            parts.push(part.to_str()?);
        }
    }
    Some(parts.join("/"))
}

fn decode(path: String, bytes: Vec<u8>) -> Option<SourceFile> {
    match String::from_utf8(bytes) {
        Ok(text) => Some(SourceFile::new(path, text)),
        Err(_) => {
            warn!(path = %path, "skipping file that is not valid UTF-8");
            None
        }
    }
}
