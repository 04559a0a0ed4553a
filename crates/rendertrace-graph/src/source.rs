//! Source inputs and the eligibility filter collaborators apply to archives.

use serde::{Deserialize, Serialize};

/// One file handed to the analyzer: a root-relative path and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }
}

/// Directories that never contain analyzable application source.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".next",
    "coverage",
    ".git",
    "out",
];

/// Extensions of files the analyzer understands.
pub const DEFAULT_EXTENSIONS: &[&str] = &["tsx", "ts", "jsx", "js"];

/// Decides which archive paths are handed to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFilter {
    pub extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
}

impl Default for SourceFilter {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SourceFilter {
    /// Whether `path` (either separator) should be analyzed.
    ///
    /// Directories are matched per path component, so `builder/App.tsx` is
    /// eligible while `build/App.tsx` is not.
    pub fn is_eligible(&self, path: &str) -> bool {
        let mut components: Vec<&str> = path.split(['/', '\\']).filter(|c| !c.is_empty()).collect();
        let Some(file_name) = components.pop() else {
            return false;
        };

        if components
            .iter()
            .any(|dir| self.excluded_dirs.iter().any(|excluded| excluded == dir))
        {
            return false;
        }

        // Declaration files carry no components.
        if file_name.ends_with(".d.ts") {
            return false;
        }

        match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => self.extensions.iter().any(|e| e == ext),
            _ => false,
        }
    }
}
