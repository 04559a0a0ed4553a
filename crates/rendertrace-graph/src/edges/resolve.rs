//! Import specifier resolution against the analyzed file set.
//!
//! Only the files handed to the analyzer are considered; anything else
//! (packages, files filtered out upstream) resolves to `None`.

use std::path::Path;

use path_clean::PathClean;
use rustc_hash::FxHashSet;

use crate::config::AnalyzerConfig;

pub struct ImportResolver<'c> {
    files: FxHashSet<&'c str>,
    /// Aliases sorted longest prefix first.
    aliases: Vec<(&'c str, &'c str)>,
    extensions: &'c [String],
}

impl<'c> ImportResolver<'c> {
    pub fn new(paths: impl IntoIterator<Item = &'c str>, config: &'c AnalyzerConfig) -> Self {
        let mut aliases: Vec<(&str, &str)> = config
            .path_aliases
            .iter()
            .map(|(prefix, target)| (prefix.as_str(), target.as_str()))
            .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        Self {
            files: paths.into_iter().collect(),
            aliases,
            extensions: &config.resolve_extensions,
        }
    }

    /// Path of the analyzed file `specifier` refers to when imported from `importer`.
    pub fn resolve(&self, importer: &str, specifier: &str) -> Option<&'c str> {
        let base = self.base_path(importer, specifier)?;
        self.probe(&base)
    }

    fn base_path(&self, importer: &str, specifier: &str) -> Option<String> {
        let joined = if specifier.starts_with("./") || specifier.starts_with("../") {
            let dir = Path::new(importer).parent().unwrap_or(Path::new(""));
            dir.join(specifier)
        } else {
            let (prefix, target) = self
                .aliases
                .iter()
                .find(|(prefix, _)| specifier.starts_with(prefix))?;
            let rest = specifier[prefix.len()..].trim_start_matches('/');
            Path::new(target).join(rest)
        };

        let cleaned = joined.clean();
        let normalized = cleaned.to_string_lossy().replace('\\', "/");
        // Escaping the analyzed root never matches a file.
        if normalized.starts_with("../") || normalized == ".." {
            return None;
        }
        Some(normalized)
    }

    fn probe(&self, base: &str) -> Option<&'c str> {
        if let Some(found) = self.files.get(base) {
            return Some(*found);
        }
        self.extensions
            .iter()
            .map(|ext| format!("{base}.{ext}"))
            .chain(self.extensions.iter().map(|ext| format!("{base}/index.{ext}")))
            .find_map(|candidate| self.files.get(candidate.as_str()).copied())
    }
}
