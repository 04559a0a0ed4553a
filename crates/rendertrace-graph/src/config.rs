//! Analyzer configuration.
//!
//! Every field has a default so a partial `[analyzer]` table (or none at
//! all) deserializes into a working configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Maximum file size in bytes (10 MB).
///
/// Larger files are skipped with a warning instead of being parsed.
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// What a recognized hook call contributes to a component node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookCategory {
    /// Records the bound state name under `hooks.useState`.
    State,
    /// Records the reducer argument under `hooks.useReducer`.
    Reducer,
    /// Records the context argument under `hooks.useContext`.
    Context,
    /// Records the bound selection under `hooks.useSelector`.
    Selector,
    /// Sets `hasUseCallback`.
    Callback,
    /// Sets `hasUseMemo`.
    Memo,
}

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Recognized hook names and their categories.
    pub hooks: IndexMap<String, HookCategory>,

    /// Method names that count as list rendering (`items.map(...)`).
    pub list_methods: Vec<String>,

    /// Property names of memoizing wrappers (`React.memo`).
    pub memo_wrappers: Vec<String>,

    /// Wrapper calls looked through when finding a component's function
    /// (`forwardRef(...)`, `React.forwardRef(...)`).
    pub transparent_wrappers: Vec<String>,

    /// Calls that declare a context object (`createContext(...)`).
    pub context_factories: Vec<String>,

    /// Import prefix rewrites, e.g. `"@/" = "src/"`.
    pub path_aliases: IndexMap<String, String>,

    /// Extensions tried when resolving an import specifier to a file.
    pub resolve_extensions: Vec<String>,

    /// Worker threads for per-file analysis; `None` uses the global pool.
    pub max_parallelism: Option<usize>,

    /// Files larger than this are skipped.
    pub max_file_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        let hooks = [
            ("useState", HookCategory::State),
            ("useReducer", HookCategory::Reducer),
            ("useContext", HookCategory::Context),
            ("useCallback", HookCategory::Callback),
            ("useMemo", HookCategory::Memo),
        ]
        .into_iter()
        .map(|(name, category)| (name.to_string(), category))
        .collect();

        Self {
            hooks,
            list_methods: strings(&["map"]),
            memo_wrappers: strings(&["memo"]),
            transparent_wrappers: strings(&["forwardRef"]),
            context_factories: strings(&["createContext"]),
            path_aliases: IndexMap::new(),
            resolve_extensions: strings(&["tsx", "ts", "jsx", "js"]),
            max_parallelism: None,
            max_file_size: MAX_FILE_SIZE,
        }
    }
}

impl AnalyzerConfig {
    pub fn hook_category(&self, name: &str) -> Option<HookCategory> {
        self.hooks.get(name).copied()
    }

    /// Whether any hook is mapped to [`HookCategory::Selector`].
    pub fn tracks_selectors(&self) -> bool {
        self.hooks.values().any(|c| *c == HookCategory::Selector)
    }

    pub fn is_list_method(&self, name: &str) -> bool {
        self.list_methods.iter().any(|m| m == name)
    }

    pub fn is_memo_wrapper(&self, name: &str) -> bool {
        self.memo_wrappers.iter().any(|m| m == name)
    }

    pub fn is_transparent_wrapper(&self, name: &str) -> bool {
        self.transparent_wrappers.iter().any(|m| m == name)
    }

    pub fn is_context_factory(&self, name: &str) -> bool {
        self.context_factories.iter().any(|m| m == name)
    }

    /// Register an additional hook name.
    pub fn with_hook(mut self, name: impl Into<String>, category: HookCategory) -> Self {
        self.hooks.insert(name.into(), category);
        self
    }

    pub fn with_path_alias(mut self, prefix: impl Into<String>, target: impl Into<String>) -> Self {
        self.path_aliases.insert(prefix.into(), target.into());
        self
    }

    pub fn with_max_parallelism(mut self, threads: usize) -> Self {
        self.max_parallelism = Some(threads.max(1));
        self
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
