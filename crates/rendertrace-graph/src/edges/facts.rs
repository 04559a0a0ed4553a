//! Owned per-file facts gathered while a syntax tree is alive.
//!
//! Linking runs after every file has been parsed, so nothing in here borrows
//! from the tree or its arena.

/// What an import binding refers to in the imported module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Imported {
    Named(String),
    Default,
    Namespace,
}

/// `import { imported as local } from "specifier"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub local: String,
    pub imported: Imported,
    pub specifier: String,
}

/// Name under which this file exports the binding `local`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBinding {
    /// Exported name; `"default"` for the default export.
    pub exported: String,
    pub local: String,
}

impl ExportBinding {
    pub const DEFAULT: &'static str = "default";

    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            exported: name.clone(),
            local: name,
        }
    }

    pub fn renamed(local: impl Into<String>, exported: impl Into<String>) -> Self {
        Self {
            exported: exported.into(),
            local: local.into(),
        }
    }

    pub fn default_export(local: impl Into<String>) -> Self {
        Self {
            exported: Self::DEFAULT.to_string(),
            local: local.into(),
        }
    }
}

/// A top-level binding that names another binding, e.g.
/// `const Fancy = React.memo(Card)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    pub binding: String,
    pub target: String,
}

/// One rendered `<Child …/>` inside a component body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsxUsage {
    pub tag: String,
    /// Attribute names in source order, excluding `key` and spreads.
    pub props: Vec<String>,
    /// Attribute names whose value is a bare identifier, with that identifier.
    pub identifier_props: Vec<(String, String)>,
}

/// Linking facts for one detected component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentFacts {
    pub node_id: String,
    /// Local binding the component is reachable under in its file.
    pub binding: String,
    pub usages: Vec<JsxUsage>,
    /// Contexts rendered as `<X.Provider>`.
    pub providers: Vec<String>,
    /// Contexts read through a context hook.
    pub consumed_contexts: Vec<String>,
    /// Every identifier referenced in the body.
    pub references: Vec<String>,
    /// Names bound by state and reducer hooks, setters included.
    pub state_bindings: Vec<String>,
}

/// A context object declared at the top level of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFacts {
    pub node_id: String,
    pub binding: String,
}

/// Everything the edge builder needs from one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFacts {
    pub path: String,
    pub components: Vec<ComponentFacts>,
    pub contexts: Vec<ContextFacts>,
    pub imports: Vec<ImportBinding>,
    pub exports: Vec<ExportBinding>,
    pub aliases: Vec<Alias>,
}

impl FileFacts {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn import(&self, local: &str) -> Option<&ImportBinding> {
        self.imports.iter().find(|import| import.local == local)
    }

    /// Local binding exported as `exported`.
    pub fn exported_local(&self, exported: &str) -> Option<&str> {
        self.exports
            .iter()
            .find(|export| export.exported == exported)
            .map(|export| export.local.as_str())
    }

    pub fn is_exported(&self, local: &str) -> bool {
        self.exports.iter().any(|export| export.local == local)
    }
}
