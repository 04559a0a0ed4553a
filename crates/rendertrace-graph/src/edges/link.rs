use indexmap::IndexMap;
use indexmap::map::Entry;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::facts::{ExportBinding, FileFacts, Imported};
use super::resolve::ImportResolver;
use crate::config::AnalyzerConfig;
use crate::graph::{ComponentEdge, EdgeType};

/// Node a binding name resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target<'f> {
    Component(&'f str),
    Context { id: &'f str, name: &'f str },
}

struct FileIndex<'f> {
    facts: &'f FileFacts,
    locals: FxHashMap<&'f str, Target<'f>>,
}

impl<'f> FileIndex<'f> {
    fn new(facts: &'f FileFacts) -> Self {
        let mut locals = FxHashMap::default();
        for component in &facts.components {
            locals
                .entry(component.binding.as_str())
                .or_insert(Target::Component(component.node_id.as_str()));
        }
        for context in &facts.contexts {
            locals
                .entry(context.binding.as_str())
                .or_insert(Target::Context {
                    id: context.node_id.as_str(),
                    name: context.binding.as_str(),
                });
        }
        for alias in &facts.aliases {
            if let Some(target) = locals.get(alias.target.as_str()).copied() {
                locals.entry(alias.binding.as_str()).or_insert(target);
            }
        }
        Self { facts, locals }
    }
}

struct Linker<'f> {
    files: Vec<FileIndex<'f>>,
    by_path: FxHashMap<&'f str, usize>,
    resolver: ImportResolver<'f>,
    exported_contexts: FxHashMap<&'f str, Vec<Target<'f>>>,
    edges: IndexMap<String, ComponentEdge>,
}

impl<'f> Linker<'f> {
    fn new(files: &'f [FileFacts], config: &'f AnalyzerConfig) -> Self {
        let mut by_path = FxHashMap::default();
        let mut exported_contexts: FxHashMap<&str, Vec<Target<'f>>> = FxHashMap::default();

        for (idx, facts) in files.iter().enumerate() {
            by_path.entry(facts.path.as_str()).or_insert(idx);
            for context in &facts.contexts {
                if facts.is_exported(&context.binding) {
                    exported_contexts
                        .entry(context.binding.as_str())
                        .or_default()
                        .push(Target::Context {
                            id: context.node_id.as_str(),
                            name: context.binding.as_str(),
                        });
                }
            }
        }

        Self {
            files: files.iter().map(FileIndex::new).collect(),
            by_path,
            resolver: ImportResolver::new(files.iter().map(|f| f.path.as_str()), config),
            exported_contexts,
            edges: IndexMap::new(),
        }
    }

    /// Resolve `name` as seen from file `idx`. The flag is true when the
    /// binding came in through an import.
    fn resolve(&self, idx: usize, name: &str) -> Option<(Target<'f>, bool)> {
        let file = &self.files[idx];
        if let Some(target) = file.locals.get(name) {
            return Some((*target, false));
        }

        let import = file.facts.import(name)?;
        let path = self.resolver.resolve(&file.facts.path, &import.specifier)?;
        let exporter = &self.files[*self.by_path.get(path)?];
        let exported = match &import.imported {
            Imported::Named(exported) => exported.as_str(),
            Imported::Default => ExportBinding::DEFAULT,
            Imported::Namespace => return None,
        };
        let local = exporter.facts.exported_local(exported)?;
        exporter.locals.get(local).map(|target| (*target, true))
    }

    fn resolve_context(&self, idx: usize, name: &str) -> Option<(&'f str, &'f str)> {
        match self.resolve(idx, name) {
            Some((Target::Context { id, name }, _)) => Some((id, name)),
            Some((Target::Component(_), _)) => None,
            None => match self.exported_contexts.get(name).map(Vec::as_slice) {
                Some([Target::Context { id, name }]) => Some((*id, *name)),
                _ => None,
            },
        }
    }

    fn add(&mut self, edge: ComponentEdge) {
        match self.edges.entry(edge.id.clone()) {
            Entry::Occupied(mut existing) => {
                if let Some(props) = edge.props {
                    let merged = existing.get_mut().props.get_or_insert_with(Vec::new);
                    for prop in props {
                        if !merged.contains(&prop) {
                            merged.push(prop);
                        }
                    }
                }
            }
            Entry::Vacant(slot) => {
                trace!(edge = %edge.id, "edge");
                slot.insert(edge);
            }
        }
    }

    fn link_file(&mut self, idx: usize) {
        let facts = self.files[idx].facts;

        for component in &facts.components {
            let source = component.node_id.as_str();

            for usage in &component.usages {
                match self.resolve(idx, &usage.tag) {
                    Some((Target::Component(target), imported)) if target != source => {
                        self.add(
                            ComponentEdge::new(source, target, EdgeType::Props)
                                .with_props(usage.props.clone()),
                        );

                        let state_props: Vec<String> = usage
                            .identifier_props
                            .iter()
                            .filter(|(_, value)| component.state_bindings.contains(value))
                            .map(|(prop, _)| prop.clone())
                            .collect();
                        if !state_props.is_empty() {
                            self.add(
                                ComponentEdge::new(source, target, EdgeType::State)
                                    .with_props(state_props),
                            );
                        }

                        if imported {
                            self.add(ComponentEdge::new(source, target, EdgeType::Import));
                        }
                    }
                    // `<ThemeContext value={...}>` provides the context directly.
                    Some((Target::Context { id, name }, _)) => {
                        self.add(ComponentEdge::new(source, id, EdgeType::Context).with_context(name));
                    }
                    _ => {}
                }
            }

            for provider in &component.providers {
                if let Some((id, name)) = self.resolve_context(idx, provider) {
                    self.add(ComponentEdge::new(source, id, EdgeType::Context).with_context(name));
                }
            }

            for consumed in &component.consumed_contexts {
                if let Some((id, name)) = self.resolve_context(idx, consumed) {
                    self.add(ComponentEdge::new(id, source, EdgeType::Context).with_context(name));
                }
            }

            for reference in &component.references {
                if let Some((Target::Component(target), true)) = self.resolve(idx, reference) {
                    if target != source {
                        self.add(ComponentEdge::new(source, target, EdgeType::Import));
                    }
                }
            }
        }
    }
}

/// Derive every edge whose endpoints resolve within the analyzed file set.
///
/// Edges are returned in discovery order (file input order, then component
/// order, then usage order); repeated edges are merged into the first.
pub fn build_edges(files: &[FileFacts], config: &AnalyzerConfig) -> Vec<ComponentEdge> {
    let mut linker = Linker::new(files, config);
    for idx in 0..files.len() {
        linker.link_file(idx);
    }
    linker.edges.into_values().collect()
}
