//! Metadata extraction for detected components.
//!
//! Every scan here is total: tree shapes it does not recognize simply leave
//! the corresponding feature unset. The only failure is a span that cannot
//! be mapped back to a line and column.

mod props;
mod scan;

pub use props::prop_names;
pub use scan::{BodyScan, scan_body};

use crate::config::AnalyzerConfig;
use crate::detect::{Candidate, ContextSite};
use crate::edges::facts::{ComponentFacts, ContextFacts};
use crate::error::ExtractionError;
use crate::graph::{ComponentNode, NodeType};
use crate::parser::SyntaxTree;

/// A component node plus the facts needed to link it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedComponent {
    pub node: ComponentNode,
    pub facts: ComponentFacts,
}

/// Build the node and linking facts for one component candidate.
pub fn extract_component(
    tree: &SyntaxTree<'_>,
    candidate: &Candidate<'_, '_>,
    config: &AnalyzerConfig,
) -> Result<ExtractedComponent, ExtractionError> {
    let location = tree.locate(candidate.function.span())?;
    let scan = candidate
        .function
        .body()
        .map(|body| scan_body(body, config))
        .unwrap_or_default();

    let mut node = ComponentNode::new(
        NodeType::Component,
        candidate.name.as_str(),
        tree.path(),
        location.line,
        location.column,
    );
    node.props = prop_names(candidate.function.params());
    node.is_memoized = candidate.memoized || scan.calls_memo;
    node.has_use_callback = scan.has_use_callback;
    node.has_use_memo = scan.has_use_memo;
    node.has_list_rendering = scan.has_list_rendering;
    node.has_conditional_rendering = scan.has_conditional_rendering;
    node.hooks = scan.hooks;

    let facts = ComponentFacts {
        node_id: node.id.clone(),
        binding: candidate.name.clone(),
        usages: scan.usages,
        providers: scan.providers,
        consumed_contexts: node.hooks.use_context.clone(),
        references: scan.references,
        state_bindings: scan.state_bindings,
    };

    Ok(ExtractedComponent { node, facts })
}

/// Build the node for a top-level context declaration.
pub fn extract_context(
    tree: &SyntaxTree<'_>,
    site: &ContextSite,
) -> Result<(ComponentNode, ContextFacts), ExtractionError> {
    let location = tree.locate(site.span)?;
    let node = ComponentNode::new(
        NodeType::Context,
        site.name.as_str(),
        tree.path(),
        location.line,
        location.column,
    );
    let facts = ContextFacts {
        node_id: node.id.clone(),
        binding: site.name.clone(),
    };
    Ok((node, facts))
}
