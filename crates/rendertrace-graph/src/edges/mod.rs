//! Edge builder.
//!
//! Per-file [`facts`] are collected while each tree is alive; [`build_edges`]
//! links them once every file has been processed. A name that cannot be
//! resolved to a node of the analyzed file set produces no edge.

pub mod facts;
mod link;
mod resolve;

pub use link::build_edges;
pub use resolve::ImportResolver;

#[cfg(test)]
mod tests {
    use super::facts::*;
    use super::*;
    use crate::config::AnalyzerConfig;
    use crate::graph::EdgeType;

    fn component(id: &str, binding: &str) -> ComponentFacts {
        ComponentFacts {
            node_id: id.into(),
            binding: binding.into(),
            ..ComponentFacts::default()
        }
    }

    fn usage(tag: &str, props: &[&str]) -> JsxUsage {
        JsxUsage {
            tag: tag.into(),
            props: props.iter().map(|p| p.to_string()).collect(),
            identifier_props: Vec::new(),
        }
    }

    #[test]
    fn same_file_usage_becomes_props_edge() {
        let mut file = FileFacts::new("a.tsx");
        let mut parent = component("a.tsx:Parent:1", "Parent");
        parent.usages.push(usage("Child", &["title", "onClick"]));
        parent.usages.push(usage("Child", &["title", "extra"]));
        parent.usages.push(usage("Unknown", &["x"]));
        file.components.push(parent);
        file.components.push(component("a.tsx:Child:5", "Child"));

        let edges = build_edges(&[file], &AnalyzerConfig::default());
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].id, "a.tsx:Parent:1->a.tsx:Child:5:props");
        assert_eq!(edges[0].edge_type, EdgeType::Props);
        assert_eq!(
            edges[0].props,
            Some(vec!["title".into(), "onClick".into(), "extra".into()])
        );
    }

    #[test]
    fn state_bindings_passed_down_become_state_edges() {
        let mut file = FileFacts::new("a.tsx");
        let mut parent = component("p", "Parent");
        parent.state_bindings = vec!["count".into(), "setCount".into()];
        parent.usages.push(JsxUsage {
            tag: "Child".into(),
            props: vec!["value".into(), "onChange".into(), "label".into()],
            identifier_props: vec![
                ("value".into(), "count".into()),
                ("onChange".into(), "setCount".into()),
                ("label".into(), "title".into()),
            ],
        });
        file.components.push(parent);
        file.components.push(component("c", "Child"));

        let edges = build_edges(&[file], &AnalyzerConfig::default());
        let state = edges.iter().find(|e| e.edge_type == EdgeType::State).unwrap();
        assert_eq!(state.props, Some(vec!["value".into(), "onChange".into()]));
    }

    #[test]
    fn imported_components_get_import_edges() {
        let mut app = FileFacts::new("src/App.tsx");
        app.imports.push(ImportBinding {
            local: "Btn".into(),
            imported: Imported::Default,
            specifier: "./Button".into(),
        });
        let mut root = component("app", "App");
        root.usages.push(usage("Btn", &["label"]));
        root.references.push("Btn".into());
        app.components.push(root);

        let mut button = FileFacts::new("src/Button.tsx");
        button.components.push(component("button", "Button"));
        button.exports.push(ExportBinding::default_export("Button"));

        let edges = build_edges(&[app, button], &AnalyzerConfig::default());
        let ids: Vec<&str> = edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["app->button:props", "app->button:import"]);
    }

    #[test]
    fn unexported_targets_do_not_resolve_across_files() {
        let mut app = FileFacts::new("App.tsx");
        app.imports.push(ImportBinding {
            local: "Hidden".into(),
            imported: Imported::Named("Hidden".into()),
            specifier: "./Hidden".into(),
        });
        let mut root = component("app", "App");
        root.usages.push(usage("Hidden", &[]));
        app.components.push(root);

        let mut hidden = FileFacts::new("Hidden.tsx");
        hidden.components.push(component("hidden", "Hidden"));

        assert!(build_edges(&[app, hidden], &AnalyzerConfig::default()).is_empty());
    }

    #[test]
    fn context_edges_link_providers_and_consumers() {
        let mut theme = FileFacts::new("theme.ts");
        theme.contexts.push(ContextFacts {
            node_id: "ctx".into(),
            binding: "ThemeContext".into(),
        });
        theme.exports.push(ExportBinding::named("ThemeContext"));

        let mut app = FileFacts::new("App.tsx");
        let mut provider = component("provider", "App");
        provider.providers.push("ThemeContext".into());
        let mut consumer = component("consumer", "Toolbar");
        // Not imported: matched by its unique exported name.
        consumer.consumed_contexts.push("ThemeContext".into());
        app.components.push(provider);
        app.components.push(consumer);

        let edges = build_edges(&[theme, app], &AnalyzerConfig::default());
        let ids: Vec<&str> = edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["provider->ctx:context", "ctx->consumer:context"]);
        assert!(
            edges
                .iter()
                .all(|e| e.context_name.as_deref() == Some("ThemeContext"))
        );
    }

    #[test]
    fn ambiguous_context_names_are_omitted() {
        let mut files = Vec::new();
        for path in ["a.ts", "b.ts"] {
            let mut file = FileFacts::new(path);
            file.contexts.push(ContextFacts {
                node_id: format!("{path}:Ctx"),
                binding: "Ctx".into(),
            });
            file.exports.push(ExportBinding::named("Ctx"));
            files.push(file);
        }
        let mut consumer_file = FileFacts::new("c.tsx");
        let mut consumer = component("consumer", "C");
        consumer.consumed_contexts.push("Ctx".into());
        consumer_file.components.push(consumer);
        files.push(consumer_file);

        assert!(build_edges(&files, &AnalyzerConfig::default()).is_empty());
    }

    #[test]
    fn aliases_resolve_to_their_target() {
        let mut file = FileFacts::new("a.tsx");
        let mut parent = component("parent", "Parent");
        parent.usages.push(usage("FancyCard", &[]));
        file.components.push(parent);
        file.components.push(component("card", "Card"));
        file.aliases.push(Alias {
            binding: "FancyCard".into(),
            target: "Card".into(),
        });

        let edges = build_edges(&[file], &AnalyzerConfig::default());
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].target, "card");
        assert_eq!(edges[0].props, Some(vec![]));
    }

    #[test]
    fn recursive_rendering_is_not_an_edge() {
        let mut file = FileFacts::new("tree.tsx");
        let mut node = component("tree", "TreeNode");
        node.usages.push(usage("TreeNode", &["node"]));
        file.components.push(node);

        assert!(build_edges(&[file], &AnalyzerConfig::default()).is_empty());
    }
}
