//! End-to-end scenarios over small file sets.

use super::{analyze_files, analyze_with};
use crate::{AnalyzerConfig, EdgeType, HookCategory, NodeType};

#[test]
fn single_function_component() {
    let report = analyze_files(&[("a.tsx", "function Foo() { return <div/>; }")]);
    let graph = report.graph;

    assert_eq!(graph.nodes.len(), 1);
    let foo = &graph.nodes[0];
    assert_eq!(foo.name, "Foo");
    assert_eq!(foo.id, "a.tsx:Foo:1");
    assert_eq!(foo.node_type, NodeType::Component);
    assert!(!foo.is_memoized);
    assert!(foo.props.is_empty());
    assert!(foo.hooks.use_state.is_empty());
    assert!(foo.hooks.use_reducer.is_empty());
    assert!(foo.hooks.use_context.is_empty());
    assert!(!foo.has_list_rendering);
    assert!(!foo.has_conditional_rendering);
    assert!(graph.edges.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn destructured_arrow_with_state_and_list() {
    let report = analyze_files(&[(
        "bar.jsx",
        "const Bar = ({id, name}) => { const [x,setX]=useState(0); return items.map(i => <span key={i}/>); }",
    )]);
    let graph = report.graph;

    assert_eq!(graph.nodes.len(), 1);
    let bar = &graph.nodes[0];
    assert_eq!(bar.name, "Bar");
    assert_eq!(bar.props, vec!["id", "name"]);
    assert_eq!(bar.hooks.use_state, vec!["x"]);
    assert!(bar.has_list_rendering);
    assert!(!bar.has_conditional_rendering);
}

#[test]
fn functions_without_markup_produce_no_nodes() {
    let report = analyze_files(&[(
        "util.ts",
        "export function add(a: number, b: number) { return a + b; }\nexport const twice = (n: number) => n * 2;",
    )]);
    assert!(report.graph.nodes.is_empty());
    assert_eq!(report.graph.metadata.total_components, 0);
    assert!(report.warnings.is_empty());
}

#[test]
fn invalid_file_is_skipped_with_a_warning() {
    let report = analyze_files(&[
        ("broken.tsx", "export function Broken( { return <div>; }"),
        ("ok.tsx", "export const Ok = () => <section/>;"),
    ]);

    let names: Vec<&str> = report.graph.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["Ok"]);
    assert_eq!(report.graph.metadata.total_components, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].path, "broken.tsx");
    assert!(report.warnings[0].message.contains("broken.tsx"));
}

#[test]
fn anonymous_default_export_gets_placeholder_name() {
    let report = analyze_files(&[("page.tsx", "export default () => <main/>;")]);
    assert_eq!(report.graph.nodes[0].name, "AnonymousComponent");
    assert_eq!(report.graph.nodes[0].id, "page.tsx:AnonymousComponent:1");
}

#[test]
fn memoization_and_hook_flags() {
    let report = analyze_files(&[(
        "list.tsx",
        r#"
import React, { useCallback, useMemo } from 'react';

export const List = React.memo(function List({ items, onSelect }) {
  const sorted = useMemo(() => [...items].sort(), [items]);
  const handle = useCallback((id) => onSelect(id), [onSelect]);
  return sorted.length ? <ul>{sorted.map(i => <li onClick={handle}>{i}</li>)}</ul> : null;
});
"#,
    )]);

    let list = &report.graph.nodes[0];
    assert_eq!(list.name, "List");
    assert_eq!(list.line_number, 4);
    assert!(list.is_memoized);
    assert!(list.has_use_memo);
    assert!(list.has_use_callback);
    assert!(list.has_list_rendering);
    assert!(list.has_conditional_rendering);
    assert_eq!(list.props, vec!["items", "onSelect"]);
}

#[test]
fn cross_file_props_import_and_state_edges() {
    let report = analyze_files(&[
        (
            "src/App.tsx",
            r#"
import { useState } from 'react';
import Counter from './components/Counter';

export function App() {
  const [count, setCount] = useState(0);
  return <Counter value={count} onChange={setCount} label="clicks" />;
}
"#,
        ),
        (
            "src/components/Counter.tsx",
            r#"
export default function Counter({ value, onChange, label }) {
  return <button onClick={() => onChange(value + 1)}>{label}: {value}</button>;
}
"#,
        ),
    ]);
    let graph = report.graph;

    let app = "src/App.tsx:App:5";
    let counter = "src/components/Counter.tsx:Counter:2";
    assert!(graph.node(app).is_some());
    assert!(graph.node(counter).is_some());

    let props = graph
        .edges
        .iter()
        .find(|e| e.edge_type == EdgeType::Props)
        .unwrap();
    assert_eq!(props.source, app);
    assert_eq!(props.target, counter);
    assert_eq!(
        props.props,
        Some(vec!["value".into(), "onChange".into(), "label".into()])
    );

    let state = graph
        .edges
        .iter()
        .find(|e| e.edge_type == EdgeType::State)
        .unwrap();
    assert_eq!(state.props, Some(vec!["value".into(), "onChange".into()]));

    assert!(
        graph
            .edges
            .iter()
            .any(|e| e.edge_type == EdgeType::Import && e.source == app && e.target == counter)
    );
    assert_eq!(graph.metadata.total_edges, graph.edges.len());
}

#[test]
fn context_providers_and_consumers() {
    let report = analyze_files(&[
        (
            "src/theme.ts",
            "import { createContext } from 'react';\nexport const ThemeContext = createContext('light');",
        ),
        (
            "src/App.tsx",
            r#"
import { ThemeContext } from './theme';
import { Toolbar } from './Toolbar';

export const App = () => (
  <ThemeContext.Provider value="dark">
    <Toolbar />
  </ThemeContext.Provider>
);
"#,
        ),
        (
            "src/Toolbar.tsx",
            r#"
import { useContext } from 'react';
import { ThemeContext } from './theme';

export function Toolbar() {
  const theme = useContext(ThemeContext);
  return <nav className={theme} />;
}
"#,
        ),
    ]);
    let graph = report.graph;

    let context = graph
        .nodes
        .iter()
        .find(|n| n.node_type == NodeType::Context)
        .unwrap();
    assert_eq!(context.id, "src/theme.ts:ThemeContext:2");

    let context_edges: Vec<(&str, &str)> = graph
        .edges
        .iter()
        .filter(|e| e.edge_type == EdgeType::Context)
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        context_edges,
        vec![
            ("src/App.tsx:App:5", "src/theme.ts:ThemeContext:2"),
            ("src/theme.ts:ThemeContext:2", "src/Toolbar.tsx:Toolbar:5"),
        ]
    );
    assert!(
        graph
            .edges
            .iter()
            .filter(|e| e.edge_type == EdgeType::Context)
            .all(|e| e.context_name.as_deref() == Some("ThemeContext"))
    );

    let toolbar = graph.node("src/Toolbar.tsx:Toolbar:5").unwrap();
    assert_eq!(toolbar.hooks.use_context, vec!["ThemeContext"]);
}

#[test]
fn unresolved_children_produce_no_edges() {
    let report = analyze_files(&[(
        "App.tsx",
        "import { Modal } from 'some-ui-kit';\nexport const App = () => <Modal open />;",
    )]);
    assert_eq!(report.graph.nodes.len(), 1);
    assert!(report.graph.edges.is_empty());
}

#[test]
fn path_aliases_resolve_imports() {
    let config = AnalyzerConfig::default().with_path_alias("@/", "src/");
    let report = analyze_with(
        config,
        &[
            (
                "src/pages/Home.tsx",
                "import { Card } from '@/components/Card';\nexport const Home = () => <Card />;",
            ),
            ("src/components/Card.tsx", "export const Card = () => <div/>;"),
        ],
    );
    assert!(
        report
            .graph
            .edges
            .iter()
            .any(|e| e.edge_type == EdgeType::Import
                && e.target == "src/components/Card.tsx:Card:1")
    );
}

#[test]
fn configured_selector_hooks_are_reported() {
    let config = AnalyzerConfig::default().with_hook("useSelector", HookCategory::Selector);
    let report = analyze_with(
        config,
        &[(
            "Cart.tsx",
            "export function Cart() { const items = useSelector(selectItems); return <ul>{items.length}</ul>; }",
        )],
    );
    let json = serde_json::to_value(&report.graph).unwrap();
    assert_eq!(
        json["nodes"][0]["hooks"]["useSelector"],
        serde_json::json!(["items"])
    );
}

#[test]
fn duplicate_paths_keep_first_nodes() {
    let report = analyze_files(&[
        ("a.tsx", "export const A = () => <p/>;"),
        ("a.tsx", "export const A = () => <p/>;"),
    ]);
    assert_eq!(report.graph.nodes.len(), 1);
    assert_eq!(report.graph.metadata.total_components, 1);
}
