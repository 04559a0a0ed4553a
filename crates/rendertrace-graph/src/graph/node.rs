use serde::{Deserialize, Serialize};

/// Placeholder name for components without a declared or bound name.
pub const ANONYMOUS_COMPONENT: &str = "AnonymousComponent";

/// Kind of graph node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// A function-shaped definition that produces markup.
    Component,
    /// A context object created by a context factory call.
    Context,
    /// Reserved for external stores; not produced by the extractor.
    Store,
    /// Reserved for custom hooks; not produced by the extractor.
    Hook,
}

impl NodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Component => "component",
            NodeType::Context => "context",
            NodeType::Store => "store",
            NodeType::Hook => "hook",
        }
    }
}

/// Hook usage recorded for a component, keyed by hook category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HookUsage {
    /// State bindings (`const [x, setX] = useState()` records `x`).
    pub use_state: Vec<String>,
    /// Reducer function names passed to reducer hooks.
    pub use_reducer: Vec<String>,
    /// Context names passed to context hooks.
    pub use_context: Vec<String>,
    /// Selector bindings; present only when a selector hook is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_selector: Option<Vec<String>>,
}

impl HookUsage {
    /// Hook usage with the selector list enabled (but empty).
    pub fn with_selectors() -> Self {
        Self {
            use_selector: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.use_state.is_empty()
            && self.use_reducer.is_empty()
            && self.use_context.is_empty()
            && self.use_selector.as_ref().is_none_or(Vec::is_empty)
    }
}

/// A node of the component graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    pub file_path: String,
    /// 1-based line of the definition.
    pub line_number: u32,
    /// 0-based column of the definition.
    pub column_number: u32,
    pub is_memoized: bool,
    pub has_use_callback: bool,
    pub has_use_memo: bool,
    pub hooks: HookUsage,
    pub props: Vec<String>,
    pub has_list_rendering: bool,
    pub has_conditional_rendering: bool,
}

impl ComponentNode {
    /// Deterministic node id: `{file_path}:{name}:{line}`.
    pub fn make_id(file_path: &str, name: &str, line: u32) -> String {
        format!("{file_path}:{name}:{line}")
    }

    /// A node with every behavioural flag cleared.
    pub fn new(
        node_type: NodeType,
        name: impl Into<String>,
        file_path: impl Into<String>,
        line_number: u32,
        column_number: u32,
    ) -> Self {
        let name = name.into();
        let file_path = file_path.into();
        Self {
            id: Self::make_id(&file_path, &name, line_number),
            node_type,
            name,
            file_path,
            line_number,
            column_number,
            is_memoized: false,
            has_use_callback: false,
            has_use_memo: false,
            hooks: HookUsage::default(),
            props: Vec::new(),
            has_list_rendering: false,
            has_conditional_rendering: false,
        }
    }

    pub fn is_component(&self) -> bool {
        self.node_type == NodeType::Component
    }
}
