//! Single scoped walk over a component body.

use indexmap::IndexSet;
use oxc_ast::ast::{
    Argument, BindingPattern, BindingPatternKind, CallExpression, ConditionalExpression,
    Expression, Function, FunctionBody, IdentifierReference, JSXAttributeItem, JSXAttributeName,
    JSXAttributeValue, JSXElementName, JSXExpression, JSXMemberExpressionObject,
    JSXOpeningElement, LogicalExpression, VariableDeclarator,
};
use oxc_ast_visit::{Visit, walk};
use oxc_semantic::ScopeFlags;

use crate::config::{AnalyzerConfig, HookCategory};
use crate::detect::{InitShape, callee_name, classify_init, is_function_declaration};
use crate::edges::facts::JsxUsage;
use crate::graph::HookUsage;

/// Everything observed in one component body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyScan {
    pub hooks: HookUsage,
    pub has_use_callback: bool,
    pub has_use_memo: bool,
    /// A `<Ns>.memo(...)` call appears in the body.
    pub calls_memo: bool,
    pub has_list_rendering: bool,
    pub has_conditional_rendering: bool,
    pub usages: Vec<JsxUsage>,
    pub providers: Vec<String>,
    pub references: Vec<String>,
    pub state_bindings: Vec<String>,
}

/// Walk `body` without entering nested function declarations or
/// function-valued bindings.
pub fn scan_body(body: &FunctionBody<'_>, config: &AnalyzerConfig) -> BodyScan {
    let hooks = if config.tracks_selectors() {
        HookUsage::with_selectors()
    } else {
        HookUsage::default()
    };

    let mut scanner = BodyScanner {
        config,
        scan: BodyScan {
            hooks,
            ..BodyScan::default()
        },
        pending: None,
        references: IndexSet::new(),
    };
    scanner.visit_function_body(body);

    let mut scan = scanner.scan;
    scan.references = scanner.references.into_iter().collect();
    scan
}

/// Names bound by the declarator whose initializer is being walked.
struct Binding {
    /// `x` in `const x = ...` or `const [x, setX] = ...`.
    primary: Option<String>,
    all: Vec<String>,
}

impl Binding {
    fn of(pattern: &BindingPattern<'_>) -> Self {
        match &pattern.kind {
            BindingPatternKind::BindingIdentifier(ident) => Binding {
                primary: Some(ident.name.to_string()),
                all: vec![ident.name.to_string()],
            },
            BindingPatternKind::ArrayPattern(array) => {
                let names: Vec<Option<String>> = array
                    .elements
                    .iter()
                    .map(|element| match element.as_ref().map(|e| &e.kind) {
                        Some(BindingPatternKind::BindingIdentifier(ident)) => {
                            Some(ident.name.to_string())
                        }
                        _ => None,
                    })
                    .collect();
                Binding {
                    primary: names.first().cloned().flatten(),
                    all: names.into_iter().flatten().collect(),
                }
            }
            _ => Binding {
                primary: None,
                all: Vec::new(),
            },
        }
    }
}

struct BodyScanner<'c> {
    config: &'c AnalyzerConfig,
    scan: BodyScan,
    pending: Option<Binding>,
    references: IndexSet<String>,
}

impl BodyScanner<'_> {
    fn record_hook(&mut self, category: HookCategory, call: &CallExpression<'_>, binding: Option<Binding>) {
        match category {
            HookCategory::State => {
                if let Some(binding) = binding {
                    self.scan.hooks.use_state.extend(binding.primary);
                    self.scan.state_bindings.extend(binding.all);
                }
            }
            HookCategory::Selector => {
                let primary = binding.and_then(|b| b.primary);
                if let (Some(selectors), Some(name)) = (self.scan.hooks.use_selector.as_mut(), primary) {
                    selectors.push(name);
                }
            }
            HookCategory::Reducer => {
                if let Some(Argument::Identifier(reducer)) = call.arguments.first() {
                    self.scan.hooks.use_reducer.push(reducer.name.to_string());
                }
                if let Some(binding) = binding {
                    self.scan.state_bindings.extend(binding.all);
                }
            }
            HookCategory::Context => {
                let target = match call.arguments.first() {
                    Some(Argument::Identifier(ident)) => Some(ident.name.to_string()),
                    Some(Argument::StaticMemberExpression(member)) => {
                        Some(member.property.name.to_string())
                    }
                    _ => None,
                };
                self.scan.hooks.use_context.extend(target);
            }
            HookCategory::Callback => self.scan.has_use_callback = true,
            HookCategory::Memo => self.scan.has_use_memo = true,
        }
    }

    fn record_usage(&mut self, tag: &str, element: &JSXOpeningElement<'_>) {
        let mut usage = JsxUsage {
            tag: tag.to_string(),
            ..JsxUsage::default()
        };

        for item in &element.attributes {
            // Spreads carry no statically known names.
            let JSXAttributeItem::Attribute(attr) = item else {
                continue;
            };
            let JSXAttributeName::Identifier(name) = &attr.name else {
                continue;
            };
            let name = name.name.as_str();
            if name == "key" {
                continue;
            }
            if !usage.props.iter().any(|p| p == name) {
                usage.props.push(name.to_string());
            }
            if let Some(JSXAttributeValue::ExpressionContainer(container)) = &attr.value {
                if let JSXExpression::Identifier(value) = &container.expression {
                    usage
                        .identifier_props
                        .push((name.to_string(), value.name.to_string()));
                }
            }
        }

        self.scan.usages.push(usage);
    }
}

impl<'c, 'ast> Visit<'ast> for BodyScanner<'c> {
    fn visit_function(&mut self, func: &Function<'ast>, flags: ScopeFlags) {
        if !is_function_declaration(func) {
            walk::walk_function(self, func, flags);
        }
    }

    fn visit_variable_declarator(&mut self, declarator: &VariableDeclarator<'ast>) {
        if let Some(init) = &declarator.init {
            // The wrapped function is its own scope; only the wrappers count here.
            if let InitShape::Function { memoized, .. } = classify_init(init, self.config) {
                self.scan.calls_memo |= memoized;
                return;
            }
        }

        let binding = declarator
            .init
            .as_ref()
            .filter(|init| matches!(init.without_parentheses(), Expression::CallExpression(_)))
            .map(|_| Binding::of(&declarator.id));

        let outer = std::mem::replace(&mut self.pending, binding);
        walk::walk_variable_declarator(self, declarator);
        self.pending = outer;
    }

    fn visit_call_expression(&mut self, call: &CallExpression<'ast>) {
        // Only the outermost call of an initializer sees the binding.
        let binding = self.pending.take();

        if let Some(callee) = callee_name(&call.callee) {
            if callee.dotted && self.config.is_list_method(callee.name) {
                self.scan.has_list_rendering = true;
            }
            if callee.dotted && self.config.is_memo_wrapper(callee.name) {
                self.scan.calls_memo = true;
            }
            if let Some(category) = self.config.hook_category(callee.name) {
                self.record_hook(category, call, binding);
            }
        }

        walk::walk_call_expression(self, call);
    }

    fn visit_conditional_expression(&mut self, expr: &ConditionalExpression<'ast>) {
        self.scan.has_conditional_rendering = true;
        walk::walk_conditional_expression(self, expr);
    }

    fn visit_logical_expression(&mut self, expr: &LogicalExpression<'ast>) {
        if expr.operator.is_and() || expr.operator.is_or() {
            self.scan.has_conditional_rendering = true;
        }
        walk::walk_logical_expression(self, expr);
    }

    fn visit_jsx_opening_element(&mut self, element: &JSXOpeningElement<'ast>) {
        match &element.name {
            JSXElementName::IdentifierReference(ident) => {
                self.record_usage(ident.name.as_str(), element);
            }
            JSXElementName::MemberExpression(member) if member.property.name.as_str() == "Provider" => {
                if let JSXMemberExpressionObject::IdentifierReference(object) = &member.object {
                    self.scan.providers.push(object.name.to_string());
                }
            }
            _ => {}
        }
        walk::walk_jsx_opening_element(self, element);
    }

    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'ast>) {
        if !self.references.contains(ident.name.as_str()) {
            self.references.insert(ident.name.to_string());
        }
    }
}
