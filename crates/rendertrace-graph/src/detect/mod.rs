//! Component detection.
//!
//! Candidates are the top-level function-shaped bindings of a file. A
//! candidate is a component when its body builds markup without crossing
//! into a nested function declaration or a nested function-valued binding.
//! Detection is purely syntactic: names are never resolved.

use oxc_ast::ast::{
    ArrowFunctionExpression, BindingPatternKind, Declaration, ExportDefaultDeclaration,
    ExportDefaultDeclarationKind, ExportNamedDeclaration, Expression, FormalParameters, Function,
    FunctionBody, FunctionType, ImportDeclaration, ImportDeclarationSpecifier, JSXElement,
    JSXFragment, ModuleExportName, Statement, VariableDeclaration, VariableDeclarator,
};
use oxc_ast_visit::{Visit, walk};
use oxc_semantic::ScopeFlags;
use oxc_span::Span;

use crate::config::AnalyzerConfig;
use crate::edges::facts::{Alias, ExportBinding, ImportBinding, Imported};
use crate::graph::ANONYMOUS_COMPONENT;
use crate::parser::SyntaxTree;

/// A function or arrow expression that may define a component.
#[derive(Clone, Copy)]
pub enum FunctionShape<'b, 'a> {
    Function(&'b Function<'a>),
    Arrow(&'b ArrowFunctionExpression<'a>),
}

impl<'b, 'a> FunctionShape<'b, 'a> {
    pub fn span(&self) -> Span {
        match self {
            FunctionShape::Function(func) => func.span,
            FunctionShape::Arrow(arrow) => arrow.span,
        }
    }

    pub fn params(&self) -> &'b FormalParameters<'a> {
        match self {
            FunctionShape::Function(func) => &func.params,
            FunctionShape::Arrow(arrow) => &arrow.params,
        }
    }

    pub fn body(&self) -> Option<&'b FunctionBody<'a>> {
        match self {
            FunctionShape::Function(func) => func.body.as_deref(),
            FunctionShape::Arrow(arrow) => Some(&arrow.body),
        }
    }

    fn declared_name(&self) -> Option<String> {
        match self {
            FunctionShape::Function(func) => func.id.as_ref().map(|id| id.name.to_string()),
            FunctionShape::Arrow(_) => None,
        }
    }
}

/// A top-level function-shaped binding.
pub struct Candidate<'b, 'a> {
    pub name: String,
    pub function: FunctionShape<'b, 'a>,
    /// Wrapped in a `<Ns>.memo(...)` call at the definition site.
    pub memoized: bool,
}

/// A top-level `const X = createContext(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSite {
    pub name: String,
    pub span: Span,
}

/// Top-level bindings of one file.
#[derive(Default)]
pub struct ModuleScan<'b, 'a> {
    pub candidates: Vec<Candidate<'b, 'a>>,
    pub contexts: Vec<ContextSite>,
    pub imports: Vec<ImportBinding>,
    pub exports: Vec<ExportBinding>,
    pub aliases: Vec<Alias>,
    /// Bindings memoized after their definition (`export default React.memo(Card)`).
    pub memo_marks: Vec<String>,
}

impl<'b, 'a> ModuleScan<'b, 'a> {
    /// Candidates whose body renders markup.
    pub fn components<'s>(
        &'s self,
        config: &'s AnalyzerConfig,
    ) -> impl Iterator<Item = &'s Candidate<'b, 'a>> {
        self.candidates.iter().filter(move |candidate| {
            candidate
                .function
                .body()
                .is_some_and(|body| renders_markup(body, config))
        })
    }

    fn function_declaration(&mut self, func: &'b Function<'a>) -> Option<String> {
        let name = func.id.as_ref()?.name.to_string();
        func.body.as_ref()?;
        self.candidates.push(Candidate {
            name: name.clone(),
            function: FunctionShape::Function(func),
            memoized: false,
        });
        Some(name)
    }

    fn variable_declaration(
        &mut self,
        decl: &'b VariableDeclaration<'a>,
        exported: bool,
        config: &AnalyzerConfig,
    ) {
        for declarator in &decl.declarations {
            let BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
                continue;
            };
            let Some(init) = &declarator.init else {
                continue;
            };
            let name = id.name.to_string();

            match classify_init(init, config) {
                InitShape::Function { shape, memoized } => self.candidates.push(Candidate {
                    name: name.clone(),
                    function: shape,
                    memoized,
                }),
                InitShape::Alias { target, memoized } => {
                    if memoized {
                        self.memo_marks.push(target.clone());
                    }
                    self.aliases.push(Alias {
                        binding: name.clone(),
                        target,
                    });
                }
                InitShape::Context => self.contexts.push(ContextSite {
                    name: name.clone(),
                    span: declarator.span,
                }),
                InitShape::Other => continue,
            }

            if exported {
                self.exports.push(ExportBinding::named(name));
            }
        }
    }

    fn export_named(&mut self, export: &'b ExportNamedDeclaration<'a>, config: &AnalyzerConfig) {
        match &export.declaration {
            Some(Declaration::FunctionDeclaration(func)) => {
                if let Some(name) = self.function_declaration(func) {
                    self.exports.push(ExportBinding::named(name));
                }
            }
            Some(Declaration::VariableDeclaration(decl)) => {
                self.variable_declaration(decl, true, config);
            }
            _ => {}
        }

        // Re-exports point at another module's bindings.
        if export.source.is_some() {
            return;
        }
        for specifier in &export.specifiers {
            self.exports.push(ExportBinding::renamed(
                module_export_name(&specifier.local),
                module_export_name(&specifier.exported),
            ));
        }
    }

    fn export_default(&mut self, export: &'b ExportDefaultDeclaration<'a>, config: &AnalyzerConfig) {
        if let ExportDefaultDeclarationKind::FunctionDeclaration(func) = &export.declaration {
            if func.body.is_none() {
                return;
            }
            let shape = FunctionShape::Function(func);
            let name = shape
                .declared_name()
                .unwrap_or_else(|| ANONYMOUS_COMPONENT.to_string());
            self.candidates.push(Candidate {
                name: name.clone(),
                function: shape,
                memoized: false,
            });
            self.exports.push(ExportBinding::default_export(name));
            return;
        }

        let Some(expr) = export.declaration.as_expression() else {
            return;
        };
        match classify_init(expr, config) {
            InitShape::Function { shape, memoized } => {
                let name = shape
                    .declared_name()
                    .unwrap_or_else(|| ANONYMOUS_COMPONENT.to_string());
                self.candidates.push(Candidate {
                    name: name.clone(),
                    function: shape,
                    memoized,
                });
                self.exports.push(ExportBinding::default_export(name));
            }
            InitShape::Alias { target, memoized } => {
                if memoized {
                    self.memo_marks.push(target.clone());
                }
                self.exports.push(ExportBinding::default_export(target));
            }
            InitShape::Context | InitShape::Other => {}
        }
    }

    fn import(&mut self, import: &ImportDeclaration<'a>) {
        if import.import_kind.is_type() {
            return;
        }
        let Some(specifiers) = &import.specifiers else {
            return;
        };
        let source = import.source.value.to_string();

        for specifier in specifiers {
            let (local, imported) = match specifier {
                ImportDeclarationSpecifier::ImportSpecifier(spec) => (
                    spec.local.name.to_string(),
                    Imported::Named(module_export_name(&spec.imported)),
                ),
                ImportDeclarationSpecifier::ImportDefaultSpecifier(spec) => {
                    (spec.local.name.to_string(), Imported::Default)
                }
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(spec) => {
                    (spec.local.name.to_string(), Imported::Namespace)
                }
            };
            self.imports.push(ImportBinding {
                local,
                imported,
                specifier: source.clone(),
            });
        }
    }
}

/// Collect the top-level bindings of a parsed file.
pub fn scan_module<'b, 'a>(
    tree: &'b SyntaxTree<'a>,
    config: &AnalyzerConfig,
) -> ModuleScan<'b, 'a> {
    let mut scan = ModuleScan::default();

    for stmt in &tree.program.body {
        match stmt {
            Statement::FunctionDeclaration(func) => {
                scan.function_declaration(func);
            }
            Statement::VariableDeclaration(decl) => scan.variable_declaration(decl, false, config),
            Statement::ExportNamedDeclaration(export) => scan.export_named(export, config),
            Statement::ExportDefaultDeclaration(export) => scan.export_default(export, config),
            Statement::ImportDeclaration(import) => scan.import(import),
            _ => {}
        }
    }

    scan
}

/// What a binding's initializer is, after looking through wrapper calls.
pub(crate) enum InitShape<'b, 'a> {
    Function {
        shape: FunctionShape<'b, 'a>,
        memoized: bool,
    },
    Alias {
        target: String,
        memoized: bool,
    },
    Context,
    Other,
}

pub(crate) fn classify_init<'b, 'a>(
    expr: &'b Expression<'a>,
    config: &AnalyzerConfig,
) -> InitShape<'b, 'a> {
    match expr.without_parentheses() {
        Expression::FunctionExpression(func) => InitShape::Function {
            shape: FunctionShape::Function(func),
            memoized: false,
        },
        Expression::ArrowFunctionExpression(arrow) => InitShape::Function {
            shape: FunctionShape::Arrow(arrow),
            memoized: false,
        },
        Expression::Identifier(ident) => InitShape::Alias {
            target: ident.name.to_string(),
            memoized: false,
        },
        Expression::CallExpression(call) => {
            let Some(callee) = callee_name(&call.callee) else {
                return InitShape::Other;
            };
            if config.is_context_factory(callee.name) {
                return InitShape::Context;
            }

            let wraps_memo = callee.dotted && config.is_memo_wrapper(callee.name);
            let is_wrapper = config.is_memo_wrapper(callee.name)
                || config.is_transparent_wrapper(callee.name);
            if !is_wrapper {
                return InitShape::Other;
            }

            let Some(inner) = call.arguments.first().and_then(|arg| arg.as_expression()) else {
                return InitShape::Other;
            };
            match classify_init(inner, config) {
                InitShape::Function { shape, memoized } => InitShape::Function {
                    shape,
                    memoized: memoized || wraps_memo,
                },
                InitShape::Alias { target, memoized } => InitShape::Alias {
                    target,
                    memoized: memoized || wraps_memo,
                },
                InitShape::Context | InitShape::Other => InitShape::Other,
            }
        }
        _ => InitShape::Other,
    }
}

/// Name of a call's callee: `foo(...)` or `<object>.foo(...)`.
pub(crate) struct CalleeName<'b> {
    pub name: &'b str,
    pub dotted: bool,
}

pub(crate) fn callee_name<'b>(callee: &'b Expression<'_>) -> Option<CalleeName<'b>> {
    match callee.without_parentheses() {
        Expression::Identifier(ident) => Some(CalleeName {
            name: ident.name.as_str(),
            dotted: false,
        }),
        Expression::StaticMemberExpression(member) => Some(CalleeName {
            name: member.property.name.as_str(),
            dotted: true,
        }),
        _ => None,
    }
}

/// Whether a nested declarator binds a function (and so opens its own scope).
pub(crate) fn is_function_binding(
    declarator: &VariableDeclarator<'_>,
    config: &AnalyzerConfig,
) -> bool {
    declarator
        .init
        .as_ref()
        .is_some_and(|init| matches!(classify_init(init, config), InitShape::Function { .. }))
}

pub(crate) fn is_function_declaration(func: &Function<'_>) -> bool {
    matches!(func.r#type, FunctionType::FunctionDeclaration)
}

/// Whether `body` builds an element or fragment in its own scope.
pub fn renders_markup(body: &FunctionBody<'_>, config: &AnalyzerConfig) -> bool {
    let mut probe = MarkupProbe {
        config,
        found: false,
    };
    probe.visit_function_body(body);
    probe.found
}

struct MarkupProbe<'c> {
    config: &'c AnalyzerConfig,
    found: bool,
}

impl<'c, 'ast> Visit<'ast> for MarkupProbe<'c> {
    fn visit_jsx_element(&mut self, _element: &JSXElement<'ast>) {
        self.found = true;
    }

    fn visit_jsx_fragment(&mut self, _fragment: &JSXFragment<'ast>) {
        self.found = true;
    }

    fn visit_function(&mut self, func: &Function<'ast>, flags: ScopeFlags) {
        if !is_function_declaration(func) {
            walk::walk_function(self, func, flags);
        }
    }

    fn visit_variable_declarator(&mut self, declarator: &VariableDeclarator<'ast>) {
        if !is_function_binding(declarator, self.config) {
            walk::walk_variable_declarator(self, declarator);
        }
    }
}

fn module_export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(lit) => lit.value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use oxc_allocator::Allocator;

    fn component_names(source: &str) -> Vec<String> {
        let allocator = Allocator::default();
        let tree = parse(&allocator, "test.tsx", source).unwrap();
        let config = AnalyzerConfig::default();
        let scan = scan_module(&tree, &config);
        scan.components(&config).map(|c| c.name.clone()).collect()
    }

    #[test]
    fn function_declaration_returning_markup_is_a_component() {
        assert_eq!(component_names("function Foo() { return <div/>; }"), vec!["Foo"]);
    }

    #[test]
    fn arrow_and_function_expression_bindings_are_components() {
        let names = component_names(
            "const A = () => <p/>;\nconst B = function () { return <></>; };\nlet c = 1;",
        );
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn functions_without_markup_are_not_components() {
        let names = component_names("export function useThing() { return 42; }\nconst f = () => null;");
        assert!(names.is_empty());
    }

    #[test]
    fn markup_inside_nested_function_does_not_count() {
        let names = component_names(
            "function Outer() {\n  function Inner() { return <div/>; }\n  const render = () => <span/>;\n  return null;\n}",
        );
        assert!(names.is_empty());
    }

    #[test]
    fn inline_callbacks_belong_to_the_enclosing_component() {
        let names = component_names("const List = ({ items }) => items.map(i => <li key={i}>{i}</li>);");
        assert_eq!(names, vec!["List"]);
    }

    #[test]
    fn exported_and_default_exported_components() {
        let names = component_names(
            "export function Named() { return <div/>; }\n\
             export const Arrow = () => <div/>;\n\
             export default function () { return <main/>; }",
        );
        assert_eq!(names, vec!["Named", "Arrow", ANONYMOUS_COMPONENT]);
    }

    #[test]
    fn wrappers_are_looked_through() {
        let allocator = Allocator::default();
        let source = "const Card = React.memo(({ title }) => <h1>{title}</h1>);\n\
                      const Input = forwardRef((props, ref) => <input ref={ref}/>);\n\
                      const Plain = memo(() => <b/>);";
        let tree = parse(&allocator, "w.tsx", source).unwrap();
        let config = AnalyzerConfig::default();
        let scan = scan_module(&tree, &config);
        let found: Vec<(String, bool)> = scan
            .components(&config)
            .map(|c| (c.name.clone(), c.memoized))
            .collect();

        assert_eq!(
            found,
            vec![
                ("Card".to_string(), true),
                ("Input".to_string(), false),
                ("Plain".to_string(), false),
            ]
        );
    }

    #[test]
    fn module_bindings_are_recorded() {
        let allocator = Allocator::default();
        let source = "import Button, { Icon as Glyph } from './ui';\n\
                      import * as Lib from 'lib';\n\
                      import type { Props } from './types';\n\
                      export const ThemeContext = React.createContext('light');\n\
                      function Card() { return <div/>; }\n\
                      const Fancy = Card;\n\
                      export { Fancy as Shiny };\n\
                      export default React.memo(Card);";
        let tree = parse(&allocator, "m.tsx", source).unwrap();
        let config = AnalyzerConfig::default();
        let scan = scan_module(&tree, &config);

        assert_eq!(scan.imports.len(), 3);
        assert_eq!(scan.imports[0].imported, Imported::Default);
        assert_eq!(scan.imports[1].local, "Glyph");
        assert_eq!(scan.imports[1].imported, Imported::Named("Icon".into()));
        assert_eq!(scan.imports[2].imported, Imported::Namespace);

        assert_eq!(scan.contexts.len(), 1);
        assert_eq!(scan.contexts[0].name, "ThemeContext");

        assert_eq!(
            scan.aliases,
            vec![Alias {
                binding: "Fancy".into(),
                target: "Card".into()
            }]
        );
        assert_eq!(scan.memo_marks, vec!["Card"]);
        assert!(scan.exports.contains(&ExportBinding::named("ThemeContext")));
        assert!(scan.exports.contains(&ExportBinding::renamed("Fancy", "Shiny")));
        assert!(scan.exports.contains(&ExportBinding::default_export("Card")));
    }
}
