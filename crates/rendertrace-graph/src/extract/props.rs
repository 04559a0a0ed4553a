use oxc_ast::ast::{BindingPattern, BindingPatternKind, FormalParameters, PropertyKey};

/// Prop names declared by a component's first parameter.
///
/// Only the first parameter is inspected; `forwardRef`'s `ref` and any
/// further parameters are ignored.
pub fn prop_names(params: &FormalParameters<'_>) -> Vec<String> {
    match params.items.first() {
        Some(first) => pattern_props(&first.pattern),
        None => Vec::new(),
    }
}

fn pattern_props(pattern: &BindingPattern<'_>) -> Vec<String> {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => vec![ident.name.to_string()],
        BindingPatternKind::ObjectPattern(object) => {
            let mut names: Vec<String> = object
                .properties
                .iter()
                .filter_map(|property| match &property.key {
                    PropertyKey::StaticIdentifier(key) => Some(key.name.to_string()),
                    _ => None,
                })
                .collect();
            if let Some(rest) = &object.rest {
                if let BindingPatternKind::BindingIdentifier(ident) = &rest.argument.kind {
                    names.push(ident.name.to_string());
                }
            }
            names
        }
        BindingPatternKind::ArrayPattern(array) => array
            .elements
            .iter()
            .flatten()
            .filter_map(|element| match &element.kind {
                BindingPatternKind::BindingIdentifier(ident) => Some(ident.name.to_string()),
                _ => None,
            })
            .collect(),
        // `({ a, b } = {})`
        BindingPatternKind::AssignmentPattern(assign) => pattern_props(&assign.left),
    }
}
