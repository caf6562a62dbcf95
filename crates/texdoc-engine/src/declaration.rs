//! Plain-text declarations shown in block headers and member macros.
//!
//! Everything here returns unescaped text; the emitter escapes it.

use texdoc_model::{ExecutableDoc, TypeDoc, TypeKind};

/// Type name with its type-parameter declarations, e.g. `Box<T extends Number>`.
#[must_use]
pub fn type_title(ty: &TypeDoc) -> String {
    if ty.type_params.is_empty() {
        return ty.name.clone();
    }
    let params: Vec<String> = ty.type_params.iter().map(|p| p.declaration()).collect();
    format!("{}<{}>", ty.name, params.join(", "))
}

/// Supertype argument of a type block.
///
/// `None` for interfaces (the argument is omitted). Enums and classes
/// extending only the root object get an empty argument.
#[must_use]
pub fn supertype(ty: &TypeDoc) -> Option<String> {
    match ty.kind {
        TypeKind::Interface => None,
        TypeKind::Enum => Some(String::new()),
        TypeKind::Class => Some(
            ty.superclass
                .as_ref()
                .filter(|s| !s.is_root_object())
                .map(ToString::to_string)
                .unwrap_or_default(),
        ),
    }
}

/// Comma-separated directly implemented (or extended) interfaces.
#[must_use]
pub fn interface_list(ty: &TypeDoc) -> String {
    let names: Vec<String> = ty.interfaces.iter().map(ToString::to_string).collect();
    names.join(", ")
}

/// Parenthesized parameter list, e.g. `(int count, List<String> names)`.
#[must_use]
pub fn parameter_list(method: &ExecutableDoc) -> String {
    let params: Vec<String> = method
        .params
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect();
    format!("({})", params.join(", "))
}
