//! Structural description of declared types.

use std::fmt::{self, Write};

use serde::Deserialize;

/// Declared type: base name, generic arguments, array dimensions and bounds.
///
/// Generic arguments and dimensions compose left to right, so
/// `List<String>[]` is `name = "List"`, one argument, one dimension.
///
/// Accepts either a bare string (`"int"`) or the full object form when
/// deserialised.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawTypeRef")]
pub struct TypeRef {
    /// Name as the introspection source displays it (usually the simple name).
    pub name: String,
    /// Fully qualified name, when the type is a class or interface.
    pub qualified_name: Option<String>,
    /// Generic arguments in declaration order.
    pub args: Vec<TypeRef>,
    /// Number of array dimensions.
    pub dimensions: usize,
    /// Upper bounds for type variables and wildcards.
    pub bounds: Vec<TypeRef>,
}

impl TypeRef {
    /// Create a plain named type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add a generic argument.
    #[must_use]
    pub fn with_arg(mut self, arg: TypeRef) -> Self {
        self.args.push(arg);
        self
    }

    /// Set the array dimension count.
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Add an upper bound.
    #[must_use]
    pub fn with_bound(mut self, bound: TypeRef) -> Self {
        self.bounds.push(bound);
        self
    }

    /// Set the qualified name.
    #[must_use]
    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = Some(qualified_name.into());
        self
    }

    /// Name used for lookups: the qualified name if known, else the display name.
    #[must_use]
    pub fn lookup_name(&self) -> &str {
        self.qualified_name.as_deref().unwrap_or(&self.name)
    }

    /// Whether this is the implicit root of the class hierarchy.
    #[must_use]
    pub fn is_root_object(&self) -> bool {
        self.lookup_name() == "java.lang.Object"
            || (self.qualified_name.is_none() && self.name == "Object")
    }

    /// Erased form used to compare method signatures: name plus dimensions.
    #[must_use]
    pub fn erasure(&self) -> String {
        let mut erased = self.name.clone();
        for _ in 0..self.dimensions {
            erased.push_str("[]");
        }
        erased
    }

    /// Render as a type-parameter declaration, `T extends A, B`.
    #[must_use]
    pub fn declaration(&self) -> String {
        let mut out = String::new();
        self.write_base(&mut out);
        write_bounds(&self.bounds, &mut out);
        out
    }

    fn write_base(&self, out: &mut String) {
        out.push_str(&self.name);
        if !self.args.is_empty() {
            out.push('<');
            for (i, arg) in self.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                // Writing to a String cannot fail.
                let _ = write!(out, "{arg}");
            }
            out.push('>');
        }
    }
}

fn write_bounds(bounds: &[TypeRef], out: &mut String) {
    for (i, bound) in bounds.iter().enumerate() {
        out.push_str(if i == 0 { " extends " } else { ", " });
        let _ = write!(out, "{bound}");
    }
}

impl fmt::Display for TypeRef {
    /// Renders as used in a declaration site: `Map<K, List<V>>[][]`.
    ///
    /// Bounds are shown only for wildcards (`? extends Number`); a type
    /// variable in use position is just its name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.write_base(&mut out);
        if self.name == "?" {
            write_bounds(&self.bounds, &mut out);
        }
        for _ in 0..self.dimensions {
            out.push_str("[]");
        }
        f.write_str(&out)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTypeRef {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        qualified_name: Option<String>,
        #[serde(default)]
        args: Vec<TypeRef>,
        #[serde(default)]
        dimensions: usize,
        #[serde(default)]
        bounds: Vec<TypeRef>,
    },
}

impl From<RawTypeRef> for TypeRef {
    fn from(raw: RawTypeRef) -> Self {
        match raw {
            RawTypeRef::Name(name) => Self::named(name),
            RawTypeRef::Full {
                name,
                qualified_name,
                args,
                dimensions,
                bounds,
            } => Self {
                name,
                qualified_name,
                args,
                dimensions,
                bounds,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_generic_array() {
        let ty = TypeRef::named("Map")
            .with_arg(TypeRef::named("K"))
            .with_arg(TypeRef::named("List").with_arg(TypeRef::named("V")))
            .with_dimensions(2);
        assert_eq!(ty.to_string(), "Map<K, List<V>>[][]");
    }

    #[test]
    fn test_display_wildcard_bounds() {
        let ty = TypeRef::named("List")
            .with_arg(TypeRef::named("?").with_bound(TypeRef::named("Number")));
        assert_eq!(ty.to_string(), "List<? extends Number>");
    }

    #[test]
    fn test_type_variable_in_use_position_hides_bounds() {
        let ty = TypeRef::named("T").with_bound(TypeRef::named("Comparable"));
        assert_eq!(ty.to_string(), "T");
        assert_eq!(ty.declaration(), "T extends Comparable");
    }

    #[test]
    fn test_declaration_multiple_bounds() {
        let ty = TypeRef::named("T")
            .with_bound(TypeRef::named("Number"))
            .with_bound(TypeRef::named("Comparable").with_arg(TypeRef::named("T")));
        assert_eq!(ty.declaration(), "T extends Number, Comparable<T>");
    }

    #[test]
    fn test_erasure_ignores_generic_arguments() {
        let ty = TypeRef::named("List")
            .with_arg(TypeRef::named("String"))
            .with_dimensions(1);
        assert_eq!(ty.erasure(), "List[]");
    }

    #[test]
    fn test_deserialize_string_and_object_forms() {
        let plain: TypeRef = serde_json::from_str(r#""int""#).unwrap();
        assert_eq!(plain, TypeRef::named("int"));

        let full: TypeRef = serde_json::from_str(
            r#"{"name": "List", "qualified_name": "java.util.List", "args": ["String"]}"#,
        )
        .unwrap();
        assert_eq!(full.to_string(), "List<String>");
        assert_eq!(full.lookup_name(), "java.util.List");
    }

    #[test]
    fn test_root_object() {
        assert!(TypeRef::named("Object").is_root_object());
        assert!(
            TypeRef::named("Object")
                .with_qualified_name("java.lang.Object")
                .is_root_object()
        );
        assert!(
            !TypeRef::named("Object")
                .with_qualified_name("org.example.Object")
                .is_root_object()
        );
    }
}
