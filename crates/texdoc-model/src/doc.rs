//! Packages, types and members.

use std::path::Path;

use serde::Deserialize;

use crate::bindings::TypeBindings;
use crate::comment::{BlockTag, Comment, SeeReference};
use crate::error::ModelError;
use crate::types::TypeRef;

/// Root of the documentation model.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct DocModel {
    /// Explicitly selected packages.
    pub packages: Vec<PackageDoc>,
    /// Explicitly selected top-level types.
    pub classes: Vec<TypeDoc>,
    /// Types that are never emitted but may hold inherited documentation.
    pub referenced: Vec<TypeDoc>,
}

impl DocModel {
    /// Parse a model from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a model from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Every type in the model: package types, selected classes, referenced types.
    pub fn all_types(&self) -> impl Iterator<Item = &TypeDoc> {
        self.packages
            .iter()
            .flat_map(|pkg| pkg.types.iter())
            .chain(&self.classes)
            .chain(&self.referenced)
    }
}

/// A documented package.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct PackageDoc {
    pub name: String,
    pub comment: Comment,
    pub see: Vec<SeeReference>,
    pub types: Vec<TypeDoc>,
}

/// Kind of a type declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
}

impl TypeKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
        }
    }
}

/// A documented class, interface or enum.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct TypeDoc {
    /// Simple name (`Outer.Inner` for nested types).
    pub name: String,
    /// Fully qualified name, unique within the model.
    pub qualified_name: String,
    pub kind: TypeKind,
    pub modifiers: String,
    /// Declared type parameters with their bounds.
    pub type_params: Vec<TypeRef>,
    pub superclass: Option<TypeRef>,
    /// Directly implemented (or, for interfaces, extended) interfaces.
    pub interfaces: Vec<TypeRef>,
    pub comment: Comment,
    pub see: Vec<SeeReference>,
    /// Block tags, including exclusion markers.
    pub tags: Vec<BlockTag>,
    pub fields: Vec<FieldDoc>,
    pub constructors: Vec<ExecutableDoc>,
    pub enum_constants: Vec<FieldDoc>,
    pub methods: Vec<ExecutableDoc>,
}

impl TypeDoc {
    /// Whether the type carries a block tag with the given name.
    #[must_use]
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|tag| tag.name == name)
    }
}

/// A field or enum constant.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct FieldDoc {
    pub name: String,
    pub modifiers: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub comment: Comment,
    pub see: Vec<SeeReference>,
}

/// Whether an executable member is a constructor or a method.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExecutableKind {
    Constructor,
    Method { return_type: TypeRef },
}

/// A formal parameter.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// `@param` documentation.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ParamTag {
    pub name: String,
    pub comment: Comment,
}

/// `@throws` documentation.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ThrowsTag {
    pub exception: String,
    pub comment: Comment,
}

/// Identity of a method in another type, used for override links.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct MethodRef {
    /// Qualified name of the declaring type.
    pub declaring_type: String,
    pub name: String,
    /// Erased parameter types, e.g. `["int", "String[]"]`.
    #[serde(default)]
    pub params: Vec<String>,
}

/// A constructor or method.
#[derive(Clone, Debug, Deserialize)]
pub struct ExecutableDoc {
    pub name: String,
    #[serde(flatten)]
    pub kind: ExecutableKind,
    #[serde(default)]
    pub modifiers: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub comment: Comment,
    #[serde(default)]
    pub see: Vec<SeeReference>,
    #[serde(default)]
    pub param_tags: Vec<ParamTag>,
    #[serde(default)]
    pub return_tags: Vec<Comment>,
    #[serde(default)]
    pub throws_tags: Vec<ThrowsTag>,
    /// Superclass method this method overrides, as reported by introspection.
    #[serde(default)]
    pub overrides: Option<MethodRef>,
}

impl ExecutableDoc {
    /// Create a method with the given return type and no documentation.
    pub fn method(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self::new(name.into(), ExecutableKind::Method { return_type })
    }

    /// Create a constructor with no documentation.
    pub fn constructor(name: impl Into<String>) -> Self {
        Self::new(name.into(), ExecutableKind::Constructor)
    }

    fn new(name: String, kind: ExecutableKind) -> Self {
        Self {
            name,
            kind,
            modifiers: String::new(),
            params: Vec::new(),
            comment: Comment::new(),
            see: Vec::new(),
            param_tags: Vec::new(),
            return_tags: Vec::new(),
            throws_tags: Vec::new(),
            overrides: None,
        }
    }

    /// Return type, for methods.
    #[must_use]
    pub fn return_type(&self) -> Option<&TypeRef> {
        match &self.kind {
            ExecutableKind::Method { return_type } => Some(return_type),
            ExecutableKind::Constructor => None,
        }
    }

    #[must_use]
    pub fn has_modifier(&self, modifier: &str) -> bool {
        self.modifiers.split_whitespace().any(|m| m == modifier)
    }

    /// Erased parameter types in declaration order.
    pub fn erased_params(&self) -> impl Iterator<Item = String> + '_ {
        self.params.iter().map(|p| p.ty.erasure())
    }

    /// Whether this method overrides (or implements) `other`.
    ///
    /// Same name, same erased parameter types, and `other` is an instance
    /// method visible to subtypes.
    #[must_use]
    pub fn overrides(&self, other: &ExecutableDoc) -> bool {
        self.overrides_with(other, &TypeBindings::default())
    }

    /// Like [`overrides`](Self::overrides), with `other`'s parameter types
    /// read through `bindings` of its declaring type's type variables.
    #[must_use]
    pub fn overrides_with(&self, other: &ExecutableDoc, bindings: &TypeBindings) -> bool {
        if self.return_type().is_none() || other.return_type().is_none() {
            return false;
        }
        if other.has_modifier("static") || other.has_modifier("private") {
            return false;
        }
        self.name == other.name
            && self.params.len() == other.params.len()
            && self
                .erased_params()
                .eq(other.params.iter().map(|p| bindings.erasure(&p.ty)))
    }

    /// Whether `method_ref` identifies this member (name and erased parameters).
    #[must_use]
    pub fn is_identified_by(&self, method_ref: &MethodRef) -> bool {
        self.name == method_ref.name
            && self.params.len() == method_ref.params.len()
            && self
                .erased_params()
                .zip(&method_ref.params)
                .all(|(ours, theirs)| ours == *theirs)
    }
}
