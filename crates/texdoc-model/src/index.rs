//! Lookup of types by name.

use std::collections::HashMap;

use crate::doc::{DocModel, ExecutableDoc, MethodRef, TypeDoc};
use crate::types::TypeRef;

/// Index of every type in a [`DocModel`] by qualified name.
///
/// Types referenced only by simple name resolve when exactly one indexed type
/// has that simple name.
#[derive(Debug, Default)]
pub struct DocIndex<'a> {
    by_qualified: HashMap<&'a str, &'a TypeDoc>,
    by_simple: HashMap<&'a str, Vec<&'a TypeDoc>>,
}

impl<'a> DocIndex<'a> {
    /// Build the index. The first type registered under a name wins.
    #[must_use]
    pub fn new(model: &'a DocModel) -> Self {
        let mut index = Self::default();
        for ty in model.all_types() {
            index
                .by_qualified
                .entry(ty.qualified_name.as_str())
                .or_insert(ty);
            index.by_simple.entry(ty.name.as_str()).or_default().push(ty);
        }
        index
    }

    /// Find a type by qualified (or unambiguous simple) name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a TypeDoc> {
        if let Some(ty) = self.by_qualified.get(name) {
            return Some(*ty);
        }
        match self.by_simple.get(name).map(Vec::as_slice) {
            Some([only]) => Some(*only),
            _ => None,
        }
    }

    /// Find the type a [`TypeRef`] refers to.
    #[must_use]
    pub fn resolve(&self, ty: &TypeRef) -> Option<&'a TypeDoc> {
        self.get(ty.lookup_name())
    }

    /// Find the method a [`MethodRef`] identifies, with its declaring type.
    #[must_use]
    pub fn method(&self, method_ref: &MethodRef) -> Option<(&'a TypeDoc, &'a ExecutableDoc)> {
        let ty = self.get(&method_ref.declaring_type)?;
        ty.methods
            .iter()
            .find(|m| m.is_identified_by(method_ref))
            .map(|m| (ty, m))
    }

    /// Number of indexed types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_qualified.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_qualified.is_empty()
    }
}
