//! Type-variable substitution along a supertype chain.

use std::collections::HashMap;

use crate::types::TypeRef;

/// What an ancestor's type variables stand for, seen from a subtype.
///
/// `class Foo implements Comparable<Foo>` binds `Comparable`'s `T` to
/// `Foo`, so `compareTo(T)` and `compareTo(Foo)` have the same erasure
/// once the bindings are applied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeBindings(HashMap<String, TypeRef>);

impl TypeBindings {
    /// Bind `params` (an ancestor's declared type parameters) to the
    /// arguments of `reference`, the supertype as written by the subtype.
    ///
    /// Arguments are resolved through `outer` first, so bindings compose
    /// while walking up a superclass chain. A raw reference binds each
    /// parameter to its first bound, or `Object` when it has none.
    #[must_use]
    pub fn bind(params: &[TypeRef], reference: &TypeRef, outer: &TypeBindings) -> Self {
        let bindings = params
            .iter()
            .enumerate()
            .map(|(i, param)| {
                let bound = match reference.args.get(i) {
                    Some(arg) => outer.apply(arg),
                    None => erased_bound(param),
                };
                (param.name.clone(), bound)
            })
            .collect();
        Self(bindings)
    }

    /// Substitute bound type variables in `ty`, keeping its array dimensions.
    #[must_use]
    pub fn apply(&self, ty: &TypeRef) -> TypeRef {
        if ty.args.is_empty()
            && ty.qualified_name.is_none()
            && let Some(bound) = self.0.get(&ty.name)
        {
            let mut substituted = bound.clone();
            substituted.dimensions += ty.dimensions;
            return substituted;
        }
        TypeRef {
            args: ty.args.iter().map(|arg| self.apply(arg)).collect(),
            ..ty.clone()
        }
    }

    /// Erasure of `ty` after substitution.
    #[must_use]
    pub fn erasure(&self, ty: &TypeRef) -> String {
        self.apply(ty).erasure()
    }
}

fn erased_bound(param: &TypeRef) -> TypeRef {
    param.bounds.first().map_or_else(
        || TypeRef::named("Object").with_qualified_name("java.lang.Object"),
        |bound| TypeRef {
            args: Vec::new(),
            ..bound.clone()
        },
    )
}
