//! Resolution of inherited documentation.
//!
//! A method inherits from, in order: the superclass member it overrides,
//! then the first matching member of its type's direct interfaces (in
//! declaration order). Constructors never inherit.

use std::collections::HashSet;

use texdoc_model::{DocIndex, ExecutableDoc, TypeBindings, TypeDoc};

/// Outcome of looking up the member a method inherits documentation from.
#[derive(Clone, Copy, Debug)]
pub enum Resolution<'a> {
    Found {
        /// Type declaring the ancestor member.
        owner: &'a TypeDoc,
        method: &'a ExecutableDoc,
    },
    NotFound,
}

/// Find the ancestor of `method`, declared in `owner`.
#[must_use]
pub fn resolve<'a>(
    index: &DocIndex<'a>,
    owner: &TypeDoc,
    method: &ExecutableDoc,
) -> Resolution<'a> {
    if method.return_type().is_none() {
        return Resolution::NotFound;
    }
    if let Some((owner, method)) = overridden(index, owner, method) {
        return Resolution::Found { owner, method };
    }
    for reference in &owner.interfaces {
        let Some(interface) = index.resolve(reference) else {
            continue;
        };
        let bindings =
            TypeBindings::bind(&interface.type_params, reference, &TypeBindings::default());
        if let Some(ancestor) = interface
            .methods
            .iter()
            .find(|m| method.overrides_with(m, &bindings))
        {
            return Resolution::Found {
                owner: interface,
                method: ancestor,
            };
        }
    }
    Resolution::NotFound
}

/// Superclass member overridden by `method`.
///
/// Uses the override link reported by introspection when it resolves,
/// otherwise walks the superclass chain of `owner`, carrying each
/// supertype's generic arguments up the chain.
fn overridden<'a>(
    index: &DocIndex<'a>,
    owner: &TypeDoc,
    method: &ExecutableDoc,
) -> Option<(&'a TypeDoc, &'a ExecutableDoc)> {
    if let Some(found) = method.overrides.as_ref().and_then(|r| index.method(r)) {
        return Some(found);
    }

    let mut visited = HashSet::from([owner.qualified_name.as_str()]);
    let mut bindings = TypeBindings::default();
    let mut reference = owner.superclass.as_ref();
    while let Some(superclass) = reference {
        let ty = index.resolve(superclass)?;
        if !visited.insert(ty.qualified_name.as_str()) {
            break;
        }
        bindings = TypeBindings::bind(&ty.type_params, superclass, &bindings);
        if let Some(ancestor) = ty.methods.iter().find(|m| method.overrides_with(m, &bindings)) {
            return Some((ty, ancestor));
        }
        reference = ty.superclass.as_ref();
    }
    None
}

/// Identity of a member on the inheritance stack.
pub(crate) fn member_key(owner: &TypeDoc, method: &ExecutableDoc) -> String {
    let params: Vec<String> = method.erased_params().collect();
    format!("{}#{}({})", owner.qualified_name, method.name, params.join(","))
}
