//! Model builders shared by the engine's tests.

use texdoc_model::{
    Comment, DocModel, ExecutableDoc, MethodRef, PackageDoc, Parameter, TypeDoc, TypeKind,
    TypeRef,
};

pub(crate) fn class(qualified_name: &str) -> TypeDoc {
    let name = qualified_name.rsplit('.').next().unwrap_or(qualified_name);
    TypeDoc {
        name: name.to_owned(),
        qualified_name: qualified_name.to_owned(),
        kind: TypeKind::Class,
        modifiers: "public".to_owned(),
        ..TypeDoc::default()
    }
}

pub(crate) fn interface(qualified_name: &str) -> TypeDoc {
    TypeDoc {
        kind: TypeKind::Interface,
        modifiers: "public interface".to_owned(),
        ..class(qualified_name)
    }
}

pub(crate) fn method(name: &str, comment: impl Into<Comment>) -> ExecutableDoc {
    let mut method = ExecutableDoc::method(name, TypeRef::named("void"));
    method.modifiers = "public".to_owned();
    method.comment = comment.into();
    method
}

pub(crate) fn with_param(mut method: ExecutableDoc, name: &str, ty: TypeRef) -> ExecutableDoc {
    method.params.push(Parameter {
        name: name.to_owned(),
        ty,
    });
    method
}

pub(crate) fn overriding(mut method: ExecutableDoc, declaring_type: &str) -> ExecutableDoc {
    method.overrides = Some(MethodRef {
        declaring_type: declaring_type.to_owned(),
        name: method.name.clone(),
        params: method.erased_params().collect(),
    });
    method
}

pub(crate) fn package(name: &str, types: Vec<TypeDoc>) -> PackageDoc {
    PackageDoc {
        name: name.to_owned(),
        types,
        ..PackageDoc::default()
    }
}

pub(crate) fn model(types: Vec<TypeDoc>) -> DocModel {
    DocModel {
        classes: types,
        ..DocModel::default()
    }
}
