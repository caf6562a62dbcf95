//! API documentation model for texdoc.
//!
//! The model is produced by an external introspection pass (packages, types,
//! members and their segmented comments) and handed to texdoc as JSON. Once
//! loaded it is never mutated: the engine borrows it for the whole run.
//!
//! # Example
//!
//! ```
//! use texdoc_model::DocModel;
//!
//! let model = DocModel::from_json_str(r#"{"classes": [{"name": "Foo", "qualified_name": "p.Foo"}]}"#)
//!     .unwrap();
//! assert_eq!(model.classes[0].qualified_name, "p.Foo");
//! ```

mod bindings;
mod comment;
mod doc;
mod error;
mod index;
mod types;

pub use bindings::TypeBindings;
pub use comment::{BlockTag, Comment, CommentTag, SeeReference, SeeTarget};
pub use doc::{
    DocModel, ExecutableDoc, ExecutableKind, FieldDoc, MethodRef, PackageDoc, ParamTag,
    Parameter, ThrowsTag, TypeDoc, TypeKind,
};
pub use error::ModelError;
pub use index::DocIndex;
pub use types::TypeRef;
