//! Tag resolution and LaTeX emission for API documentation.
//!
//! The engine walks a [`DocModel`](texdoc_model::DocModel) depth-first and
//! writes one structural block per package, type and member group:
//!
//! - [`interpreter`] renders a comment's tag stream (text, cross-references,
//!   inherit markers, unknown tags)
//! - [`references`] derives stable labels and renders `see` links
//! - [`inherit`] finds the ancestor whose documentation a member inherits
//! - [`emitter`] drives the walk and owns the output sink
//!
//! Recoverable problems never abort a run; they are collected as
//! [`Warning`]s and logged with `tracing`.
//!
//! # Example
//!
//! ```
//! use texdoc_engine::{Emitter, RenderConfig};
//! use texdoc_model::DocModel;
//!
//! let model = DocModel::from_json_str(r#"{"classes": [{"name": "Foo", "qualified_name": "p.Foo"}]}"#)
//!     .unwrap();
//! let mut out = Vec::new();
//! let summary = Emitter::new(&model, RenderConfig::default(), &mut out).emit().unwrap();
//! assert_eq!(summary.types, 1);
//! assert!(String::from_utf8(out).unwrap().contains(r"\label{texdoc:p.Foo}"));
//! ```

mod context;
pub mod declaration;
mod diagnostics;
pub mod emitter;
mod error;
pub mod inherit;
pub mod interpreter;
pub mod references;
#[cfg(test)]
mod test_support;

pub use context::{RenderConfig, RenderContext, Subject};
pub use diagnostics::{Diagnostics, Warning};
pub use emitter::{EmitSummary, Emitter, render_to_path};
pub use error::EmitError;
pub use references::{Label, label_for};
