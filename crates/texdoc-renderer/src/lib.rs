//! HTML-subset to LaTeX translation for documentation comments.
//!
//! Comment text uses a small HTML vocabulary (paragraphs, inline styles,
//! lists, tables, links, preformatted blocks). [`MarkupTranslator`] turns it
//! into nested LaTeX macros; leaf text goes through [`escape_tex`].
//!
//! The scanner is permissive: unsupported tags become escaped literal text,
//! unmatched end tags are dropped, and both produce warnings in the
//! [`Translation`] instead of failing.
//!
//! # Example
//!
//! ```
//! use texdoc_renderer::translate;
//!
//! let result = translate("<b>bold <i>and italic</i></b>");
//! assert_eq!(result.tex, r"\textbf{bold \textit{and italic}}");
//! assert!(result.warnings.is_empty());
//! ```

mod escape;
mod scanner;
mod state;
mod translator;

pub use escape::{escape_tex, escape_url};
pub use translator::{MarkupTranslator, Translation, translate};
