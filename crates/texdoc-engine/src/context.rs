//! Shared state for one rendering run.

use texdoc_model::{DocIndex, DocModel, ExecutableDoc, TypeDoc};
use texdoc_renderer::{MarkupTranslator, Translation};

use crate::diagnostics::Diagnostics;

/// Phrases and markers that shape the generated document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderConfig {
    /// Connector placed before inline references (lowercased on output).
    pub see_inline: String,
    /// Heading of see-also blocks.
    pub see_block: String,
    /// Block tag that excludes a type from output.
    pub exclude_tag: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            see_inline: "see ".to_owned(),
            see_block: "See also".to_owned(),
            exclude_tag: "@texignore".to_owned(),
        }
    }
}

/// The entity whose documentation is being rendered.
///
/// Used to name the entity in warnings and, for methods, to resolve
/// inherited documentation.
#[derive(Clone, Copy, Debug)]
pub enum Subject<'a> {
    /// A method or constructor of `owner`.
    Method {
        owner: &'a TypeDoc,
        method: &'a ExecutableDoc,
    },
    /// Any other member of `owner` (field, enum constant, tag of a method).
    Member { owner: &'a TypeDoc, name: &'a str },
    /// A package or type.
    Named(&'a str),
}

impl Subject<'_> {
    /// Display name used in warnings.
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Subject::Method { owner, method } => {
                format!("{}.{}", owner.qualified_name, method.name)
            }
            Subject::Member { owner, name } => format!("{}.{name}", owner.qualified_name),
            Subject::Named(name) => (*name).to_owned(),
        }
    }
}

/// Everything the interpreter needs while walking the model.
pub struct RenderContext<'a> {
    pub(crate) config: RenderConfig,
    pub(crate) index: DocIndex<'a>,
    pub(crate) diagnostics: Diagnostics,
    translator: MarkupTranslator,
    /// Members whose inherited documentation is currently being rendered.
    pub(crate) inherit_stack: Vec<String>,
}

impl<'a> RenderContext<'a> {
    /// Deepest chain of inherited documentation that is followed.
    pub const MAX_INHERIT_DEPTH: usize = 8;

    #[must_use]
    pub fn new(model: &'a DocModel, config: RenderConfig) -> Self {
        Self {
            config,
            index: DocIndex::new(model),
            diagnostics: Diagnostics::new(),
            translator: MarkupTranslator::new(),
            inherit_stack: Vec::new(),
        }
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Record a warning about `subject`.
    pub fn warn(&mut self, subject: &Subject<'_>, message: impl Into<String>) {
        self.diagnostics.warn(subject.name(), message);
    }

    /// Translate a self-contained piece of markup, such as a reference's text.
    pub(crate) fn translate(&mut self, markup: &str, subject: &Subject<'_>) -> String {
        let translation = self.translator.translate(markup);
        self.record_translation(translation, subject)
    }

    /// Record a finished translation's warnings against `subject` and return its LaTeX.
    pub(crate) fn record_translation(
        &mut self,
        translation: Translation,
        subject: &Subject<'_>,
    ) -> String {
        for warning in translation.warnings {
            self.warn(subject, warning);
        }
        translation.tex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use texdoc_model::TypeRef;

    #[test]
    fn test_subject_names() {
        let owner = TypeDoc {
            name: "Foo".to_owned(),
            qualified_name: "p.Foo".to_owned(),
            ..TypeDoc::default()
        };
        let method = ExecutableDoc::method("bar", TypeRef::named("void"));

        assert_eq!(
            Subject::Method {
                owner: &owner,
                method: &method
            }
            .name(),
            "p.Foo.bar"
        );
        assert_eq!(
            Subject::Member {
                owner: &owner,
                name: "count"
            }
            .name(),
            "p.Foo.count"
        );
        assert_eq!(Subject::Named("p").name(), "p");
    }

    #[test]
    fn test_translate_records_markup_warnings() {
        let model = DocModel::default();
        let mut ctx = RenderContext::new(&model, RenderConfig::default());

        let tex = ctx.translate("a <blink>b", &Subject::Named("p.Foo"));

        assert!(tex.starts_with("a "));
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(ctx.diagnostics().warnings()[0].subject, "p.Foo");
    }
}
