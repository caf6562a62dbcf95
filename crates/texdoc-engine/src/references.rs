//! Cross-reference labels and `see` rendering.
//!
//! Every package and type gets a label in the `texdoc` namespace; a
//! reference to it renders as a `\ref` to that label. Free-form references
//! have no target and render their text only.

use std::fmt::{self, Write as _};

use texdoc_model::{SeeReference, SeeTarget};
use texdoc_renderer::escape_tex;

use crate::context::{RenderContext, Subject};

/// Namespace prefix of every generated label.
pub const LABEL_NAMESPACE: &str = "texdoc";

/// A cross-reference label, e.g. `texdoc:org.example.Foo`.
///
/// Labels are a pure function of the target's qualified name, so every
/// reference to an entity agrees with the label emitted at its definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Label of a package.
    #[must_use]
    pub fn package(name: &str) -> Self {
        Self(format!("{LABEL_NAMESPACE}:{name}"))
    }

    /// Label of a type, by qualified name.
    #[must_use]
    pub fn for_type(qualified_name: &str) -> Self {
        Self(format!("{LABEL_NAMESPACE}:{qualified_name}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Label a reference points to, or `None` for free-form references.
#[must_use]
pub fn label_for(reference: &SeeReference) -> Option<Label> {
    match &reference.target {
        SeeTarget::Package(name) => Some(Label::package(name)),
        SeeTarget::Type(qualified_name) => Some(Label::for_type(qualified_name)),
        SeeTarget::FreeForm => None,
    }
}

/// Render a reference embedded in running text.
///
/// Produces `text (see\ref{label})`, with the connector phrase lowercased.
pub fn render_inline(
    ctx: &mut RenderContext<'_>,
    reference: &SeeReference,
    subject: &Subject<'_>,
) -> String {
    let mut out = ctx.translate(&reference.text, subject);
    if let Some(label) = label_for(reference) {
        let connector = escape_tex(&ctx.config.see_inline.to_lowercase());
        let _ = write!(out, " ({connector}\\ref{{{label}}})");
    }
    out
}

/// Render the see-also block of an entity, or nothing when it has no references.
pub fn render_block(
    ctx: &mut RenderContext<'_>,
    references: &[SeeReference],
    subject: &Subject<'_>,
) -> String {
    if references.is_empty() {
        return String::new();
    }
    let heading = escape_tex(&ctx.config.see_block);
    let mut out = format!("\\begin{{texdocsees}}{{{heading}}}\n");
    for reference in references {
        let text = ctx.translate(&reference.text, subject);
        match label_for(reference) {
            Some(label) => {
                let _ = writeln!(out, "\\texdocsee{{{text}}}{{{label}}}");
            }
            None => {
                let _ = writeln!(out, "\\texdocseetext{{{text}}}");
            }
        }
    }
    out.push_str("\\end{texdocsees}\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::RenderConfig;
    use pretty_assertions::assert_eq;
    use texdoc_model::DocModel;

    fn with_ctx(config: RenderConfig, f: impl FnOnce(&mut RenderContext<'_>)) {
        let model = DocModel::default();
        let mut ctx = RenderContext::new(&model, config);
        f(&mut ctx);
    }

    #[test]
    fn test_labels_are_namespaced() {
        assert_eq!(
            label_for(&SeeReference::type_ref("Foo", "org.example.Foo")),
            Some(Label::for_type("org.example.Foo"))
        );
        assert_eq!(
            label_for(&SeeReference::package("pkg", "org.example"))
                .unwrap()
                .as_str(),
            "texdoc:org.example"
        );
        assert_eq!(label_for(&SeeReference::free_form("RFC 1234")), None);
        assert_ne!(
            label_for(&SeeReference::type_ref("A", "p.A")),
            label_for(&SeeReference::type_ref("B", "p.B"))
        );
    }

    #[test]
    fn test_inline_reference() {
        with_ctx(RenderConfig::default(), |ctx| {
            let tex = render_inline(
                ctx,
                &SeeReference::type_ref("Foo", "org.example.Foo"),
                &Subject::Named("x"),
            );
            assert_eq!(tex, r"Foo (see \ref{texdoc:org.example.Foo})");
        });
    }

    #[test]
    fn test_inline_connector_is_lowercased() {
        let config = RenderConfig {
            see_inline: "Siehe ".to_owned(),
            ..RenderConfig::default()
        };
        with_ctx(config, |ctx| {
            let tex = render_inline(
                ctx,
                &SeeReference::package("the package", "org.example"),
                &Subject::Named("x"),
            );
            assert_eq!(tex, r"the package (siehe \ref{texdoc:org.example})");
        });
    }

    #[test]
    fn test_inline_free_form_renders_text_only() {
        with_ctx(RenderConfig::default(), |ctx| {
            let tex = render_inline(
                ctx,
                &SeeReference::free_form("<i>Effective</i> Java"),
                &Subject::Named("x"),
            );
            assert_eq!(tex, r"\textit{Effective} Java");
        });
    }

    #[test]
    fn test_block_lists_every_reference() {
        with_ctx(RenderConfig::default(), |ctx| {
            let tex = render_block(
                ctx,
                &[
                    SeeReference::type_ref("Foo", "p.Foo"),
                    SeeReference::free_form("a_b"),
                ],
                &Subject::Named("x"),
            );
            assert_eq!(
                tex,
                "\\begin{texdocsees}{See also}\n\
                 \\texdocsee{Foo}{texdoc:p.Foo}\n\
                 \\texdocseetext{a\\_b}\n\
                 \\end{texdocsees}\n"
            );
        });
    }

    #[test]
    fn test_block_without_references_is_empty() {
        with_ctx(RenderConfig::default(), |ctx| {
            assert_eq!(render_block(ctx, &[], &Subject::Named("x")), "");
        });
    }
}
