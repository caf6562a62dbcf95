//! Rendering of a comment's tag stream.

use texdoc_model::{Comment, CommentTag, ExecutableDoc, TypeDoc};
use texdoc_renderer::{MarkupTranslator, escape_tex};

use crate::context::{RenderContext, Subject};
use crate::inherit::{self, Resolution};
use crate::references;

/// Why inherited documentation could not be spliced in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum InheritFailure {
    NotFound,
    Cycle,
    TooDeep,
}

impl InheritFailure {
    fn message(self) -> &'static str {
        match self {
            InheritFailure::NotFound => "no documentation to inherit, marker rendered as text",
            InheritFailure::Cycle => "inherited documentation refers back to itself",
            InheritFailure::TooDeep => "inherited documentation nested too deeply",
        }
    }
}

/// Render every tag of `comment` in order and concatenate the results.
///
/// The whole comment is one markup session: an element opened in one text
/// run stays open across the references and inherit markers that follow
/// it. References render inline, inherit markers splice in the ancestor's
/// documentation (methods only) and unknown tags render as escaped text
/// with a warning.
pub fn render_comment(
    ctx: &mut RenderContext<'_>,
    comment: &Comment,
    subject: &Subject<'_>,
) -> String {
    let mut session = MarkupTranslator::new();
    for tag in comment.tags() {
        match tag {
            CommentTag::Text { text } => session.feed(text),
            CommentTag::See(reference) => {
                session.push_raw(&references::render_inline(ctx, reference, subject));
            }
            CommentTag::InheritDoc { text } => {
                session.push_raw(&render_inherit_marker(ctx, text, subject));
            }
            CommentTag::Unknown { name, text } => {
                ctx.warn(subject, format!("unknown tag {name} rendered as text"));
                session.push_raw(&escape_tex(text));
            }
        }
    }
    ctx.record_translation(session.finish(), subject)
}

/// Render the main comment of a method or constructor.
///
/// A method with a blank comment inherits its ancestor's documentation
/// implicitly; when there is none the result is empty and no warning is
/// recorded.
pub fn render_method_comment(
    ctx: &mut RenderContext<'_>,
    owner: &TypeDoc,
    method: &ExecutableDoc,
) -> String {
    let subject = Subject::Method { owner, method };
    if !method.comment.is_blank() {
        return render_comment(ctx, &method.comment, &subject);
    }
    match inherit_from_ancestor(ctx, owner, method) {
        Ok(tex) => tex,
        Err(InheritFailure::NotFound) => String::new(),
        Err(failure) => {
            ctx.warn(&subject, failure.message());
            String::new()
        }
    }
}

fn render_inherit_marker(
    ctx: &mut RenderContext<'_>,
    marker: &str,
    subject: &Subject<'_>,
) -> String {
    let Subject::Method { owner, method } = *subject else {
        ctx.warn(subject, "inherit marker outside of a method, rendered as text");
        return escape_tex(marker);
    };
    match inherit_from_ancestor(ctx, owner, method) {
        Ok(tex) => tex,
        Err(failure) => {
            ctx.warn(subject, failure.message());
            escape_tex(marker)
        }
    }
}

/// Render the ancestor's documentation wrapped with its attribution.
fn inherit_from_ancestor(
    ctx: &mut RenderContext<'_>,
    owner: &TypeDoc,
    method: &ExecutableDoc,
) -> Result<String, InheritFailure> {
    let Resolution::Found {
        owner: ancestor_owner,
        method: ancestor,
    } = inherit::resolve(&ctx.index, owner, method)
    else {
        return Err(InheritFailure::NotFound);
    };

    let outermost = ctx.inherit_stack.is_empty();
    if outermost {
        ctx.inherit_stack.push(inherit::member_key(owner, method));
    }
    let result = render_ancestor(ctx, ancestor_owner, ancestor);
    if outermost {
        ctx.inherit_stack.pop();
    }
    result
}

fn render_ancestor(
    ctx: &mut RenderContext<'_>,
    owner: &TypeDoc,
    method: &ExecutableDoc,
) -> Result<String, InheritFailure> {
    let key = inherit::member_key(owner, method);
    if ctx.inherit_stack.contains(&key) {
        return Err(InheritFailure::Cycle);
    }
    if ctx.inherit_stack.len() > RenderContext::MAX_INHERIT_DEPTH {
        return Err(InheritFailure::TooDeep);
    }

    ctx.inherit_stack.push(key);
    let body = render_method_comment(ctx, owner, method);
    ctx.inherit_stack.pop();

    Ok(format!(
        "\\texdocinheritdoc{{{}}}{{{body}}}",
        attribution(&owner.qualified_name)
    ))
}

/// Escaped type name with a hyphenation point after every dot.
fn attribution(qualified_name: &str) -> String {
    escape_tex(qualified_name).replace('.', ".\\-")
}
