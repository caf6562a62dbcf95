//! Depth-first emission of the document.

use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use texdoc_model::{DocModel, ExecutableDoc, FieldDoc, PackageDoc, TypeDoc, TypeKind};
use texdoc_renderer::escape_tex;

use crate::context::{RenderConfig, RenderContext, Subject};
use crate::declaration;
use crate::diagnostics::Warning;
use crate::error::EmitError;
use crate::interpreter::{render_comment, render_method_comment};
use crate::references::{self, Label};

/// Outcome of a completed run.
#[derive(Debug, Default)]
pub struct EmitSummary {
    /// Packages emitted.
    pub packages: usize,
    /// Types emitted, inside packages or standalone.
    pub types: usize,
    /// Types skipped because they carry the exclusion tag.
    pub excluded: usize,
    pub warnings: Vec<Warning>,
}

/// Render a model into a new file at `path`.
///
/// `progress` is called with each package name as the package is emitted.
pub fn render_to_path<'a>(
    model: &'a DocModel,
    config: RenderConfig,
    path: &Path,
    progress: impl FnMut(&str) + 'a,
) -> Result<EmitSummary, EmitError> {
    let file = File::create(path).map_err(|source| EmitError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    Emitter::new(model, config, BufWriter::new(file))
        .with_progress(progress)
        .emit()
}

/// Walks a [`DocModel`] and writes one structural block per entity.
///
/// Selected packages come first, then selected standalone types. Every
/// sibling set is sorted case-insensitively by simple name; equal names keep
/// their declaration order.
pub struct Emitter<'a, W> {
    model: &'a DocModel,
    ctx: RenderContext<'a>,
    out: W,
    progress: Option<Box<dyn FnMut(&str) + 'a>>,
    packages: usize,
    types: usize,
    excluded: usize,
}

impl<'a, W: Write> Emitter<'a, W> {
    #[must_use]
    pub fn new(model: &'a DocModel, config: RenderConfig, out: W) -> Self {
        Self {
            model,
            ctx: RenderContext::new(model, config),
            out,
            progress: None,
            packages: 0,
            types: 0,
            excluded: 0,
        }
    }

    /// Report each package name to `progress` as it is emitted.
    #[must_use]
    pub fn with_progress(mut self, progress: impl FnMut(&str) + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Emit the whole document.
    ///
    /// Only write failures abort; everything else is collected as warnings.
    pub fn emit(mut self) -> Result<EmitSummary, EmitError> {
        let model = self.model;
        for package in sorted(&model.packages) {
            self.emit_package(package)?;
        }
        for ty in sorted(&model.classes) {
            self.emit_type(ty)?;
        }
        self.out.flush()?;

        Ok(EmitSummary {
            packages: self.packages,
            types: self.types,
            excluded: self.excluded,
            warnings: self.ctx.into_diagnostics().into_warnings(),
        })
    }

    fn emit_package(&mut self, package: &PackageDoc) -> Result<(), EmitError> {
        tracing::info!(package = %package.name, "Emitting package");
        if let Some(progress) = self.progress.as_mut() {
            progress(&package.name);
        }
        self.packages += 1;

        let subject = Subject::Named(&package.name);
        let mut tex = format!(
            "\\begin{{texdocpackage}}{{{}}}\n\\label{{{}}}\n",
            escape_tex(&package.name),
            Label::package(&package.name)
        );
        if !package.comment.is_blank() {
            let intro = render_comment(&mut self.ctx, &package.comment, &subject);
            let _ = writeln!(
                tex,
                "\\begin{{texdocpackageintro}}\n{intro}\n\\end{{texdocpackageintro}}"
            );
        }
        tex.push_str(&references::render_block(&mut self.ctx, &package.see, &subject));
        self.out.write_all(tex.as_bytes())?;

        for ty in sorted(&package.types) {
            self.emit_type(ty)?;
        }
        self.out.write_all(b"\\end{texdocpackage}\n\n")?;
        Ok(())
    }

    fn emit_type(&mut self, ty: &TypeDoc) -> Result<(), EmitError> {
        if ty.has_tag(&self.ctx.config.exclude_tag) {
            tracing::debug!(ty = %ty.qualified_name, "Skipping excluded type");
            self.excluded += 1;
            return Ok(());
        }
        tracing::debug!(ty = %ty.qualified_name, "Emitting type");
        self.types += 1;

        let tex = render_type(&mut self.ctx, ty);
        self.out.write_all(tex.as_bytes())?;
        Ok(())
    }
}

/// Simple name used to order siblings.
trait Named {
    fn sort_name(&self) -> &str;
}

impl Named for PackageDoc {
    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl Named for TypeDoc {
    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl Named for FieldDoc {
    fn sort_name(&self) -> &str {
        &self.name
    }
}

impl Named for ExecutableDoc {
    fn sort_name(&self) -> &str {
        &self.name
    }
}

/// Stable case-insensitive ordering by simple name.
fn sorted<T: Named>(items: &[T]) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_cached_key(|item| item.sort_name().to_lowercase());
    sorted
}

fn render_type(ctx: &mut RenderContext<'_>, ty: &TypeDoc) -> String {
    let subject = Subject::Named(&ty.qualified_name);
    let mut tex = format!(
        "\\begin{{texdocclass}}{{{}}}{{{}}}",
        ty.kind.as_str(),
        escape_tex(&declaration::type_title(ty))
    );
    if let Some(supertype) = declaration::supertype(ty) {
        let _ = write!(tex, "[{}]", escape_tex(&supertype));
    }
    let interfaces = declaration::interface_list(ty);
    if !interfaces.is_empty() {
        let _ = write!(tex, "[{}]", escape_tex(&interfaces));
    }
    let _ = writeln!(tex, "\n\\label{{{}}}", Label::for_type(&ty.qualified_name));

    let intro = render_comment(ctx, &ty.comment, &subject);
    let _ = writeln!(
        tex,
        "\\begin{{texdocclassintro}}\n{intro}\n\\end{{texdocclassintro}}"
    );
    tex.push_str(&references::render_block(ctx, &ty.see, &subject));

    if !ty.fields.is_empty() {
        tex.push_str("\\begin{texdocclassfields}\n");
        for field in sorted(&ty.fields) {
            tex.push_str(&render_field(ctx, ty, field));
        }
        tex.push_str("\\end{texdocclassfields}\n");
    }
    if !ty.constructors.is_empty() {
        tex.push_str("\\begin{texdocclassconstructors}\n");
        for constructor in sorted(&ty.constructors) {
            tex.push_str(&render_executable(ctx, ty, constructor));
        }
        tex.push_str("\\end{texdocclassconstructors}\n");
    }
    if ty.kind == TypeKind::Enum && !ty.enum_constants.is_empty() {
        tex.push_str("\\begin{texdocenums}\n");
        for constant in sorted(&ty.enum_constants) {
            tex.push_str(&render_enum_constant(ctx, ty, constant));
        }
        tex.push_str("\\end{texdocenums}\n");
    }
    if !ty.methods.is_empty() {
        tex.push_str("\\begin{texdocclassmethods}\n");
        for method in sorted(&ty.methods) {
            tex.push_str(&render_executable(ctx, ty, method));
        }
        tex.push_str("\\end{texdocclassmethods}\n");
    }

    tex.push_str("\\end{texdocclass}\n\n");
    tex
}

fn render_field(ctx: &mut RenderContext<'_>, owner: &TypeDoc, field: &FieldDoc) -> String {
    let subject = Subject::Member {
        owner,
        name: &field.name,
    };
    let comment = render_comment(ctx, &field.comment, &subject);
    let mut tex = format!(
        "\\texdocfield{{{}}}{{{}}}{{{}}}{{{comment}}}\n",
        escape_tex(&field.modifiers),
        escape_tex(&field.ty.to_string()),
        escape_tex(&field.name)
    );
    tex.push_str(&references::render_block(ctx, &field.see, &subject));
    tex
}

fn render_enum_constant(
    ctx: &mut RenderContext<'_>,
    owner: &TypeDoc,
    constant: &FieldDoc,
) -> String {
    let subject = Subject::Member {
        owner,
        name: &constant.name,
    };
    let comment = render_comment(ctx, &constant.comment, &subject);
    let mut tex = format!("\\texdocenum{{{}}}{{{comment}}}\n", escape_tex(&constant.name));
    tex.push_str(&references::render_block(ctx, &constant.see, &subject));
    tex
}

fn render_executable(
    ctx: &mut RenderContext<'_>,
    owner: &TypeDoc,
    member: &ExecutableDoc,
) -> String {
    let comment = render_method_comment(ctx, owner, member);
    let parameter_doc = render_parameter_doc(ctx, owner, member);
    let modifiers = escape_tex(&member.modifiers);
    let name = escape_tex(&member.name);
    let params = escape_tex(&declaration::parameter_list(member));

    let signature = format!("{{{name}}}{{{params}}}{{{comment}}}{{{parameter_doc}}}");
    let mut tex = match member.return_type() {
        Some(return_type) => {
            let return_type = escape_tex(&return_type.to_string());
            format!("\\texdocmethod{{{modifiers}}}{{{return_type}}}{signature}\n")
        }
        None => format!("\\texdocconstructor{{{modifiers}}}{signature}\n"),
    };
    let subject = Subject::Method {
        owner,
        method: member,
    };
    tex.push_str(&references::render_block(ctx, &member.see, &subject));
    tex
}

/// Parameter, return and thrown-exception documentation of a member.
fn render_parameter_doc(
    ctx: &mut RenderContext<'_>,
    owner: &TypeDoc,
    member: &ExecutableDoc,
) -> String {
    let subject = Subject::Member {
        owner,
        name: &member.name,
    };
    let mut tex = String::new();

    if !member.param_tags.is_empty() {
        tex.push_str("\\begin{texdocparameters}\n");
        for tag in &member.param_tags {
            let description = render_comment(ctx, &tag.comment, &subject);
            let _ = writeln!(
                tex,
                "\\texdocparameter{{{}}}{{{description}}}",
                escape_tex(&tag.name)
            );
        }
        tex.push_str("\\end{texdocparameters}\n");
    }
    if !member.return_tags.is_empty() {
        let description: String = member
            .return_tags
            .iter()
            .map(|returns| render_comment(ctx, returns, &subject))
            .collect();
        let _ = writeln!(tex, "\\texdocreturn{{{description}}}");
    }
    if !member.throws_tags.is_empty() {
        tex.push_str("\\begin{texdocthrows}\n");
        for tag in &member.throws_tags {
            let description = render_comment(ctx, &tag.comment, &subject);
            let _ = writeln!(
                tex,
                "\\texdocthrow{{{}}}{{{description}}}",
                escape_tex(&tag.exception)
            );
        }
        tex.push_str("\\end{texdocthrows}\n");
    }
    tex
}
