//! `texdoc render` command implementation.

use std::path::PathBuf;

use clap::Args;
use texdoc_config::{CliSettings, Config};
use texdoc_engine::{EmitSummary, RenderConfig, render_to_path};
use texdoc_model::DocModel;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON documentation model to render.
    pub(crate) model: PathBuf,

    /// Output LaTeX file (overrides config, default: docs.tex).
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Connector phrase for inline references (overrides config).
    #[arg(long = "see")]
    pub(crate) see_inline: Option<String>,

    /// Heading of see-also blocks (overrides config).
    #[arg(long = "see-also")]
    pub(crate) see_block: Option<String>,

    /// Suppress progress output.
    #[arg(short, long)]
    pub(crate) quiet: bool,

    /// Block tag that excludes a type (overrides config, default: @texignore).
    #[arg(long)]
    pub(crate) exclude_tag: Option<String>,

    /// Path to configuration file (default: auto-discover texdoc.toml).
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Enable verbose output (show detailed progress).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            output: self.output.clone(),
            see_inline: self.see_inline.clone(),
            see_block: self.see_block.clone(),
            quiet: self.quiet.then_some(true),
            exclude_tag: self.exclude_tag.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            output = %config.output_path.display(),
            exclude_tag = %config.exclude_tag,
            "Loaded configuration"
        );
        let output = Output::new(config.quiet);

        output.highlight(&format!("Rendering {}", self.model.display()));
        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }

        let model = DocModel::from_path(&self.model)?;
        tracing::debug!(
            packages = model.packages.len(),
            classes = model.classes.len(),
            "Loaded documentation model"
        );
        let summary = render_to_path(
            &model,
            render_config(&config),
            &config.output_path,
            |package| output.info(&format!("* Package: {package}")),
        )?;

        report(&output, &summary);
        output.success(&format!("Wrote {}", config.output_path.display()));
        Ok(())
    }
}

fn render_config(config: &Config) -> RenderConfig {
    RenderConfig {
        see_inline: config.see_inline.clone(),
        see_block: config.see_block.clone(),
        exclude_tag: config.exclude_tag.clone(),
    }
}

fn report(output: &Output, summary: &EmitSummary) {
    output.info(&format!(
        "Packages: {}, types: {}, excluded: {}",
        summary.packages, summary.types, summary.excluded
    ));
    if !summary.warnings.is_empty() {
        output.warning(&format!(
            "{} warning(s), see log output for details",
            summary.warnings.len()
        ));
    }
}
