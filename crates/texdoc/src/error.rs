//! CLI error types.

use texdoc_config::ConfigError;
use texdoc_engine::EmitError;
use texdoc_model::ModelError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Model(#[from] ModelError),

    #[error("{0}")]
    Emit(#[from] EmitError),
}
