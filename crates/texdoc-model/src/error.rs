//! Error types for loading the documentation model.

use std::path::PathBuf;

/// Error while loading a documentation model.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model file could not be read.
    #[error("cannot read documentation model {}: {source}", path.display())]
    Io {
        /// Path of the model file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The model is not valid JSON or does not match the expected shape.
    #[error("invalid documentation model: {0}")]
    Json(#[from] serde_json::Error),
}
