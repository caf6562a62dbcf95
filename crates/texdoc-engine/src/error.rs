//! Fatal emission errors.

use std::path::PathBuf;

/// Error that aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// The output destination could not be created.
    #[error("couldn't create output file '{}': {source}", path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Writing to the output sink failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
