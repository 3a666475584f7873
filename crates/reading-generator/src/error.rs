//! Generator Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors while persisting a generated batch
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Filesystem failure on the output path
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Batch could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
