//! Model Error Types

use thiserror::Error;

/// Errors raised while parsing model values from text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// Region name not in the fixed enumeration
    #[error("Unknown region: {0}")]
    UnknownRegion(String),

    /// Repair status not in the fixed enumeration
    #[error("Unknown repair status: {0}")]
    UnknownRepairStatus(String),

    /// Timestamp in neither supported layout
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
