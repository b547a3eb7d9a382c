//! Error types for framealign.

use thiserror::Error;

use crate::types::MethodId;

/// Top-level error type for alignment operations.
#[derive(Debug, Error)]
pub enum AlignError {
    /// Structural mismatch in a dataset document. Fatal to the load.
    #[error("malformed dataset: {0}")]
    MalformedDataset(String),

    /// A frame, LU or intermediate id that does not resolve.
    ///
    /// Builders never propagate this; the offending item is dropped.
    #[error("unresolved reference: {0}")]
    UnresolvedFrameReference(String),

    /// A parameter value that cannot be coerced into range.
    #[error("invalid value for {name}: {detail}")]
    InvalidParameterValue {
        /// Parameter name.
        name: &'static str,
        /// What was wrong with it.
        detail: String,
    },

    /// No alignment method with this id in the installed dataset.
    #[error("unknown alignment method: {0}")]
    UnknownMethod(MethodId),

    /// I/O error wrapper.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serde serialization/deserialization error.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Result type for alignment operations.
pub type Result<T> = std::result::Result<T, AlignError>;
