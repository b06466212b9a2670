//! Error types for the online network library.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Everything that can go wrong while building, training or persisting a
/// `Network`.
///
/// The three shape variants are precondition failures of `Network::execute`
/// and are always reported before any weight, bias or activation is touched.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Fewer than two layers configured.
    #[error("too few layers: need at least 2, have {layers}")]
    Structure { layers: usize },

    /// Input vector length differs from the input layer size.
    #[error("shape mismatch (input): expected {expected} values, got {actual}")]
    InputShape { expected: usize, actual: usize },

    /// Target vector length differs from the output layer size.
    #[error("shape mismatch (output): expected {expected} values, got {actual}")]
    OutputShape { expected: usize, actual: usize },

    /// Flat weight data does not fill the requested matrix.
    #[error("weight shape mismatch: expected {expected} values, got {actual}")]
    WeightShape { expected: usize, actual: usize },

    /// A persisted network is internally inconsistent.
    #[error("invalid network snapshot: {0}")]
    Snapshot(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
