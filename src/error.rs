use thiserror::Error;

/// Errors returned by this crate.
///
/// The clustering core itself never fails: degenerate inputs (empty point sets,
/// non-positive radii) produce well-defined output. Errors come from palette
/// generation, whose inputs are caller preconditions.
#[derive(Debug, Error)]
pub enum Error {
    /// A palette of zero colors was requested.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
