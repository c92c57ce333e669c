//! Error type shared by every engine operation.

/// Failure values returned by the color engine.
///
/// `InsufficientData` and `Unreachable` are normally relaxed into
/// best-effort results; they only surface when a caller asks for a strict
/// answer (see [`crate::Extraction::require_complete`] and
/// [`crate::Suggestion::into_result`]).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorError {
    #[error("invalid color format: {0}")]
    InvalidFormat(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("only {distinct} distinct colors available for {requested} clusters")]
    InsufficientData { distinct: usize, requested: usize },

    #[error("contrast target {target:.2} is unreachable (best achievable {best:.2})")]
    Unreachable { target: f64, best: f64 },

    #[error("catalog is empty")]
    EmptyCatalog,
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, ColorError>;
