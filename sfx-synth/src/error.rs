//! Synthesis error type

/// Errors raised by the synthesis components.
///
/// All of these are deterministic: retrying the same call with the same
/// parameters fails the same way.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthError {
    /// A duration, sample rate, frequency, window or envelope fraction is out of range
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Buffers that must share a length do not
    #[error("length mismatch: expected {expected} samples, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A NaN or infinite sample reached the quantizer
    #[error("non-finite sample at index {index}")]
    InvalidSample { index: usize },

    #[error("unknown sound: {0}")]
    UnknownSound(String),

    #[error("sound '{sound}' has no variant named '{variant}'")]
    UnknownVariant { sound: String, variant: String },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SynthError>;
