//! Unified error types for melspec-core.
//!
//! Every fallible public operation returns [`MelResult`]. Configuration and
//! table problems surface when an extractor is constructed; only shape checks
//! on caller-supplied spectrograms and failures of the spectrum primitive can
//! surface from an extraction call.
//!
//! # Error Hierarchy
//!
//! ```text
//! MelError
//! ├── Config(String)              -- invalid MelConfig, rejected at construction
//! ├── TableLookup { n_mels }      -- precomputed filter bank missing for n_mels
//! ├── Shape(String)               -- matrix/window dimensions disagree
//! └── Spectrum(SpectrumError)     -- passed through from the spectrum primitive
//! ```

use thiserror::Error;

/// The canonical error type for melspec-core.
#[derive(Error, Debug)]
pub enum MelError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Precomputed tables have no filter bank for the requested band count
    #[error("No precomputed mel filter bank for n_mels = {n_mels}")]
    TableLookup { n_mels: usize },

    /// Dimensions of a table, window or spectrogram do not line up
    #[error("Shape mismatch: {0}")]
    Shape(String),

    /// Failure reported by the per-frame spectrum primitive
    #[error(transparent)]
    Spectrum(#[from] SpectrumError),
}

/// Errors reported by a [`SpectrumPrimitive`](crate::audio::mel::SpectrumPrimitive).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectrumError {
    /// The frame contains NaN or infinity
    #[error("Non-finite sample {value} at frame offset {index}")]
    NonFinite { index: usize, value: f32 },

    /// The frame is not the length the primitive was planned for
    #[error("Frame length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Backend-specific failure (custom primitives)
    #[error("Spectrum backend error: {0}")]
    Backend(String),
}

/// Convenience alias so callers can write `MelResult<T>`.
pub type MelResult<T> = std::result::Result<T, MelError>;
