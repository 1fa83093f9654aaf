//! melspec-core - log-mel spectrogram front end for speech and audio models.
//!
//! Converts a mono waveform into a `[n_mels, frames]` mel spectrogram:
//! reflect-padded, centred STFT frames are windowed, transformed by a
//! per-frame spectrum primitive (rustfft by default), raised to a power and
//! projected onto a triangular mel filter bank. Log compression is left to
//! the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use melspec_core::prelude::*;
//!
//! let extractor = MelSpectrogramExtractor::new(MelConfig::whisper())?;
//! let samples = vec![0.0f32; 16000];
//! let mel = extractor.extract(&samples)?;
//! assert_eq!(mel.dim(), (80, 101));
//! # Ok::<(), MelError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`audio::mel`] - configuration, scales, windows, filter bank, STFT, extractor
//! - [`audio::convert`] - sample type coercion
//! - [`error`] - [`MelError`] and [`SpectrumError`]
//!
//! ## Features
//!
//! - `parallel` - transform STFT frames on the rayon thread pool

pub mod audio;
pub mod error;
pub mod prelude;

pub use error::{MelError, MelResult, SpectrumError};
