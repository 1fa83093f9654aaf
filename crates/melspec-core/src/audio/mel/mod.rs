//! Mel spectrogram computation.
//!
//! The main entry point is [`MelSpectrogramExtractor`]; for a one-off call
//! use [`compute_mel_spectrogram`].
//!
//! ## Architecture
//!
//! ```text
//! MelSpectrogramExtractor::new(config)          (once)
//!           ├── config.validate()
//!           ├── filter_bank::FilterBank::build()   or  tables::PrecomputedTables
//!           └── window::fft_window()               or  tables::PrecomputedTables
//!
//! extractor.extract(waveform)                   (per call)
//!           ├── padding::pad_signal()              (center = true)
//!           ├── stft::StftEngine::compute()        (window × frame → SpectrumPrimitive)
//!           ├── stft::power_spectrogram()          (|X|^power, [bins, frames])
//!           └── FilterBank::apply()                ([n_mels, bins] · [bins, frames])
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use melspec_core::audio::mel::{MelConfig, MelScale, MelSpectrogramExtractor};
//!
//! // Using a preset
//! let extractor = MelSpectrogramExtractor::new(MelConfig::whisper()).unwrap();
//!
//! // Or with explicit parameters
//! let config = MelConfig {
//!     sample_rate: 16000,
//!     n_fft: 512,
//!     hop_length: Some(160),
//!     n_mels: 40,
//!     mel_scale: MelScale::Htk,
//!     ..Default::default()
//! };
//! let extractor = MelSpectrogramExtractor::new(config).unwrap();
//! let mel = extractor.extract(&vec![0.0f32; 16000]).unwrap();
//! assert_eq!(mel.nrows(), 40);
//! ```

pub mod config;
pub mod extractor;
pub mod filter_bank;
pub mod padding;
pub mod scale;
pub mod stft;
pub mod tables;
pub mod window;

pub use config::{MelConfig, MelNorm, MelScale, PaddingMode, WindowType};
pub use extractor::{MelSpectrogramExtractor, Spectrogram, SpectrogramInput};
pub use filter_bank::FilterBank;
pub use stft::{RustFftSpectrum, SpectrumPrimitive, StftEngine};
pub use tables::PrecomputedTables;

use ndarray::Array2;

use crate::error::MelResult;

/// Compute the `[n_mels, frames]` mel spectrogram of `audio_samples` with a
/// one-shot extractor.
///
/// Builds the filter bank on every call; keep a [`MelSpectrogramExtractor`]
/// around when extracting repeatedly.
pub fn compute_mel_spectrogram(audio_samples: &[f32], config: &MelConfig) -> MelResult<Array2<f32>> {
    MelSpectrogramExtractor::new(config.clone())?.extract(audio_samples)
}
