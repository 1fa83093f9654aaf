//! Prelude module for convenient imports.
//!
//! ```rust
//! use melspec_core::prelude::*;
//!
//! let extractor = MelSpectrogramExtractor::new(MelConfig::default()).unwrap();
//! assert_eq!(extractor.filter_bank().n_mels(), 128);
//! ```

pub use crate::audio::convert::Sample;
pub use crate::audio::mel::{
    compute_mel_spectrogram, FilterBank, MelConfig, MelNorm, MelScale, MelSpectrogramExtractor,
    PaddingMode, PrecomputedTables, SpectrogramInput, SpectrumPrimitive, WindowType,
};
pub use crate::error::{MelError, MelResult, SpectrumError};
