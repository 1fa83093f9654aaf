//! Audio feature extraction.
//!
//! - [`mel`] - mel filter banks, windowing, STFT and the mel spectrogram extractor
//! - [`convert`] - waveform coercion to `f32` samples

pub mod convert;
pub mod mel;

pub use convert::{normalize_pcm16_to_f32, to_f32_samples, Sample};
pub use mel::{compute_mel_spectrogram, MelConfig, MelScale, MelSpectrogramExtractor, PaddingMode};
