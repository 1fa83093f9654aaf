//! Waveform coercion.
//!
//! Extraction works on `f32` samples. Integer PCM is scaled to `[-1.0, 1.0)`;
//! floating-point input is taken as is.

/// A numeric sample type accepted as a waveform.
pub trait Sample: Copy + Send + Sync {
    fn to_f32(self) -> f32;
}

impl Sample for f32 {
    #[inline]
    fn to_f32(self) -> f32 {
        self
    }
}

impl Sample for f64 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32
    }
}

impl Sample for i16 {
    #[inline]
    fn to_f32(self) -> f32 {
        self as f32 / 32768.0
    }
}

impl Sample for i32 {
    #[inline]
    fn to_f32(self) -> f32 {
        (self as f64 / 2_147_483_648.0) as f32
    }
}

/// Coerce a waveform of any [`Sample`] type to `f32`.
pub fn to_f32_samples<T: Sample>(waveform: &[T]) -> Vec<f32> {
    waveform.iter().map(|&s| s.to_f32()).collect()
}

/// Converts 16-bit signed little-endian PCM bytes to f32 samples.
///
/// A trailing odd byte is ignored.
///
/// # Example
///
/// ```rust
/// use melspec_core::audio::normalize_pcm16_to_f32;
///
/// let pcm_bytes: Vec<u8> = vec![0, 0, 0xFF, 0x7F]; // silence, max positive
/// let samples = normalize_pcm16_to_f32(&pcm_bytes);
/// assert_eq!(samples.len(), 2);
/// assert!((samples[0] - 0.0).abs() < 0.001);
/// assert!((samples[1] - 1.0).abs() < 0.001);
/// ```
pub fn normalize_pcm16_to_f32(pcm_bytes: &[u8]) -> Vec<f32> {
    pcm_bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]).to_f32())
        .collect()
}
