//! Mel spectrogram configuration types.
//!
//! [`MelConfig`] is an immutable record validated once, when an extractor is
//! built. Optional fields (`hop_length`, `win_length`, `f_max`) resolve to
//! librosa-compatible defaults.

use serde::{Deserialize, Serialize};

use crate::error::{MelError, MelResult};

/// Mel frequency scale variant.
///
/// Using the wrong scale produces band edges that downstream models were not
/// trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MelScale {
    /// Slaney scale (librosa `htk=False`, Whisper, transformers.js).
    ///
    /// - For freq < 1000 Hz: `mel = 3 × freq / 200`
    /// - For freq >= 1000 Hz: `mel = 15 + ln(freq / 1000) / (ln(6.4) / 27)`
    #[default]
    Slaney,

    /// HTK scale (librosa `htk=True`).
    ///
    /// Formula: `mel = 2595 × log10(1 + freq / 700)`
    Htk,
}

impl MelScale {
    /// Map the boolean `htk` flag used by librosa-style configs.
    pub fn from_htk(htk: bool) -> Self {
        if htk {
            MelScale::Htk
        } else {
            MelScale::Slaney
        }
    }

    pub fn is_htk(self) -> bool {
        self == MelScale::Htk
    }
}

/// Filter bank normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MelNorm {
    /// Triangles peak at 1.0.
    #[default]
    None,

    /// Area normalization: each row is scaled by `2 / (upper_hz - lower_hz)`.
    Slaney,
}

/// How the signal is extended when frames are centred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaddingMode {
    /// Mirror the signal at its boundaries, excluding the edge sample.
    #[default]
    Reflect,

    /// Pad with zeros.
    #[serde(alias = "constant")]
    Zero,
}

/// Analysis window applied to every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Periodic Hann window.
    #[default]
    #[serde(alias = "hanning")]
    Hann,

    /// Periodic Hamming window.
    Hamming,
}

/// Configuration for mel spectrogram extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MelConfig {
    /// Audio sample rate in Hz.
    pub sample_rate: u32,

    /// FFT size in samples. Every frame (and the window) has this length.
    pub n_fft: usize,

    /// Hop between frames. `None` resolves to `win_length / 4`.
    pub hop_length: Option<usize>,

    /// Window length. `None` resolves to `n_fft`; shorter windows are
    /// zero-padded to `n_fft`.
    pub win_length: Option<usize>,

    pub window: WindowType,

    /// Pad the signal by `n_fft / 2` on each side so frame `t` is centred on
    /// sample `t * hop_length`.
    pub center: bool,

    /// Padding used when `center` is set.
    pub pad_mode: PaddingMode,

    /// Exponent applied to STFT magnitudes (1 = magnitude, 2 = power).
    pub power: f32,

    /// Number of mel bands.
    pub n_mels: usize,

    /// Lowest band edge in Hz.
    pub f_min: f64,

    /// Highest band edge in Hz. `None` means Nyquist.
    pub f_max: Option<f64>,

    pub mel_scale: MelScale,

    pub norm: MelNorm,

    /// Take the filter bank and window from [`PrecomputedTables`](super::PrecomputedTables)
    /// instead of computing them.
    pub use_precomputed: bool,
}

impl Default for MelConfig {
    fn default() -> Self {
        Self {
            sample_rate: 22050,
            n_fft: 2048,
            hop_length: None,
            win_length: None,
            window: WindowType::Hann,
            center: true,
            pad_mode: PaddingMode::Reflect,
            power: 1.0,
            n_mels: 128,
            f_min: 0.0,
            f_max: None,
            mel_scale: MelScale::Slaney,
            norm: MelNorm::None,
            use_precomputed: false,
        }
    }
}

impl MelConfig {
    /// Create configuration from a preset name.
    ///
    /// # Presets
    ///
    /// - `"whisper"`: OpenAI Whisper tiny/base/small/medium front end
    /// - `"whisper-large"`: Whisper large (128 mels)
    ///
    /// Returns `None` if preset is not recognized.
    pub fn from_preset(preset: &str) -> Option<Self> {
        match preset.to_lowercase().as_str() {
            "whisper" | "whisper-tiny" | "whisper-base" | "whisper-small" | "whisper-medium" => {
                Some(Self::whisper())
            }
            "whisper-large" | "whisper-large-v2" | "whisper-large-v3" => {
                Some(Self::whisper_large())
            }
            _ => None,
        }
    }

    /// Whisper-compatible front end: 16 kHz, 25 ms window, 10 ms hop,
    /// 80 Slaney-normalized bands, power spectrogram.
    pub fn whisper() -> Self {
        Self {
            sample_rate: 16000,
            n_fft: 400,
            hop_length: Some(160),
            win_length: None,
            window: WindowType::Hann,
            center: true,
            pad_mode: PaddingMode::Reflect,
            power: 2.0,
            n_mels: 80,
            f_min: 0.0,
            f_max: Some(8000.0),
            mel_scale: MelScale::Slaney,
            norm: MelNorm::Slaney,
            use_precomputed: false,
        }
    }

    /// Same as [`MelConfig::whisper`] with 128 bands.
    pub fn whisper_large() -> Self {
        Self {
            n_mels: 128,
            ..Self::whisper()
        }
    }

    /// Window length after defaulting.
    pub fn effective_win_length(&self) -> usize {
        self.win_length.unwrap_or(self.n_fft)
    }

    /// Hop length after defaulting.
    pub fn effective_hop_length(&self) -> usize {
        self.hop_length
            .unwrap_or_else(|| self.effective_win_length() / 4)
    }

    /// Upper band edge after defaulting to Nyquist.
    pub fn effective_f_max(&self) -> f64 {
        self.f_max.unwrap_or(self.nyquist())
    }

    /// Number of one-sided FFT bins, `1 + n_fft / 2`.
    pub fn n_bins(&self) -> usize {
        1 + self.n_fft / 2
    }

    fn nyquist(&self) -> f64 {
        self.sample_rate as f64 / 2.0
    }

    /// Check every invariant the extraction pipeline relies on.
    pub fn validate(&self) -> MelResult<()> {
        if self.sample_rate == 0 {
            return Err(config_error("sample_rate must be positive"));
        }
        if self.n_fft == 0 {
            return Err(config_error("n_fft must be positive"));
        }
        if self.n_mels == 0 {
            return Err(config_error("n_mels must be positive"));
        }

        let win_length = self.effective_win_length();
        if win_length == 0 || win_length > self.n_fft {
            return Err(config_error(format!(
                "win_length must be in 1..={}, got {}",
                self.n_fft, win_length
            )));
        }
        if self.effective_hop_length() == 0 {
            return Err(config_error(match self.hop_length {
                Some(_) => "hop_length must be positive".to_string(),
                None => format!("hop_length defaults to win_length / 4 = 0 (win_length {win_length})"),
            }));
        }

        if !self.power.is_finite() || self.power <= 0.0 {
            return Err(config_error(format!(
                "power must be a positive finite number, got {}",
                self.power
            )));
        }

        if !self.f_min.is_finite() || self.f_min < 0.0 {
            return Err(config_error(format!(
                "f_min must be non-negative, got {}",
                self.f_min
            )));
        }
        let f_max = self.effective_f_max();
        if !f_max.is_finite() || f_max > self.nyquist() {
            return Err(config_error(format!(
                "f_max must not exceed Nyquist ({} Hz), got {}",
                self.nyquist(),
                f_max
            )));
        }
        if self.f_min >= f_max {
            return Err(config_error(format!(
                "f_min ({}) must be below f_max ({})",
                self.f_min, f_max
            )));
        }

        Ok(())
    }
}

fn config_error(msg: impl Into<String>) -> MelError {
    MelError::Config(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_whisper() {
        let config = MelConfig::from_preset("whisper").unwrap();
        assert_eq!(config.n_mels, 80);
        assert_eq!(config.mel_scale, MelScale::Slaney);
        assert_eq!(config.norm, MelNorm::Slaney);
        assert_eq!(config.effective_hop_length(), 160);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_preset_whisper_large() {
        let config = MelConfig::from_preset("Whisper-Large-v3").unwrap();
        assert_eq!(config.n_mels, 128);
    }

    #[test]
    fn test_preset_unknown() {
        assert!(MelConfig::from_preset("unknown").is_none());
    }

    #[test]
    fn test_defaults_resolve() {
        let config = MelConfig::default();
        assert_eq!(config.effective_win_length(), 2048);
        assert_eq!(config.effective_hop_length(), 512);
        assert_eq!(config.effective_f_max(), 11025.0);
        assert_eq!(config.n_bins(), 1025);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_hop_defaults_to_quarter_window() {
        let config = MelConfig {
            n_fft: 512,
            win_length: Some(400),
            ..Default::default()
        };
        assert_eq!(config.effective_hop_length(), 100);
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        for config in [
            MelConfig {
                n_fft: 0,
                ..Default::default()
            },
            MelConfig {
                n_mels: 0,
                ..Default::default()
            },
            MelConfig {
                hop_length: Some(0),
                ..Default::default()
            },
        ] {
            assert!(matches!(config.validate(), Err(MelError::Config(_))));
        }
    }

    #[test]
    fn test_rejects_zero_default_hop() {
        let config = MelConfig {
            n_fft: 8,
            win_length: Some(3),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(MelError::Config(_))));
    }

    #[test]
    fn test_rejects_window_longer_than_fft() {
        let config = MelConfig {
            n_fft: 256,
            win_length: Some(400),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_frequency_bounds() {
        let inverted = MelConfig {
            sample_rate: 16000,
            f_min: 4000.0,
            f_max: Some(2000.0),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let equal = MelConfig {
            sample_rate: 16000,
            f_min: 3000.0,
            f_max: Some(3000.0),
            ..Default::default()
        };
        assert!(equal.validate().is_err());

        let above_nyquist = MelConfig {
            sample_rate: 16000,
            f_max: Some(8001.0),
            ..Default::default()
        };
        assert!(above_nyquist.validate().is_err());

        let negative = MelConfig {
            f_min: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_power() {
        let config = MelConfig {
            power: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_htk_flag_mapping() {
        assert_eq!(MelScale::from_htk(true), MelScale::Htk);
        assert_eq!(MelScale::from_htk(false), MelScale::Slaney);
        assert!(MelScale::Htk.is_htk());
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = MelConfig::whisper();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: MelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_serde_partial_uses_defaults() {
        let parsed: MelConfig =
            serde_json::from_str(r#"{"n_mels": 40, "mel_scale": "htk", "pad_mode": "constant"}"#)
                .unwrap();
        assert_eq!(parsed.n_mels, 40);
        assert_eq!(parsed.mel_scale, MelScale::Htk);
        assert_eq!(parsed.pad_mode, PaddingMode::Zero);
        assert_eq!(parsed.n_fft, 2048);
        assert!(parsed.center);
    }
}
