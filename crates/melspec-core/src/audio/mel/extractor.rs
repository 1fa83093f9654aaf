//! Mel spectrogram extractor.
//!
//! Owns the filter bank and window for its lifetime; both are built (or taken
//! from precomputed tables) once, at construction, and are read-only
//! afterwards. Extraction takes `&self` and keeps no per-call state, so one
//! extractor can serve many threads when its spectrum primitive is `Sync`.

use ndarray::{Array2, ArrayView2};

use super::config::MelConfig;
use super::filter_bank::FilterBank;
use super::stft::{power_spectrogram, RustFftSpectrum, SpectrumPrimitive, StftEngine};
use super::tables::PrecomputedTables;
use super::window::fft_window;
use crate::audio::convert::{normalize_pcm16_to_f32, to_f32_samples, Sample};
use crate::error::{MelError, MelResult};

/// Input to [`MelSpectrogramExtractor::compute_spectrogram`].
#[derive(Debug, Clone)]
pub enum SpectrogramInput<'a> {
    /// Raw waveform; the STFT is computed with the extractor's settings.
    Waveform(&'a [f32]),

    /// Already computed `[bins, frames]` spectrogram, used as is.
    Spectrogram(Array2<f32>),
}

/// A `[bins, frames]` magnitude (or power) spectrogram and the FFT size it
/// corresponds to.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    pub data: Array2<f32>,
    pub n_fft: usize,
}

/// Waveform → mel spectrogram.
///
/// ```rust
/// use melspec_core::audio::mel::{MelConfig, MelSpectrogramExtractor};
///
/// let extractor = MelSpectrogramExtractor::new(MelConfig::whisper()).unwrap();
/// let samples = vec![0.0f32; 16000];
/// let mel = extractor.extract(&samples).unwrap();
/// assert_eq!(mel.dim(), (80, 101));
/// ```
#[derive(Debug, Clone)]
pub struct MelSpectrogramExtractor<S = RustFftSpectrum> {
    config: MelConfig,
    filter_bank: FilterBank,
    window: Vec<f32>,
    stft: StftEngine,
    spectrum: S,
}

impl MelSpectrogramExtractor<RustFftSpectrum> {
    /// Build an extractor that computes its filter bank and window.
    ///
    /// Fails if the config is invalid or asks for precomputed tables.
    pub fn new(config: MelConfig) -> MelResult<Self> {
        config.validate()?;
        let spectrum = RustFftSpectrum::new(config.n_fft);
        Self::with_spectrum(config, None, spectrum)
    }

    /// Build an extractor that may take its filter bank and window from
    /// `tables`. The tables are only consulted when `config.use_precomputed`
    /// is set.
    pub fn with_tables(config: MelConfig, tables: &PrecomputedTables) -> MelResult<Self> {
        config.validate()?;
        let spectrum = RustFftSpectrum::new(config.n_fft);
        Self::with_spectrum(config, Some(tables), spectrum)
    }
}

impl<S: SpectrumPrimitive> MelSpectrogramExtractor<S> {
    /// Build an extractor around a custom spectrum primitive.
    pub fn with_spectrum(
        config: MelConfig,
        tables: Option<&PrecomputedTables>,
        spectrum: S,
    ) -> MelResult<Self> {
        config.validate()?;

        let (filter_bank, window) = if config.use_precomputed {
            let tables = tables.ok_or_else(|| {
                MelError::Config(
                    "use_precomputed is set but no precomputed tables were supplied".to_string(),
                )
            })?;
            log::debug!(
                target: "melspec_core",
                "Using precomputed mel tables (n_mels = {}, n_fft = {})",
                config.n_mels,
                config.n_fft
            );
            (
                tables.filter_bank(config.n_mels, config.n_bins())?,
                tables.window(config.n_fft)?,
            )
        } else {
            log::debug!(
                target: "melspec_core",
                "Computing mel filter bank (sr = {}, n_fft = {}, n_mels = {}, {:?} scale, {:?} norm, {:.1}-{:.1} Hz)",
                config.sample_rate,
                config.n_fft,
                config.n_mels,
                config.mel_scale,
                config.norm,
                config.f_min,
                config.effective_f_max()
            );
            (
                FilterBank::from_config(&config),
                fft_window(config.window, config.effective_win_length(), config.n_fft),
            )
        };

        Ok(Self {
            stft: StftEngine::from_config(&config),
            config,
            filter_bank,
            window,
            spectrum,
        })
    }

    pub fn config(&self) -> &MelConfig {
        &self.config
    }

    pub fn filter_bank(&self) -> &FilterBank {
        &self.filter_bank
    }

    pub fn window(&self) -> &[f32] {
        &self.window
    }

    pub fn spectrum(&self) -> &S {
        &self.spectrum
    }

    /// Number of frames `extract` produces for `n_samples` samples.
    pub fn frame_count(&self, n_samples: usize) -> usize {
        self.stft.frame_count(n_samples)
    }

    /// Compute the `[n_mels, frames]` mel spectrogram of `waveform`.
    ///
    /// Values are linear mel energies (`|X|^power` projected onto the filter
    /// bank); no log compression is applied. Waveforms too short for a single
    /// frame give a `[n_mels, 0]` result.
    pub fn extract<T: Sample>(&self, waveform: &[T]) -> MelResult<Array2<f32>> {
        let samples = to_f32_samples(waveform);
        let spectrogram = self.stft_power(&samples)?;
        Ok(self.filter_bank.apply(spectrogram.view()))
    }

    /// [`extract`](Self::extract) for 16-bit little-endian PCM bytes.
    pub fn extract_pcm16(&self, pcm_bytes: &[u8]) -> MelResult<Array2<f32>> {
        self.extract(&normalize_pcm16_to_f32(pcm_bytes))
    }

    /// Project an externally computed `[bins, frames]` spectrogram.
    pub fn extract_spectrogram(&self, spectrogram: ArrayView2<'_, f32>) -> MelResult<Array2<f32>> {
        if spectrogram.nrows() != self.filter_bank.n_bins() {
            return Err(MelError::Shape(format!(
                "spectrogram has {} bins, filter bank expects {}",
                spectrogram.nrows(),
                self.filter_bank.n_bins()
            )));
        }
        Ok(self.filter_bank.apply(spectrogram))
    }

    /// Produce the `[bins, frames]` spectrogram that `extract` projects.
    ///
    /// A supplied spectrogram is returned untouched with `n_fft` inferred as
    /// `2 * (bins - 1)`; a waveform goes through the STFT.
    pub fn compute_spectrogram(&self, input: SpectrogramInput<'_>) -> MelResult<Spectrogram> {
        match input {
            SpectrogramInput::Spectrogram(data) => {
                let bins = data.nrows();
                if bins == 0 {
                    return Err(MelError::Shape(
                        "spectrogram must have at least one frequency bin".to_string(),
                    ));
                }
                Ok(Spectrogram {
                    data,
                    n_fft: 2 * (bins - 1),
                })
            }
            SpectrogramInput::Waveform(samples) => Ok(Spectrogram {
                data: self.stft_power(samples)?,
                n_fft: self.config.n_fft,
            }),
        }
    }

    fn stft_power(&self, samples: &[f32]) -> MelResult<Array2<f32>> {
        let stft = self.stft.compute(samples, &self.window, &self.spectrum)?;
        Ok(power_spectrogram(&stft, self.config.power))
    }
}
