//! Triangular mel filter bank.
//!
//! Row `i` weights the FFT bins between band edges `edge[i]` and
//! `edge[i + 2]`, peaking at `edge[i + 1]`. Edges are `n_mels + 2` points
//! evenly spaced on the chosen mel scale.

use ndarray::{Array2, ArrayView2};

use super::config::{MelConfig, MelNorm, MelScale};
use super::scale::{fft_frequencies, mel_frequencies};

/// Dense `[n_mels, 1 + n_fft / 2]` weight matrix. Entries are non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBank {
    weights: Array2<f32>,
}

impl FilterBank {
    /// Build the filter bank.
    ///
    /// `f_max` defaults to Nyquist. A band whose lower or upper width is not
    /// positive produces an all-zero row.
    pub fn build(
        sample_rate: u32,
        n_fft: usize,
        n_mels: usize,
        f_min: f64,
        f_max: Option<f64>,
        scale: MelScale,
        norm: MelNorm,
    ) -> Self {
        let f_max = f_max.unwrap_or(sample_rate as f64 / 2.0);
        let fft_freqs = fft_frequencies(sample_rate, n_fft);
        let edges = mel_frequencies(n_mels + 2, f_min, f_max, scale);
        let fdiff: Vec<f64> = edges.windows(2).map(|w| w[1] - w[0]).collect();

        let mut weights = Array2::<f32>::zeros((n_mels, fft_freqs.len()));
        let mut empty_rows = 0usize;

        for (i, mut row) in weights.outer_iter_mut().enumerate() {
            let (lower_width, upper_width) = (fdiff[i], fdiff[i + 1]);
            if lower_width <= 0.0 || upper_width <= 0.0 {
                empty_rows += 1;
                continue;
            }

            let enorm = match norm {
                MelNorm::Slaney => 2.0 / (edges[i + 2] - edges[i]),
                MelNorm::None => 1.0,
            };

            for (w, &freq) in row.iter_mut().zip(&fft_freqs) {
                let lower = (freq - edges[i]) / lower_width;
                let upper = (edges[i + 2] - freq) / upper_width;
                *w = (lower.min(upper).max(0.0) * enorm) as f32;
            }

            if row.iter().all(|&w| w == 0.0) {
                empty_rows += 1;
            }
        }

        if empty_rows > 0 {
            log::warn!(
                target: "melspec_core",
                "Mel filter bank has {} empty band(s) out of {}; n_mels may be too high for n_fft = {}",
                empty_rows,
                n_mels,
                n_fft
            );
        }

        Self { weights }
    }

    /// Build from the frequency and scale fields of a config.
    pub fn from_config(config: &MelConfig) -> Self {
        Self::build(
            config.sample_rate,
            config.n_fft,
            config.n_mels,
            config.f_min,
            config.f_max,
            config.mel_scale,
            config.norm,
        )
    }

    /// Wrap an existing weight matrix (e.g. a precomputed table).
    pub fn from_weights(weights: Array2<f32>) -> Self {
        Self { weights }
    }

    pub fn n_mels(&self) -> usize {
        self.weights.nrows()
    }

    pub fn n_bins(&self) -> usize {
        self.weights.ncols()
    }

    pub fn weights(&self) -> &Array2<f32> {
        &self.weights
    }

    /// Project a `[bins, frames]` spectrogram to `[n_mels, frames]`.
    ///
    /// The caller guarantees `spectrogram.nrows() == self.n_bins()`.
    pub fn apply(&self, spectrogram: ArrayView2<'_, f32>) -> Array2<f32> {
        self.weights.dot(&spectrogram)
    }
}
