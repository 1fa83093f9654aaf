//! Short-time Fourier transform.
//!
//! The signal is optionally centred (padded by `n_fft / 2` on each side),
//! sliced into frames of `n_fft` samples every `hop_length` samples, windowed,
//! and handed frame by frame to a [`SpectrumPrimitive`]. Frame `t` starts at
//! `t * hop_length` of the padded signal and there are
//! `floor((len - n_fft) / hop_length) + 1` frames, or none when the padded
//! signal is shorter than one frame.
//!
//! With the `parallel` feature frames are transformed on the rayon pool; the
//! output is still stacked in frame order.

use std::borrow::Cow;
use std::sync::Arc;

use ndarray::Array2;
use rustfft::num_complex::Complex32;
use rustfft::{Fft, FftPlanner};

use super::config::{MelConfig, PaddingMode};
use super::padding::pad_signal;
use crate::error::{MelError, MelResult, SpectrumError};

/// Per-frame spectrum computation.
///
/// Given a windowed frame of `n_fft` real samples, return the `1 + n_fft / 2`
/// one-sided complex bins: bin 0 is DC, the last bin is Nyquist. Must be pure
/// and deterministic; implementations are shared across threads.
pub trait SpectrumPrimitive: Send + Sync {
    fn compute(&self, frame: &[f32]) -> Result<Vec<Complex32>, SpectrumError>;
}

impl<T: SpectrumPrimitive + ?Sized> SpectrumPrimitive for Arc<T> {
    fn compute(&self, frame: &[f32]) -> Result<Vec<Complex32>, SpectrumError> {
        (**self).compute(frame)
    }
}

impl<T: SpectrumPrimitive + ?Sized> SpectrumPrimitive for Box<T> {
    fn compute(&self, frame: &[f32]) -> Result<Vec<Complex32>, SpectrumError> {
        (**self).compute(frame)
    }
}

/// Default spectrum primitive backed by a planned `rustfft` forward FFT.
///
/// Rejects frames containing NaN or infinity.
#[derive(Clone)]
pub struct RustFftSpectrum {
    n_fft: usize,
    fft: Arc<dyn Fft<f32>>,
}

impl RustFftSpectrum {
    pub fn new(n_fft: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        Self {
            n_fft,
            fft: planner.plan_fft_forward(n_fft),
        }
    }

    pub fn n_fft(&self) -> usize {
        self.n_fft
    }
}

impl std::fmt::Debug for RustFftSpectrum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustFftSpectrum")
            .field("n_fft", &self.n_fft)
            .finish()
    }
}

impl SpectrumPrimitive for RustFftSpectrum {
    fn compute(&self, frame: &[f32]) -> Result<Vec<Complex32>, SpectrumError> {
        if frame.len() != self.n_fft {
            return Err(SpectrumError::LengthMismatch {
                expected: self.n_fft,
                actual: frame.len(),
            });
        }
        if let Some((index, &value)) = frame.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(SpectrumError::NonFinite { index, value });
        }

        let mut buffer: Vec<Complex32> = frame.iter().map(|&x| Complex32::new(x, 0.0)).collect();
        self.fft.process(&mut buffer);
        buffer.truncate(self.n_fft / 2 + 1);
        Ok(buffer)
    }
}

/// Framing parameters of the STFT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StftEngine {
    n_fft: usize,
    hop_length: usize,
    center: bool,
    pad_mode: PaddingMode,
}

impl StftEngine {
    pub fn new(n_fft: usize, hop_length: usize, center: bool, pad_mode: PaddingMode) -> Self {
        Self {
            n_fft,
            hop_length,
            center,
            pad_mode,
        }
    }

    /// Engine for a config, with `hop_length` resolved to its default.
    pub fn from_config(config: &MelConfig) -> Self {
        Self::new(
            config.n_fft,
            config.effective_hop_length(),
            config.center,
            config.pad_mode,
        )
    }

    pub fn n_fft(&self) -> usize {
        self.n_fft
    }

    pub fn hop_length(&self) -> usize {
        self.hop_length
    }

    pub fn n_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Number of frames produced for a signal of `n_samples`.
    pub fn frame_count(&self, n_samples: usize) -> usize {
        if n_samples == 0 || self.hop_length == 0 {
            return 0;
        }
        let len = if self.center {
            n_samples + self.n_fft
        } else {
            n_samples
        };
        if len < self.n_fft {
            0
        } else {
            (len - self.n_fft) / self.hop_length + 1
        }
    }

    /// Complex STFT of `signal`, shape `[frames, 1 + n_fft / 2]`.
    ///
    /// `window` must have `n_fft` samples. Errors from `spectrum` are returned
    /// unchanged (wrapped in [`MelError::Spectrum`]).
    pub fn compute<S>(&self, signal: &[f32], window: &[f32], spectrum: &S) -> MelResult<Array2<Complex32>>
    where
        S: SpectrumPrimitive + ?Sized,
    {
        if window.len() != self.n_fft {
            return Err(MelError::Shape(format!(
                "window has {} samples, expected n_fft = {}",
                window.len(),
                self.n_fft
            )));
        }

        let n_bins = self.n_bins();
        let n_frames = self.frame_count(signal.len());
        if n_frames == 0 {
            return Ok(Array2::zeros((0, n_bins)));
        }

        let padded: Cow<'_, [f32]> = if self.center {
            Cow::Owned(pad_signal(signal, signal.len() + self.n_fft, self.pad_mode))
        } else {
            Cow::Borrowed(signal)
        };

        log::trace!(
            target: "melspec_core",
            "STFT: {} samples -> {} frames of {} bins (hop {})",
            signal.len(),
            n_frames,
            n_bins,
            self.hop_length
        );

        let spectra = self.transform_frames(&padded, window, spectrum, n_frames)?;

        let mut data = Vec::with_capacity(n_frames * n_bins);
        for (t, bins) in spectra.into_iter().enumerate() {
            if bins.len() != n_bins {
                return Err(MelError::Shape(format!(
                    "spectrum primitive returned {} bins for frame {}, expected {}",
                    bins.len(),
                    t,
                    n_bins
                )));
            }
            data.extend(bins);
        }

        Array2::from_shape_vec((n_frames, n_bins), data)
            .map_err(|e| MelError::Shape(format!("failed to stack STFT frames: {}", e)))
    }

    fn transform_frame<S>(
        &self,
        padded: &[f32],
        frame_idx: usize,
        window: &[f32],
        spectrum: &S,
    ) -> Result<Vec<Complex32>, SpectrumError>
    where
        S: SpectrumPrimitive + ?Sized,
    {
        let start = frame_idx * self.hop_length;
        let frame: Vec<f32> = padded[start..start + self.n_fft]
            .iter()
            .zip(window)
            .map(|(x, w)| x * w)
            .collect();
        spectrum.compute(&frame)
    }

    #[cfg(not(feature = "parallel"))]
    fn transform_frames<S>(
        &self,
        padded: &[f32],
        window: &[f32],
        spectrum: &S,
        n_frames: usize,
    ) -> Result<Vec<Vec<Complex32>>, SpectrumError>
    where
        S: SpectrumPrimitive + ?Sized,
    {
        (0..n_frames)
            .map(|t| self.transform_frame(padded, t, window, spectrum))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn transform_frames<S>(
        &self,
        padded: &[f32],
        window: &[f32],
        spectrum: &S,
        n_frames: usize,
    ) -> Result<Vec<Vec<Complex32>>, SpectrumError>
    where
        S: SpectrumPrimitive + ?Sized,
    {
        use rayon::prelude::*;

        // Indexed collect keeps frame order regardless of scheduling
        (0..n_frames)
            .into_par_iter()
            .map(|t| self.transform_frame(padded, t, window, spectrum))
            .collect()
    }
}

/// `|X|^power` of a `[frames, bins]` STFT, transposed to `[bins, frames]`.
pub fn power_spectrogram(stft: &Array2<Complex32>, power: f32) -> Array2<f32> {
    let magnitudes = if power == 2.0 {
        stft.mapv(|c| c.norm_sqr())
    } else if power == 1.0 {
        stft.mapv(|c| c.norm())
    } else {
        stft.mapv(|c| c.norm().powf(power))
    };
    magnitudes.reversed_axes()
}
