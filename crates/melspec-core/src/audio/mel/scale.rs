//! Hz ↔ mel conversions.
//!
//! Scalar and slice entry points share the same formulas; the slice versions
//! apply the piecewise branch per element.
//!
//! ## Slaney
//!
//! Linear below 1000 Hz (`mel = freq / (200/3)`), logarithmic above
//! (`mel = 15 + ln(freq / 1000) / logstep`, `logstep = ln(6.4) / 27`). The
//! breakpoint 1000 Hz maps to exactly 15 mel from both sides.
//!
//! ## HTK
//!
//! `mel = 2595 × log10(1 + freq / 700)`

use super::config::MelScale;

const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;
const LOGSTEP: f64 = 0.068_751_777_420_949_12; // ln(6.4) / 27

/// Convert a frequency in Hz to mel.
pub fn hz_to_mel(freq: f64, scale: MelScale) -> f64 {
    match scale {
        MelScale::Htk => 2595.0 * (1.0 + freq / 700.0).log10(),
        MelScale::Slaney => {
            if freq >= MIN_LOG_HZ {
                MIN_LOG_MEL + (freq / MIN_LOG_HZ).ln() / LOGSTEP
            } else {
                freq / F_SP
            }
        }
    }
}

/// Convert a mel value to Hz. Exact inverse of [`hz_to_mel`].
pub fn mel_to_hz(mel: f64, scale: MelScale) -> f64 {
    match scale {
        MelScale::Htk => 700.0 * (10.0_f64.powf(mel / 2595.0) - 1.0),
        MelScale::Slaney => {
            if mel >= MIN_LOG_MEL {
                MIN_LOG_HZ * (LOGSTEP * (mel - MIN_LOG_MEL)).exp()
            } else {
                mel * F_SP
            }
        }
    }
}

/// Element-wise [`hz_to_mel`].
pub fn hz_to_mel_slice(freqs: &[f64], scale: MelScale) -> Vec<f64> {
    freqs.iter().map(|&f| hz_to_mel(f, scale)).collect()
}

/// Element-wise [`mel_to_hz`].
pub fn mel_to_hz_slice(mels: &[f64], scale: MelScale) -> Vec<f64> {
    mels.iter().map(|&m| mel_to_hz(m, scale)).collect()
}

/// `n` frequencies evenly spaced on the mel scale between `f_min` and `f_max`
/// (both included), returned in Hz.
pub fn mel_frequencies(n: usize, f_min: f64, f_max: f64, scale: MelScale) -> Vec<f64> {
    let mel_min = hz_to_mel(f_min, scale);
    let mel_max = hz_to_mel(f_max, scale);
    linspace(mel_min, mel_max, n)
        .into_iter()
        .map(|m| mel_to_hz(m, scale))
        .collect()
}

/// Center frequencies of the `1 + n_fft / 2` one-sided FFT bins, from 0 Hz to
/// Nyquist.
pub fn fft_frequencies(sample_rate: u32, n_fft: usize) -> Vec<f64> {
    linspace(0.0, sample_rate as f64 / 2.0, 1 + n_fft / 2)
}

pub(crate) fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}
