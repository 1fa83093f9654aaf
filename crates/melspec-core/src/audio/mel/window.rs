//! Periodic analysis windows.
//!
//! A periodic window of length `L` is the symmetric window of length `L + 1`
//! with its last sample dropped, so `w[0]` equals the (virtual) `w[L]`.

use std::f64::consts::PI;

use super::config::WindowType;
use super::padding::pad_center;

/// Periodic Hann window: `0.5 × (1 − cos(2πk / L))` for `k = 0..L`.
pub fn hann(length: usize) -> Vec<f32> {
    cosine_window(length, 0.5, 0.5)
}

/// Periodic Hamming window: `0.54 − 0.46 × cos(2πk / L)` for `k = 0..L`.
pub fn hamming(length: usize) -> Vec<f32> {
    cosine_window(length, 0.54, 0.46)
}

fn cosine_window(length: usize, a0: f64, a1: f64) -> Vec<f32> {
    if length == 0 {
        return Vec::new();
    }
    let factor = 2.0 * PI / length as f64;
    (0..length)
        .map(|k| (a0 - a1 * (k as f64 * factor).cos()) as f32)
        .collect()
}

impl WindowType {
    /// Generate this window with `length` samples.
    pub fn generate(self, length: usize) -> Vec<f32> {
        match self {
            WindowType::Hann => hann(length),
            WindowType::Hamming => hamming(length),
        }
    }
}

/// Build the STFT window: `win_length` samples of `window_type`, centred in
/// `n_fft` zeros when shorter than the frame.
pub fn fft_window(window_type: WindowType, win_length: usize, n_fft: usize) -> Vec<f32> {
    let window = window_type.generate(win_length);
    if win_length < n_fft {
        pad_center(&window, n_fft)
    } else {
        window
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let window = hann(400);
        assert_eq!(window.len(), 400);
        assert_eq!(window[0], 0.0);
        assert!((window[200] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hann_is_periodic_not_symmetric() {
        let n = 8;
        let window = hann(n);
        // Matches the symmetric window of n + 1 samples with the last dropped
        let symmetric: Vec<f32> = (0..=n)
            .map(|k| (0.5 * (1.0 - (2.0 * PI * k as f64 / n as f64).cos())) as f32)
            .collect();
        for (w, s) in window.iter().zip(&symmetric[..n]) {
            assert!((w - s).abs() < 1e-7);
        }

        // Periodic: w[k] == w[n - k] for k in 1..n, but the last sample is not zero
        for k in 1..n {
            assert!((window[k] - window[n - k]).abs() < 1e-6);
        }
        assert!(window[n - 1] > 0.0);
    }

    #[test]
    fn test_hann_small_lengths() {
        assert!(hann(0).is_empty());
        assert_eq!(hann(1), vec![0.0]);
        let two = hann(2);
        assert_eq!(two[0], 0.0);
        assert!((two[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hamming_endpoints() {
        let window = hamming(16);
        assert!((window[0] - 0.08).abs() < 1e-6);
        assert!((window[8] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_fft_window_pads_short_window() {
        let window = fft_window(WindowType::Hann, 4, 8);
        assert_eq!(window.len(), 8);
        assert_eq!(&window[..2], &[0.0, 0.0]);
        assert_eq!(&window[6..], &[0.0, 0.0]);
        assert_eq!(&window[2..6], hann(4).as_slice());
    }

    #[test]
    fn test_fft_window_full_length() {
        assert_eq!(fft_window(WindowType::Hann, 400, 400), hann(400));
    }
}
