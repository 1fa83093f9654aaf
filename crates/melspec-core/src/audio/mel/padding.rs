//! Signal padding for centred framing.

use super::config::PaddingMode;

/// Extend `signal` to `target_len` samples so that frames are centred.
///
/// The extra `target_len - n` samples are split `lpad = floor(extra / 2)` on
/// the left and the remainder on the right. Targets no longer than the signal
/// return it unchanged.
pub fn pad_signal(signal: &[f32], target_len: usize, mode: PaddingMode) -> Vec<f32> {
    match mode {
        PaddingMode::Reflect => reflect_pad(signal, target_len),
        PaddingMode::Zero => pad_center(signal, target_len),
    }
}

/// Mirror-pad `signal` to `target_len` samples, excluding the edge sample.
///
/// The left pad is `signal[1..=lpad]` reversed, the right pad is
/// `signal[n-rpad-1..n-1]` reversed. Pads longer than `n - 1` keep bouncing
/// between both ends; a single sample is replicated and an empty signal is
/// padded with zeros.
pub fn reflect_pad(signal: &[f32], target_len: usize) -> Vec<f32> {
    let n = signal.len();
    if target_len <= n {
        return signal.to_vec();
    }
    let lpad = (target_len - n) / 2;
    let rpad = target_len - n - lpad;

    match n {
        0 => return vec![0.0; target_len],
        1 => return vec![signal[0]; target_len],
        _ => {}
    }

    let mut padded = Vec::with_capacity(target_len);
    padded.extend((1..=lpad).rev().map(|i| signal[reflect_index(i as isize, n)]));
    padded.extend_from_slice(signal);
    padded.extend((1..=rpad).map(|i| signal[reflect_index((n - 1 + i) as isize, n)]));
    padded
}

/// Index into a length-`n` signal for position `i` of its infinite mirror
/// extension (`-1 → 1`, `n → n - 2`). Requires `n >= 2`.
fn reflect_index(i: isize, n: usize) -> usize {
    let w = (n - 1) as isize;
    ((i + w).rem_euclid(2 * w) - w).unsigned_abs()
}

/// Zero-pad `data` to `size` samples, centred with `floor((size - n) / 2)`
/// zeros on the left. Data already at least `size` long is returned as is.
pub fn pad_center(data: &[f32], size: usize) -> Vec<f32> {
    let n = data.len();
    if size <= n {
        return data.to_vec();
    }
    let lpad = (size - n) / 2;
    let mut padded = vec![0.0f32; size];
    padded[lpad..lpad + n].copy_from_slice(data);
    padded
}
