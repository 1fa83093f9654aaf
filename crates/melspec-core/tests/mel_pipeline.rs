//! End-to-end tests for the mel spectrogram pipeline.
//!
//! These go through the public API only: config → extractor → extract, plus
//! the precomputed-table path and concurrent use of one extractor.
//!
//! Run with: `cargo test -p melspec-core --test mel_pipeline`

use std::f32::consts::PI;

use melspec_core::audio::mel::scale::{hz_to_mel, mel_frequencies, mel_to_hz};
use melspec_core::prelude::*;

const SAMPLE_RATE: u32 = 16000;

fn sine(freq: f32, n_samples: usize) -> Vec<f32> {
    (0..n_samples)
        .map(|i| (2.0 * PI * freq * i as f32 / SAMPLE_RATE as f32).sin())
        .collect()
}

fn speech_config() -> MelConfig {
    MelConfig {
        sample_rate: SAMPLE_RATE,
        n_fft: 400,
        hop_length: Some(160),
        n_mels: 40,
        power: 2.0,
        ..Default::default()
    }
}

/// 1 s of a 440 Hz tone concentrates its energy in the bands around 440 Hz.
#[test]
fn sine_energy_lands_near_its_mel_band() {
    let config = speech_config();
    let extractor = MelSpectrogramExtractor::new(config.clone()).unwrap();
    let mel = extractor.extract(&sine(440.0, 16000)).unwrap();

    assert_eq!(mel.dim(), (40, 101));

    let band_energy: Vec<f32> = mel.rows().into_iter().map(|row| row.sum()).collect();
    let total: f32 = band_energy.iter().sum();
    let (peak_band, _) = band_energy
        .iter()
        .enumerate()
        .fold((0, f32::MIN), |acc, (i, &e)| if e > acc.1 { (i, e) } else { acc });

    // Band centres are the interior mel points
    let edges = mel_frequencies(42, 0.0, 8000.0, MelScale::Slaney);
    let spacing = edges[2] - edges[1];
    let peak_center = edges[peak_band + 1];
    assert!(
        (peak_center - 440.0).abs() < 2.0 * spacing,
        "peak band {} centred at {:.1} Hz",
        peak_band,
        peak_center
    );

    // The nominal band for 440 Hz is within one band of the peak
    let nominal = hz_to_mel(440.0, MelScale::Slaney) / hz_to_mel(8000.0, MelScale::Slaney) * 41.0 - 1.0;
    assert!((peak_band as f64 - nominal).abs() <= 1.0);

    let lo = peak_band.saturating_sub(2);
    let hi = (peak_band + 2).min(39);
    let near: f32 = band_energy[lo..=hi].iter().sum();
    assert!(
        near / total > 0.9,
        "only {:.3} of the energy near the peak band",
        near / total
    );

    // Frequency of the peak band round-trips through the scale
    let back = mel_to_hz(hz_to_mel(peak_center, MelScale::Slaney), MelScale::Slaney);
    assert!((back - peak_center).abs() < 1e-6);
}

#[test]
fn frame_count_follows_centered_framing() {
    let extractor = MelSpectrogramExtractor::new(speech_config()).unwrap();
    let mel = extractor.extract(&sine(1000.0, 5000)).unwrap();
    assert_eq!(mel.ncols(), (5000 + 400 - 400) / 160 + 1);
    assert_eq!(mel.ncols(), extractor.frame_count(5000));
}

#[test]
fn extraction_is_deterministic() {
    let extractor = MelSpectrogramExtractor::new(speech_config()).unwrap();
    let samples: Vec<f32> = sine(440.0, 8000)
        .iter()
        .zip(sine(3100.0, 8000))
        .map(|(a, b)| 0.6 * a + 0.3 * b)
        .collect();

    let first = extractor.extract(&samples).unwrap();
    let second = extractor.extract(&samples).unwrap();
    assert_eq!(first, second);

    let rebuilt = MelSpectrogramExtractor::new(speech_config()).unwrap();
    assert_eq!(rebuilt.extract(&samples).unwrap(), first);
}

#[test]
fn one_extractor_serves_many_threads() {
    let extractor = MelSpectrogramExtractor::new(MelConfig::whisper()).unwrap();
    let samples = sine(250.0, 12000);
    let expected = extractor.extract(&samples).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| extractor.extract(&samples).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn magnitude_and_power_differ_by_exponent() {
    let magnitude = MelSpectrogramExtractor::new(MelConfig {
        power: 1.0,
        ..speech_config()
    })
    .unwrap();
    let power = MelSpectrogramExtractor::new(speech_config()).unwrap();

    let samples = sine(700.0, 4000);
    let spec_mag = magnitude
        .compute_spectrogram(SpectrogramInput::Waveform(&samples))
        .unwrap();
    let spec_pow = power
        .compute_spectrogram(SpectrogramInput::Waveform(&samples))
        .unwrap();

    for (m, p) in spec_mag.data.iter().zip(spec_pow.data.iter()) {
        assert!((m * m - p).abs() <= 1e-3 * p.max(1.0));
    }
}

#[test]
fn precomputed_tables_from_json() {
    let config = speech_config();
    let computed = MelSpectrogramExtractor::new(config.clone()).unwrap();

    // Serialize the computed tables the way a bundled data file would hold them
    let tables = PrecomputedTables::new(computed.window().to_vec())
        .with_filter_bank(computed.filter_bank());
    let json = serde_json::to_string(&tables).unwrap();
    assert!(json.contains("melBasis"));
    assert!(json.contains("hanningWindow"));
    let loaded: PrecomputedTables = serde_json::from_str(&json).unwrap();

    let precomputed = MelSpectrogramExtractor::with_tables(
        MelConfig {
            use_precomputed: true,
            ..config
        },
        &loaded,
    )
    .unwrap();

    let samples = sine(1500.0, 6000);
    let a = computed.extract(&samples).unwrap();
    let b = precomputed.extract(&samples).unwrap();
    assert_eq!(a.dim(), b.dim());
    for (x, y) in a.iter().zip(b.iter()) {
        assert!((x - y).abs() <= 1e-4 * x.abs().max(1.0));
    }
}

#[test]
fn precomputed_tables_missing_band_count() {
    let computed = MelSpectrogramExtractor::new(speech_config()).unwrap();
    let tables = PrecomputedTables::new(computed.window().to_vec())
        .with_filter_bank(computed.filter_bank());

    let result = MelSpectrogramExtractor::with_tables(
        MelConfig {
            n_mels: 64,
            use_precomputed: true,
            ..speech_config()
        },
        &tables,
    );
    assert!(matches!(result, Err(MelError::TableLookup { n_mels: 64 })));
}

#[test]
fn non_finite_input_reaches_the_caller() {
    let extractor = MelSpectrogramExtractor::new(speech_config()).unwrap();
    let mut samples = sine(440.0, 2000);
    samples[900] = f32::NAN;
    let err = extractor.extract(&samples).unwrap_err();
    assert!(matches!(
        err,
        MelError::Spectrum(SpectrumError::NonFinite { .. })
    ));
}
