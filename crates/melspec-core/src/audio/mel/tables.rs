//! Precomputed filter bank and window tables.
//!
//! Tables are supplied by the caller (typically deserialized from a bundled
//! data file using the `melBasis` / `hanningWindow` keys) and handed to the
//! extractor at construction. They are used verbatim.

use std::collections::HashMap;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::filter_bank::FilterBank;
use crate::error::{MelError, MelResult};

/// Filter banks keyed by band count, plus one analysis window.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrecomputedTables {
    /// `n_mels -> [n_mels][n_bins]` rows.
    #[serde(rename = "melBasis", default)]
    mel_basis: HashMap<usize, Vec<Vec<f32>>>,

    #[serde(rename = "hanningWindow", default)]
    window: Vec<f32>,
}

impl PrecomputedTables {
    pub fn new(window: Vec<f32>) -> Self {
        Self {
            mel_basis: HashMap::new(),
            window,
        }
    }

    /// Add (or replace) the filter bank for its band count.
    pub fn with_filter_bank(mut self, bank: &FilterBank) -> Self {
        self.insert_filter_bank(bank);
        self
    }

    pub fn insert_filter_bank(&mut self, bank: &FilterBank) {
        let rows = bank
            .weights()
            .outer_iter()
            .map(|row| row.to_vec())
            .collect();
        self.mel_basis.insert(bank.n_mels(), rows);
    }

    /// Band counts with a stored filter bank, ascending.
    pub fn available_n_mels(&self) -> Vec<usize> {
        let mut keys: Vec<usize> = self.mel_basis.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Look up the filter bank for `n_mels`, checking it is `[n_mels, n_bins]`.
    pub fn filter_bank(&self, n_mels: usize, n_bins: usize) -> MelResult<FilterBank> {
        let rows = self
            .mel_basis
            .get(&n_mels)
            .ok_or(MelError::TableLookup { n_mels })?;

        if rows.len() != n_mels {
            return Err(MelError::Shape(format!(
                "precomputed filter bank for n_mels = {} has {} rows",
                n_mels,
                rows.len()
            )));
        }
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_bins) {
            return Err(MelError::Shape(format!(
                "precomputed filter bank row {} has {} bins, expected {}",
                i,
                row.len(),
                n_bins
            )));
        }

        let data: Vec<f32> = rows.iter().flatten().copied().collect();
        let weights = Array2::from_shape_vec((n_mels, n_bins), data)
            .map_err(|e| MelError::Shape(format!("invalid precomputed filter bank: {}", e)))?;
        Ok(FilterBank::from_weights(weights))
    }

    /// The stored window, checked to have `n_fft` samples.
    pub fn window(&self, n_fft: usize) -> MelResult<Vec<f32>> {
        if self.window.len() != n_fft {
            return Err(MelError::Shape(format!(
                "precomputed window has {} samples, expected n_fft = {}",
                self.window.len(),
                n_fft
            )));
        }
        Ok(self.window.clone())
    }
}
