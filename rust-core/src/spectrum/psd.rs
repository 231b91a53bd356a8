//! One-sided power spectral density (periodogram) from a full complex spectrum

use super::frequency::spectrum_size;
use crate::error::{ensure_length, ensure_positive, Result, SpectralError};

/// Periodogram stage
///
/// The normalization factor is applied as-is: `1/(nfft*fs)` gives a density for an
/// unwindowed segment, `1/(fs*Σw²)` a Welch-style density for a windowed one.
#[derive(Debug, Clone)]
pub struct Psd {
    nfft: usize,
    normalization_factor: f64,
}

impl Psd {
    /// Create a new periodogram stage
    ///
    /// # Arguments
    /// * `nfft` - FFT size the incoming spectra were computed with
    /// * `normalization_factor` - Positive scale applied to every bin
    pub fn new(nfft: usize, normalization_factor: f64) -> Result<Self> {
        if nfft == 0 {
            return Err(SpectralError::invalid("nfft must be positive"));
        }
        ensure_positive("normalization factor", normalization_factor)?;

        Ok(Self {
            nfft,
            normalization_factor,
        })
    }

    /// Compute the one-sided PSD
    ///
    /// # Arguments
    /// * `fft` - Interleaved complex spectrum of length `2 * nfft`
    ///
    /// # Returns
    /// `nfft/2 + 1` non-negative bins
    pub fn compute(&self, fft: &[f64]) -> Result<Vec<f64>> {
        ensure_length("spectrum", fft.len(), 2 * self.nfft)?;

        // Nyquist only exists as its own bin for even sizes
        let nyquist = (self.nfft % 2 == 0).then_some(self.nfft / 2);

        Ok(fft
            .chunks_exact(2)
            .take(self.spectrum_size())
            .enumerate()
            .map(|(k, bin)| {
                let power = bin[0] * bin[0] + bin[1] * bin[1];
                let folding = if k == 0 || Some(k) == nyquist { 1.0 } else { 2.0 };
                power * folding * self.normalization_factor
            })
            .collect())
    }

    pub fn nfft(&self) -> usize {
        self.nfft
    }

    /// Number of output bins (nfft/2 + 1)
    pub fn spectrum_size(&self) -> usize {
        spectrum_size(self.nfft)
    }

    pub fn normalization_factor(&self) -> f64 {
        self.normalization_factor
    }
}
