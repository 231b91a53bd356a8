//! Welch spectral density: mean of the periodograms of one record

use ndarray::{Array1, ArrayView1};

use super::frequency::FrequencyConvertible;
use crate::error::{ensure_length, ensure_positive, Result, SpectralError};

/// Averages equal-length one-sided periodograms
#[derive(Debug, Clone)]
pub struct WelchSpectralDensity {
    nfft: usize,
    sampling_rate: f64,
}

impl WelchSpectralDensity {
    /// Create a new Welch stage
    ///
    /// # Arguments
    /// * `nfft` - FFT size of the periodograms being averaged
    /// * `sampling_rate` - Sample rate in Hz
    pub fn new(nfft: usize, sampling_rate: f64) -> Result<Self> {
        if nfft == 0 {
            return Err(SpectralError::invalid("nfft must be positive"));
        }
        ensure_positive("sampling rate", sampling_rate)?;

        tracing::debug!(nfft, sampling_rate, "Configured Welch spectral density");

        Ok(Self {
            nfft,
            sampling_rate,
        })
    }

    /// PSD scale for a window of the given power (Σw²): 1 / (fs * Σw²)
    ///
    /// Each periodogram fed to [`compute`](Self::compute) is expected to carry it already.
    pub fn normalization_factor(&self, window_power: f64) -> f64 {
        1.0 / (self.sampling_rate * window_power)
    }

    /// Element-wise arithmetic mean of `periodograms`
    ///
    /// # Arguments
    /// * `periodograms` - One or more spectra of `nfft/2 + 1` bins each
    pub fn compute<P: AsRef<[f64]>>(&self, periodograms: &[P]) -> Result<Vec<f64>> {
        if periodograms.is_empty() {
            return Err(SpectralError::invalid(
                "Welch average needs at least one periodogram",
            ));
        }

        let mut sum = Array1::<f64>::zeros(self.spectrum_size());
        for periodogram in periodograms {
            let periodogram = periodogram.as_ref();
            ensure_length("periodogram", periodogram.len(), self.spectrum_size())?;
            sum += &ArrayView1::from(periodogram);
        }

        sum /= periodograms.len() as f64;
        Ok(sum.to_vec())
    }
}

impl FrequencyConvertible for WelchSpectralDensity {
    fn nfft(&self) -> usize {
        self.nfft
    }

    fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }
}
