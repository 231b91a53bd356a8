//! Broadband energy and sound pressure level

use crate::error::{ensure_length, Result, SpectralError};
use crate::levels::Calibration;
use crate::spectrum::frequency::spectrum_size;

/// Integrates a whole spectrum (or signal) into one level
#[derive(Debug, Clone)]
pub struct Energy {
    nfft: usize,
}

impl Energy {
    pub fn new(nfft: usize) -> Result<Self> {
        if nfft == 0 {
            return Err(SpectralError::invalid("nfft must be positive"));
        }
        Ok(Self { nfft })
    }

    /// Sum of all bins of a one-sided power spectrum (nfft/2 + 1 bins)
    pub fn compute_raw_from_psd(&self, spectrum: &[f64]) -> Result<f64> {
        ensure_length("spectrum", spectrum.len(), self.spectrum_size())?;
        Ok(spectrum.iter().sum())
    }

    /// Uncalibrated SPL: 10*log10(Σ spectrum)
    pub fn compute_spl_from_psd(&self, spectrum: &[f64]) -> Result<f64> {
        self.compute_spl_from_psd_calibrated(spectrum, &Calibration::default())
    }

    /// SPL with the same calibration offset convention as the TOL stage
    pub fn compute_spl_from_psd_calibrated(
        &self,
        spectrum: &[f64],
        calibration: &Calibration,
    ) -> Result<f64> {
        let raw = self.compute_raw_from_psd(spectrum)?;
        Ok(calibration.level_db(raw))
    }

    /// Mean square of a raw `nfft`-sample signal
    ///
    /// Equals [`compute_raw_from_psd`](Self::compute_raw_from_psd) of the same
    /// signal's periodogram normalized by 1/nfft².
    pub fn compute_raw_from_signal(&self, signal: &[f64]) -> Result<f64> {
        ensure_length("signal", signal.len(), self.nfft)?;
        let sum_sq: f64 = signal.iter().map(|&x| x * x).sum();
        Ok(sum_sq / self.nfft as f64)
    }

    /// Uncalibrated SPL of a raw signal: 10*log10(mean square)
    pub fn compute_spl_from_signal(&self, signal: &[f64]) -> Result<f64> {
        self.compute_spl_from_signal_calibrated(signal, &Calibration::default())
    }

    /// Signal SPL with the same calibration offset as the PSD path
    pub fn compute_spl_from_signal_calibrated(
        &self,
        signal: &[f64],
        calibration: &Calibration,
    ) -> Result<f64> {
        let raw = self.compute_raw_from_signal(signal)?;
        Ok(calibration.level_db(raw))
    }

    pub fn nfft(&self) -> usize {
        self.nfft
    }

    pub fn spectrum_size(&self) -> usize {
        spectrum_size(self.nfft)
    }
}
