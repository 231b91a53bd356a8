//! Python bindings for third-octave levels and SPL

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::levels::{Calibration, Energy, ThirdOctaveLevels};

/// Third-octave levels exposed to Python
#[pyclass(name = "TOL")]
pub struct PyTol {
    tol: ThirdOctaveLevels,
}

#[pymethods]
impl PyTol {
    /// Args:
    ///     nfft: FFT size, at least one second of signal
    ///     sampling_rate: Sample rate in Hz
    ///     low_freq: Lower bound of the study range (default: 25 Hz)
    ///     high_freq: Upper bound of the study range (default: min(fs/2, 25 kHz))
    #[new]
    #[pyo3(signature = (nfft, sampling_rate, low_freq=None, high_freq=None))]
    fn new(
        nfft: usize,
        sampling_rate: f64,
        low_freq: Option<f64>,
        high_freq: Option<f64>,
    ) -> PyResult<Self> {
        Ok(Self {
            tol: ThirdOctaveLevels::new(nfft, sampling_rate, low_freq, high_freq)?,
        })
    }

    /// One level per band in dB
    #[pyo3(signature = (spectrum, v_adc=1.0, micro_sensitivity=0.0, gain=0.0))]
    fn compute<'py>(
        &self,
        py: Python<'py>,
        spectrum: PyReadonlyArray1<f64>,
        v_adc: f64,
        micro_sensitivity: f64,
        gain: f64,
    ) -> PyResult<&'py PyArray1<f64>> {
        let psd = spectrum
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let calibration = Calibration::new(v_adc, micro_sensitivity, gain)?;
        Ok(PyArray1::from_vec(
            py,
            self.tol.compute_calibrated(psd, &calibration)?,
        ))
    }

    /// Band boundaries as (lower_hz, upper_hz) pairs
    fn boundaries(&self) -> Vec<(f64, f64)> {
        self.tol
            .boundaries()
            .iter()
            .map(|b| (b.lower_hz, b.upper_hz))
            .collect()
    }

    fn band_count(&self) -> usize {
        self.tol.band_count()
    }
}

/// Broadband energy exposed to Python
#[pyclass(name = "Energy")]
pub struct PyEnergy {
    energy: Energy,
}

#[pymethods]
impl PyEnergy {
    #[new]
    fn new(nfft: usize) -> PyResult<Self> {
        Ok(Self {
            energy: Energy::new(nfft)?,
        })
    }

    /// Broadband SPL in dB from a one-sided PSD
    #[pyo3(signature = (spectrum, v_adc=1.0, micro_sensitivity=0.0, gain=0.0))]
    fn compute_spl_from_psd(
        &self,
        spectrum: PyReadonlyArray1<f64>,
        v_adc: f64,
        micro_sensitivity: f64,
        gain: f64,
    ) -> PyResult<f64> {
        let psd = spectrum
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let calibration = Calibration::new(v_adc, micro_sensitivity, gain)?;
        Ok(self.energy.compute_spl_from_psd_calibrated(psd, &calibration)?)
    }

    fn compute_raw_from_psd(&self, spectrum: PyReadonlyArray1<f64>) -> PyResult<f64> {
        let psd = spectrum
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(self.energy.compute_raw_from_psd(psd)?)
    }
}
