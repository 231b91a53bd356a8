//! Python bindings for FFT, periodogram and Welch averaging

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::spectrum::{FftEngine, FrequencyConvertible, Psd, WelchSpectralDensity};

/// FFT engine exposed to Python
#[pyclass(name = "FFT")]
pub struct PyFft {
    fft: FftEngine,
}

#[pymethods]
impl PyFft {
    #[new]
    fn new(nfft: usize) -> PyResult<Self> {
        Ok(Self {
            fft: FftEngine::new(nfft)?,
        })
    }

    /// Full complex spectrum, real and imaginary parts interleaved
    ///
    /// Args:
    ///     segment: Exactly nfft samples
    fn compute<'py>(
        &self,
        py: Python<'py>,
        segment: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let seg = segment
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyArray1::from_vec(py, self.fft.compute(seg)?))
    }

    fn nfft(&self) -> usize {
        self.fft.nfft()
    }
}

/// Periodogram exposed to Python
#[pyclass(name = "PSD")]
pub struct PyPsd {
    psd: Psd,
}

#[pymethods]
impl PyPsd {
    /// Args:
    ///     nfft: FFT size
    ///     normalization_factor: Scale applied to every bin, e.g. 1/(nfft*fs)
    #[new]
    fn new(nfft: usize, normalization_factor: f64) -> PyResult<Self> {
        Ok(Self {
            psd: Psd::new(nfft, normalization_factor)?,
        })
    }

    fn compute<'py>(
        &self,
        py: Python<'py>,
        fft: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let spectrum = fft
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyArray1::from_vec(py, self.psd.compute(spectrum)?))
    }
}

/// Welch averaging exposed to Python
#[pyclass(name = "WelchSpectralDensity")]
pub struct PyWelch {
    welch: WelchSpectralDensity,
}

#[pymethods]
impl PyWelch {
    #[new]
    fn new(nfft: usize, sampling_rate: f64) -> PyResult<Self> {
        Ok(Self {
            welch: WelchSpectralDensity::new(nfft, sampling_rate)?,
        })
    }

    /// Element-wise mean of a list of periodograms
    fn compute<'py>(
        &self,
        py: Python<'py>,
        periodograms: Vec<PyReadonlyArray1<f64>>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let slices = periodograms
            .iter()
            .map(|p| p.as_slice().map_err(|e| PyValueError::new_err(e.to_string())))
            .collect::<PyResult<Vec<&[f64]>>>()?;
        Ok(PyArray1::from_vec(py, self.welch.compute(&slices)?))
    }

    /// 1 / (sampling_rate * window_power)
    fn normalization_factor(&self, window_power: f64) -> f64 {
        self.welch.normalization_factor(window_power)
    }

    /// Frequency axis in Hz
    fn frequency_vector<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_vec(py, self.welch.frequency_vector())
    }
}
