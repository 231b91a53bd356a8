//! Python bindings for segmentation and windowing

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::signal::{HammingWindow, PartialSegmentPolicy, Segmentation, Symmetry};

/// Hamming variant exposed to Python
#[pyclass(name = "Symmetry")]
#[derive(Clone)]
pub enum PySymmetry {
    Symmetric,
    Periodic,
}

impl From<PySymmetry> for Symmetry {
    fn from(py_symmetry: PySymmetry) -> Self {
        match py_symmetry {
            PySymmetry::Symmetric => Symmetry::Symmetric,
            PySymmetry::Periodic => Symmetry::Periodic,
        }
    }
}

fn parse_policy(name: &str) -> PyResult<PartialSegmentPolicy> {
    match name {
        "drop" => Ok(PartialSegmentPolicy::Drop),
        "zero_pad" => Ok(PartialSegmentPolicy::ZeroPad),
        "keep_short" => Ok(PartialSegmentPolicy::KeepShort),
        other => Err(PyValueError::new_err(format!(
            "unknown partial segment policy '{other}' (expected drop, zero_pad or keep_short)"
        ))),
    }
}

/// Segmentation exposed to Python
#[pyclass(name = "Segmentation")]
pub struct PySegmentation {
    segmentation: Segmentation,
}

#[pymethods]
impl PySegmentation {
    /// Create a new segmentation stage
    ///
    /// Args:
    ///     segment_size: Window length in samples
    ///     offset: Stride between windows (default: segment_size)
    ///     partial: Trailing window rule, "drop", "zero_pad" or "keep_short"
    #[new]
    #[pyo3(signature = (segment_size, offset=None, partial="drop"))]
    fn new(segment_size: usize, offset: Option<usize>, partial: &str) -> PyResult<Self> {
        let policy = parse_policy(partial)?;
        Ok(Self {
            segmentation: Segmentation::new(segment_size, offset)?.with_partial_policy(policy),
        })
    }

    /// Slice a signal into windows
    ///
    /// Returns:
    ///     List of numpy arrays
    fn compute<'py>(
        &self,
        py: Python<'py>,
        signal: PyReadonlyArray1<f64>,
    ) -> PyResult<Vec<&'py PyArray1<f64>>> {
        let sig = signal
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;

        Ok(self
            .segmentation
            .compute(sig)
            .into_iter()
            .map(|segment| PyArray1::from_vec(py, segment))
            .collect())
    }

    fn segment_count(&self, signal_len: usize) -> usize {
        self.segmentation.segment_count(signal_len)
    }
}

/// Hamming window exposed to Python
#[pyclass(name = "HammingWindow")]
pub struct PyHammingWindow {
    window: HammingWindow,
}

#[pymethods]
impl PyHammingWindow {
    #[new]
    #[pyo3(signature = (length, symmetry=PySymmetry::Periodic))]
    fn new(length: usize, symmetry: PySymmetry) -> PyResult<Self> {
        Ok(Self {
            window: HammingWindow::new(length, symmetry.into())?,
        })
    }

    /// Multiply a segment by the window
    fn compute<'py>(
        &self,
        py: Python<'py>,
        segment: PyReadonlyArray1<f64>,
    ) -> PyResult<&'py PyArray1<f64>> {
        let seg = segment
            .as_slice()
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyArray1::from_vec(py, self.window.compute(seg)?))
    }

    fn coefficients<'py>(&self, py: Python<'py>) -> &'py PyArray1<f64> {
        PyArray1::from_slice(py, self.window.coefficients())
    }

    /// Sum of squared coefficients
    fn normalization_factor(&self) -> f64 {
        self.window.normalization_factor()
    }
}
