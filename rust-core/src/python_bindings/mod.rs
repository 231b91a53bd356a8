//! PyO3 bindings for Python integration
//!
//! Built with the `python` feature. Precondition violations surface as `ValueError`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::SpectralError;

mod level_bindings;
mod signal_bindings;
mod spectrum_bindings;

impl From<SpectralError> for PyErr {
    fn from(err: SpectralError) -> Self {
        PyValueError::new_err(err.to_string())
    }
}

/// Python module definition
#[pymodule]
fn acoustic_features(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<signal_bindings::PySymmetry>()?;
    m.add_class::<signal_bindings::PySegmentation>()?;
    m.add_class::<signal_bindings::PyHammingWindow>()?;
    m.add_class::<spectrum_bindings::PyFft>()?;
    m.add_class::<spectrum_bindings::PyPsd>()?;
    m.add_class::<spectrum_bindings::PyWelch>()?;
    m.add_class::<level_bindings::PyTol>()?;
    m.add_class::<level_bindings::PyEnergy>()?;

    Ok(())
}
