//! Error type shared by every transform stage

use thiserror::Error;

/// Precondition violations raised by the transform chain
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectralError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl SpectralError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        SpectralError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SpectralError>;

/// Fail unless `actual == expected`
pub(crate) fn ensure_length(what: &str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(SpectralError::invalid(format!(
            "{what} has length {actual}, expected {expected}"
        )));
    }
    Ok(())
}

/// Fail unless `value` is finite and strictly positive
pub(crate) fn ensure_positive(what: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SpectralError::invalid(format!(
            "{what} must be a positive finite number (found: {value})"
        )));
    }
    Ok(())
}
