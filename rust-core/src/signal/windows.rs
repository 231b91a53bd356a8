//! Hamming window for spectral analysis
//!
//! Tapers a segment before the FFT to reduce spectral leakage

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::error::{ensure_length, Result, SpectralError};

/// Hamming coefficient formula variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symmetry {
    /// w[n] = 0.54 - 0.46*cos(2πn/(M-1))
    /// Filter-design convention, first and last coefficients are equal
    Symmetric,

    /// w[n] = 0.54 - 0.46*cos(2πn/M)
    /// Spectral-analysis convention, one period of an M+1 symmetric window
    #[default]
    Periodic,
}

/// Precomputed Hamming window
#[derive(Debug, Clone)]
pub struct HammingWindow {
    symmetry: Symmetry,

    /// Window coefficients w[n] for n = 0..M-1
    coefficients: Vec<f64>,

    /// Σ w[n]², cached for PSD normalization
    normalization_factor: f64,
}

impl HammingWindow {
    /// Create a new Hamming window
    ///
    /// # Arguments
    /// * `length` - Number of samples (M)
    /// * `symmetry` - Coefficient formula variant
    pub fn new(length: usize, symmetry: Symmetry) -> Result<Self> {
        if length == 0 {
            return Err(SpectralError::invalid("window length must be positive"));
        }

        let coefficients = generate_hamming(length, symmetry);
        let normalization_factor = coefficients.iter().map(|&w| w * w).sum();

        Ok(Self {
            symmetry,
            coefficients,
            normalization_factor,
        })
    }

    /// Multiply a segment element-wise by the window
    ///
    /// # Arguments
    /// * `segment` - Input samples, exactly `length` of them
    ///
    /// # Returns
    /// Windowed segment
    pub fn compute(&self, segment: &[f64]) -> Result<Vec<f64>> {
        ensure_length("segment", segment.len(), self.coefficients.len())?;

        Ok(segment
            .iter()
            .zip(self.coefficients.iter())
            .map(|(&s, &w)| s * w)
            .collect())
    }

    /// Window coefficients
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Window length
    pub fn length(&self) -> usize {
        self.coefficients.len()
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Sum of squared coefficients (window power, used for PSD normalization)
    pub fn normalization_factor(&self) -> f64 {
        self.normalization_factor
    }

    /// Sum of coefficients (amplitude gain of the window)
    pub fn coherent_gain(&self) -> f64 {
        self.coefficients.iter().sum()
    }
}

fn generate_hamming(length: usize, symmetry: Symmetry) -> Vec<f64> {
    let denominator = match symmetry {
        Symmetry::Symmetric => length - 1,
        Symmetry::Periodic => length,
    };

    // Degenerate symmetric window of one sample
    if denominator == 0 {
        return vec![1.0];
    }

    let m = denominator as f64;
    (0..length)
        .map(|n| {
            let angle = 2.0 * PI * n as f64 / m;
            0.54 - 0.46 * angle.cos()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_window() {
        let length = 161;
        let window = HammingWindow::new(length, Symmetry::Symmetric).unwrap();
        let w = window.coefficients();

        assert_eq!(w.len(), length);

        // Endpoints equal and 0.08
        assert!((w[0] - w[length - 1]).abs() < 1e-12);
        assert!((w[0] - 0.08).abs() < 1e-12);

        // Center at 1.0
        assert!((w[length / 2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_periodic_window() {
        let window = HammingWindow::new(8, Symmetry::Periodic).unwrap();
        let w = window.coefficients();

        // Periodic window drops the closing endpoint
        assert!((w[0] - 0.08).abs() < 1e-12);
        assert!((w[4] - 1.0).abs() < 1e-12);
        assert!((w[1] - w[7]).abs() < 1e-12);
        assert!(w[7] > 0.08);

        // Same as the first 8 coefficients of a symmetric window of 9
        let symmetric = HammingWindow::new(9, Symmetry::Symmetric).unwrap();
        for (p, s) in w.iter().zip(symmetric.coefficients()) {
            assert!((p - s).abs() < 1e-12);
        }
    }

    #[test]
    fn test_single_sample_window() {
        let window = HammingWindow::new(1, Symmetry::Symmetric).unwrap();
        assert_eq!(window.coefficients(), &[1.0]);

        let periodic = HammingWindow::new(1, Symmetry::Periodic).unwrap();
        assert!((periodic.coefficients()[0] - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_normalization_factor() {
        let window = HammingWindow::new(64, Symmetry::Periodic).unwrap();
        let expected: f64 = window.coefficients().iter().map(|w| w * w).sum();
        assert_eq!(window.normalization_factor(), expected);

        // Periodic Hamming power is 0.3974 * M
        assert!((window.normalization_factor() / 64.0 - 0.3974).abs() < 1e-12);
    }

    #[test]
    fn test_compute() {
        let window = HammingWindow::new(100, Symmetry::Symmetric).unwrap();
        let windowed = window.compute(&vec![2.0; 100]).unwrap();

        assert_eq!(windowed.len(), 100);
        for (x, w) in windowed.iter().zip(window.coefficients()) {
            assert_eq!(*x, 2.0 * w);
        }
    }

    #[test]
    fn test_compute_wrong_length() {
        let window = HammingWindow::new(16, Symmetry::Symmetric).unwrap();
        assert!(matches!(
            window.compute(&[1.0; 15]),
            Err(SpectralError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_default_symmetry_is_periodic() {
        assert_eq!(Symmetry::default(), Symmetry::Periodic);
        assert_eq!(
            crate::config::AnalysisConfig::default().window_symmetry,
            Symmetry::default()
        );
    }

    #[test]
    fn test_zero_length_rejected() {
        assert!(HammingWindow::new(0, Symmetry::Periodic).is_err());
    }
}
