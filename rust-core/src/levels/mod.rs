//! Calibrated acoustic levels: third-octave bands and broadband SPL

pub mod energy;
pub mod tol;

pub use energy::Energy;
pub use tol::{BandBoundary, BandIndexRange, ThirdOctaveLevels};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_positive, Result, SpectralError};

/// Converts raw digital energy into a calibrated dB level
///
/// The default (vADC = 1, no sensitivity, no gain) is a 0 dB offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// ADC full-scale voltage
    pub v_adc: f64,

    /// Hydrophone sensitivity in dB re 1 V/µPa
    pub micro_sensitivity: f64,

    /// Preamplifier gain in dB
    pub gain: f64,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            v_adc: 1.0,
            micro_sensitivity: 0.0,
            gain: 0.0,
        }
    }
}

impl Calibration {
    pub fn new(v_adc: f64, micro_sensitivity: f64, gain: f64) -> Result<Self> {
        let calibration = Self {
            v_adc,
            micro_sensitivity,
            gain,
        };
        calibration.validate()?;
        Ok(calibration)
    }

    /// Reject a non-positive vADC or non-finite offsets
    pub fn validate(&self) -> Result<()> {
        ensure_positive("vADC", self.v_adc)?;
        if !self.micro_sensitivity.is_finite() || !self.gain.is_finite() {
            return Err(SpectralError::invalid(
                "microphone sensitivity and gain must be finite",
            ));
        }
        Ok(())
    }

    /// Offset in dB subtracted from raw levels
    ///
    /// microSensitivity + gain + 20*log10(1/vADC)
    pub fn log_normalization(&self) -> f64 {
        self.micro_sensitivity + self.gain + 20.0 * (1.0 / self.v_adc).log10()
    }

    /// Convert a raw energy into a calibrated dB level
    pub fn level_db(&self, energy: f64) -> f64 {
        10.0 * energy.log10() - self.log_normalization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_uncalibrated() {
        let calibration = Calibration::default();
        assert_eq!(calibration.log_normalization(), 0.0);
        assert_eq!(calibration.level_db(100.0), 20.0);
    }

    #[test]
    fn test_log_normalization() {
        let calibration = Calibration::new(2.0, -170.0, 12.0).unwrap();
        let expected = -170.0 + 12.0 + 20.0 * 0.5f64.log10();
        assert!((calibration.log_normalization() - expected).abs() < 1e-12);

        // A 10x energy ratio is 10 dB regardless of calibration
        let diff = calibration.level_db(10.0) - calibration.level_db(1.0);
        assert!((diff - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_calibration() {
        assert!(Calibration::new(0.0, 0.0, 0.0).is_err());
        assert!(Calibration::new(-1.0, 0.0, 0.0).is_err());
        assert!(Calibration::new(1.0, f64::NAN, 0.0).is_err());
        assert!(Calibration::new(1.0, 0.0, f64::INFINITY).is_err());
    }
}
