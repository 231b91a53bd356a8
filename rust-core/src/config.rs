//! Analysis configuration
//!
//! One immutable value describes a whole record analysis. It can be built in code
//! or read from TOML; every field has a default:
//!
//! ```toml
//! sampling_rate = 32768.0
//! segment_size = 32768
//! segment_offset = 16384
//! nfft = 32768
//! window_symmetry = "periodic"
//! partial_segments = "drop"
//! low_freq = 25.0
//! compute_tol = true
//!
//! [calibration]
//! v_adc = 1.0
//! micro_sensitivity = -170.0
//! gain = 0.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ensure_positive, SpectralError};
use crate::levels::Calibration;
use crate::signal::{PartialSegmentPolicy, Symmetry};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Invalid(#[from] SpectralError),
}

/// Record analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sample rate in Hz
    pub sampling_rate: f64,

    /// Segment length in samples
    pub segment_size: usize,

    /// Stride between segments (default: segment_size, no overlap)
    pub segment_offset: Option<usize>,

    /// FFT size, segments shorter than this are zero-padded
    pub nfft: usize,

    /// Hamming window variant
    pub window_symmetry: Symmetry,

    /// What to do with a trailing segment shorter than segment_size
    pub partial_segments: PartialSegmentPolicy,

    /// Lower bound of the TOL study range in Hz
    pub low_freq: Option<f64>,

    /// Upper bound of the TOL study range in Hz
    pub high_freq: Option<f64>,

    /// Compute third-octave levels (requires nfft >= sampling_rate)
    pub compute_tol: bool,

    pub calibration: Calibration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sampling_rate: 32768.0,
            segment_size: 32768,
            segment_offset: None,
            nfft: 32768,
            window_symmetry: Symmetry::default(),
            partial_segments: PartialSegmentPolicy::Drop,
            low_freq: None,
            high_freq: None,
            compute_tol: true,
            calibration: Calibration::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&contents)?;
        tracing::info!(
            path = %path.display(),
            nfft = config.nfft,
            sampling_rate = config.sampling_rate,
            "Loaded analysis config"
        );
        Ok(config)
    }

    /// Check sizes and rates; TOL bounds are checked when the stage is built
    pub fn validate(&self) -> Result<(), SpectralError> {
        ensure_positive("sampling rate", self.sampling_rate)?;

        if self.segment_size == 0 {
            return Err(SpectralError::invalid("segment size must be positive"));
        }
        if self.segment_offset == Some(0) {
            return Err(SpectralError::invalid("segment offset must be positive"));
        }
        if self.nfft < self.segment_size {
            return Err(SpectralError::invalid(format!(
                "nfft ({}) smaller than segment size ({})",
                self.nfft, self.segment_size
            )));
        }

        self.calibration.validate()
    }
}
