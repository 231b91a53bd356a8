//! Acoustic Features - Spectral and Level Metrics Core
//!
//! Turns fixed-length acoustic segments into FFTs, power spectral densities,
//! Welch-averaged spectra, third-octave levels and broadband SPL.
//! Every stage is configured once and is then a pure function of its input.

// Suppress PyO3 non-local impl warnings (harmless macro-generated code)
#![allow(non_local_definitions)]

pub mod config;
pub mod error;
pub mod levels;
pub mod signal;
pub mod spectrum;

#[cfg(feature = "python")]
pub mod python_bindings;

pub use config::{AnalysisConfig, ConfigError};
pub use error::{Result, SpectralError};
pub use levels::{Calibration, Energy, ThirdOctaveLevels};
pub use signal::{HammingWindow, PartialSegmentPolicy, Segmentation, Symmetry};
pub use spectrum::{
    FftEngine, FrequencyConvertible, Psd, RecordAnalyzer, RecordFeatures, WelchSpectralDensity,
};
