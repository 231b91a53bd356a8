//! Spectral analysis: FFT, periodogram and Welch averaging

pub mod analysis;
pub mod fft;
pub mod frequency;
pub mod psd;
pub mod welch;

pub use analysis::{RecordAnalyzer, RecordFeatures};
pub use fft::FftEngine;
pub use frequency::FrequencyConvertible;
pub use psd::Psd;
pub use welch::WelchSpectralDensity;
