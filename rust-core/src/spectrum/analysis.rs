//! Record analyzer
//!
//! Chains segmentation, Hamming windowing, FFT, periodogram and Welch averaging
//! over one record, then integrates the averaged spectrum into SPL and TOL.

use super::fft::FftEngine;
use super::frequency::FrequencyConvertible;
use super::psd::Psd;
use super::welch::WelchSpectralDensity;
use crate::config::AnalysisConfig;
use crate::error::{Result, SpectralError};
use crate::levels::{Energy, ThirdOctaveLevels};
use crate::signal::{HammingWindow, PartialSegmentPolicy, Segmentation};

/// Features of one record
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFeatures {
    /// Welch-averaged one-sided PSD (nfft/2 + 1 bins)
    pub welch: Vec<f64>,

    /// Third-octave levels, when enabled
    pub tol: Option<Vec<f64>>,

    /// Broadband sound pressure level in dB
    pub spl: f64,

    /// Number of segments averaged
    pub segments: usize,
}

/// Configured once, then shared read-only across records and threads
#[derive(Debug, Clone)]
pub struct RecordAnalyzer {
    config: AnalysisConfig,
    segmentation: Segmentation,
    window: HammingWindow,
    fft: FftEngine,
    psd: Psd,
    welch: WelchSpectralDensity,
    tol: Option<ThirdOctaveLevels>,
    energy: Energy,
}

impl RecordAnalyzer {
    /// Build every stage from `config`
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        // Zero padding happens in `periodogram`, where the real sample count is still known
        let slicing_policy = match config.partial_segments {
            PartialSegmentPolicy::ZeroPad => PartialSegmentPolicy::KeepShort,
            policy => policy,
        };
        let segmentation = Segmentation::new(config.segment_size, config.segment_offset)?
            .with_partial_policy(slicing_policy);
        let window = HammingWindow::new(config.segment_size, config.window_symmetry)?;
        let fft = FftEngine::new(config.nfft)?;
        let welch = WelchSpectralDensity::new(config.nfft, config.sampling_rate)?;
        let psd = Psd::new(
            config.nfft,
            welch.normalization_factor(window.normalization_factor()),
        )?;
        let energy = Energy::new(config.nfft)?;

        let tol = if config.compute_tol {
            Some(ThirdOctaveLevels::new(
                config.nfft,
                config.sampling_rate,
                config.low_freq,
                config.high_freq,
            )?)
        } else {
            None
        };

        tracing::debug!(
            nfft = config.nfft,
            segment_size = config.segment_size,
            offset = segmentation.offset(),
            tol_bands = tol.as_ref().map_or(0, ThirdOctaveLevels::band_count),
            "Configured record analyzer"
        );

        Ok(Self {
            config,
            segmentation,
            window,
            fft,
            psd,
            welch,
            tol,
            energy,
        })
    }

    /// Analyze one record
    ///
    /// # Arguments
    /// * `record` - Samples of one record, at least one segment long
    ///   (or any length with a padding partial-segment policy)
    pub fn analyze(&self, record: &[f64]) -> Result<RecordFeatures> {
        let segments = self.segmentation.compute(record);
        if segments.is_empty() {
            return Err(SpectralError::invalid(format!(
                "record of {} samples yields no segment of {}",
                record.len(),
                self.config.segment_size
            )));
        }

        let periodograms = segments
            .iter()
            .map(|segment| self.periodogram(segment))
            .collect::<Result<Vec<_>>>()?;

        let welch = self.welch.compute(&periodograms)?;
        let spl = self
            .energy
            .compute_spl_from_psd_calibrated(&welch, &self.config.calibration)?;
        let tol = self
            .tol
            .as_ref()
            .map(|tol| tol.compute_calibrated(&welch, &self.config.calibration))
            .transpose()?;

        Ok(RecordFeatures {
            welch,
            tol,
            spl,
            segments: segments.len(),
        })
    }

    /// Windowed, zero-padded periodogram of one segment
    ///
    /// A segment shorter than `segment_size` is normalized by the power of the
    /// window coefficients that actually touch its samples: the tail of a full
    /// window under `ZeroPad`, a window of its own length otherwise.
    pub fn periodogram(&self, segment: &[f64]) -> Result<Vec<f64>> {
        let full_len = self.window.length();
        if segment.len() == full_len {
            let mut windowed = self.window.compute(segment)?;
            windowed.resize(self.config.nfft, 0.0);
            return self.psd.compute(&self.fft.compute(&windowed)?);
        }

        if segment.is_empty() || segment.len() > full_len {
            return Err(SpectralError::invalid(format!(
                "segment has length {}, expected 1 to {full_len}",
                segment.len()
            )));
        }

        let (mut windowed, window_power) = match self.config.partial_segments {
            PartialSegmentPolicy::ZeroPad => {
                let mut padded = segment.to_vec();
                padded.resize(full_len, 0.0);
                let power: f64 = self.window.coefficients()[..segment.len()]
                    .iter()
                    .map(|&w| w * w)
                    .sum();
                (self.window.compute(&padded)?, power)
            }
            PartialSegmentPolicy::Drop | PartialSegmentPolicy::KeepShort => {
                let short = HammingWindow::new(segment.len(), self.config.window_symmetry)?;
                (short.compute(segment)?, short.normalization_factor())
            }
        };
        windowed.resize(self.config.nfft, 0.0);

        let psd = Psd::new(
            self.config.nfft,
            self.welch.normalization_factor(window_power),
        )?;
        psd.compute(&self.fft.compute(&windowed)?)
    }

    /// Frequency axis in Hz of the Welch output
    pub fn frequency_bins_hz(&self) -> Vec<f64> {
        self.welch.frequency_vector()
    }

    /// TOL stage, if enabled
    pub fn tol(&self) -> Option<&ThirdOctaveLevels> {
        self.tol.as_ref()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}
