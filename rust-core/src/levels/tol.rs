//! Third-octave levels (TOL)
//!
//! Integrates a one-sided power spectrum over the ANSI base-10 third-octave bands.
//! Band boundaries and their bin ranges are derived once at construction.
//!
//! Retention rule: a band is kept when its upper edge reaches the requested low
//! frequency, its lower edge does not exceed the requested high frequency, and its
//! upper edge stays strictly below the absolute upper limit (Nyquist or 25 kHz).
//! Kept bands are never clipped to the requested range.

use crate::error::{ensure_length, ensure_positive, Result, SpectralError};
use crate::levels::Calibration;
use crate::spectrum::frequency::FrequencyConvertible;

/// Lowest supported band center in Hz
pub const LOWER_LIMIT_HZ: f64 = 25.0;

/// Highest supported band edge in Hz
pub const UPPER_LIMIT_HZ: f64 = 25_000.0;

/// Band indices i with center 10^(0.1*i): 25 Hz up to 25 kHz
const BAND_INDICES: std::ops::RangeInclusive<i32> = 14..=44;

/// Frequency edges of one third-octave band, lower < upper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandBoundary {
    pub lower_hz: f64,
    pub upper_hz: f64,
}

impl BandBoundary {
    /// Edges of the band centered on `center_hz`: center / 10^0.05, center * 10^0.05
    pub fn from_center(center_hz: f64) -> Self {
        let scale = 10f64.powf(0.05);
        Self {
            lower_hz: center_hz / scale,
            upper_hz: center_hz * scale,
        }
    }

    /// Geometric center in Hz
    pub fn center_hz(&self) -> f64 {
        (self.lower_hz * self.upper_hz).sqrt()
    }
}

/// Half-open spectrum-bin range [lower, upper) of one band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandIndexRange {
    pub lower: usize,
    pub upper: usize,
}

/// Third-octave level stage
#[derive(Debug, Clone)]
pub struct ThirdOctaveLevels {
    nfft: usize,
    sampling_rate: f64,
    low_freq: Option<f64>,
    high_freq: Option<f64>,
    upper_limit: f64,
    boundaries: Vec<BandBoundary>,
    bin_ranges: Vec<BandIndexRange>,
}

impl ThirdOctaveLevels {
    /// Create a new TOL stage
    ///
    /// # Arguments
    /// * `nfft` - FFT size, at least one second of signal (nfft >= sampling_rate)
    /// * `sampling_rate` - Sample rate in Hz
    /// * `low_freq` - Lower bound of the study range (default: 25 Hz)
    /// * `high_freq` - Upper bound of the study range (default: min(fs/2, 25 kHz))
    pub fn new(
        nfft: usize,
        sampling_rate: f64,
        low_freq: Option<f64>,
        high_freq: Option<f64>,
    ) -> Result<Self> {
        ensure_positive("sampling rate", sampling_rate)?;
        if (nfft as f64) < sampling_rate {
            return Err(SpectralError::invalid(format!(
                "nfft ({nfft}) shorter than one second at {sampling_rate} Hz"
            )));
        }

        let upper_limit = (sampling_rate / 2.0).min(UPPER_LIMIT_HZ);

        if let Some(low) = low_freq {
            let ceiling = high_freq.unwrap_or(upper_limit);
            if low.is_nan() || low < LOWER_LIMIT_HZ || low > ceiling {
                return Err(SpectralError::invalid(format!(
                    "low frequency {low} Hz outside [{LOWER_LIMIT_HZ}, {ceiling}]"
                )));
            }
        }

        if let Some(high) = high_freq {
            let floor = low_freq.unwrap_or(LOWER_LIMIT_HZ);
            if high.is_nan() || high > upper_limit || high < floor {
                return Err(SpectralError::invalid(format!(
                    "high frequency {high} Hz outside [{floor}, {upper_limit}]"
                )));
            }
        }

        let study_low = low_freq.unwrap_or(LOWER_LIMIT_HZ);
        let study_high = high_freq.unwrap_or(upper_limit);

        let boundaries: Vec<BandBoundary> = BAND_INDICES
            .map(|i| BandBoundary::from_center(10f64.powf(0.1 * i as f64)))
            .filter(|band| {
                band.upper_hz >= study_low
                    && band.lower_hz <= study_high
                    && band.upper_hz < upper_limit
            })
            .collect();

        let mut tol = Self {
            nfft,
            sampling_rate,
            low_freq,
            high_freq,
            upper_limit,
            boundaries,
            bin_ranges: Vec::new(),
        };

        tol.bin_ranges = tol
            .boundaries
            .iter()
            .map(|band| BandIndexRange {
                lower: tol.frequency_to_spectrum_index(band.lower_hz),
                upper: tol.frequency_to_spectrum_index(band.upper_hz),
            })
            .collect();

        if tol.boundaries.is_empty() {
            tracing::warn!(
                nfft,
                sampling_rate,
                study_low,
                study_high,
                "No third-octave band fits the study range"
            );
        } else {
            tracing::debug!(
                nfft,
                sampling_rate,
                bands = tol.boundaries.len(),
                "Derived third-octave band boundaries"
            );
        }

        Ok(tol)
    }

    /// Levels with the uncalibrated (0 dB offset) convention
    pub fn compute(&self, spectrum: &[f64]) -> Result<Vec<f64>> {
        self.compute_calibrated(spectrum, &Calibration::default())
    }

    /// One calibrated level per retained band, ascending frequency
    ///
    /// # Arguments
    /// * `spectrum` - One-sided power spectrum of `nfft/2 + 1` bins
    /// * `calibration` - Calibration triple whose offset is subtracted
    pub fn compute_calibrated(
        &self,
        spectrum: &[f64],
        calibration: &Calibration,
    ) -> Result<Vec<f64>> {
        ensure_length("spectrum", spectrum.len(), self.spectrum_size())?;

        Ok(self
            .bin_ranges
            .iter()
            .map(|range| {
                let energy: f64 = spectrum[range.lower..range.upper].iter().sum();
                calibration.level_db(energy)
            })
            .collect())
    }

    /// Retained band boundaries, ascending
    pub fn boundaries(&self) -> &[BandBoundary] {
        &self.boundaries
    }

    /// Bin ranges matching [`boundaries`](Self::boundaries)
    pub fn bin_ranges(&self) -> &[BandIndexRange] {
        &self.bin_ranges
    }

    /// Nominal center frequencies of the retained bands
    pub fn band_centers(&self) -> Vec<f64> {
        self.boundaries.iter().map(BandBoundary::center_hz).collect()
    }

    /// Number of levels `compute` returns
    pub fn band_count(&self) -> usize {
        self.boundaries.len()
    }

    pub fn low_freq(&self) -> Option<f64> {
        self.low_freq
    }

    pub fn high_freq(&self) -> Option<f64> {
        self.high_freq
    }

    /// Absolute upper limit of the study range: min(fs/2, 25 kHz)
    pub fn upper_limit(&self) -> f64 {
        self.upper_limit
    }
}

impl FrequencyConvertible for ThirdOctaveLevels {
    fn nfft(&self) -> usize {
        self.nfft
    }

    fn sampling_rate(&self) -> f64 {
        self.sampling_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PSD: [f64; 65] = [
        25.757359, 1.487925, 11.363658, 9.316824, 29.590613, 27.22963, 35.741093, 3.934084,
        17.165912, 1.67699, 9.1362, 20.461534, 1.548171, 8.354087, 26.170435, 22.025188,
        9.207405, 23.775995, 32.472503, 0.756701, 32.32986, 28.076506, 13.939895, 6.64144,
        38.309916, 13.795485, 4.163461, 4.320297, 33.976027, 24.347178, 32.381567, 29.324406,
        21.68101, 38.938073, 15.452108, 22.305605, 33.261484, 24.93153, 34.537423, 23.30541,
        28.330588, 2.310063, 9.501982, 11.930825, 3.651783, 9.69524, 4.489556, 11.479957,
        25.609536, 14.910871, 15.122148, 8.775528, 11.045624, 37.497856, 26.097398, 24.560675,
        7.259977, 29.300509, 6.954399, 15.48849, 39.586172, 25.779991, 22.499515, 27.542263,
        33.792651,
    ];

    const EXPECTED_BOUNDARIES: [(f64, f64); 4] = [
        (22.387211385683404, 28.183829312644544),
        (28.18382931264454, 35.48133892335754),
        (35.481338923357555, 44.66835921509632),
        (44.66835921509634, 56.23413251903493),
    ];

    const EXPECTED_LEVELS: [f64; 4] = [
        19.093981890719622,
        22.924784108759077,
        22.879510053135,
        22.77114797531013,
    ];

    fn rmse(actual: &[f64], expected: &[f64]) -> f64 {
        assert_eq!(actual.len(), expected.len());
        let sum: f64 = actual
            .iter()
            .zip(expected)
            .map(|(a, e)| (a - e) * (a - e))
            .sum();
        (sum / actual.len() as f64).sqrt()
    }

    #[test]
    fn test_unrestricted_bands() {
        let tol = ThirdOctaveLevels::new(128, 128.0, None, None).unwrap();

        assert_eq!(tol.band_count(), 4);
        for (band, &(lower, upper)) in tol.boundaries().iter().zip(&EXPECTED_BOUNDARIES) {
            assert!((band.lower_hz - lower).abs() < 1e-12);
            assert!((band.upper_hz - upper).abs() < 1e-12);
        }

        let expected_ranges = [(22, 28), (28, 35), (35, 45), (45, 56)];
        for (range, &(lower, upper)) in tol.bin_ranges().iter().zip(&expected_ranges) {
            assert_eq!((range.lower, range.upper), (lower, upper));
        }

        let levels = tol.compute(&PSD).unwrap();
        assert!(rmse(&levels, &EXPECTED_LEVELS) < 2e-15);
    }

    #[test]
    fn test_restricted_bands() {
        let tol = ThirdOctaveLevels::new(128, 128.0, Some(35.2), Some(61.9)).unwrap();

        assert_eq!(tol.band_count(), 3);
        for (band, &(lower, upper)) in tol.boundaries().iter().zip(&EXPECTED_BOUNDARIES[1..]) {
            assert!((band.lower_hz - lower).abs() < 1e-12);
            assert!((band.upper_hz - upper).abs() < 1e-12);
        }

        let levels = tol.compute(&PSD).unwrap();
        assert!(rmse(&levels, &EXPECTED_LEVELS[1..]) < 2e-15);
    }

    #[test]
    fn test_band_straddling_nyquist_dropped() {
        // The 63 Hz band (56.2 - 70.8 Hz) crosses fs/2 = 64 Hz
        let tol = ThirdOctaveLevels::new(128, 128.0, None, Some(64.0)).unwrap();
        assert_eq!(tol.band_count(), 4);
        assert!(tol.boundaries().iter().all(|b| b.upper_hz < 64.0));
    }

    #[test]
    fn test_band_centers() {
        let tol = ThirdOctaveLevels::new(128, 128.0, None, None).unwrap();
        let expected = [25.118864315095795, 31.622776601683793, 39.810717055349734, 50.11872336272722];

        for (center, expected) in tol.band_centers().iter().zip(expected) {
            assert!((center - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_calibrated_levels() {
        let tol = ThirdOctaveLevels::new(128, 128.0, None, None).unwrap();
        let calibration = Calibration::new(2.0, -170.0, 10.0).unwrap();

        let raw = tol.compute(&PSD).unwrap();
        let calibrated = tol.compute_calibrated(&PSD, &calibration).unwrap();

        for (r, c) in raw.iter().zip(&calibrated) {
            assert!((r - c - calibration.log_normalization()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_full_range_at_high_rate() {
        let tol = ThirdOctaveLevels::new(64_000, 64_000.0, None, None).unwrap();

        // 25 Hz up to the 25 kHz band; the 25 kHz band itself crosses the limit
        assert_eq!(tol.band_count(), 30);
        assert!((tol.band_centers()[0] - 25.118864315095795).abs() < 1e-9);
        assert!(tol.boundaries().windows(2).all(|w| w[0].upper_hz <= w[1].lower_hz + 1e-9));

        let levels = tol.compute(&vec![1.0; 32_001]).unwrap();
        assert_eq!(levels.len(), 30);
        assert!(levels.iter().all(|l| l.is_finite()));
    }

    #[test]
    fn test_output_length_independent_of_content() {
        let tol = ThirdOctaveLevels::new(256, 200.0, Some(30.0), None).unwrap();
        let spectrum_size = tol.spectrum_size();

        let flat = tol.compute(&vec![1.0; spectrum_size]).unwrap();
        let ramp: Vec<f64> = (1..=spectrum_size).map(|i| i as f64).collect();
        let sloped = tol.compute(&ramp).unwrap();

        assert_eq!(flat.len(), tol.band_count());
        assert_eq!(sloped.len(), tol.band_count());
        assert_eq!(sloped, tol.compute(&ramp).unwrap());
    }

    #[test]
    fn test_window_shorter_than_one_second() {
        assert!(matches!(
            ThirdOctaveLevels::new(100, 128.0, None, None),
            Err(SpectralError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_low_freq_validation() {
        // Below the floor
        assert!(ThirdOctaveLevels::new(128, 128.0, Some(20.0), None).is_err());
        // Above the upper limit
        assert!(ThirdOctaveLevels::new(128, 128.0, Some(65.0), None).is_err());
        // Above the requested high frequency
        assert!(ThirdOctaveLevels::new(128, 128.0, Some(50.0), Some(40.0)).is_err());

        assert!(ThirdOctaveLevels::new(128, 128.0, Some(25.0), None).is_ok());
        assert!(ThirdOctaveLevels::new(128, 128.0, Some(64.0), None).is_ok());
    }

    #[test]
    fn test_high_freq_validation() {
        // Above the upper limit
        assert!(ThirdOctaveLevels::new(128, 128.0, None, Some(64.5)).is_err());
        // Below the floor
        assert!(ThirdOctaveLevels::new(128, 128.0, None, Some(24.0)).is_err());
        // Below the requested low frequency
        assert!(ThirdOctaveLevels::new(128, 128.0, Some(40.0), Some(35.0)).is_err());

        assert!(ThirdOctaveLevels::new(128, 128.0, None, Some(25.0)).is_ok());
        assert!(ThirdOctaveLevels::new(128, 128.0, Some(40.0), Some(40.0)).is_ok());
    }

    #[test]
    fn test_nan_bounds_rejected() {
        assert!(ThirdOctaveLevels::new(128, 128.0, Some(f64::NAN), None).is_err());
        assert!(ThirdOctaveLevels::new(128, 128.0, None, Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_wrong_spectrum_length() {
        let tol = ThirdOctaveLevels::new(128, 128.0, None, None).unwrap();
        assert!(tol.compute(&PSD[..64]).is_err());
        assert!(tol.compute(&[1.0; 66]).is_err());
    }
}
