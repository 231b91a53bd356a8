//! FFT engine for fixed-size real segments
//!
//! Returns the full two-sided spectrum, real and imaginary parts interleaved

use std::sync::Arc;

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::{ensure_length, Result, SpectralError};

/// Forward FFT over segments of exactly `nfft` samples
///
/// The plan is built once; `compute` works on a per-call buffer so one
/// engine can be shared between threads.
#[derive(Clone)]
pub struct FftEngine {
    /// FFT size (number of samples)
    nfft: usize,

    /// Complex FFT processor
    fft: Arc<dyn Fft<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `nfft` - FFT size (number of samples)
    pub fn new(nfft: usize) -> Result<Self> {
        if nfft == 0 {
            return Err(SpectralError::invalid("nfft must be positive"));
        }

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(nfft);

        Ok(Self { nfft, fft })
    }

    /// Compute the full complex spectrum of a real segment
    ///
    /// # Arguments
    /// * `segment` - Exactly `nfft` real samples
    ///
    /// # Returns
    /// `2 * nfft` values: [re0, im0, re1, im1, ...]
    pub fn compute(&self, segment: &[f64]) -> Result<Vec<f64>> {
        ensure_length("segment", segment.len(), self.nfft)?;

        let mut buffer: Vec<Complex<f64>> =
            segment.iter().map(|&s| Complex::new(s, 0.0)).collect();
        self.fft.process(&mut buffer);

        Ok(buffer.iter().flat_map(|c| [c.re, c.im]).collect())
    }

    /// Get FFT size
    pub fn nfft(&self) -> usize {
        self.nfft
    }

    /// Length of the interleaved output (2 * nfft)
    pub fn output_size(&self) -> usize {
        2 * self.nfft
    }
}

impl std::fmt::Debug for FftEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FftEngine").field("nfft", &self.nfft).finish()
    }
}
