//! Frequency ↔ spectrum-bin conversion shared by the spectral stages

/// Number of one-sided bins of an `nfft`-point real transform (nfft/2 + 1)
pub fn spectrum_size(nfft: usize) -> usize {
    nfft / 2 + 1
}

/// Anything configured with an FFT size and a sampling rate
pub trait FrequencyConvertible {
    /// FFT size (number of real samples per transform)
    fn nfft(&self) -> usize;

    /// Sampling rate in Hz
    fn sampling_rate(&self) -> f64;

    /// Number of one-sided spectrum bins (nfft/2 + 1)
    fn spectrum_size(&self) -> usize {
        spectrum_size(self.nfft())
    }

    /// Map a frequency in Hz to its one-sided spectrum bin
    ///
    /// index = round(freq * nfft / sampling_rate), clamped to [0, spectrum_size)
    fn frequency_to_spectrum_index(&self, freq: f64) -> usize {
        let index = (freq * self.nfft() as f64 / self.sampling_rate()).round();
        let last = (self.spectrum_size() - 1) as f64;
        // NaN saturates to 0 in the cast
        index.clamp(0.0, last) as usize
    }

    /// Center frequency in Hz of a spectrum bin
    fn spectrum_index_to_frequency(&self, index: usize) -> f64 {
        index as f64 * self.sampling_rate() / self.nfft() as f64
    }

    /// Frequency axis in Hz for every one-sided bin
    fn frequency_vector(&self) -> Vec<f64> {
        (0..self.spectrum_size())
            .map(|index| self.spectrum_index_to_frequency(index))
            .collect()
    }
}
