//! Fixed-size segmentation of long records
//!
//! Windows start at 0, offset, 2*offset, ... and are `segment_size` samples long.
//! At most one trailing window may be shorter than `segment_size`; what happens to it
//! is fixed per instance by [`PartialSegmentPolicy`].

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpectralError};

/// Rule applied to the trailing window when fewer than `segment_size` samples remain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialSegmentPolicy {
    /// Discard the trailing window
    #[default]
    Drop,

    /// Extend the trailing window with zeros up to `segment_size`
    ZeroPad,

    /// Emit the trailing window with its natural (shorter) length
    KeepShort,
}

/// Slices a record into consecutive, possibly overlapping windows
#[derive(Debug, Clone)]
pub struct Segmentation {
    segment_size: usize,
    offset: usize,
    policy: PartialSegmentPolicy,
}

impl Segmentation {
    /// Create a new segmentation stage
    ///
    /// # Arguments
    /// * `segment_size` - Window length in samples
    /// * `offset` - Stride between window starts (default: `segment_size`, no overlap)
    pub fn new(segment_size: usize, offset: Option<usize>) -> Result<Self> {
        if segment_size == 0 {
            return Err(SpectralError::invalid("segment size must be positive"));
        }

        let offset = offset.unwrap_or(segment_size);
        if offset == 0 {
            return Err(SpectralError::invalid("segment offset must be positive"));
        }

        Ok(Self {
            segment_size,
            offset,
            policy: PartialSegmentPolicy::default(),
        })
    }

    /// Replace the trailing-window rule
    pub fn with_partial_policy(mut self, policy: PartialSegmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Slice `signal` into windows
    pub fn compute(&self, signal: &[f64]) -> Vec<Vec<f64>> {
        let mut segments = Vec::with_capacity(self.segment_count(signal.len()));

        let mut start = 0;
        while start < signal.len() {
            let end = start + self.segment_size;

            if end <= signal.len() {
                segments.push(signal[start..end].to_vec());
            } else {
                match self.policy {
                    PartialSegmentPolicy::Drop => {}
                    PartialSegmentPolicy::ZeroPad => {
                        let mut segment = vec![0.0; self.segment_size];
                        segment[..signal.len() - start].copy_from_slice(&signal[start..]);
                        segments.push(segment);
                    }
                    PartialSegmentPolicy::KeepShort => segments.push(signal[start..].to_vec()),
                }
                break;
            }

            start += self.offset;
        }

        segments
    }

    /// Number of windows `compute` yields for a record of `signal_len` samples
    pub fn segment_count(&self, signal_len: usize) -> usize {
        let full = if signal_len >= self.segment_size {
            (signal_len - self.segment_size) / self.offset + 1
        } else {
            0
        };

        let next_start = full * self.offset;
        let has_partial = next_start < signal_len;

        match self.policy {
            PartialSegmentPolicy::Drop => full,
            _ if has_partial => full + 1,
            _ => full,
        }
    }

    pub fn segment_size(&self) -> usize {
        self.segment_size
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn policy(&self) -> PartialSegmentPolicy {
        self.policy
    }
}
