//! Conversion of time bounds in seconds to sample indices.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Half-open sample range `[start, end)` derived from a window in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleWindow {
    /// First sample included.
    pub start: usize,
    /// First sample excluded.
    pub end: usize,
}

impl SampleWindow {
    /// Convert `[start_s, end_s)` to samples with `floor(t * sample_rate)`.
    ///
    /// Each bound is converted independently. A window with `end <= start`
    /// is legal and selects nothing.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSampleRate`] unless the rate is finite and positive
    /// - [`Error::InvalidWindow`] unless both bounds are finite and non-negative
    pub fn from_seconds(sample_rate: f64, start_s: f64, end_s: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(Error::InvalidSampleRate(sample_rate));
        }
        let valid = |t: f64| t.is_finite() && t >= 0.0;
        if !valid(start_s) || !valid(end_s) {
            return Err(Error::InvalidWindow { start_s, end_s });
        }

        Ok(Self {
            start: (start_s * sample_rate).floor() as usize,
            end: (end_s * sample_rate).floor() as usize,
        })
    }

    /// Sample range clipped to a trace of `len` timepoints.
    ///
    /// Bounds past the end are truncated, never an error.
    pub fn clip(&self, len: usize) -> Range<usize> {
        let end = self.end.min(len);
        let start = self.start.min(end);
        start..end
    }
}
