//! Configuration for self/sister/stranger correlation analysis.

use serde::{Deserialize, Serialize};

use crate::analysis::NormAxis;
use crate::constants::DEFAULT_SELECTED_TRIALS;
use crate::error::{Error, Result};

/// Configuration options for `SisterAnalysis`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Start of the response window, seconds from trial start (default: 3.0).
    ///
    /// The reference recordings have odour onset 3 s into each trial.
    pub window_start_s: f64,

    /// End of the response window, seconds from trial start (default: 8.0).
    pub window_end_s: f64,

    /// 1-based trials averaged into each response (default: 1-4).
    pub selected_trials: Vec<usize>,

    /// Axis used to normalize responses before correlating (default: by unit).
    pub norm_axis: NormAxis,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_start_s: 3.0,
            window_end_s: 8.0,
            selected_trials: DEFAULT_SELECTED_TRIALS.to_vec(),
            norm_axis: NormAxis::ByUnit,
        }
    }
}

impl Config {
    /// Check the window before any data is touched.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidWindow`] unless `0 <= window_start_s < window_end_s`
    /// and both are finite.
    pub fn validate(&self) -> Result<()> {
        let (start_s, end_s) = (self.window_start_s, self.window_end_s);
        if !start_s.is_finite() || !end_s.is_finite() || start_s < 0.0 || end_s <= start_s {
            return Err(Error::InvalidWindow { start_s, end_s });
        }
        Ok(())
    }
}
