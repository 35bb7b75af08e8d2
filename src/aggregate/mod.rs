//! Reduction of raw per-trial traces.
//!
//! - [`average`]: trial-averaged trace per (unit, condition)
//! - [`extremes`]: shared min/max over a trial and time selection
//! - [`integrate`]: time-window response integral per trial and its trial mean
//!
//! Trial indices are 1-based in every public parameter.

mod average;
mod extremes;
mod integral;
mod window;

pub use average::average;
pub use extremes::extremes;
pub use integral::{integrate, Integrals};
pub use window::SampleWindow;

use crate::error::{Error, Result};
use crate::types::Trace;

/// Convert 1-based trial numbers into row indices of `trace`.
fn trial_rows(trials: &[usize], trace: &Trace, unit: &str, condition: &str) -> Result<Vec<usize>> {
    let available = trace.nrows();
    trials
        .iter()
        .map(|&trial| {
            if trial == 0 || trial > available {
                Err(Error::TrialOutOfRange {
                    trial,
                    available,
                    unit: unit.to_string(),
                    condition: condition.to_string(),
                })
            } else {
                Ok(trial - 1)
            }
        })
        .collect()
}
