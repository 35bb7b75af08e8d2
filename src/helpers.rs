//! Time axes for plotting trial-aligned traces.
//!
//! A trial starts `baseline_s` seconds before stimulus onset, so its axis
//! runs from `-baseline_s` to just under `trial_length_s - baseline_s`:
//!
//! ```ignore
//! use sistercorr::helpers::trial_time_axis;
//!
//! // 40 s trial, onset at 3 s, 1 kHz: 40,000 points from -3.0 to 36.999
//! let x = trial_time_axis(40.0, 1000.0, 3.0)?;
//! ```

use crate::aggregate::SampleWindow;
use crate::error::{Error, Result};

/// Time stamps in seconds of every sample of one trial, zero at onset.
///
/// Sample counts are `round(trial_length_s * sample_rate)` in total and
/// `round(baseline_s * sample_rate)` before onset.
///
/// # Errors
///
/// - [`Error::InvalidSampleRate`] unless the rate is finite and positive
/// - [`Error::InvalidWindow`] if the baseline is negative or longer than the trial
pub fn trial_time_axis(trial_length_s: f64, sample_rate: f64, baseline_s: f64) -> Result<Vec<f64>> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(Error::InvalidSampleRate(sample_rate));
    }
    let valid = trial_length_s.is_finite()
        && baseline_s.is_finite()
        && baseline_s >= 0.0
        && baseline_s <= trial_length_s;
    if !valid {
        return Err(Error::InvalidWindow {
            start_s: -baseline_s,
            end_s: trial_length_s - baseline_s,
        });
    }

    let total = (trial_length_s * sample_rate).round() as usize;
    let pre = (baseline_s * sample_rate).round();

    Ok((0..total).map(|k| (k as f64 - pre) / sample_rate).collect())
}

/// Cut `axis` to `[start_s, end_s)` and keep every `old_rate / new_rate`-th point.
///
/// `start_s` and `end_s` are measured from the first sample of the axis,
/// not from onset. The step is truncated to an integer.
///
/// # Errors
///
/// - [`Error::InvalidSubsample`] if the step would be zero (upsampling)
/// - window errors from [`SampleWindow::from_seconds`]
pub fn truncate_and_subsample(
    axis: &[f64],
    start_s: f64,
    end_s: f64,
    old_rate: f64,
    new_rate: f64,
) -> Result<Vec<f64>> {
    let window = SampleWindow::from_seconds(old_rate, start_s, end_s)?;

    let step = old_rate / new_rate;
    if !step.is_finite() || step < 1.0 {
        return Err(Error::InvalidSubsample { old_rate, new_rate });
    }

    Ok(axis[window.clip(axis.len())]
        .iter()
        .step_by(step as usize)
        .copied()
        .collect())
}
