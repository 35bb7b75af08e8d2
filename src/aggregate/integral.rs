//! Response integrals over a time window.
//!
//! The integral of one trial is the Riemann sum of its samples inside the
//! window divided by the sampling rate, in signal units x seconds.

use tracing::debug;

use super::{trial_rows, SampleWindow};
use crate::error::Result;
use crate::statistics::mean;
use crate::table::{AggregateTable, TraceTable};
use crate::types::{Series, Trace};

/// Output of [`integrate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Integrals {
    /// One integral per recorded trial.
    pub per_trial: AggregateTable<Series>,
    /// Mean integral over the selected trials only.
    pub trial_mean: AggregateTable<f64>,
}

/// Integrate every `(unit, condition)` trace over `[start_s, end_s)`.
///
/// All recorded trials are integrated; `selected_trials` (1-based) picks
/// the ones averaged into [`Integrals::trial_mean`]. An empty selection
/// averages to NaN. A window running past the end of a trace is truncated.
///
/// # Errors
///
/// - [`Error::MissingTrace`](crate::Error::MissingTrace) for an absent pair
/// - [`Error::TrialOutOfRange`](crate::Error::TrialOutOfRange) for a selected
///   trial the trace does not have
/// - window errors from [`SampleWindow::from_seconds`]
pub fn integrate<U, C>(
    traces: &TraceTable,
    units: &[U],
    conditions: &[C],
    sample_rate: f64,
    start_s: f64,
    end_s: f64,
    selected_trials: &[usize],
) -> Result<Integrals>
where
    U: AsRef<str>,
    C: AsRef<str>,
{
    let window = SampleWindow::from_seconds(sample_rate, start_s, end_s)?;
    debug!(
        ?window,
        units = units.len(),
        conditions = conditions.len(),
        "integrating responses"
    );

    let per_trial = AggregateTable::try_build(units, conditions, |unit, condition| {
        let trace = traces.get(unit, condition)?;
        Ok(trial_integrals(trace, window, sample_rate))
    })?;

    let trial_mean = AggregateTable::try_build(units, conditions, |unit, condition| {
        let trace = traces.get(unit, condition)?;
        let rows = trial_rows(selected_trials, trace, unit, condition)?;
        let integrals = per_trial.get(unit, condition)?;
        let picked: Vec<f64> = rows.iter().map(|&r| integrals[r]).collect();
        Ok(mean(&picked))
    })?;

    Ok(Integrals {
        per_trial,
        trial_mean,
    })
}

fn trial_integrals(trace: &Trace, window: SampleWindow, sample_rate: f64) -> Series {
    let span = window.clip(trace.ncols());
    Series::from_fn(trace.nrows(), |r, _| {
        span.clone().map(|c| trace[(r, c)]).sum::<f64>() / sample_rate
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use nalgebra::DMatrix;

    #[test]
    fn test_constant_signal() {
        // 2.0 for 40 s at 10 Hz; integrate over [3, 8) s -> 2.0 * 5 s
        let traces = TraceTable::new()
            .with_trace("c1", "o1", DMatrix::from_element(4, 400, 2.0))
            .unwrap();
        let out = integrate(&traces, &["c1"], &["o1"], 10.0, 3.0, 8.0, &[1, 2, 3, 4]).unwrap();

        for v in out.per_trial.get("c1", "o1").unwrap().iter() {
            assert!((v - 10.0).abs() < 1e-12);
        }
        assert!((out.trial_mean.get("c1", "o1").unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_selected_trials_only() {
        let trace = DMatrix::from_fn(5, 10, |r, _| (r + 1) as f64);
        let traces = TraceTable::new().with_trace("c1", "o1", trace).unwrap();
        let out = integrate(&traces, &["c1"], &["o1"], 10.0, 0.0, 1.0, &[2, 5]).unwrap();

        // Trial k integrates to k * 1 s
        assert_eq!(out.per_trial.get("c1", "o1").unwrap().len(), 5);
        assert!((out.trial_mean.get("c1", "o1").unwrap() - 3.5).abs() < 1e-12);
    }

    #[test]
    fn test_window_truncated_at_trace_end() {
        let traces = TraceTable::new()
            .with_trace("c1", "o1", DMatrix::from_element(1, 20, 1.0))
            .unwrap();
        let out = integrate(&traces, &["c1"], &["o1"], 10.0, 1.0, 100.0, &[1]).unwrap();
        assert!((out.trial_mean.get("c1", "o1").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_selection_is_nan() {
        let traces = TraceTable::new()
            .with_trace("c1", "o1", DMatrix::from_element(2, 20, 1.0))
            .unwrap();
        let out = integrate(&traces, &["c1"], &["o1"], 10.0, 0.0, 1.0, &[]).unwrap();
        assert!(out.trial_mean.get("c1", "o1").unwrap().is_nan());
    }

    #[test]
    fn test_default_trials_need_four_repeats() {
        let traces = TraceTable::new()
            .with_trace("c1", "o1", DMatrix::from_element(3, 20, 1.0))
            .unwrap();
        let err = integrate(&traces, &["c1"], &["o1"], 10.0, 0.0, 1.0, &[1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, Error::TrialOutOfRange { trial: 4, available: 3, .. }));
    }
}
