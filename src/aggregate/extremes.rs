//! Shared min/max over a trial and time selection, for common axis scaling.

use tracing::debug;

use super::{trial_rows, SampleWindow};
use crate::error::{Error, Result};
use crate::statistics::Extremes;
use crate::table::TraceTable;

/// Global minimum and maximum of the selected trials inside `[start_s, end_s)`.
///
/// `trials` is 1-based. Every selected (unit, condition) trace must
/// contribute at least one sample.
///
/// # Errors
///
/// - [`Error::MissingTrace`] for an absent (unit, condition) pair
/// - [`Error::TrialOutOfRange`] for a trial index of 0 or past the last trial
/// - [`Error::EmptySelection`] if a trace or the whole selection holds no samples
/// - window errors from [`SampleWindow::from_seconds`]
pub fn extremes<U, C>(
    traces: &TraceTable,
    units: &[U],
    conditions: &[C],
    trials: &[usize],
    sample_rate: f64,
    start_s: f64,
    end_s: f64,
) -> Result<Extremes>
where
    U: AsRef<str>,
    C: AsRef<str>,
{
    let window = SampleWindow::from_seconds(sample_rate, start_s, end_s)?;
    debug!(?window, trials = trials.len(), "computing trace extremes");

    let mut bounds: Option<Extremes> = None;
    for unit in units {
        for condition in conditions {
            let (unit, condition) = (unit.as_ref(), condition.as_ref());
            let trace = traces.get(unit, condition)?;
            let rows = trial_rows(trials, trace, unit, condition)?;
            let span = window.clip(trace.ncols());

            let selected = rows
                .iter()
                .flat_map(|&r| span.clone().map(move |c| trace[(r, c)]));
            let local = Extremes::of(selected).ok_or(Error::EmptySelection)?;

            bounds = Some(match bounds {
                None => local,
                Some(b) => b.merge(local),
            });
        }
    }

    bounds.ok_or(Error::EmptySelection)
}
