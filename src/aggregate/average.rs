//! Trial-averaged traces.

use tracing::debug;

use crate::error::Result;
use crate::table::{AggregateTable, TraceTable};
use crate::types::{Series, Trace};

/// Mean trace across trials for every `(unit, condition)` pair.
///
/// Each output vector has one entry per timepoint: the mean of that column
/// over all trials of the trace. A trace with zero trials averages to NaN.
///
/// # Errors
///
/// [`Error::MissingTrace`](crate::Error::MissingTrace) if any requested pair
/// is absent from `traces`.
pub fn average<U, C>(traces: &TraceTable, units: &[U], conditions: &[C]) -> Result<AggregateTable<Series>>
where
    U: AsRef<str>,
    C: AsRef<str>,
{
    debug!(units = units.len(), conditions = conditions.len(), "averaging traces over trials");

    AggregateTable::try_build(units, conditions, |unit, condition| {
        traces.get(unit, condition).map(trial_mean)
    })
}

fn trial_mean(trace: &Trace) -> Series {
    let trials = trace.nrows() as f64;
    Series::from_fn(trace.ncols(), |j, _| trace.column(j).sum() / trials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use nalgebra::DMatrix;

    #[test]
    fn test_mean_down_trials() {
        let traces = TraceTable::new()
            .with_trace("c1", "o1", DMatrix::from_row_slice(2, 3, &[1.0, 2.0, 3.0, 3.0, 4.0, 8.0]))
            .unwrap();
        let avg = average(&traces, &["c1"], &["o1"]).unwrap();
        assert_eq!(avg.get("c1", "o1").unwrap().as_slice(), &[2.0, 3.0, 5.5]);
    }

    #[test]
    fn test_zero_trials_is_nan() {
        let traces = TraceTable::new().with_trace("c1", "o1", DMatrix::zeros(0, 4)).unwrap();
        let avg = average(&traces, &["c1"], &["o1"]).unwrap();
        assert!(avg.get("c1", "o1").unwrap().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_missing_pair_fails() {
        let traces = TraceTable::new().with_trace("c1", "o1", DMatrix::zeros(1, 4)).unwrap();
        let err = average(&traces, &["c1"], &["o1", "o2"]).unwrap_err();
        assert!(matches!(err, Error::MissingTrace { .. }));
    }
}
