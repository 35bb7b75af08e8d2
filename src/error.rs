//! Error type shared by every analysis stage.
//!
//! Degenerate statistics (a constant vector, an empty relationship class) are
//! not errors: they surface as NaN in the returned values.

use crate::analysis::Alignment;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced to the caller. None of these are transient.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// No trace stored for the requested unit/condition pair.
    #[error("no trace for unit '{unit}' under condition '{condition}'")]
    MissingTrace {
        /// Requested unit.
        unit: String,
        /// Requested condition.
        condition: String,
    },

    /// A label was not found on one axis of a labeled table.
    #[error("label '{label}' not found among {axis} labels")]
    MissingLabel {
        /// Requested label.
        label: String,
        /// Which axis was searched ("row" or "column").
        axis: &'static str,
    },

    /// A unit is not part of the group mapping.
    #[error("unit '{0}' is not in the group mapping")]
    UnknownUnit(String),

    /// Two tables do not share the label sequence the alignment needs.
    #[error("labels do not match for {alignment} correlation: {left:?} vs {right:?}")]
    LabelMismatch {
        /// Alignment that was requested.
        alignment: Alignment,
        /// Shared-axis labels of the first table.
        left: Vec<String>,
        /// Shared-axis labels of the second table.
        right: Vec<String>,
    },

    /// A mode string did not name any known option.
    #[error("invalid {kind} '{value}', expected one of {allowed:?}")]
    InvalidOption {
        /// Which option was being parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
        /// Accepted spellings.
        allowed: &'static [&'static str],
    },

    /// Sampling rate must be finite and strictly positive.
    #[error("invalid sampling rate {0} Hz")]
    InvalidSampleRate(f64),

    /// Window bounds must be finite and non-negative.
    #[error("invalid time window [{start_s}, {end_s}) s")]
    InvalidWindow {
        /// Window start in seconds.
        start_s: f64,
        /// Window end in seconds.
        end_s: f64,
    },

    /// Subsampling would need a step of zero samples.
    #[error("cannot subsample from {old_rate} Hz to {new_rate} Hz")]
    InvalidSubsample {
        /// Rate of the input axis.
        old_rate: f64,
        /// Requested output rate.
        new_rate: f64,
    },

    /// A 1-based trial index is zero or past the last recorded trial.
    #[error("trial {trial} out of range for unit '{unit}', condition '{condition}' ({available} trials recorded)")]
    TrialOutOfRange {
        /// The offending 1-based trial index.
        trial: usize,
        /// Number of trials available.
        available: usize,
        /// Unit of the trace.
        unit: String,
        /// Condition of the trace.
        condition: String,
    },

    /// All traces of one unit must share their timepoint count.
    #[error("unit '{unit}' has traces of {expected} timepoints, got {found}")]
    TimepointMismatch {
        /// Unit being inserted.
        unit: String,
        /// Timepoint count already recorded for this unit.
        expected: usize,
        /// Timepoint count of the rejected trace.
        found: usize,
    },

    /// Unit and group lists have different lengths.
    #[error("group mapping has {units} units but {groups} group labels")]
    GroupLengthMismatch {
        /// Length of the unit list.
        units: usize,
        /// Length of the group list.
        groups: usize,
    },

    /// A unit appears more than once in a group mapping.
    #[error("unit '{0}' appears more than once in the group mapping")]
    DuplicateUnit(String),

    /// Label counts do not match the matrix dimensions.
    #[error("matrix is {rows}x{cols} but labels are {row_labels}x{col_labels}")]
    ShapeMismatch {
        /// Matrix rows.
        rows: usize,
        /// Matrix columns.
        cols: usize,
        /// Number of row labels.
        row_labels: usize,
        /// Number of column labels.
        col_labels: usize,
    },

    /// Correlation needs at least two observations per vector.
    #[error("correlation needs at least 2 observations, got {0}")]
    TooFewObservations(usize),

    /// Nothing was selected, so min/max is undefined.
    #[error("selection is empty")]
    EmptySelection,
}
