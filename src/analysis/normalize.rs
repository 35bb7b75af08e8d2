//! Standard-deviation normalization of response tables.
//!
//! Responses are laid out with conditions as rows and units as columns.
//! Dividing each column by its standard deviation keeps the relative sizes
//! of one unit's responses across conditions while making units with very
//! different fluorescence amplitudes comparable. Dividing each row keeps the
//! relative sizes across units for one condition.

use std::fmt;
use std::str::FromStr;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::STD_DDOF;
use crate::error::Error;
use crate::statistics::std_dev;
use crate::table::{AggregateTable, LabeledMatrix};

/// Axis along which the normalizing standard deviation is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NormAxis {
    /// Divide each unit (column) by its std across conditions.
    ByUnit,
    /// Divide each condition (row) by its std across units.
    ByCondition,
}

const NORM_AXIS_NAMES: &[&str] = &["byUnit", "byCondition", "byColStd", "byRowStd"];

impl FromStr for NormAxis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "byUnit" | "by-unit" | "byColStd" => Ok(NormAxis::ByUnit),
            "byCondition" | "by-condition" | "byRowStd" => Ok(NormAxis::ByCondition),
            _ => Err(Error::InvalidOption {
                kind: "normalization axis",
                value: s.to_string(),
                allowed: NORM_AXIS_NAMES,
            }),
        }
    }
}

impl fmt::Display for NormAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormAxis::ByUnit => f.write_str("byUnit"),
            NormAxis::ByCondition => f.write_str("byCondition"),
        }
    }
}

/// Representation returned by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputForm {
    /// Labeled matrix, conditions x units.
    Table,
    /// Scalar aggregate table keyed by (unit, condition).
    Mapping,
    /// Bare matrix without labels.
    Matrix,
    /// The standard deviations that were divided by.
    Divisors,
}

const OUTPUT_FORM_NAMES: &[&str] = &["table", "mapping", "matrix", "divisors", "df", "dict", "np", "factor"];

impl FromStr for OutputForm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" | "df" => Ok(OutputForm::Table),
            "mapping" | "dict" => Ok(OutputForm::Mapping),
            "matrix" | "np" => Ok(OutputForm::Matrix),
            "divisors" | "factor" => Ok(OutputForm::Divisors),
            _ => Err(Error::InvalidOption {
                kind: "output form",
                value: s.to_string(),
                allowed: OUTPUT_FORM_NAMES,
            }),
        }
    }
}

/// Per-unit or per-condition standard deviations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divisors {
    /// Axis the divisors belong to.
    pub axis: NormAxis,
    /// Unit labels for `ByUnit`, condition labels for `ByCondition`.
    pub labels: Vec<String>,
    /// One standard deviation per label.
    pub values: Vec<f64>,
}

/// Normalized responses in the requested [`OutputForm`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// See [`OutputForm::Table`].
    Table(LabeledMatrix),
    /// See [`OutputForm::Mapping`].
    Mapping(AggregateTable<f64>),
    /// See [`OutputForm::Matrix`].
    Matrix(DMatrix<f64>),
    /// See [`OutputForm::Divisors`].
    Divisors(Divisors),
}

impl Normalized {
    /// The labeled table, if that form was requested.
    pub fn into_table(self) -> Option<LabeledMatrix> {
        match self {
            Normalized::Table(t) => Some(t),
            _ => None,
        }
    }

    /// The unit/condition mapping, if that form was requested.
    pub fn into_mapping(self) -> Option<AggregateTable<f64>> {
        match self {
            Normalized::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// The bare matrix, if that form was requested.
    pub fn into_matrix(self) -> Option<DMatrix<f64>> {
        match self {
            Normalized::Matrix(m) => Some(m),
            _ => None,
        }
    }

    /// The divisors, if that form was requested.
    pub fn into_divisors(self) -> Option<Divisors> {
        match self {
            Normalized::Divisors(d) => Some(d),
            _ => None,
        }
    }
}

/// Divide scalar responses by the standard deviation along `axis`.
///
/// Standard deviations use [`STD_DDOF`]. A zero divisor yields infinities
/// (or NaN for zero responses) and a single condition or unit yields NaN
/// divisors; both are passed through and logged.
pub fn normalize(aggregate: &AggregateTable<f64>, axis: NormAxis, form: OutputForm) -> Normalized {
    let table = aggregate.to_matrix();
    let divisors = divisors(&table, axis);

    match form {
        OutputForm::Divisors => Normalized::Divisors(divisors),
        OutputForm::Table => Normalized::Table(scale(&table, &divisors)),
        OutputForm::Mapping => Normalized::Mapping(scale(&table, &divisors).to_aggregate()),
        OutputForm::Matrix => Normalized::Matrix(scale(&table, &divisors).into_values()),
    }
}

/// Shorthand for [`normalize`] with [`OutputForm::Table`].
pub fn normalize_table(aggregate: &AggregateTable<f64>, axis: NormAxis) -> LabeledMatrix {
    let table = aggregate.to_matrix();
    let divisors = divisors(&table, axis);
    scale(&table, &divisors)
}

fn divisors(table: &LabeledMatrix, axis: NormAxis) -> Divisors {
    let (rows, cols) = table.values().shape();
    debug!(%axis, rows, cols, "normalizing responses");

    let (labels, values): (Vec<String>, Vec<f64>) = match axis {
        NormAxis::ByUnit => (
            table.col_labels().to_vec(),
            (0..cols).map(|j| std_dev(&table.column(j), STD_DDOF)).collect(),
        ),
        NormAxis::ByCondition => (
            table.row_labels().to_vec(),
            (0..rows).map(|i| std_dev(&table.row(i), STD_DDOF)).collect(),
        ),
    };

    for (label, d) in labels.iter().zip(&values) {
        if *d == 0.0 || d.is_nan() {
            warn!(%axis, label = label.as_str(), divisor = *d, "degenerate normalization divisor");
        }
    }

    Divisors { axis, labels, values }
}

fn scale(table: &LabeledMatrix, divisors: &Divisors) -> LabeledMatrix {
    table.map_indexed(|i, j, v| match divisors.axis {
        NormAxis::ByUnit => v / divisors.values[j],
        NormAxis::ByCondition => v / divisors.values[i],
    })
}
