//! Pairwise Pearson correlation between two labeled tables.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::statistics::pearson;
use crate::table::LabeledMatrix;

/// Which vectors of the two tables are correlated with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Alignment {
    /// Correlate columns; both tables must share the row label sequence.
    ByColumn,
    /// Correlate rows; both tables must share the column label sequence.
    ByRow,
}

const ALIGNMENT_NAMES: &[&str] = &["byColumn", "byRow", "byCol"];

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "byColumn" | "byCol" | "by-column" => Ok(Alignment::ByColumn),
            "byRow" | "by-row" => Ok(Alignment::ByRow),
            _ => Err(Error::InvalidOption {
                kind: "correlation alignment",
                value: s.to_string(),
                allowed: ALIGNMENT_NAMES,
            }),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::ByColumn => f.write_str("byColumn"),
            Alignment::ByRow => f.write_str("byRow"),
        }
    }
}

/// Pearson correlation of every vector of `a` with every vector of `b`.
///
/// With [`Alignment::ByColumn`] the result has one row per column of `a`
/// and one column per column of `b`; the tables must have identical row
/// labels in identical order. [`Alignment::ByRow`] is the transposed case.
///
/// Constant vectors produce NaN entries, which are kept.
///
/// # Errors
///
/// - [`Error::LabelMismatch`] if the shared axis labels differ in content or order
/// - [`Error::TooFewObservations`] if the shared axis has fewer than 2 entries
pub fn correlate(a: &LabeledMatrix, b: &LabeledMatrix, alignment: Alignment) -> Result<LabeledMatrix> {
    // Reduce the row case to the column case
    let (a, b): (Cow<'_, LabeledMatrix>, Cow<'_, LabeledMatrix>) = match alignment {
        Alignment::ByColumn => (Cow::Borrowed(a), Cow::Borrowed(b)),
        Alignment::ByRow => (Cow::Owned(a.transpose()), Cow::Owned(b.transpose())),
    };

    if a.row_labels() != b.row_labels() {
        return Err(Error::LabelMismatch {
            alignment,
            left: a.row_labels().to_vec(),
            right: b.row_labels().to_vec(),
        });
    }

    let n = a.row_labels().len();
    if n < 2 {
        return Err(Error::TooFewObservations(n));
    }

    let cols_a: Vec<Vec<f64>> = (0..a.col_labels().len()).map(|j| a.column(j)).collect();
    let cols_b: Vec<Vec<f64>> = (0..b.col_labels().len()).map(|j| b.column(j)).collect();
    debug!(%alignment, left = cols_a.len(), right = cols_b.len(), observations = n, "correlating");

    let values = DMatrix::from_fn(cols_a.len(), cols_b.len(), |i, j| pearson(&cols_a[i], &cols_b[j]));
    let matrix = LabeledMatrix::new(a.col_labels().to_vec(), b.col_labels().to_vec(), values)?;

    let undefined = matrix.nan_count();
    if undefined > 0 {
        warn!(undefined, "correlation matrix contains undefined entries (constant vectors)");
    }

    Ok(matrix)
}
