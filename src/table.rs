//! Tables keyed by unit and condition labels.
//!
//! - [`TraceTable`]: raw `[trials x timepoints]` traces per (unit, condition)
//! - [`AggregateTable`]: one reduced value per (unit, condition), in the
//!   unit/condition order it was computed with
//! - [`LabeledMatrix`]: a dense matrix with ordered row and column labels

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Trace;

/// Traces for one unit, all sharing one timepoint count.
#[derive(Debug, Clone)]
struct UnitTraces {
    timepoints: usize,
    by_condition: BTreeMap<String, Trace>,
}

/// Two-key store of raw traces: unit, then condition.
///
/// Each unit owns its condition map. Trial counts may differ between
/// conditions, but every trace of a unit must have the same number of
/// timepoints.
#[derive(Debug, Clone, Default)]
pub struct TraceTable {
    units: BTreeMap<String, UnitTraces>,
}

impl TraceTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a trace, returning the one it replaced, if any.
    ///
    /// # Errors
    ///
    /// [`Error::TimepointMismatch`] if the unit already holds traces of a
    /// different length.
    pub fn insert(
        &mut self,
        unit: impl Into<String>,
        condition: impl Into<String>,
        trace: Trace,
    ) -> Result<Option<Trace>> {
        let unit = unit.into();
        let found = trace.ncols();

        if let Some(entry) = self.units.get(&unit) {
            if entry.timepoints != found {
                return Err(Error::TimepointMismatch {
                    unit,
                    expected: entry.timepoints,
                    found,
                });
            }
        }

        let entry = self.units.entry(unit).or_insert_with(|| UnitTraces {
            timepoints: found,
            by_condition: BTreeMap::new(),
        });
        Ok(entry.by_condition.insert(condition.into(), trace))
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_trace(
        mut self,
        unit: impl Into<String>,
        condition: impl Into<String>,
        trace: Trace,
    ) -> Result<Self> {
        self.insert(unit, condition, trace)?;
        Ok(self)
    }

    /// Look up the trace of `unit` under `condition`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingTrace`] if the pair was never inserted.
    pub fn get(&self, unit: &str, condition: &str) -> Result<&Trace> {
        self.units
            .get(unit)
            .and_then(|u| u.by_condition.get(condition))
            .ok_or_else(|| Error::MissingTrace {
                unit: unit.to_string(),
                condition: condition.to_string(),
            })
    }

    /// Whether a trace exists for the pair.
    pub fn contains(&self, unit: &str, condition: &str) -> bool {
        self.get(unit, condition).is_ok()
    }

    /// Timepoint count shared by all traces of `unit`.
    pub fn timepoints(&self, unit: &str) -> Option<usize> {
        self.units.get(unit).map(|u| u.timepoints)
    }

    /// Units in lexical order.
    pub fn units(&self) -> impl Iterator<Item = &str> {
        self.units.keys().map(String::as_str)
    }

    /// Conditions recorded for `unit`, in lexical order.
    pub fn conditions(&self, unit: &str) -> impl Iterator<Item = &str> {
        self.units
            .get(unit)
            .into_iter()
            .flat_map(|u| u.by_condition.keys().map(String::as_str))
    }

    /// Number of stored traces.
    pub fn len(&self) -> usize {
        self.units.values().map(|u| u.by_condition.len()).sum()
    }

    /// Whether no trace is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One value per (unit, condition), in the order requested by the caller.
///
/// Values are stored unit-major: all conditions of the first unit, then all
/// conditions of the second, and so on.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateTable<V> {
    units: Vec<String>,
    conditions: Vec<String>,
    values: Vec<V>,
}

impl<V> AggregateTable<V> {
    /// Evaluate `f` for every pair of the Cartesian product `units x conditions`.
    ///
    /// The first error returned by `f` aborts the build.
    pub fn try_build<U, C, F>(units: &[U], conditions: &[C], mut f: F) -> Result<Self>
    where
        U: AsRef<str>,
        C: AsRef<str>,
        F: FnMut(&str, &str) -> Result<V>,
    {
        let mut values = Vec::with_capacity(units.len() * conditions.len());
        for unit in units {
            for condition in conditions {
                values.push(f(unit.as_ref(), condition.as_ref())?);
            }
        }

        Ok(Self {
            units: units.iter().map(|u| u.as_ref().to_string()).collect(),
            conditions: conditions.iter().map(|c| c.as_ref().to_string()).collect(),
            values,
        })
    }

    /// Apply `f` to every value, keeping the labels.
    pub fn map<W, F>(&self, f: F) -> AggregateTable<W>
    where
        F: FnMut(&V) -> W,
    {
        AggregateTable {
            units: self.units.clone(),
            conditions: self.conditions.clone(),
            values: self.values.iter().map(f).collect(),
        }
    }

    /// Unit labels in table order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Condition labels in table order.
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    /// Value for `(unit, condition)`.
    ///
    /// # Errors
    ///
    /// [`Error::MissingLabel`] if either label is not part of the table.
    pub fn get(&self, unit: &str, condition: &str) -> Result<&V> {
        let u = position(&self.units, unit, "unit")?;
        let c = position(&self.conditions, condition, "condition")?;
        Ok(&self.values[u * self.conditions.len() + c])
    }

    /// Iterate `(unit, condition, value)` in unit-major order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &V)> {
        let n_cond = self.conditions.len();
        self.values.iter().enumerate().map(move |(i, v)| {
            (
                self.units[i / n_cond].as_str(),
                self.conditions[i % n_cond].as_str(),
                v,
            )
        })
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the table holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AggregateTable<f64> {
    /// Lay the scalars out as a matrix with one row per condition and one
    /// column per unit.
    pub fn to_matrix(&self) -> LabeledMatrix {
        let n_cond = self.conditions.len();
        let values = DMatrix::from_fn(n_cond, self.units.len(), |row, col| {
            self.values[col * n_cond + row]
        });
        LabeledMatrix::from_parts(self.conditions.clone(), self.units.clone(), values)
    }
}

/// Dense matrix with ordered row and column labels.
///
/// Response tables use conditions as rows and units as columns; correlation
/// matrices use units on both axes.
///
/// Label counts always match the matrix shape; deserialized matrices go
/// through the same check as [`LabeledMatrix::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MatrixParts")]
pub struct LabeledMatrix {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    values: DMatrix<f64>,
}

/// Unchecked wire form of a [`LabeledMatrix`].
#[derive(Deserialize)]
struct MatrixParts {
    row_labels: Vec<String>,
    col_labels: Vec<String>,
    values: DMatrix<f64>,
}

impl TryFrom<MatrixParts> for LabeledMatrix {
    type Error = Error;

    fn try_from(parts: MatrixParts) -> Result<Self> {
        LabeledMatrix::new(parts.row_labels, parts.col_labels, parts.values)
    }
}

impl LabeledMatrix {
    /// Attach labels to a matrix.
    ///
    /// # Errors
    ///
    /// [`Error::ShapeMismatch`] if the label counts differ from the matrix shape.
    pub fn new<R, C>(row_labels: Vec<R>, col_labels: Vec<C>, values: DMatrix<f64>) -> Result<Self>
    where
        R: Into<String>,
        C: Into<String>,
    {
        if row_labels.len() != values.nrows() || col_labels.len() != values.ncols() {
            return Err(Error::ShapeMismatch {
                rows: values.nrows(),
                cols: values.ncols(),
                row_labels: row_labels.len(),
                col_labels: col_labels.len(),
            });
        }
        Ok(Self {
            row_labels: row_labels.into_iter().map(Into::into).collect(),
            col_labels: col_labels.into_iter().map(Into::into).collect(),
            values,
        })
    }

    /// Attach labels already known to fit the matrix shape.
    pub(crate) fn from_parts(row_labels: Vec<String>, col_labels: Vec<String>, values: DMatrix<f64>) -> Self {
        debug_assert_eq!(row_labels.len(), values.nrows());
        debug_assert_eq!(col_labels.len(), values.ncols());
        Self {
            row_labels,
            col_labels,
            values,
        }
    }

    /// Build from row-major data.
    pub fn from_rows<R, C>(row_labels: Vec<R>, col_labels: Vec<C>, data: &[f64]) -> Result<Self>
    where
        R: Into<String>,
        C: Into<String>,
    {
        let (rows, cols) = (row_labels.len(), col_labels.len());
        if data.len() != rows * cols {
            return Err(Error::ShapeMismatch {
                rows: data.len(),
                cols: 1,
                row_labels: rows,
                col_labels: cols,
            });
        }
        Self::new(row_labels, col_labels, DMatrix::from_row_slice(rows, cols, data))
    }

    /// Row labels in order.
    pub fn row_labels(&self) -> &[String] {
        &self.row_labels
    }

    /// Column labels in order.
    pub fn col_labels(&self) -> &[String] {
        &self.col_labels
    }

    /// Underlying matrix.
    pub fn values(&self) -> &DMatrix<f64> {
        &self.values
    }

    /// Consume and return the underlying matrix.
    pub fn into_values(self) -> DMatrix<f64> {
        self.values
    }

    /// Position of a row label.
    pub fn row_index(&self, label: &str) -> Result<usize> {
        position(&self.row_labels, label, "row")
    }

    /// Position of a column label.
    pub fn col_index(&self, label: &str) -> Result<usize> {
        position(&self.col_labels, label, "column")
    }

    /// Value at `(row label, column label)`.
    pub fn get(&self, row: &str, col: &str) -> Result<f64> {
        Ok(self.values[(self.row_index(row)?, self.col_index(col)?)])
    }

    /// Copy of row `i`.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.values.row(i).iter().copied().collect()
    }

    /// Copy of column `j`.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.values.column(j).iter().copied().collect()
    }

    /// Same labels, every entry replaced by `f(row, col, value)`.
    pub fn map_indexed<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, usize, f64) -> f64,
    {
        let (rows, cols) = self.values.shape();
        Self {
            row_labels: self.row_labels.clone(),
            col_labels: self.col_labels.clone(),
            values: DMatrix::from_fn(rows, cols, |i, j| f(i, j, self.values[(i, j)])),
        }
    }

    /// Swap rows and columns, labels included.
    pub fn transpose(&self) -> Self {
        Self {
            row_labels: self.col_labels.clone(),
            col_labels: self.row_labels.clone(),
            values: self.values.transpose(),
        }
    }

    /// Read the matrix back as a scalar aggregate table, treating columns as
    /// units and rows as conditions.
    pub fn to_aggregate(&self) -> AggregateTable<f64> {
        let (rows, cols) = self.values.shape();
        let mut values = Vec::with_capacity(rows * cols);
        for col in 0..cols {
            for row in 0..rows {
                values.push(self.values[(row, col)]);
            }
        }
        AggregateTable {
            units: self.col_labels.clone(),
            conditions: self.row_labels.clone(),
            values,
        }
    }

    /// Count of NaN entries.
    pub fn nan_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

fn position(labels: &[String], label: &str, axis: &'static str) -> Result<usize> {
    labels
        .iter()
        .position(|l| l == label)
        .ok_or_else(|| Error::MissingLabel {
            label: label.to_string(),
            axis,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(rows: usize, cols: usize) -> Trace {
        DMatrix::from_fn(rows, cols, |i, j| (i * cols + j) as f64)
    }

    #[test]
    fn test_trace_table_lookup() {
        let table = TraceTable::new()
            .with_trace("cell1", "odourA", trace(4, 10))
            .unwrap()
            .with_trace("cell1", "odourB", trace(3, 10))
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("cell1", "odourB").unwrap().nrows(), 3);
        assert_eq!(table.timepoints("cell1"), Some(10));
        assert_eq!(table.conditions("cell1").collect::<Vec<_>>(), ["odourA", "odourB"]);
        assert!(!table.contains("cell2", "odourA"));
    }

    #[test]
    fn test_trace_table_missing_pair() {
        let table = TraceTable::new().with_trace("cell1", "odourA", trace(2, 5)).unwrap();
        let err = table.get("cell1", "odourZ").unwrap_err();
        assert_eq!(
            err,
            Error::MissingTrace {
                unit: "cell1".into(),
                condition: "odourZ".into()
            }
        );
    }

    #[test]
    fn test_trace_table_rejects_timepoint_mismatch() {
        let mut table = TraceTable::new();
        table.insert("cell1", "odourA", trace(2, 5)).unwrap();
        let err = table.insert("cell1", "odourB", trace(2, 6)).unwrap_err();
        assert!(matches!(err, Error::TimepointMismatch { expected: 5, found: 6, .. }));
        // Other units are free to use another length
        table.insert("cell2", "odourA", trace(2, 6)).unwrap();
    }

    #[test]
    fn test_aggregate_layout_and_matrix() {
        let table = AggregateTable::try_build(&["u1", "u2"], &["c1", "c2", "c3"], |u, c| {
            let base = if u == "u1" { 0.0 } else { 10.0 };
            Ok(base + c[1..].parse::<f64>().unwrap())
        })
        .unwrap();

        assert_eq!(*table.get("u2", "c3").unwrap(), 13.0);
        let m = table.to_matrix();
        assert_eq!(m.row_labels(), ["c1", "c2", "c3"]);
        assert_eq!(m.col_labels(), ["u1", "u2"]);
        assert_eq!(m.get("c2", "u2").unwrap(), 12.0);
        assert_eq!(m.to_aggregate(), table);
    }

    #[test]
    fn test_aggregate_missing_label() {
        let table = AggregateTable::try_build(&["u1"], &["c1"], |_, _| Ok(1.0)).unwrap();
        assert!(matches!(
            table.get("u1", "c9"),
            Err(Error::MissingLabel { axis: "condition", .. })
        ));
    }

    #[test]
    fn test_labeled_matrix_shape_check() {
        let err = LabeledMatrix::new(vec!["a"], vec!["x", "y"], DMatrix::zeros(2, 2)).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_labeled_matrix_transpose() {
        let m = LabeledMatrix::from_rows(vec!["r1", "r2"], vec!["c1", "c2", "c3"], &[
            1.0, 2.0, 3.0, //
            4.0, 5.0, 6.0,
        ])
        .unwrap();
        let t = m.transpose();
        assert_eq!(t.row_labels(), ["c1", "c2", "c3"]);
        assert_eq!(t.get("c3", "r2").unwrap(), 6.0);
        assert_eq!(m.row(1), vec![4.0, 5.0, 6.0]);
        assert_eq!(m.column(0), vec![1.0, 4.0]);
    }

    #[test]
    fn test_labeled_matrix_deserialize_checks_shape() {
        let m = LabeledMatrix::from_rows(vec!["r1", "r2"], vec!["c1", "c2"], &[1.0, 2.0, 3.0, 4.0]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: LabeledMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);

        let bad = json.replace(r#"["r1","r2"]"#, r#"["r1","r2","r3"]"#);
        assert_ne!(bad, json);
        let err = serde_json::from_str::<LabeledMatrix>(&bad).unwrap_err();
        assert!(err.to_string().contains("labels are 3x2"), "{err}");
    }
}
