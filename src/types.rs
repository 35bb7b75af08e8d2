//! Type aliases and common types.

use nalgebra::{DMatrix, DVector};

/// Raw fluorescence of one unit under one condition, `[trials x timepoints]`.
pub type Trace = DMatrix<f64>;

/// One value per timepoint or one value per trial.
pub type Series = DVector<f64>;
