//! Fixed numerical conventions.

/// Delta degrees of freedom for every standard deviation in the crate.
///
/// `1` gives the sample standard deviation, which is what the response
/// normalization was calibrated against.
pub const STD_DDOF: usize = 1;

/// Trials averaged into the response integral when none are given (1-based).
pub const DEFAULT_SELECTED_TRIALS: [usize; 4] = [1, 2, 3, 4];
