//! Mean and standard deviation over plain slices.

/// Arithmetic mean of `values`.
///
/// Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation with `ddof` delta degrees of freedom.
///
/// # Formula
///
/// ```text
/// s = sqrt(sum((x - mean)^2) / (n - ddof))
/// ```
///
/// Returns NaN when `n <= ddof`, so a single observation has no sample
/// standard deviation.
pub fn std_dev(values: &[f64], ddof: usize) -> f64 {
    let n = values.len();
    if n <= ddof {
        return f64::NAN;
    }

    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|&x| (x - m).powi(2)).sum();

    (sum_sq / (n - ddof) as f64).sqrt()
}
