//! Pearson product-moment correlation.

/// Pearson correlation coefficient of two equally long series.
///
/// # Formula
///
/// ```text
/// r = sum(da * db) / (sqrt(sum(da^2)) * sqrt(sum(db^2)))
/// ```
///
/// where `da = a - mean_a` and `db = b - mean_b`. Deviations are divided by
/// their largest magnitude before squaring, so `r` does not depend on the
/// scale of either input.
///
/// The result is clamped to [-1, 1] to absorb rounding. A constant series
/// has zero variance and yields NaN; that value is returned as is. Callers
/// pass series of equal length; any surplus of the longer one is ignored.
pub(crate) fn pearson(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len(), "Pearson inputs must have equal length");

    let n = a.len().min(b.len());
    if n == 0 {
        return f64::NAN;
    }
    let (a, b) = (&a[..n], &b[..n]);

    let mean_a = a.iter().sum::<f64>() / n as f64;
    let mean_b = b.iter().sum::<f64>() / n as f64;

    let scale_a = max_deviation(a, mean_a);
    let scale_b = max_deviation(b, mean_b);
    if scale_a == 0.0 || scale_b == 0.0 {
        return f64::NAN;
    }

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = (x - mean_a) / scale_a;
        let dy = (y - mean_b) / scale_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let r = cov / (var_a.sqrt() * var_b.sqrt());
    // clamp() keeps NaN as NaN
    r.clamp(-1.0, 1.0)
}

/// Largest `|x - mean|`, NaN if any deviation is NaN.
fn max_deviation(xs: &[f64], mean: f64) -> f64 {
    xs.iter().fold(0.0, |acc: f64, &x| {
        let d = (x - mean).abs();
        if d.is_nan() || acc.is_nan() {
            f64::NAN
        } else {
            acc.max(d)
        }
    })
}
