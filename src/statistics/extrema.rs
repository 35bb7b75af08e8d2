//! Running minimum and maximum that do not swallow NaN.

/// Global minimum and maximum over a selection of samples.
///
/// Unlike `f64::min`/`f64::max`, a single NaN sample turns both bounds
/// into NaN.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extremes {
    /// Smallest value seen.
    pub min: f64,
    /// Largest value seen.
    pub max: f64,
}

impl Extremes {
    /// Fold `values` into min/max, or `None` when there are no values.
    pub fn of<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut acc: Option<Self> = None;
        for v in values {
            acc = Some(match acc {
                None => Self { min: v, max: v },
                Some(e) => e.include(v),
            });
        }
        acc
    }

    /// Combine with another set of bounds.
    pub fn merge(self, other: Self) -> Self {
        self.include(other.min).include(other.max)
    }

    fn include(self, v: f64) -> Self {
        if v.is_nan() || self.min.is_nan() {
            return Self {
                min: f64::NAN,
                max: f64::NAN,
            };
        }
        Self {
            min: self.min.min(v),
            max: self.max.max(v),
        }
    }
}
