//! Statistical primitives shared by the aggregation and analysis stages.
//!
//! - Moments: mean and standard deviation with a fixed ddof convention
//! - Pearson correlation that keeps NaN for constant inputs
//! - NaN-propagating extrema for shared axis scaling

mod correlation;
mod extrema;
mod moments;

pub(crate) use correlation::pearson;
pub use extrema::Extremes;
pub use moments::{mean, std_dev};
