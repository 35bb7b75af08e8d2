//! # sistercorr
//!
//! Trial-averaged calcium-imaging response statistics and correlation
//! structure between "self", "sister" (same glomerulus) and "stranger"
//! (different glomerulus) cells.
//!
//! The pipeline works on traces that are already loaded into memory:
//! - Trim and average raw traces across trials ([`aggregate`])
//! - Integrate responses over a time window ([`aggregate::integrate`])
//! - Normalize responses per cell or per odour ([`analysis::normalize`])
//! - Correlate cells across odours ([`analysis::correlate`])
//! - Partition the correlation matrix by relationship ([`analysis::subset_by_relationship`],
//!   [`analysis::average_per_unit`])
//!
//! Undefined statistics (a constant response vector, a cell without
//! sisters) are reported as NaN, never as zero.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sistercorr::{Dataset, DatasetInfo, GroupMapping, SisterAnalysis, TraceTable};
//!
//! let dataset = Dataset::new(info, traces, groups)?;
//! let report = SisterAnalysis::new().window(3.0, 8.0).run(&dataset)?;
//!
//! for class in report.summary() {
//!     println!("{}: n={} mean={:.3}", class.relationship.name(), class.count, class.mean);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod analyzer;
mod config;
mod constants;
mod dataset;
mod error;
mod groups;
mod result;
mod table;
mod types;

// Functional modules
pub mod aggregate;
pub mod analysis;
pub mod helpers;
pub mod output;
pub mod statistics;

// Re-exports for public API
pub use analyzer::SisterAnalysis;
pub use config::Config;
pub use constants::{DEFAULT_SELECTED_TRIALS, STD_DDOF};
pub use dataset::{Dataset, DatasetInfo};
pub use error::{Error, Result};
pub use groups::GroupMapping;
pub use result::AnalysisReport;
pub use table::{AggregateTable, LabeledMatrix, TraceTable};
pub use types::{Series, Trace};

pub use aggregate::{Integrals, SampleWindow};
pub use analysis::{
    Alignment, ClassSummary, NormAxis, Normalized, OutputForm, Relationship, RelationshipSubsets,
    RelationshipTable, UnitRelationships,
};
pub use statistics::Extremes;

/// Run the analysis with default configuration.
///
/// Shorthand for `SisterAnalysis::new().run(dataset)`.
pub fn analyze(dataset: &Dataset) -> Result<AnalysisReport> {
    SisterAnalysis::new().run(dataset)
}
