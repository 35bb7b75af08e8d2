//! Analysis stages applied to aggregated responses.
//!
//! 1. **Normalization** ([`normalize`]): rescale responses by the standard
//!    deviation of each unit or each condition
//! 2. **Correlation** ([`correlate`]): Pearson correlation between the columns
//!    (or rows) of two labeled tables
//! 3. **Partitioning** ([`subset_by_relationship`], [`average_per_unit`]):
//!    split a unit-by-unit correlation matrix into self, sister and stranger
//!    pairs

mod correlate;
mod normalize;
mod partition;

pub use correlate::{correlate, Alignment};
pub use normalize::{normalize, normalize_table, Divisors, NormAxis, Normalized, OutputForm};
pub use partition::{
    average_per_unit, subset_by_relationship, ClassSummary, Relationship, RelationshipSubsets,
    RelationshipTable, UnitRelationships,
};
