//! Analysis report types.

use serde::{Deserialize, Serialize};

use crate::analysis::{ClassSummary, RelationshipSubsets, RelationshipTable};
use crate::config::Config;
use crate::table::LabeledMatrix;

/// Complete result of one self/sister/stranger analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Dataset the report was computed from.
    pub dataset: String,

    /// Configuration snapshot.
    pub config: Config,

    /// Trial-averaged response integrals, conditions x units.
    pub responses: LabeledMatrix,

    /// Responses after normalization, conditions x units.
    pub normalized: LabeledMatrix,

    /// Unit-by-unit Pearson correlation of normalized responses.
    pub correlation: LabeledMatrix,

    /// Correlation values of every unordered unit pair, by relationship.
    pub subsets: RelationshipSubsets,

    /// Per-unit self value and mean sister/stranger correlation.
    pub per_unit: RelationshipTable,
}

impl AnalysisReport {
    /// Count and mean correlation per relationship class.
    pub fn summary(&self) -> [ClassSummary; 3] {
        self.subsets.summary()
    }

    /// Number of units analysed.
    pub fn unit_count(&self) -> usize {
        self.per_unit.len()
    }
}
