//! Self / sister / stranger partitioning of a unit-by-unit correlation matrix.
//!
//! Two units are **sisters** when they are distinct but belong to the same
//! group (glomerulus), and **strangers** when their groups differ. The
//! diagonal entry of a unit is its **self** value.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::groups::GroupMapping;
use crate::statistics::mean;
use crate::table::LabeledMatrix;

/// Relationship between two units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    /// The same unit on both axes.
    #[serde(rename = "self")]
    SelfPair,
    /// Different units of the same group.
    Sister,
    /// Units of different groups.
    Stranger,
}

impl Relationship {
    /// All classes, in reporting order.
    pub const ALL: [Relationship; 3] = [Relationship::SelfPair, Relationship::Sister, Relationship::Stranger];

    /// Classify a pair of units by identity, then by group.
    pub fn classify(unit_a: &str, group_a: &str, unit_b: &str, group_b: &str) -> Self {
        if unit_a == unit_b {
            Relationship::SelfPair
        } else if group_a == group_b {
            Relationship::Sister
        } else {
            Relationship::Stranger
        }
    }

    /// Lowercase name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Relationship::SelfPair => "self",
            Relationship::Sister => "sister",
            Relationship::Stranger => "stranger",
        }
    }
}

/// Matrix values of every unordered unit pair, split by relationship.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipSubsets {
    /// Diagonal values, one per unit.
    #[serde(rename = "self")]
    pub self_pairs: Vec<f64>,
    /// Same-group pairs.
    pub sister: Vec<f64>,
    /// Different-group pairs.
    pub stranger: Vec<f64>,
}

/// Count and mean of one relationship class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassSummary {
    /// The class summarized.
    pub relationship: Relationship,
    /// Number of pairs.
    pub count: usize,
    /// Mean value, NaN for an empty class.
    pub mean: f64,
}

impl RelationshipSubsets {
    /// Values of one class.
    pub fn get(&self, relationship: Relationship) -> &[f64] {
        match relationship {
            Relationship::SelfPair => &self.self_pairs,
            Relationship::Sister => &self.sister,
            Relationship::Stranger => &self.stranger,
        }
    }

    /// Total number of pairs across all classes.
    pub fn total(&self) -> usize {
        self.self_pairs.len() + self.sister.len() + self.stranger.len()
    }

    /// Count and mean per class.
    pub fn summary(&self) -> [ClassSummary; 3] {
        Relationship::ALL.map(|relationship| {
            let values = self.get(relationship);
            ClassSummary {
                relationship,
                count: values.len(),
                mean: mean(values),
            }
        })
    }

    fn push(&mut self, relationship: Relationship, value: f64) {
        match relationship {
            Relationship::SelfPair => self.self_pairs.push(value),
            Relationship::Sister => self.sister.push(value),
            Relationship::Stranger => self.stranger.push(value),
        }
    }
}

/// Self value and mean sister/stranger values of one unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitRelationships {
    /// The unit.
    pub unit: String,
    /// Group the unit belongs to.
    pub group: String,
    /// Diagonal entry.
    #[serde(rename = "self")]
    pub self_value: f64,
    /// Mean over the unit's sisters; NaN without sisters.
    pub sister: f64,
    /// Mean over the unit's strangers; NaN without strangers.
    pub stranger: f64,
}

/// Per-unit relationship averages, in group-mapping order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelationshipTable {
    rows: Vec<UnitRelationships>,
}

impl RelationshipTable {
    /// Row of `unit`, if present.
    pub fn get(&self, unit: &str) -> Option<&UnitRelationships> {
        self.rows.iter().find(|r| r.unit == unit)
    }

    /// Rows in group-mapping order.
    pub fn rows(&self) -> &[UnitRelationships] {
        &self.rows
    }

    /// Number of units.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Units as rows, `self`/`sister`/`stranger` as columns.
    pub fn to_matrix(&self) -> LabeledMatrix {
        let units = self.rows.iter().map(|r| r.unit.clone()).collect();
        let columns = Relationship::ALL.iter().map(|r| r.name().to_string()).collect();
        let values = DMatrix::from_fn(self.rows.len(), 3, |i, j| {
            let r = &self.rows[i];
            [r.self_value, r.sister, r.stranger][j]
        });
        LabeledMatrix::from_parts(units, columns, values)
    }
}

/// Resolve every mapped unit to its (row, column) position in `matrix`.
fn positions(matrix: &LabeledMatrix, groups: &GroupMapping) -> Result<Vec<(usize, usize)>> {
    groups
        .units()
        .iter()
        .map(|u| Ok((matrix.row_index(u)?, matrix.col_index(u)?)))
        .collect()
}

/// Split the upper triangle (diagonal included) of `matrix` by relationship.
///
/// Every unordered pair of mapped units is visited once, in mapping order,
/// so `m` units give `m` self values and `m(m+1)/2` values overall.
///
/// # Errors
///
/// [`Error::MissingLabel`](crate::Error::MissingLabel) if a mapped unit is
/// missing from either axis of `matrix`.
pub fn subset_by_relationship(matrix: &LabeledMatrix, groups: &GroupMapping) -> Result<RelationshipSubsets> {
    let pos = positions(matrix, groups)?;
    let pairs: Vec<(&str, &str)> = groups.iter().collect();
    debug!(units = pairs.len(), "partitioning correlation pairs");

    let mut subsets = RelationshipSubsets::default();
    for (i, &(unit_i, group_i)) in pairs.iter().enumerate() {
        for (j, &(unit_j, group_j)) in pairs.iter().enumerate().skip(i) {
            let value = matrix.values()[(pos[i].0, pos[j].1)];
            subsets.push(Relationship::classify(unit_i, group_i, unit_j, group_j), value);
        }
    }

    Ok(subsets)
}

/// Self value and mean sister/stranger value for every mapped unit.
///
/// Each unit's means run over its full matrix row, restricted to mapped
/// units. A unit with no sisters (or no strangers) gets NaN for that mean.
///
/// # Errors
///
/// [`Error::MissingLabel`](crate::Error::MissingLabel) if a mapped unit is
/// missing from either axis of `matrix`.
pub fn average_per_unit(matrix: &LabeledMatrix, groups: &GroupMapping) -> Result<RelationshipTable> {
    let pos = positions(matrix, groups)?;
    let pairs: Vec<(&str, &str)> = groups.iter().collect();

    let rows = pairs
        .iter()
        .enumerate()
        .map(|(i, &(unit_i, group_i))| {
            let mut own = RelationshipSubsets::default();
            for (j, &(unit_j, group_j)) in pairs.iter().enumerate() {
                let value = matrix.values()[(pos[i].0, pos[j].1)];
                own.push(Relationship::classify(unit_i, group_i, unit_j, group_j), value);
            }

            UnitRelationships {
                unit: unit_i.to_string(),
                group: group_i.to_string(),
                self_value: mean(&own.self_pairs),
                sister: mean(&own.sister),
                stranger: mean(&own.stranger),
            }
        })
        .collect();

    Ok(RelationshipTable { rows })
}
