//! Unit-to-group (glomerulus) assignment.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parallel lists of units and the group each unit belongs to.
///
/// Lists have equal length and every unit appears once. Deserialized
/// mappings go through the same checks as [`GroupMapping::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GroupLists")]
pub struct GroupMapping {
    units: Vec<String>,
    groups: Vec<String>,
}

/// Unchecked wire form of a [`GroupMapping`].
#[derive(Deserialize)]
struct GroupLists {
    units: Vec<String>,
    groups: Vec<String>,
}

impl TryFrom<GroupLists> for GroupMapping {
    type Error = Error;

    fn try_from(lists: GroupLists) -> Result<Self> {
        GroupMapping::new(lists.units, lists.groups)
    }
}

impl GroupMapping {
    /// Pair up units with their groups.
    ///
    /// # Errors
    ///
    /// - [`Error::GroupLengthMismatch`] if the lists differ in length
    /// - [`Error::DuplicateUnit`] if a unit is listed twice
    pub fn new<U, G>(units: Vec<U>, groups: Vec<G>) -> Result<Self>
    where
        U: Into<String>,
        G: Into<String>,
    {
        if units.len() != groups.len() {
            return Err(Error::GroupLengthMismatch {
                units: units.len(),
                groups: groups.len(),
            });
        }

        let units: Vec<String> = units.into_iter().map(Into::into).collect();
        let mut seen = HashSet::with_capacity(units.len());
        for unit in &units {
            if !seen.insert(unit.as_str()) {
                return Err(Error::DuplicateUnit(unit.clone()));
            }
        }

        Ok(Self {
            units,
            groups: groups.into_iter().map(Into::into).collect(),
        })
    }

    /// Units in mapping order.
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Group labels, parallel to [`units`](Self::units).
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Group of `unit`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownUnit`] if the unit is not mapped.
    pub fn group_of(&self, unit: &str) -> Result<&str> {
        self.units
            .iter()
            .position(|u| u == unit)
            .map(|i| self.groups[i].as_str())
            .ok_or_else(|| Error::UnknownUnit(unit.to_string()))
    }

    /// Other units in the same group as `unit`, in mapping order.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownUnit`] if the unit is not mapped.
    pub fn sisters_of(&self, unit: &str) -> Result<Vec<&str>> {
        let group = self.group_of(unit)?;
        Ok(self
            .iter()
            .filter(|&(u, g)| g == group && u != unit)
            .map(|(u, _)| u)
            .collect())
    }

    /// Iterate `(unit, group)` pairs in mapping order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.units
            .iter()
            .zip(&self.groups)
            .map(|(u, g)| (u.as_str(), g.as_str()))
    }

    /// Number of mapped units.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether no unit is mapped.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}
