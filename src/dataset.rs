//! Explicit per-dataset handle.
//!
//! Everything an analysis needs about one imaging dataset travels together
//! in a [`Dataset`] that is passed to each call; nothing is looked up from
//! process-wide state.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::groups::GroupMapping;
use crate::helpers::trial_time_axis;
use crate::table::TraceTable;

/// Acquisition metadata of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    /// Dataset identifier (e.g. the animal/sample ID).
    pub name: String,
    /// Sampling rate of the traces in Hz.
    pub sample_rate_hz: f64,
    /// Length of one trimmed trial in seconds.
    pub trial_length_s: f64,
    /// Time from trial start to stimulus onset in seconds.
    pub baseline_s: f64,
    /// Stimulus conditions (odour/modality pairs), in presentation order.
    pub conditions: Vec<String>,
}

/// Traces, group mapping and metadata of one dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    info: DatasetInfo,
    traces: TraceTable,
    groups: GroupMapping,
}

impl Dataset {
    /// Bundle the parts of a dataset.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSampleRate`] unless the sampling rate is finite and positive.
    pub fn new(info: DatasetInfo, traces: TraceTable, groups: GroupMapping) -> Result<Self> {
        if !info.sample_rate_hz.is_finite() || info.sample_rate_hz <= 0.0 {
            return Err(Error::InvalidSampleRate(info.sample_rate_hz));
        }
        Ok(Self { info, traces, groups })
    }

    /// Acquisition metadata.
    pub fn info(&self) -> &DatasetInfo {
        &self.info
    }

    /// Raw traces.
    pub fn traces(&self) -> &TraceTable {
        &self.traces
    }

    /// Unit-to-group mapping.
    pub fn groups(&self) -> &GroupMapping {
        &self.groups
    }

    /// Onset-aligned time axis of one trial, in seconds.
    pub fn time_axis(&self) -> Result<Vec<f64>> {
        trial_time_axis(self.info.trial_length_s, self.info.sample_rate_hz, self.info.baseline_s)
    }

    /// Mapped (unit, condition) pairs that have no trace.
    pub fn missing_traces(&self) -> Vec<(String, String)> {
        self.groups
            .units()
            .iter()
            .flat_map(|unit| {
                self.info
                    .conditions
                    .iter()
                    .filter(move |condition| !self.traces.contains(unit, condition))
                    .map(move |condition| (unit.clone(), condition.clone()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn info() -> DatasetInfo {
        serde_json::from_str(
            r#"{
                "name": "Y489",
                "sample_rate_hz": 10.0,
                "trial_length_s": 40.0,
                "baseline_s": 3.0,
                "conditions": ["mod01_odour1", "mod01_odour2"]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_missing_traces() {
        let traces = TraceTable::new()
            .with_trace("c1", "mod01_odour1", DMatrix::zeros(4, 400))
            .unwrap();
        let groups = GroupMapping::new(vec!["c1"], vec!["g1"]).unwrap();
        let ds = Dataset::new(info(), traces, groups).unwrap();

        assert_eq!(ds.missing_traces(), vec![("c1".to_string(), "mod01_odour2".to_string())]);
        assert_eq!(ds.time_axis().unwrap().len(), 400);
    }

    #[test]
    fn test_rejects_bad_rate() {
        let mut bad = info();
        bad.sample_rate_hz = f64::NAN;
        let groups = GroupMapping::new(Vec::<String>::new(), Vec::<String>::new()).unwrap();
        assert!(Dataset::new(bad, TraceTable::new(), groups).is_err());
    }
}
