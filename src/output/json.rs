//! JSON export of analysis reports.
//!
//! `serde_json` has no representation for NaN, so undefined statistics (a
//! constant response, a cell without sisters) are written as `null`. Field
//! names follow the report structs; relationship classes appear as `self`,
//! `sister` and `stranger`.

use crate::result::AnalysisReport;

/// Report as a single-line JSON document.
///
/// # Errors
///
/// Propagates the `serde_json` error; report types contain only string
/// keys, so none is expected in practice.
pub fn to_json(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string(report)
}

/// Report as indented JSON, for files meant to be read by people.
///
/// # Errors
///
/// Same as [`to_json`].
pub fn to_json_pretty(report: &AnalysisReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
