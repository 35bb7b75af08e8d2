//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::analysis::Relationship;
use crate::result::AnalysisReport;

/// Format an AnalysisReport for human-readable terminal output.
pub fn format_report(report: &AnalysisReport) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("sistercorr\n");
    output.push_str(&sep);
    output.push_str("\n\n");

    output.push_str(&format!("  Dataset: {}\n", report.dataset));
    output.push_str(&format!(
        "  Units: {}, conditions: {}\n",
        report.unit_count(),
        report.responses.row_labels().len()
    ));
    output.push_str(&format!(
        "  Response window: {:.2}\u{2013}{:.2} s, trials {:?}\n",
        report.config.window_start_s, report.config.window_end_s, report.config.selected_trials
    ));
    output.push_str(&format!("  Normalization: {}\n\n", report.config.norm_axis));

    output.push_str("  Correlation by relationship:\n");
    for class in report.summary() {
        output.push_str(&format!(
            "    {:<10} n = {:<6} mean r = {}\n",
            format_relationship(class.relationship),
            class.count,
            format_value(class.mean)
        ));
    }
    output.push('\n');

    output.push_str(&format!(
        "  {:<20} {:>8} {:>8} {:>8}\n",
        "unit", "self", "sister", "stranger"
    ));
    for row in report.per_unit.rows() {
        output.push_str(&format!(
            "  {:<20} {:>8} {:>8} {:>8}\n",
            row.unit,
            format_value(row.self_value),
            format_value(row.sister),
            format_value(row.stranger)
        ));
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');

    let undefined = report.correlation.nan_count();
    if undefined > 0 {
        output.push_str(&format!(
            "{}\n",
            format!("Note: {} correlation entries are undefined (constant responses).", undefined).yellow()
        ));
    }

    output
}

/// Pad before coloring so ANSI codes do not break column alignment.
fn format_relationship(relationship: Relationship) -> String {
    let name = format!("{:<10}", relationship.name());
    match relationship {
        Relationship::SelfPair => name.dimmed().to_string(),
        Relationship::Sister => name.green().bold().to_string(),
        Relationship::Stranger => name.cyan().to_string(),
    }
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_string()
    } else {
        format!("{:.3}", value)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::analysis::{average_per_unit, subset_by_relationship};
    use crate::config::Config;
    use crate::groups::GroupMapping;
    use crate::table::LabeledMatrix;

    pub(crate) fn make_test_report() -> AnalysisReport {
        let units = vec!["c1", "c2", "c3"];
        let correlation = LabeledMatrix::from_rows(units.clone(), units.clone(), &[
            1.0, 0.8, 0.1, //
            0.8, 1.0, 0.3, //
            0.1, 0.3, 1.0,
        ])
        .unwrap();
        let groups = GroupMapping::new(units.clone(), vec!["g1", "g1", "g2"]).unwrap();
        let responses =
            LabeledMatrix::from_rows(vec!["o1", "o2"], units, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();

        AnalysisReport {
            dataset: "Y489".to_string(),
            config: Config::default(),
            normalized: responses.clone(),
            responses,
            subsets: subset_by_relationship(&correlation, &groups).unwrap(),
            per_unit: average_per_unit(&correlation, &groups).unwrap(),
            correlation,
        }
    }

    #[test]
    fn test_format_report() {
        let output = format_report(&make_test_report());
        assert!(output.contains("sistercorr"));
        assert!(output.contains("Dataset: Y489"));
        assert!(output.contains("Units: 3, conditions: 2"));
        assert!(output.contains("0.800"));
    }

    #[test]
    fn test_undefined_values_shown() {
        let output = format_report(&make_test_report());
        // c3 has no sister partner
        assert!(output.contains("n/a"));
        assert!(!output.contains("undefined"));
    }
}
