//! End-to-end integration tests.

mod common;

use common::{synthetic_dataset, CONDITIONS};
use sistercorr::output::{format_report, to_json};
use sistercorr::{
    analyze, Dataset, DatasetInfo, Error, GroupMapping, NormAxis, Relationship, SisterAnalysis,
    TraceTable,
};

/// Sisters share a tuning profile, so they correlate far better than strangers.
#[test]
fn sisters_correlate_more_than_strangers() {
    let dataset = synthetic_dataset(7);
    let report = analyze(&dataset).unwrap();

    let summary = report.summary();
    let sister = summary[1];
    let stranger = summary[2];
    assert_eq!(sister.relationship, Relationship::Sister);
    assert!(sister.mean > 0.9, "sister mean {}", sister.mean);
    assert!(stranger.mean < 0.0, "stranger mean {}", stranger.mean);
}

#[test]
fn report_shapes() {
    let dataset = synthetic_dataset(11);
    let report = SisterAnalysis::new().run(&dataset).unwrap();

    assert_eq!(report.dataset, "synthetic");
    assert_eq!(report.unit_count(), 6);
    assert_eq!(report.responses.row_labels().len(), CONDITIONS);
    assert_eq!(report.correlation.values().shape(), (6, 6));
    // 3 glomeruli of 2 cells: 6 self, 3 sister, 12 stranger pairs
    assert_eq!(report.subsets.self_pairs.len(), 6);
    assert_eq!(report.subsets.sister.len(), 3);
    assert_eq!(report.subsets.stranger.len(), 12);

    for row in report.per_unit.rows() {
        assert!((row.self_value - 1.0).abs() < 1e-9);
    }
}

#[test]
fn per_unit_sister_mean_matches_sister_lookup() {
    let dataset = synthetic_dataset(5);
    let report = analyze(&dataset).unwrap();
    let groups = dataset.groups();

    for row in report.per_unit.rows() {
        let sisters = groups.sisters_of(&row.unit).unwrap();
        assert_eq!(sisters.len(), 1);
        let expected = report.correlation.get(&row.unit, sisters[0]).unwrap();
        assert!((row.sister - expected).abs() < 1e-12);
    }
    assert!(matches!(
        groups.sisters_of("TC_glom9_cell0"),
        Err(Error::UnknownUnit(_))
    ));
}

#[test]
fn normalization_axis_changes_responses_not_labels() {
    let dataset = synthetic_dataset(3);
    let by_unit = SisterAnalysis::new().run(&dataset).unwrap();
    let by_condition = SisterAnalysis::new()
        .norm_axis(NormAxis::ByCondition)
        .run(&dataset)
        .unwrap();

    assert_eq!(by_unit.normalized.col_labels(), by_condition.normalized.col_labels());
    assert_ne!(by_unit.normalized.values(), by_condition.normalized.values());
    // Column scaling leaves Pearson correlation across conditions untouched
    let raw = sistercorr::analysis::correlate(
        &by_unit.responses,
        &by_unit.responses,
        sistercorr::Alignment::ByColumn,
    )
    .unwrap();
    for (a, b) in raw.values().iter().zip(by_unit.correlation.values().iter()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn missing_condition_is_a_lookup_error() {
    let dataset = synthetic_dataset(5);
    let mut info = dataset.info().clone();
    info.conditions.push("mod02_odour99".to_string());
    let broken = Dataset::new(info, dataset.traces().clone(), dataset.groups().clone()).unwrap();

    assert_eq!(broken.missing_traces().len(), 6);
    let err = analyze(&broken).unwrap_err();
    assert!(matches!(err, Error::MissingTrace { ref condition, .. } if condition == "mod02_odour99"));
}

#[test]
fn too_few_trials_for_default_selection() {
    let dataset = synthetic_dataset(5);
    let err = SisterAnalysis::new()
        .selected_trials([1, 2, 3, 4, 5])
        .run(&dataset)
        .unwrap_err();
    assert!(matches!(err, Error::TrialOutOfRange { trial: 5, available: 4, .. }));
}

#[test]
fn invalid_window_rejected_before_analysis() {
    let dataset = synthetic_dataset(5);
    let err = SisterAnalysis::new().window(8.0, 3.0).run(&dataset).unwrap_err();
    assert!(matches!(err, Error::InvalidWindow { .. }));
}

/// A cell that never responds has an undefined correlation; it must surface
/// as NaN rather than abort the analysis.
#[test]
fn silent_cell_yields_nan_not_error() {
    let info = DatasetInfo {
        name: "silent".to_string(),
        sample_rate_hz: 10.0,
        trial_length_s: 10.0,
        baseline_s: 3.0,
        conditions: vec!["o1".into(), "o2".into(), "o3".into()],
    };
    let mut traces = TraceTable::new();
    for (k, condition) in info.conditions.iter().enumerate() {
        let active = nalgebra::DMatrix::from_element(4, 100, (k + 1) as f64);
        traces.insert("active", condition.as_str(), active).unwrap();
        traces.insert("active2", condition.as_str(), nalgebra::DMatrix::from_element(4, 100, (k * k) as f64)).unwrap();
        traces.insert("silent", condition.as_str(), nalgebra::DMatrix::zeros(4, 100)).unwrap();
    }
    let groups = GroupMapping::new(vec!["active", "active2", "silent"], vec!["g1", "g1", "g1"]).unwrap();
    let dataset = Dataset::new(info, traces, groups).unwrap();

    let report = analyze(&dataset).unwrap();
    assert!(report.correlation.get("active", "silent").unwrap().is_nan());
    assert!(report.per_unit.get("silent").unwrap().sister.is_nan());
    assert!(report.per_unit.get("active").unwrap().stranger.is_nan());
    assert!(report.correlation.get("active", "active2").unwrap() > 0.9);

    let text = format_report(&report);
    assert!(text.contains("undefined"));
    assert!(to_json(&report).unwrap().contains("null"));
}
