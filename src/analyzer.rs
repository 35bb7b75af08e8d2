//! Main `SisterAnalysis` entry point and builder.

use tracing::{debug, info};

use crate::aggregate::integrate;
use crate::analysis::{
    average_per_unit, correlate, normalize_table, subset_by_relationship, Alignment, NormAxis,
};
use crate::config::Config;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::result::AnalysisReport;

/// Runs the response → correlation → relationship pipeline on one dataset.
///
/// Use the builder methods to adjust the configuration:
///
/// ```ignore
/// use sistercorr::{NormAxis, SisterAnalysis};
///
/// let report = SisterAnalysis::new()
///     .window(3.0, 13.0)
///     .selected_trials([1, 2, 3])
///     .norm_axis(NormAxis::ByCondition)
///     .run(&dataset)?;
///
/// for class in report.summary() {
///     println!("{:?}: {:.3}", class.relationship, class.mean);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SisterAnalysis {
    config: Config,
}

impl SisterAnalysis {
    /// Create with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from an existing configuration.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Set the response window, in seconds from trial start.
    pub fn window(mut self, start_s: f64, end_s: f64) -> Self {
        self.config.window_start_s = start_s;
        self.config.window_end_s = end_s;
        self
    }

    /// Set the 1-based trials averaged into each response.
    pub fn selected_trials(mut self, trials: impl IntoIterator<Item = usize>) -> Self {
        self.config.selected_trials = trials.into_iter().collect();
        self
    }

    /// Set the normalization axis.
    pub fn norm_axis(mut self, axis: NormAxis) -> Self {
        self.config.norm_axis = axis;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyse every mapped unit of `dataset` over all of its conditions.
    ///
    /// 1. Integrate each trace over the response window and average the
    ///    selected trials
    /// 2. Normalize the conditions x units response table
    /// 3. Correlate units with each other across conditions
    /// 4. Partition the correlation matrix into self/sister/stranger pairs
    ///
    /// # Errors
    ///
    /// Any configuration error, and lookup errors for mapped units or
    /// conditions missing from the trace table.
    pub fn run(&self, dataset: &Dataset) -> Result<AnalysisReport> {
        self.config.validate()?;

        let info = dataset.info();
        let groups = dataset.groups();
        info!(
            dataset = info.name.as_str(),
            units = groups.len(),
            conditions = info.conditions.len(),
            "starting sister analysis"
        );

        let integrals = integrate(
            dataset.traces(),
            groups.units(),
            info.conditions.as_slice(),
            info.sample_rate_hz,
            self.config.window_start_s,
            self.config.window_end_s,
            &self.config.selected_trials,
        )?;
        debug!("response integrals computed");

        let responses = integrals.trial_mean.to_matrix();
        let normalized = normalize_table(&integrals.trial_mean, self.config.norm_axis);

        let correlation = correlate(&normalized, &normalized, Alignment::ByColumn)?;
        debug!(nan = correlation.nan_count(), "unit correlation matrix computed");

        let subsets = subset_by_relationship(&correlation, groups)?;
        let per_unit = average_per_unit(&correlation, groups)?;
        info!(
            self_pairs = subsets.self_pairs.len(),
            sister_pairs = subsets.sister.len(),
            stranger_pairs = subsets.stranger.len(),
            "sister analysis complete"
        );

        Ok(AnalysisReport {
            dataset: info.name.clone(),
            config: self.config.clone(),
            responses,
            normalized,
            correlation,
            subsets,
            per_unit,
        })
    }
}
