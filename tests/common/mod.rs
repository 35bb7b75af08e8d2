//! Synthetic glomerular datasets shared by integration tests.

#![allow(dead_code)]

use nalgebra::DMatrix;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use sistercorr::{Dataset, DatasetInfo, GroupMapping, TraceTable};

/// Number of odour conditions in the synthetic dataset.
pub const CONDITIONS: usize = 8;

/// Tuning of each glomerulus to the odour conditions.
const PROFILES: [[f64; CONDITIONS]; 3] = [
    [5.0, 1.0, 1.0, 1.0, 4.0, 1.0, 1.0, 1.0],
    [1.0, 5.0, 1.0, 1.0, 1.0, 4.0, 1.0, 1.0],
    [1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 4.0, 1.0],
];

/// Three glomeruli with two sister cells each, 4 trials of 10 s at 10 Hz.
///
/// Cells respond with their glomerulus' profile (times a per-cell gain)
/// from 3 s to 8 s, plus small uniform noise.
pub fn synthetic_dataset(seed: u64) -> Dataset {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let conditions: Vec<String> = (1..=CONDITIONS).map(|k| format!("mod01_odour{k}")).collect();

    let mut traces = TraceTable::new();
    let mut units = Vec::new();
    let mut groups = Vec::new();

    for (g, profile) in PROFILES.iter().enumerate() {
        for sister in 0..2 {
            let unit = format!("TC_glom{g}_cell{sister}");
            let gain = 1.0 + 2.0 * sister as f64;

            for (c, condition) in conditions.iter().enumerate() {
                let trace = DMatrix::from_fn(4, 100, |_, t| {
                    let signal = if (30..80).contains(&t) { profile[c] * gain } else { 0.0 };
                    signal + rng.random_range(-0.05..0.05)
                });
                traces.insert(unit.as_str(), condition.as_str(), trace).unwrap();
            }

            units.push(unit);
            groups.push(format!("glom{g}"));
        }
    }

    let info = DatasetInfo {
        name: "synthetic".to_string(),
        sample_rate_hz: 10.0,
        trial_length_s: 10.0,
        baseline_s: 3.0,
        conditions,
    };
    Dataset::new(info, traces, GroupMapping::new(units, groups).unwrap()).unwrap()
}

/// Random `[trials x timepoints]` trace with values in [-1, 1).
pub fn random_trace(rng: &mut Xoshiro256PlusPlus, trials: usize, timepoints: usize) -> DMatrix<f64> {
    DMatrix::from_fn(trials, timepoints, |_, _| rng.random_range(-1.0..1.0))
}
