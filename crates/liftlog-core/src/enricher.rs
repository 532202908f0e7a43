use liftlog_parser::columns::{REPS, WEIGHT_KG};
use polars::prelude::*;

pub const VOLUME: &str = "volume";
pub const ONE_REP_MAX_ESTIMATE: &str = "one_rep_max_estimate";

const EPLEY_REP_DIVISOR: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedMetrics {
    pub volume: Option<f64>,
    pub one_rep_max_estimate: Option<f64>,
}

/// Epley estimate: `weight * (1 + reps / 30)`.
pub fn estimate_one_rep_max(weight_kg: f64, reps: i64) -> f64 {
    weight_kg * (1.0 + reps as f64 / EPLEY_REP_DIVISOR)
}

pub fn set_volume(weight_kg: f64, reps: i64) -> f64 {
    weight_kg * reps as f64
}

/// Both metrics are null unless weight and reps are present.
pub fn enrich_row(weight_kg: Option<f64>, reps: Option<i64>) -> DerivedMetrics {
    match (weight_kg, reps) {
        (Some(weight), Some(reps)) => DerivedMetrics {
            volume: Some(set_volume(weight, reps)),
            one_rep_max_estimate: Some(estimate_one_rep_max(weight, reps)),
        },
        _ => DerivedMetrics::default(),
    }
}

/// Returns a copy of `df` with `volume` and `one_rep_max_estimate` appended.
pub fn apply_derived_metrics(df: &DataFrame) -> Result<DataFrame, PolarsError> {
    let len = df.height();

    let weight = df.column(WEIGHT_KG)?.f64()?;
    let reps = df.column(REPS)?.i64()?;

    let mut volume = Vec::with_capacity(len);
    let mut one_rep_max = Vec::with_capacity(len);

    for idx in 0..len {
        let metrics = enrich_row(weight.get(idx), reps.get(idx));
        volume.push(metrics.volume);
        one_rep_max.push(metrics.one_rep_max_estimate);
    }

    let mut output = df.clone();
    output.hstack_mut(&mut [
        Series::new(VOLUME.into(), volume).into(),
        Series::new(ONE_REP_MAX_ESTIMATE.into(), one_rep_max).into(),
    ])?;

    Ok(output)
}
