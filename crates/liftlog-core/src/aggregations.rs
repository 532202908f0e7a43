use chrono::NaiveDate;
use liftlog_parser::columns::{MUSCLE_GROUP, SESSION_DAY};
use polars::prelude::*;
use serde::Serialize;
use tracing::warn;

use crate::enricher::{ONE_REP_MAX_ESTIMATE, VOLUME};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleGroupVolume {
    pub muscle_group: String,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MuscleGroupBreakdown {
    Available { groups: Vec<MuscleGroupVolume> },
    /// The export had no `muscle_group` column.
    Skipped { reason: String },
}

impl MuscleGroupBreakdown {
    pub fn is_skipped(&self) -> bool {
        matches!(self, MuscleGroupBreakdown::Skipped { .. })
    }
}

/// Best estimated one-rep-max per calendar day, ascending by date. Days with no
/// estimate at all are omitted.
pub fn daily_max_one_rep_max(df: &DataFrame) -> PolarsResult<Vec<DailyValue>> {
    let grouped = df
        .clone()
        .lazy()
        .filter(col(ONE_REP_MAX_ESTIMATE).is_not_null())
        .group_by([col(SESSION_DAY)])
        .agg([col(ONE_REP_MAX_ESTIMATE).max()])
        .sort([SESSION_DAY], SortMultipleOptions::default())
        .collect()?;

    daily_values(&grouped, ONE_REP_MAX_ESTIMATE)
}

/// Summed volume per calendar day, ascending by date. Null volumes are excluded
/// rather than counted as zero, so a day with only null volumes is omitted.
pub fn daily_volume(df: &DataFrame) -> PolarsResult<Vec<DailyValue>> {
    let grouped = df
        .clone()
        .lazy()
        .filter(col(VOLUME).is_not_null())
        .group_by([col(SESSION_DAY)])
        .agg([col(VOLUME).sum()])
        .sort([SESSION_DAY], SortMultipleOptions::default())
        .collect()?;

    daily_values(&grouped, VOLUME)
}

/// Summed volume per muscle group, ordered by group name. Rows without a muscle
/// group or volume are excluded.
pub fn muscle_group_volume(df: &DataFrame) -> PolarsResult<MuscleGroupBreakdown> {
    if !df.get_column_names().iter().any(|name| *name == MUSCLE_GROUP) {
        warn!("export has no muscle_group column; skipping muscle group breakdown");
        return Ok(MuscleGroupBreakdown::Skipped {
            reason: format!("the export has no '{MUSCLE_GROUP}' column"),
        });
    }

    let grouped = df
        .clone()
        .lazy()
        .filter(
            col(MUSCLE_GROUP)
                .is_not_null()
                .and(col(VOLUME).is_not_null()),
        )
        .group_by([col(MUSCLE_GROUP)])
        .agg([col(VOLUME).sum()])
        .sort([MUSCLE_GROUP], SortMultipleOptions::default())
        .collect()?;

    let names = grouped.column(MUSCLE_GROUP)?.str()?;
    let volumes = grouped.column(VOLUME)?.f64()?;

    let mut groups = Vec::with_capacity(grouped.height());
    for idx in 0..grouped.height() {
        if let (Some(name), Some(volume)) = (names.get(idx), volumes.get(idx)) {
            groups.push(MuscleGroupVolume {
                muscle_group: name.to_string(),
                volume,
            });
        }
    }

    Ok(MuscleGroupBreakdown::Available { groups })
}

fn daily_values(grouped: &DataFrame, value_column: &str) -> PolarsResult<Vec<DailyValue>> {
    let days = grouped.column(SESSION_DAY)?.i32()?;
    let values = grouped.column(value_column)?.f64()?;

    let mut out = Vec::with_capacity(grouped.height());
    for idx in 0..grouped.height() {
        let (Some(day), Some(value)) = (days.get(idx), values.get(idx)) else {
            continue;
        };
        if let Some(date) = NaiveDate::from_num_days_from_ce_opt(day) {
            out.push(DailyValue { date, value });
        }
    }
    Ok(out)
}
