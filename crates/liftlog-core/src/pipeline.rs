use chrono::{DateTime, NaiveDateTime};
use liftlog_parser::columns::{EXERCISE_TITLE, REPS, RPE, SET_INDEX, START_TIME, WEIGHT_KG};
use liftlog_parser::WorkoutLog;
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregations::{
    daily_max_one_rep_max, daily_volume, muscle_group_volume, DailyValue, MuscleGroupBreakdown,
};
use crate::config::DashboardConfig;
use crate::enricher::{apply_derived_metrics, ONE_REP_MAX_ESTIMATE, VOLUME};
use crate::error::Result;
use crate::filters::{exercise_options, filter_exercise, filter_window, resolve_exercise};
use crate::time_window::{TimeWindow, WindowBounds};

/// Current state of the window and exercise selectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub window: TimeWindow,
    pub exercise: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }
}

/// An enriched set as shown in the recent-sets table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentSet {
    pub start_time: NaiveDateTime,
    pub exercise_title: String,
    pub set_index: Option<i64>,
    pub weight_kg: Option<f64>,
    pub reps: Option<i64>,
    pub rpe: Option<f64>,
    pub volume: Option<f64>,
    pub one_rep_max_estimate: Option<f64>,
}

/// Everything the presenter needs for one selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub window: TimeWindow,
    pub bounds: WindowBounds,
    pub exercise_options: Vec<String>,
    pub selected_exercise: Option<String>,
    pub daily_max_one_rep_max: Vec<DailyValue>,
    pub daily_volume: Vec<DailyValue>,
    pub muscle_groups: MuscleGroupBreakdown,
    pub recent_sets: Vec<RecentSet>,
    pub notices: Vec<Notice>,
}

/// Runs enrichment, filtering and aggregation for one selection.
///
/// The muscle-group breakdown only sees the time-window filter; the daily tables and
/// the recent sets see both the window and the exercise filter.
pub fn build_dashboard(
    log: &WorkoutLog,
    selection: &Selection,
    config: &DashboardConfig,
    now: NaiveDateTime,
) -> Result<Dashboard> {
    let frame = log.to_dataframe()?;
    let enriched = apply_derived_metrics(&frame)?;

    let bounds = selection.window.bounds(now, log.earliest_start());
    let windowed = filter_window(&enriched, &bounds)?;
    debug!(
        window = selection.window.slug(),
        rows = windowed.height(),
        "applied time window"
    );

    let mut notices = Vec::new();
    let options = exercise_options(&windowed)?;
    if options.is_empty() {
        notices.push(Notice::info(format!(
            "No workouts logged in the {} window.",
            selection.window.label()
        )));
    }

    let choice = resolve_exercise(
        &options,
        selection.exercise.as_deref(),
        &config.default_exercise,
    );
    if let Some(rejected) = &choice.rejected {
        warn!(exercise = %rejected, "requested exercise not in current window");
        let replacement = match &choice.selected {
            Some(selected) => format!("showing '{selected}' instead"),
            None => "nothing to show".to_string(),
        };
        notices.push(Notice::warning(format!(
            "'{rejected}' has no sets in the {} window; {replacement}.",
            selection.window.label()
        )));
    }

    let exercise_frame = match &choice.selected {
        Some(exercise) => filter_exercise(&windowed, exercise)?,
        None => windowed.clear(),
    };

    let daily_max = daily_max_one_rep_max(&exercise_frame)?;
    let volume = daily_volume(&exercise_frame)?;
    let muscle_groups = muscle_group_volume(&windowed)?;
    let recent_sets = recent_sets(&exercise_frame, config.recent_set_limit)?;

    info!(
        window = selection.window.slug(),
        exercise = choice.selected.as_deref().unwrap_or_default(),
        days = daily_max.len(),
        recent = recent_sets.len(),
        "built dashboard"
    );

    Ok(Dashboard {
        window: selection.window,
        bounds,
        exercise_options: options,
        selected_exercise: choice.selected,
        daily_max_one_rep_max: daily_max,
        daily_volume: volume,
        muscle_groups,
        recent_sets,
        notices,
    })
}

/// The last `limit` rows of an enriched frame, in frame order.
pub fn recent_sets(df: &DataFrame, limit: usize) -> PolarsResult<Vec<RecentSet>> {
    let tail = df.tail(Some(limit));

    // Datetime(µs) shares its physical i64 representation.
    let start_us = tail.column(START_TIME)?.cast(&DataType::Int64)?;
    let start = start_us.i64()?;
    let titles = tail.column(EXERCISE_TITLE)?.str()?;
    let set_index = tail.column(SET_INDEX)?.i64()?;
    let weight = tail.column(WEIGHT_KG)?.f64()?;
    let reps = tail.column(REPS)?.i64()?;
    let rpe = tail.column(RPE)?.f64()?;
    let volume = tail.column(VOLUME)?.f64()?;
    let one_rep_max = tail.column(ONE_REP_MAX_ESTIMATE)?.f64()?;

    let mut rows = Vec::with_capacity(tail.height());
    for idx in 0..tail.height() {
        let Some(start_time) = start
            .get(idx)
            .and_then(DateTime::from_timestamp_micros)
            .map(|dt| dt.naive_utc())
        else {
            continue;
        };
        rows.push(RecentSet {
            start_time,
            exercise_title: titles.get(idx).unwrap_or_default().to_string(),
            set_index: set_index.get(idx),
            weight_kg: weight.get(idx),
            reps: reps.get(idx),
            rpe: rpe.get(idx),
            volume: volume.get(idx),
            one_rep_max_estimate: one_rep_max.get(idx),
        });
    }
    Ok(rows)
}
