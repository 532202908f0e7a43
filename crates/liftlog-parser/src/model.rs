use chrono::{Datelike, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::formats::columns::{
    EXERCISE_TITLE, MUSCLE_GROUP, REPS, RPE, SESSION_DAY, SET_INDEX, START_TIME, WEIGHT_KG,
};

/// One logged set, as it appeared in the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSet {
    pub start_time: NaiveDateTime,
    pub exercise_title: String,
    pub set_index: Option<i64>,
    pub weight_kg: Option<f64>,
    pub reps: Option<i64>,
    pub rpe: Option<f64>,
    pub muscle_group: Option<String>,
}

/// Optional columns whose absence changes the frame layout. `set_index` and `rpe`
/// are always emitted (null when missing from the export).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPresence {
    pub muscle_group: bool,
}

#[derive(Debug, Clone)]
pub struct WorkoutLog {
    pub file_hash: String,
    pub columns: ColumnPresence,
    pub sets: Vec<WorkoutSet>,
}

impl WorkoutLog {
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    pub fn earliest_start(&self) -> Option<NaiveDateTime> {
        self.sets.iter().map(|set| set.start_time).min()
    }

    /// Projects the records into a frame, one row per set in file order.
    ///
    /// `start_time` is the wall-clock timestamp at microsecond resolution and
    /// `session_day` the calendar date as days from CE, used as the grouping key.
    /// `muscle_group` is only emitted when the export had that column.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let len = self.sets.len();
        let mut start_us = Vec::with_capacity(len);
        let mut session_day = Vec::with_capacity(len);
        let mut exercise_title = Vec::with_capacity(len);
        let mut set_index = Vec::with_capacity(len);
        let mut weight_kg = Vec::with_capacity(len);
        let mut reps = Vec::with_capacity(len);
        let mut rpe = Vec::with_capacity(len);
        let mut muscle_group: Vec<Option<&str>> = Vec::with_capacity(len);

        for set in &self.sets {
            start_us.push(set.start_time.and_utc().timestamp_micros());
            session_day.push(set.start_time.date().num_days_from_ce());
            exercise_title.push(set.exercise_title.as_str());
            set_index.push(set.set_index);
            weight_kg.push(set.weight_kg);
            reps.push(set.reps);
            rpe.push(set.rpe);
            muscle_group.push(set.muscle_group.as_deref());
        }

        let start_time = Series::new(START_TIME.into(), start_us)
            .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?;

        let mut columns: Vec<Column> = vec![
            start_time.into(),
            Series::new(SESSION_DAY.into(), session_day).into(),
            Series::new(EXERCISE_TITLE.into(), exercise_title).into(),
            Series::new(SET_INDEX.into(), set_index).into(),
            Series::new(WEIGHT_KG.into(), weight_kg).into(),
            Series::new(REPS.into(), reps).into(),
            Series::new(RPE.into(), rpe).into(),
        ];

        if self.columns.muscle_group {
            columns.push(Series::new(MUSCLE_GROUP.into(), muscle_group).into());
        }

        DataFrame::new(columns)
    }
}
