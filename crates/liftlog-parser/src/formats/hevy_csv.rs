use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, info};

use crate::errors::ParserError;
use crate::model::{ColumnPresence, WorkoutLog, WorkoutSet};

use super::columns::{
    EXERCISE_TITLE, MUSCLE_GROUP, REPS, REQUIRED_COLUMNS, RPE, SET_INDEX, START_TIME, WEIGHT_KG,
};
use super::{parse_optional_f64, parse_optional_i64, parse_optional_text, parse_timestamp};

/// Header positions of the columns the pipeline reads. Everything else in the
/// export (workout title, set type, distance, ...) is ignored.
#[derive(Debug, Clone, Copy)]
struct HeaderLayout {
    width: usize,
    start_time: usize,
    exercise_title: usize,
    weight_kg: usize,
    reps: usize,
    set_index: Option<usize>,
    rpe: Option<usize>,
    muscle_group: Option<usize>,
}

impl HeaderLayout {
    fn from_header(header: &StringRecord) -> Result<Self, ParserError> {
        let names: Vec<&str> = header
            .iter()
            .map(|name| name.trim_start_matches('\u{feff}').trim())
            .collect();
        let position = |column: &str| names.iter().position(|name| *name == column);

        let missing: Vec<&'static str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|column| position(*column).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ParserError::MissingColumns { columns: missing });
        }

        Ok(Self {
            width: names.len(),
            start_time: position(START_TIME).unwrap_or_default(),
            exercise_title: position(EXERCISE_TITLE).unwrap_or_default(),
            weight_kg: position(WEIGHT_KG).unwrap_or_default(),
            reps: position(REPS).unwrap_or_default(),
            set_index: position(SET_INDEX),
            rpe: position(RPE),
            muscle_group: position(MUSCLE_GROUP),
        })
    }

    fn presence(&self) -> ColumnPresence {
        ColumnPresence {
            muscle_group: self.muscle_group.is_some(),
        }
    }
}

/// Reader for the Hevy workout CSV export (one row per logged set).
#[derive(Debug, Default, Clone, Copy)]
pub struct HevyCsvParser;

impl HevyCsvParser {
    pub fn parse(&self, content: &[u8]) -> Result<WorkoutLog, ParserError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content);

        let header = reader.headers()?.clone();
        let layout = HeaderLayout::from_header(&header)?;
        debug!(?layout, "resolved export header");

        let mut sets = Vec::new();
        for (row_idx, record) in reader.records().enumerate() {
            let record = record?;
            let line_index = record
                .position()
                .map(|pos| pos.line())
                .unwrap_or(row_idx as u64 + 2);
            sets.push(Self::parse_row(&layout, &record, line_index)?);
        }

        if sets.is_empty() {
            return Err(ParserError::EmptyData);
        }

        let file_hash = blake3::hash(content).to_hex().to_string();
        info!(rows = sets.len(), %file_hash, "parsed workout export");

        Ok(WorkoutLog {
            file_hash,
            columns: layout.presence(),
            sets,
        })
    }

    fn parse_row(
        layout: &HeaderLayout,
        record: &StringRecord,
        line_index: u64,
    ) -> Result<WorkoutSet, ParserError> {
        if record.len() != layout.width {
            return Err(ParserError::RaggedRow {
                line_index,
                expected: layout.width,
                found: record.len(),
            });
        }

        let cell = |idx: usize| record.get(idx).unwrap_or_default();
        let optional_cell = |idx: Option<usize>| idx.map(cell).unwrap_or_default();

        let start_time = parse_timestamp(cell(layout.start_time), line_index, START_TIME)?;
        let exercise_title = cell(layout.exercise_title);
        if exercise_title.trim().is_empty() {
            return Err(ParserError::data_row(
                line_index,
                EXERCISE_TITLE,
                "exercise title must not be empty",
            ));
        }
        let exercise_title = exercise_title.to_string();
        let weight_kg = parse_optional_f64(cell(layout.weight_kg), line_index, WEIGHT_KG)?;
        let reps = parse_optional_i64(cell(layout.reps), line_index, REPS)?;

        if weight_kg.is_some_and(|weight| weight < 0.0) {
            return Err(ParserError::data_row(
                line_index,
                WEIGHT_KG,
                "weight must not be negative",
            ));
        }
        if reps.is_some_and(|reps| reps < 0) {
            return Err(ParserError::data_row(
                line_index,
                REPS,
                "reps must not be negative",
            ));
        }

        Ok(WorkoutSet {
            start_time,
            exercise_title,
            set_index: parse_optional_i64(optional_cell(layout.set_index), line_index, SET_INDEX)?,
            weight_kg,
            reps,
            rpe: parse_optional_f64(optional_cell(layout.rpe), line_index, RPE)?,
            muscle_group: parse_optional_text(optional_cell(layout.muscle_group)),
        })
    }
}
