mod common;
mod hevy_csv;
pub mod columns;

pub use hevy_csv::HevyCsvParser;

pub(crate) use common::{
    parse_optional_f64, parse_optional_i64, parse_optional_text, parse_timestamp,
};

use crate::errors::ParserError;
use crate::model::WorkoutLog;

/// Parses an uploaded workout export.
pub fn parse_workout_log(content: &[u8]) -> Result<WorkoutLog, ParserError> {
    HevyCsvParser.parse(content)
}
