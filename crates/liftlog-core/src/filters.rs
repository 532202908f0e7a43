use std::collections::HashSet;

use liftlog_parser::columns::{EXERCISE_TITLE, START_TIME};
use polars::prelude::*;
use serde::Serialize;

use crate::time_window::WindowBounds;

/// Keeps rows whose `start_time` falls inside `bounds` (both ends inclusive).
pub fn filter_window(df: &DataFrame, bounds: &WindowBounds) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(
            col(START_TIME)
                .gt_eq(lit(bounds.start))
                .and(col(START_TIME).lt_eq(lit(bounds.end))),
        )
        .collect()
}

/// Exact, case-sensitive match on `exercise_title`.
pub fn filter_exercise(df: &DataFrame, exercise: &str) -> PolarsResult<DataFrame> {
    df.clone()
        .lazy()
        .filter(col(EXERCISE_TITLE).eq(lit(exercise)))
        .collect()
}

/// Distinct exercise titles in order of first appearance.
pub fn exercise_options(df: &DataFrame) -> PolarsResult<Vec<String>> {
    let titles = df.column(EXERCISE_TITLE)?.str()?;

    let mut seen = HashSet::new();
    let mut options = Vec::new();
    for title in titles.into_iter().flatten() {
        if seen.insert(title) {
            options.push(title.to_string());
        }
    }
    Ok(options)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseChoice {
    pub selected: Option<String>,
    /// Set when the requested exercise was not among the options.
    pub rejected: Option<String>,
}

/// The preferred exercise when offered, else the first option.
pub fn default_exercise<'a>(options: &'a [String], preferred: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.as_str() == preferred)
        .or_else(|| options.first())
        .map(String::as_str)
}

pub fn resolve_exercise(
    options: &[String],
    requested: Option<&str>,
    preferred: &str,
) -> ExerciseChoice {
    match requested {
        Some(name) if options.iter().any(|option| option == name) => ExerciseChoice {
            selected: Some(name.to_string()),
            rejected: None,
        },
        Some(name) => ExerciseChoice {
            selected: default_exercise(options, preferred).map(str::to_string),
            rejected: Some(name.to_string()),
        },
        None => ExerciseChoice {
            selected: default_exercise(options, preferred).map(str::to_string),
            rejected: None,
        },
    }
}
