// crates/liftlog-core/src/error.rs

use liftlog_parser::ParserError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Could not read workout export: {0}")]
    Parser(#[from] ParserError),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] PolarsError),
}

impl PipelineError {
    /// Hint shown alongside the message when the dashboard cannot be built.
    pub fn hint(&self) -> &'static str {
        match self {
            PipelineError::Parser(ParserError::MissingColumns { .. }) => {
                "Export the workout CSV again from the app's settings; the file must keep the start_time, exercise_title, weight_kg and reps columns."
            }
            PipelineError::Parser(_) => {
                "Check that the file is an unmodified workout CSV export and that its dates and numbers were not reformatted."
            }
            PipelineError::Polars(_) => {
                "The file was read but could not be summarized; re-export it and try again."
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
