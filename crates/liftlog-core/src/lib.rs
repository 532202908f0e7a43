pub mod aggregations;
pub mod config;
pub mod enricher;
pub mod error;
pub mod filters;
pub mod pipeline;
pub mod presenter;
pub mod session;
pub mod time_window;

pub use liftlog_parser::{ParserError, WorkoutLog, WorkoutSet};
