pub mod errors;
pub mod formats;
pub mod model;

pub use errors::ParserError;
pub use formats::{columns, parse_workout_log, HevyCsvParser};
pub use model::{ColumnPresence, WorkoutLog, WorkoutSet};
