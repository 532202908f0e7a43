//! Column names shared by the export header and the in-memory frame.

pub const START_TIME: &str = "start_time";
pub const EXERCISE_TITLE: &str = "exercise_title";
pub const SET_INDEX: &str = "set_index";
pub const WEIGHT_KG: &str = "weight_kg";
pub const REPS: &str = "reps";
pub const RPE: &str = "rpe";
pub const MUSCLE_GROUP: &str = "muscle_group";

/// Frame-only grouping key derived from `start_time`.
pub const SESSION_DAY: &str = "session_day";

pub const REQUIRED_COLUMNS: [&str; 4] = [START_TIME, EXERCISE_TITLE, WEIGHT_KG, REPS];
pub const OPTIONAL_COLUMNS: [&str; 3] = [SET_INDEX, RPE, MUSCLE_GROUP];
