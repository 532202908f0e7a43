use chrono::NaiveDateTime;
use liftlog_parser::{parse_workout_log, WorkoutLog};
use tracing::{error, info};

use crate::config::DashboardConfig;
use crate::error::PipelineError;
use crate::pipeline::{build_dashboard, Selection};
use crate::presenter::{present, DashboardView};
use crate::time_window::TimeWindow;

pub const UPLOAD_PROMPT: &str = "Upload your workout CSV export to see your progress.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionFailure {
    pub message: String,
    pub hint: &'static str,
}

impl From<&PipelineError> for SessionFailure {
    fn from(err: &PipelineError) -> Self {
        Self {
            message: err.to_string(),
            hint: err.hint(),
        }
    }
}

#[derive(Debug)]
pub enum SessionState {
    Empty,
    Loaded(WorkoutLog),
    Error(SessionFailure),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionView {
    Prompt { message: &'static str },
    Dashboard(Box<DashboardView>),
    Error(SessionFailure),
}

/// One user's dashboard: the uploaded log plus the selector state.
///
/// Every [`view`](Self::view) re-runs the whole pipeline for the current selection.
/// A failed upload or pipeline run moves the session to `Error`; only a new upload
/// leaves it.
#[derive(Debug)]
pub struct DashboardSession {
    config: DashboardConfig,
    selection: Selection,
    state: SessionState,
}

impl DashboardSession {
    pub fn new(config: DashboardConfig) -> Self {
        let selection = Selection {
            window: config.default_window,
            exercise: None,
        };
        Self {
            config,
            selection,
            state: SessionState::Empty,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Replaces any previously loaded table. The exercise choice is reset since it
    /// belonged to the old file.
    pub fn upload(&mut self, content: &[u8]) -> &SessionState {
        self.selection.exercise = None;
        self.state = match parse_workout_log(content) {
            Ok(log) => {
                info!(rows = log.len(), file_hash = %log.file_hash, "workout log loaded");
                SessionState::Loaded(log)
            }
            Err(err) => {
                let err = PipelineError::from(err);
                error!(error = %err, "workout log rejected");
                SessionState::Error(SessionFailure::from(&err))
            }
        };
        &self.state
    }

    pub fn select_window(&mut self, window: TimeWindow) {
        self.selection.window = window;
    }

    pub fn select_exercise(&mut self, exercise: Option<String>) {
        self.selection.exercise = exercise;
    }

    pub fn view(&mut self, now: NaiveDateTime) -> SessionView {
        let log = match &self.state {
            SessionState::Empty => {
                return SessionView::Prompt {
                    message: UPLOAD_PROMPT,
                }
            }
            SessionState::Error(failure) => return SessionView::Error(failure.clone()),
            SessionState::Loaded(log) => log,
        };

        match build_dashboard(log, &self.selection, &self.config, now) {
            Ok(dashboard) => SessionView::Dashboard(Box::new(present(&dashboard))),
            Err(err) => {
                error!(error = %err, "dashboard pipeline failed");
                let failure = SessionFailure::from(&err);
                self.state = SessionState::Error(failure.clone());
                SessionView::Error(failure)
            }
        }
    }
}
