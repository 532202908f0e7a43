//! Display payloads for the chart and table widgets.
//!
//! Nothing here aggregates; values are copied from the [`Dashboard`] and only
//! formatted for display.

use serde::Serialize;

use crate::aggregations::{DailyValue, MuscleGroupBreakdown};
use crate::pipeline::{Dashboard, Notice, RecentSet};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

pub const TAIL_HEADERS: [&str; 6] = [
    "start_time",
    "set_index",
    "weight_kg",
    "reps",
    "rpe",
    "1RM_estimate",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    Line {
        title: String,
        x_label: &'static str,
        y_label: &'static str,
        points: Vec<ChartPoint>,
    },
    Bar {
        title: String,
        x_label: &'static str,
        y_label: &'static str,
        /// Bars are colored on a continuous scale of their own value.
        color_by: &'static str,
        points: Vec<ChartPoint>,
    },
    Donut {
        title: String,
        slices: Vec<ChartPoint>,
    },
    /// Replaces a chart that could not be built.
    Fallback { title: String, notice: Notice },
}

impl Panel {
    pub fn title(&self) -> &str {
        match self {
            Panel::Line { title, .. }
            | Panel::Bar { title, .. }
            | Panel::Donut { title, .. }
            | Panel::Fallback { title, .. } => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TailTable {
    pub title: &'static str,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub window: &'static str,
    pub exercise_options: Vec<String>,
    pub selected_exercise: Option<String>,
    pub panels: Vec<Panel>,
    pub recent_sets: TailTable,
    pub notices: Vec<Notice>,
}

pub fn present(dashboard: &Dashboard) -> DashboardView {
    let exercise = dashboard
        .selected_exercise
        .as_deref()
        .unwrap_or("No exercise");

    let mut panels = vec![
        Panel::Line {
            title: format!("{exercise} - 1RM progression"),
            x_label: "date",
            y_label: "estimated 1RM (kg)",
            points: daily_points(&dashboard.daily_max_one_rep_max),
        },
        Panel::Bar {
            title: "Total volume (sets x reps x weight)".to_string(),
            x_label: "date",
            y_label: "volume (kg)",
            color_by: "volume",
            points: daily_points(&dashboard.daily_volume),
        },
    ];

    let muscle_title = "Volume by muscle group".to_string();
    panels.push(match &dashboard.muscle_groups {
        MuscleGroupBreakdown::Available { groups } if groups.is_empty() => Panel::Fallback {
            title: muscle_title,
            notice: Notice::info(format!(
                "No sets in the {} window have a muscle group.",
                dashboard.window.label()
            )),
        },
        MuscleGroupBreakdown::Available { groups } => Panel::Donut {
            title: muscle_title,
            slices: groups
                .iter()
                .map(|group| ChartPoint {
                    label: group.muscle_group.clone(),
                    value: group.volume,
                })
                .collect(),
        },
        MuscleGroupBreakdown::Skipped { reason } => Panel::Fallback {
            title: muscle_title,
            notice: Notice::warning(format!(
                "Muscle group data not found ({reason}). Add a muscle_group column to the export to see this chart."
            )),
        },
    });

    DashboardView {
        window: dashboard.window.label(),
        exercise_options: dashboard.exercise_options.clone(),
        selected_exercise: dashboard.selected_exercise.clone(),
        panels,
        recent_sets: tail_table(&dashboard.recent_sets),
        notices: dashboard.notices.clone(),
    }
}

fn daily_points(values: &[DailyValue]) -> Vec<ChartPoint> {
    values
        .iter()
        .map(|daily| ChartPoint {
            label: daily.date.format(DATE_FORMAT).to_string(),
            value: daily.value,
        })
        .collect()
}

pub fn tail_table(sets: &[RecentSet]) -> TailTable {
    let rows = sets
        .iter()
        .map(|set| {
            vec![
                set.start_time.format(TIMESTAMP_FORMAT).to_string(),
                optional_cell(set.set_index),
                optional_cell(set.weight_kg),
                optional_cell(set.reps),
                optional_cell(set.rpe),
                set.one_rep_max_estimate
                    .map(|value| format!("{value:.1}"))
                    .unwrap_or_default(),
            ]
        })
        .collect();

    TailTable {
        title: "Recent sets",
        headers: TAIL_HEADERS.to_vec(),
        rows,
    }
}

fn optional_cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
