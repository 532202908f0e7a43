// Terminal and JSON renderers for dashboard views.

use anyhow::Result;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use liftlog_core::pipeline::{Notice, NoticeLevel};
use liftlog_core::presenter::{ChartPoint, DashboardView, Panel, TailTable};
use liftlog_core::session::SessionView;
use serde_json::json;

/// Errors are reported by the caller, not here.
pub fn print_view(view: &SessionView) {
    match view {
        SessionView::Prompt { message } => println!("{message}"),
        SessionView::Dashboard(dashboard) => print_dashboard(dashboard),
        SessionView::Error(_) => {}
    }
}

pub fn print_json(view: &SessionView) -> Result<()> {
    let document = match view {
        SessionView::Prompt { message } => json!({ "state": "empty", "message": message }),
        SessionView::Dashboard(dashboard) => json!({ "state": "loaded", "dashboard": dashboard }),
        SessionView::Error(failure) => json!({
            "state": "error",
            "message": failure.message,
            "hint": failure.hint,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    let exercise = view.selected_exercise.as_deref().unwrap_or("-");
    println!("Window: {}    Exercise: {exercise}", view.window);

    for notice in &view.notices {
        print_notice(notice);
    }

    for panel in &view.panels {
        println!();
        println!("{}", panel.title());
        match panel {
            Panel::Line {
                x_label,
                y_label,
                points,
                ..
            } => println!("{}", points_table(x_label, y_label, points, None)),
            Panel::Bar {
                x_label,
                y_label,
                points,
                ..
            } => println!("{}", points_table(x_label, y_label, points, None)),
            Panel::Donut { slices, .. } => {
                let total: f64 = slices.iter().map(|slice| slice.value).sum();
                println!(
                    "{}",
                    points_table("muscle_group", "volume (kg)", slices, Some(total))
                );
            }
            Panel::Fallback { notice, .. } => print_notice(notice),
        }
    }

    println!();
    println!("{}", view.recent_sets.title);
    println!("{}", tail_table(&view.recent_sets));
}

fn print_notice(notice: &Notice) {
    let prefix = match notice.level {
        NoticeLevel::Info => "note",
        NoticeLevel::Warning => "warning",
    };
    println!("{prefix}: {}", notice.message);
}

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn points_table(
    x_label: &str,
    y_label: &str,
    points: &[ChartPoint],
    share_of: Option<f64>,
) -> Table {
    let mut table = base_table();
    let mut header = vec![Cell::new(x_label), Cell::new(y_label)];
    if share_of.is_some() {
        header.push(Cell::new("share"));
    }
    table.set_header(header);

    for point in points {
        let mut row = vec![
            Cell::new(&point.label),
            Cell::new(format!("{:.2}", point.value)).set_alignment(CellAlignment::Right),
        ];
        if let Some(total) = share_of {
            let share = if total > 0.0 {
                point.value / total * 100.0
            } else {
                0.0
            };
            row.push(Cell::new(format!("{share:.1}%")).set_alignment(CellAlignment::Right));
        }
        table.add_row(row);
    }
    table
}

fn tail_table(tail: &TailTable) -> Table {
    let mut table = base_table();
    table.set_header(tail.headers.iter().map(|header| Cell::new(*header)));
    for row in &tail.rows {
        table.add_row(row.iter().map(Cell::new));
    }
    table
}
