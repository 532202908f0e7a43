use chrono::{NaiveDate, NaiveDateTime};
use liftlog_core::aggregations::MuscleGroupBreakdown;
use liftlog_core::config::DashboardConfig;
use liftlog_core::pipeline::{build_dashboard, NoticeLevel, Selection};
use liftlog_core::time_window::TimeWindow;
use liftlog_parser::{parse_workout_log, WorkoutLog};

const LOG: &str = "start_time,exercise_title,set_index,weight_kg,reps,rpe,muscle_group\n\
2024-03-15 18:00:00,Bench Press (Barbell),0,100,5,8,Chest\n\
2024-03-15 18:10:00,Bench Press (Barbell),1,105,3,9,Chest\n\
2024-03-15 18:30:00,Barbell Row,0,80,8,,Back\n\
2024-03-17 07:00:00,Squat (Barbell),0,140,5,8,Legs\n\
2024-03-17 07:40:00,Treadmill,0,,,,\n\
2024-06-10 18:00:00,Bench Press (Barbell),0,102.5,5,8,Chest\n\
2024-06-10 18:05:00,Bench Press (Barbell),1,,,,Chest\n";

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 30)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn log() -> WorkoutLog {
    parse_workout_log(LOG.as_bytes()).unwrap()
}

fn selection(window: TimeWindow, exercise: Option<&str>) -> Selection {
    Selection {
        window,
        exercise: exercise.map(str::to_string),
    }
}

#[test]
fn default_selection_charts_the_bench_press() {
    let dashboard = build_dashboard(
        &log(),
        &Selection::default(),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap();

    assert_eq!(
        dashboard.selected_exercise.as_deref(),
        Some("Bench Press (Barbell)")
    );
    assert_eq!(dashboard.daily_max_one_rep_max.len(), 2);
    assert!((dashboard.daily_max_one_rep_max[0].value - 116.666_666_7).abs() < 1e-6);
    assert!((dashboard.daily_volume[0].value - 815.0).abs() < 1e-9);
    assert!((dashboard.daily_volume[1].value - 512.5).abs() < 1e-9);
    assert!(dashboard.notices.is_empty());
}

#[test]
fn null_load_rows_stay_in_the_recent_sets() {
    let dashboard = build_dashboard(
        &log(),
        &Selection::default(),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap();

    assert_eq!(dashboard.recent_sets.len(), 4);
    let last = dashboard.recent_sets.last().unwrap();
    assert_eq!(last.set_index, Some(1));
    assert_eq!(last.weight_kg, None);
    assert_eq!(last.volume, None);
    assert_eq!(last.one_rep_max_estimate, None);
}

#[test]
fn recent_sets_keep_only_the_last_rows_in_order() {
    let config = DashboardConfig {
        recent_set_limit: 2,
        ..DashboardConfig::default()
    };
    let dashboard = build_dashboard(&log(), &Selection::default(), &config, now()).unwrap();

    let weights: Vec<Option<f64>> = dashboard
        .recent_sets
        .iter()
        .map(|set| set.weight_kg)
        .collect();
    assert_eq!(weights, [Some(102.5), None]);

    let last_start = NaiveDate::from_ymd_opt(2024, 6, 10)
        .unwrap()
        .and_hms_opt(18, 5, 0)
        .unwrap();
    assert_eq!(dashboard.recent_sets[1].start_time, last_start);
}

#[test]
fn window_start_is_inclusive_at_the_exact_timestamp() {
    // Last 3 Months from 2024-06-30 12:00 starts at 2024-04-01 12:00.
    let content = "start_time,exercise_title,weight_kg,reps\n\
2024-04-01 11:59:59,Bench Press (Barbell),90,5\n\
2024-04-01 12:00:00,Bench Press (Barbell),100,5\n";
    let log = parse_workout_log(content.as_bytes()).unwrap();
    let dashboard = build_dashboard(
        &log,
        &selection(TimeWindow::Last3Months, None),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap();

    assert_eq!(dashboard.recent_sets.len(), 1);
    assert_eq!(dashboard.recent_sets[0].weight_kg, Some(100.0));
}

#[test]
fn exercise_choice_does_not_move_the_muscle_group_chart() {
    let config = DashboardConfig::default();
    let bench = build_dashboard(
        &log(),
        &selection(TimeWindow::AllTime, Some("Bench Press (Barbell)")),
        &config,
        now(),
    )
    .unwrap();
    let squat = build_dashboard(
        &log(),
        &selection(TimeWindow::AllTime, Some("Squat (Barbell)")),
        &config,
        now(),
    )
    .unwrap();

    assert_ne!(bench.daily_volume, squat.daily_volume);
    assert_eq!(bench.muscle_groups, squat.muscle_groups);

    let MuscleGroupBreakdown::Available { groups } = &bench.muscle_groups else {
        panic!("expected muscle group breakdown");
    };
    let labels: Vec<&str> = groups.iter().map(|g| g.muscle_group.as_str()).collect();
    assert_eq!(labels, ["Back", "Chest", "Legs"]);
}

#[test]
fn window_narrows_every_table() {
    let dashboard = build_dashboard(
        &log(),
        &selection(TimeWindow::Last3Months, None),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap();

    assert_eq!(dashboard.exercise_options, ["Bench Press (Barbell)"]);
    assert_eq!(dashboard.daily_max_one_rep_max.len(), 1);
    let MuscleGroupBreakdown::Available { groups } = &dashboard.muscle_groups else {
        panic!("expected muscle group breakdown");
    };
    assert_eq!(groups.len(), 1);
    assert!((groups[0].volume - 512.5).abs() < 1e-9);
}

#[test]
fn exercise_outside_window_falls_back_with_warning() {
    let dashboard = build_dashboard(
        &log(),
        &selection(TimeWindow::Last3Months, Some("Squat (Barbell)")),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap();

    assert_eq!(
        dashboard.selected_exercise.as_deref(),
        Some("Bench Press (Barbell)")
    );
    assert_eq!(dashboard.notices.len(), 1);
    assert_eq!(dashboard.notices[0].level, NoticeLevel::Warning);
    assert!(dashboard.notices[0].message.contains("Squat (Barbell)"));
}

#[test]
fn empty_window_yields_empty_tables_and_a_notice() {
    let later = NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let dashboard = build_dashboard(
        &log(),
        &selection(TimeWindow::Last3Months, None),
        &DashboardConfig::default(),
        later,
    )
    .unwrap();

    assert!(dashboard.exercise_options.is_empty());
    assert_eq!(dashboard.selected_exercise, None);
    assert!(dashboard.daily_max_one_rep_max.is_empty());
    assert!(dashboard.daily_volume.is_empty());
    assert!(dashboard.recent_sets.is_empty());
    assert_eq!(dashboard.notices[0].level, NoticeLevel::Info);
}

#[test]
fn missing_muscle_group_column_only_skips_that_chart() {
    let content = "start_time,exercise_title,weight_kg,reps\n\
2024-06-01,Bench Press (Barbell),100,5\n";
    let log = parse_workout_log(content.as_bytes()).unwrap();
    let dashboard = build_dashboard(
        &log,
        &Selection::default(),
        &DashboardConfig::default(),
        now(),
    )
    .unwrap();

    assert!(dashboard.muscle_groups.is_skipped());
    assert_eq!(dashboard.daily_max_one_rep_max.len(), 1);
    assert_eq!(dashboard.daily_volume.len(), 1);
    assert_eq!(dashboard.recent_sets.len(), 1);
}
