use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};
use liftlog_core::config::DashboardConfig;
use liftlog_core::session::{DashboardSession, SessionView};
use liftlog_core::time_window::TimeWindow;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Strength progression and training volume from a workout CSV export", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the 1RM, volume and muscle group charts plus the recent sets
    Dashboard(DashboardArgs),
    /// List the exercises logged inside a time window
    Exercises(ExercisesArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Workout CSV export
    file: PathBuf,
    /// all-time, last-3-months, last-6-months, last-year or year-to-date
    #[arg(long)]
    window: Option<TimeWindow>,
    /// Dashboard config (TOML); defaults to $LIFTLOG_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DashboardArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Exercise to chart (exact title)
    #[arg(long)]
    exercise: Option<String>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct ExercisesArgs {
    #[command(flatten)]
    source: SourceArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Dashboard(args) => handle_dashboard(args),
        Command::Exercises(args) => handle_exercises(args),
    }
}

fn handle_dashboard(args: DashboardArgs) -> Result<()> {
    let mut session = open_session(&args.source)?;
    session.select_exercise(args.exercise);

    let view = session.view(Local::now().naive_local());
    match args.format {
        OutputFormat::Table => render::print_view(&view),
        OutputFormat::Json => render::print_json(&view)?,
    }
    fail_on_error(&view)
}

fn handle_exercises(args: ExercisesArgs) -> Result<()> {
    let mut session = open_session(&args.source)?;
    let view = session.view(Local::now().naive_local());

    if let SessionView::Dashboard(dashboard) = &view {
        info!(count = dashboard.exercise_options.len(), "listing exercises");
        if dashboard.exercise_options.is_empty() {
            println!("No exercises logged in the {} window.", dashboard.window);
        }
        for option in &dashboard.exercise_options {
            let marker = if dashboard.selected_exercise.as_deref() == Some(option.as_str()) {
                "*"
            } else {
                " "
            };
            println!("{marker} {option}");
        }
    } else {
        render::print_view(&view);
    }
    fail_on_error(&view)
}

fn open_session(source: &SourceArgs) -> Result<DashboardSession> {
    dotenvy::dotenv().ok();
    let config = DashboardConfig::load(source.config.as_deref())
        .context("failed to load dashboard config")?;

    let mut session = DashboardSession::new(config);
    if let Some(window) = source.window {
        session.select_window(window);
    }

    let content = read_export(&source.file)?;
    session.upload(&content);
    Ok(session)
}

fn read_export(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn fail_on_error(view: &SessionView) -> Result<()> {
    if let SessionView::Error(failure) = view {
        bail!("{}\nhint: {}", failure.message, failure.hint);
    }
    Ok(())
}
