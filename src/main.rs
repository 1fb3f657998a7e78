use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};
use uuid::Uuid;

use liftrs::analytics::ProgressAnalyzer;
use liftrs::config::AppConfig;
use liftrs::database::Database;
use liftrs::export::{ExportFormat, ReportExporter};
use liftrs::habits::{week_bounds, HabitTracker};
use liftrs::import::HistoryImporter;
use liftrs::logging::{init_logging, LogConfig, LogLevel};
use liftrs::models::{Athlete, MuscleGroup, RecordEvent, RecordKind, SetEntry, Workout};
use liftrs::records::RecordEvaluator;

/// LiftRS - Strength Training Progress CLI
///
/// Tracks personal records, windowed progress analytics, and streak/weekly
/// goal habit metrics from logged sets and plan completions.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(version = "0.1.0")]
#[command(about = "Strength training progress and personal-record tracking", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a completed set and evaluate it for personal records
    Log {
        /// Exercise name (must be registered)
        #[arg(short, long)]
        exercise: String,

        /// Repetitions completed
        #[arg(short, long)]
        reps: u32,

        /// Load in kilograms
        #[arg(short, long)]
        load: Decimal,

        /// Workout label (e.g. "Push day")
        #[arg(long)]
        label: Option<String>,

        /// Workout duration in minutes
        #[arg(long)]
        duration_min: Option<u32>,

        /// Date (YYYY-MM-DD, defaults to now)
        #[arg(short, long)]
        date: Option<String>,

        /// Athlete ID (defaults to configured athlete)
        #[arg(short, long)]
        athlete: Option<String>,
    },

    /// Compute the windowed progress report
    Analyze {
        /// Analysis window in days (default from config, 90 out of the box)
        #[arg(short, long)]
        window_days: Option<u32>,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Athlete ID (defaults to configured athlete)
        #[arg(short, long)]
        athlete: Option<String>,
    },

    /// Show current personal records
    Records {
        /// Limit to one exercise
        #[arg(short, long)]
        exercise: Option<String>,

        /// Athlete ID (defaults to configured athlete)
        #[arg(short, long)]
        athlete: Option<String>,
    },

    /// Training plan progress
    Plan {
        #[command(subcommand)]
        action: PlanCommands,
    },

    /// Show the current consecutive-day streak
    Streak {
        /// Athlete ID (defaults to configured athlete)
        #[arg(short, long)]
        athlete: Option<String>,
    },

    /// Show this week's goal, or update the default target
    Goal {
        /// Set a new default weekly target
        #[arg(short, long)]
        target: Option<u32>,

        /// Athlete ID (defaults to configured athlete)
        #[arg(short, long)]
        athlete: Option<String>,
    },

    /// Manage athletes
    Athlete {
        #[command(subcommand)]
        action: AthleteCommands,
    },

    /// Manage exercises
    Exercise {
        #[command(subcommand)]
        action: ExerciseCommands,
    },

    /// Import workout history from CSV
    Import {
        /// Input CSV file
        #[arg(short, long)]
        file: PathBuf,

        /// Athlete ID (defaults to configured athlete)
        #[arg(short, long)]
        athlete: Option<String>,
    },

    /// Export the progress report to a file
    Export {
        /// Output file path (.json or .csv)
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (inferred from the extension if omitted)
        #[arg(short, long)]
        format: Option<String>,

        /// Analysis window in days
        #[arg(short, long)]
        window_days: Option<u32>,

        /// Athlete ID (defaults to configured athlete)
        #[arg(short, long)]
        athlete: Option<String>,
    },

    /// Configure application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,

        /// Set a configuration value (key=value)
        #[arg(short, long)]
        set: Option<String>,
    },
}

#[derive(Subcommand)]
enum PlanCommands {
    /// Mark a plan item completed (or undo a completion)
    Complete {
        /// Plan item identifier
        #[arg(short, long)]
        item: String,

        /// Completion date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Un-complete the item instead
        #[arg(long)]
        undo: bool,

        /// Athlete ID (defaults to configured athlete)
        #[arg(short, long)]
        athlete: Option<String>,
    },
}

#[derive(Subcommand)]
enum AthleteCommands {
    /// Register an athlete
    Add {
        /// Display name
        name: String,

        /// Make this the default athlete
        #[arg(long)]
        default: bool,
    },
    /// List registered athletes
    List,
}

#[derive(Subcommand)]
enum ExerciseCommands {
    /// Register an exercise
    Add {
        /// Exercise name
        name: String,

        /// Comma-separated muscle groups (e.g. "chest,triceps")
        #[arg(short, long)]
        groups: String,
    },
    /// List registered exercises
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig {
        level: LogLevel::from_verbosity(cli.verbose),
        ..LogConfig::default()
    };
    init_logging(&log_config)?;

    let config_path = cli.config.clone();
    let mut config = AppConfig::load_or_default(config_path.as_deref())?;
    std::fs::create_dir_all(&config.settings.data_dir).with_context(|| {
        format!(
            "Failed to create data dir: {}",
            config.settings.data_dir.display()
        )
    })?;
    let mut db = Database::new(config.database_path())?;

    match cli.command {
        Commands::Log {
            exercise,
            reps,
            load,
            label,
            duration_min,
            date,
            athlete,
        } => cmd_log(
            &mut db, &config, athlete, &exercise, reps, load, label, duration_min, date,
        ),
        Commands::Analyze {
            window_days,
            format,
            athlete,
        } => cmd_analyze(&db, &config, athlete, window_days, &format),
        Commands::Records { exercise, athlete } => cmd_records(&db, &config, athlete, exercise),
        Commands::Plan { action } => match action {
            PlanCommands::Complete {
                item,
                date,
                undo,
                athlete,
            } => cmd_plan_complete(&mut db, &config, athlete, &item, date, undo),
        },
        Commands::Streak { athlete } => cmd_streak(&db, &config, athlete),
        Commands::Goal { target, athlete } => {
            cmd_goal(&db, &mut config, config_path.as_deref(), athlete, target)
        }
        Commands::Athlete { action } => match action {
            AthleteCommands::Add { name, default } => {
                cmd_athlete_add(&db, &mut config, config_path.as_deref(), &name, default)
            }
            AthleteCommands::List => cmd_athlete_list(&db, &config),
        },
        Commands::Exercise { action } => match action {
            ExerciseCommands::Add { name, groups } => cmd_exercise_add(&mut db, &name, &groups),
            ExerciseCommands::List => cmd_exercise_list(&db),
        },
        Commands::Import { file, athlete } => cmd_import(&mut db, &config, athlete, &file),
        Commands::Export {
            output,
            format,
            window_days,
            athlete,
        } => cmd_export(&db, &config, athlete, &output, format, window_days),
        Commands::Config { list, get, set } => {
            cmd_config(&mut config, config_path.as_deref(), list, get, set)
        }
    }
}

/// Resolve the acting athlete from the flag or the configured default
fn resolve_athlete(db: &Database, config: &AppConfig, flag: Option<String>) -> Result<Athlete> {
    let id = flag
        .or_else(|| config.settings.default_athlete_id.clone())
        .context(
            "No athlete specified. Pass --athlete or register one with 'liftrs athlete add'",
        )?;

    if let Some(athlete) = db.get_athlete(&id)? {
        return Ok(athlete);
    }
    // Fall back to a name match for convenience
    if let Some(athlete) = db
        .list_athletes()?
        .into_iter()
        .find(|a| a.name.eq_ignore_ascii_case(&id))
    {
        return Ok(athlete);
    }
    bail!("Unknown athlete '{}'", id)
}

fn parse_date(raw: Option<String>) -> Result<NaiveDate> {
    match raw {
        None => Ok(Utc::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", raw)),
    }
}

fn format_record_value(kind: RecordKind, value: Decimal) -> String {
    match kind {
        RecordKind::MaxLoad | RecordKind::EstimatedOneRepMax => {
            format!("{} kg", value.round_dp(1))
        }
        RecordKind::MaxReps => format!("{} reps", value),
        RecordKind::MaxVolume => format!("{} kg·reps", value.round_dp(1)),
    }
}

fn print_record_events(events: &[RecordEvent]) {
    for event in events {
        let new_value = format_record_value(event.kind, event.new_value);
        let line = match event.previous_value {
            Some(previous) => format!(
                "★ New {} record: {} (previous: {})",
                event.kind.label().to_lowercase(),
                new_value,
                format_record_value(event.kind, previous)
            ),
            None => format!(
                "★ First {} record: {}",
                event.kind.label().to_lowercase(),
                new_value
            ),
        };
        println!("{}", line.yellow().bold());
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_log(
    db: &mut Database,
    config: &AppConfig,
    athlete: Option<String>,
    exercise_name: &str,
    reps: u32,
    load: Decimal,
    label: Option<String>,
    duration_min: Option<u32>,
    date: Option<String>,
) -> Result<()> {
    let athlete = resolve_athlete(db, config, athlete)?;
    let exercise = db.find_exercise_by_name(exercise_name)?.with_context(|| {
        format!(
            "Unknown exercise '{}'. Register it with 'liftrs exercise add'",
            exercise_name
        )
    })?;

    let completed_at = match date {
        Some(_) => parse_date(date)?.and_time(NaiveTime::MIN).and_utc(),
        None => Utc::now(),
    };

    let workout_id = Uuid::new_v4().to_string();
    let entry = SetEntry {
        id: Uuid::new_v4().to_string(),
        workout_id: workout_id.clone(),
        athlete_id: athlete.id.clone(),
        exercise_id: exercise.id.clone(),
        reps: Some(reps),
        load_kg: Some(load),
        recorded_at: completed_at,
    };
    let workout = Workout {
        id: workout_id,
        athlete_id: athlete.id.clone(),
        completed_at,
        duration_seconds: duration_min.map(|m| m * 60),
        label,
        notes: None,
        entries: vec![entry.clone()],
    };
    db.store_workout(&workout)?;

    println!(
        "{}",
        format!("✓ Logged {}: {} × {} kg", exercise.name, reps, load)
            .green()
            .bold()
    );

    let events = RecordEvaluator::evaluate(db, &entry)?;
    if events.is_empty() {
        println!("  No new records this time.");
    } else {
        print_record_events(&events);
    }
    Ok(())
}

#[derive(Tabled)]
struct VolumeRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Volume (kg·reps)")]
    volume: String,
    #[tabled(rename = "Label")]
    label: String,
}

#[derive(Tabled)]
struct FrequencyRow {
    #[tabled(rename = "Week of")]
    week_start: String,
    #[tabled(rename = "Workouts")]
    count: u32,
}

#[derive(Tabled)]
struct GroupRow {
    #[tabled(rename = "Muscle group")]
    group: String,
    #[tabled(rename = "Volume (kg·reps)")]
    volume: String,
}

fn cmd_analyze(
    db: &Database,
    config: &AppConfig,
    athlete: Option<String>,
    window_days: Option<u32>,
    format: &str,
) -> Result<()> {
    let athlete = resolve_athlete(db, config, athlete)?;
    let window = window_days.or(Some(config.settings.analysis_window_days));
    let report = ProgressAnalyzer::analyze(db, &athlete.id, window)?;

    if format.eq_ignore_ascii_case("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Progress report for {} (last {} days)",
            athlete.name, report.window_days
        )
        .blue()
        .bold()
    );
    println!("  Workouts:        {}", report.summary.total_workouts);
    println!("  Sets:            {}", report.summary.total_sets);
    println!("  Total volume:    {} kg·reps", report.summary.total_volume);
    println!(
        "  Avg duration:    {} min",
        report.summary.avg_duration_minutes
    );
    println!(
        "  Workouts/week:   {}",
        report.summary.avg_workouts_per_week
    );

    if !report.volume_progression.is_empty() {
        println!("\n{}", "Volume progression".blue().bold());
        let rows: Vec<VolumeRow> = report
            .volume_progression
            .iter()
            .map(|p| VolumeRow {
                date: p.date.to_string(),
                volume: p.total_volume.to_string(),
                label: p.label.clone().unwrap_or_default(),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    if !report.frequency.is_empty() {
        println!("\n{}", "Weekly frequency".blue().bold());
        let rows: Vec<FrequencyRow> = report
            .frequency
            .iter()
            .map(|w| FrequencyRow {
                week_start: w.week_start.to_string(),
                count: w.workout_count,
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    if !report.muscle_group_distribution.is_empty() {
        println!("\n{}", "Muscle group distribution".blue().bold());
        let rows: Vec<GroupRow> = report
            .muscle_group_distribution
            .iter()
            .map(|g| GroupRow {
                group: g.group.to_string(),
                volume: g.volume.to_string(),
            })
            .collect();
        println!("{}", Table::new(rows).with(Style::rounded()));
    }

    if !report.record_progression.is_empty() {
        println!("\n{}", "Max-load record progression".blue().bold());
        for (exercise, points) in &report.record_progression {
            let series: Vec<String> = points
                .iter()
                .map(|p| format!("{}: {} kg", p.date, p.load_kg))
                .collect();
            println!("  {}: {}", exercise.bold(), series.join(", "));
        }
    }
    Ok(())
}

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "Exercise")]
    exercise: String,
    #[tabled(rename = "Record")]
    kind: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Achieved")]
    achieved: String,
}

fn cmd_records(
    db: &Database,
    config: &AppConfig,
    athlete: Option<String>,
    exercise: Option<String>,
) -> Result<()> {
    let athlete = resolve_athlete(db, config, athlete)?;

    let exercise_filter = match &exercise {
        Some(name) => Some(
            db.find_exercise_by_name(name)?
                .with_context(|| format!("Unknown exercise '{}'", name))?
                .id,
        ),
        None => None,
    };

    let names: HashMap<String, String> = db
        .list_exercises()?
        .into_iter()
        .map(|e| (e.id, e.name))
        .collect();

    let records: Vec<RecordRow> = db
        .records_for_athlete(&athlete.id)?
        .into_iter()
        .filter(|r| {
            exercise_filter
                .as_ref()
                .map_or(true, |id| &r.exercise_id == id)
        })
        .map(|r| RecordRow {
            exercise: names
                .get(&r.exercise_id)
                .cloned()
                .unwrap_or_else(|| r.exercise_id.clone()),
            kind: r.kind.label().to_string(),
            value: format_record_value(r.kind, r.value),
            achieved: r.achieved_at.date_naive().to_string(),
        })
        .collect();

    if records.is_empty() {
        println!("No personal records yet. Log a set with 'liftrs log'.");
    } else {
        println!("{}", Table::new(records).with(Style::rounded()));
    }
    Ok(())
}

fn cmd_plan_complete(
    db: &mut Database,
    config: &AppConfig,
    athlete: Option<String>,
    item: &str,
    date: Option<String>,
    undo: bool,
) -> Result<()> {
    let athlete = resolve_athlete(db, config, athlete)?;
    let event_date = parse_date(date)?;

    let outcome = HabitTracker::record_completion(
        db,
        &athlete.id,
        item,
        !undo,
        event_date,
        config.settings.weekly_goal_target,
    )?;

    if undo {
        println!("{}", format!("✓ Un-completed plan item '{}'", item).green());
        return Ok(());
    }

    println!(
        "{}",
        format!("✓ Completed plan item '{}' on {}", item, event_date)
            .green()
            .bold()
    );
    if let Some(streak) = outcome.streak {
        println!(
            "  Streak: {} day(s) (best: {})",
            streak.current_length.to_string().bold(),
            streak.longest_length
        );
    }
    if let Some(goal) = outcome.weekly_goal {
        let status = if goal.achieved {
            "achieved!".green().bold().to_string()
        } else {
            format!("{} to go", goal.target_count - goal.actual_count)
        };
        println!(
            "  Weekly goal: {}/{} - {}",
            goal.actual_count, goal.target_count, status
        );
    }
    Ok(())
}

fn cmd_streak(db: &Database, config: &AppConfig, athlete: Option<String>) -> Result<()> {
    let athlete = resolve_athlete(db, config, athlete)?;
    match db.get_streak(&athlete.id)? {
        Some(streak) => {
            println!(
                "Current streak: {} day(s), last active {}",
                streak.current_length.to_string().bold(),
                streak.last_active_date
            );
            println!("Longest streak: {} day(s)", streak.longest_length);
        }
        None => println!("No streak yet. Complete a plan item with 'liftrs plan complete'."),
    }
    Ok(())
}

fn cmd_goal(
    db: &Database,
    config: &mut AppConfig,
    config_path: Option<&std::path::Path>,
    athlete: Option<String>,
    target: Option<u32>,
) -> Result<()> {
    if let Some(target) = target {
        config.settings.weekly_goal_target = target;
        config.save(config_path)?;
        println!(
            "{}",
            format!("✓ Default weekly target set to {}", target).green()
        );
    }

    let athlete = resolve_athlete(db, config, athlete)?;
    let (week_start, week_end) = week_bounds(Utc::now().date_naive());
    let (target_count, actual_count) = match db.get_weekly_goal(&athlete.id, week_start)? {
        Some(goal) => (goal.target_count, goal.actual_count),
        None => (
            config.settings.weekly_goal_target,
            db.count_completed_between(&athlete.id, week_start, week_end)?,
        ),
    };

    let status = if actual_count >= target_count {
        "achieved!".green().bold().to_string()
    } else {
        format!("{} to go", target_count - actual_count)
    };
    println!(
        "Week of {}: {}/{} - {}",
        week_start, actual_count, target_count, status
    );
    Ok(())
}

#[derive(Tabled)]
struct AthleteRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Registered")]
    created: String,
}

fn cmd_athlete_add(
    db: &Database,
    config: &mut AppConfig,
    config_path: Option<&std::path::Path>,
    name: &str,
    make_default: bool,
) -> Result<()> {
    let athlete = db.add_athlete(name)?;
    println!(
        "{}",
        format!("✓ Registered athlete '{}' ({})", athlete.name, athlete.id).green()
    );

    if make_default || config.settings.default_athlete_id.is_none() {
        config.settings.default_athlete_id = Some(athlete.id.clone());
        config.save(config_path)?;
        println!("  Set as default athlete.");
    }
    Ok(())
}

fn cmd_athlete_list(db: &Database, config: &AppConfig) -> Result<()> {
    let athletes = db.list_athletes()?;
    if athletes.is_empty() {
        println!("No athletes registered.");
        return Ok(());
    }
    let rows: Vec<AthleteRow> = athletes
        .into_iter()
        .map(|a| {
            let default = config.settings.default_athlete_id.as_deref() == Some(a.id.as_str());
            AthleteRow {
                id: a.id,
                name: if default {
                    format!("{} (default)", a.name)
                } else {
                    a.name
                },
                created: a.created_at.date_naive().to_string(),
            }
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}

#[derive(Tabled)]
struct ExerciseRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Muscle groups")]
    groups: String,
}

fn cmd_exercise_add(db: &mut Database, name: &str, groups: &str) -> Result<()> {
    let muscle_groups: Vec<MuscleGroup> = groups
        .split(',')
        .filter(|g| !g.trim().is_empty())
        .map(|g| g.trim().parse::<MuscleGroup>().map_err(anyhow::Error::msg))
        .collect::<Result<_>>()?;
    if muscle_groups.is_empty() {
        bail!("At least one muscle group is required");
    }

    let exercise = db.add_exercise(name, &muscle_groups)?;
    println!(
        "{}",
        format!("✓ Registered exercise '{}'", exercise.name).green()
    );
    Ok(())
}

fn cmd_exercise_list(db: &Database) -> Result<()> {
    let exercises = db.list_exercises()?;
    if exercises.is_empty() {
        println!("No exercises registered.");
        return Ok(());
    }
    let rows: Vec<ExerciseRow> = exercises
        .into_iter()
        .map(|e| ExerciseRow {
            name: e.name,
            groups: e
                .muscle_groups
                .iter()
                .map(|g| g.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    Ok(())
}

fn cmd_import(
    db: &mut Database,
    config: &AppConfig,
    athlete: Option<String>,
    file: &std::path::Path,
) -> Result<()> {
    let athlete = resolve_athlete(db, config, athlete)?;
    println!("{}", "Importing workout history...".blue().bold());

    let report = HistoryImporter::new().import_file(db, &athlete.id, file)?;

    println!(
        "{}",
        format!(
            "✓ Imported {} workout(s), {} set(s); {} duplicate(s) skipped",
            report.workouts_imported, report.sets_imported, report.duplicates_skipped
        )
        .green()
    );
    if report.records_set > 0 {
        println!(
            "{}",
            format!("★ {} personal record(s) set from history", report.records_set)
                .yellow()
                .bold()
        );
    }
    if !report.rows_skipped.is_empty() {
        println!(
            "{}",
            format!("! {} row(s) skipped:", report.rows_skipped.len()).yellow()
        );
        for skip in report.rows_skipped.iter().take(10) {
            println!("  line {}: {}", skip.line, skip.reason);
        }
        if report.rows_skipped.len() > 10 {
            println!("  ... and {} more", report.rows_skipped.len() - 10);
        }
    }
    Ok(())
}

fn cmd_export(
    db: &Database,
    config: &AppConfig,
    athlete: Option<String>,
    output: &std::path::Path,
    format: Option<String>,
    window_days: Option<u32>,
) -> Result<()> {
    let athlete = resolve_athlete(db, config, athlete)?;
    let format = match format {
        Some(f) => ExportFormat::parse(&f)?,
        None => ExportFormat::from_path(output)?,
    };

    let window = window_days.or(Some(config.settings.analysis_window_days));
    let report = ProgressAnalyzer::analyze(db, &athlete.id, window)?;
    ReportExporter::export(&report, output, format)?;

    println!(
        "{}",
        format!("✓ Report exported to {}", output.display()).green()
    );
    Ok(())
}

fn cmd_config(
    config: &mut AppConfig,
    config_path: Option<&std::path::Path>,
    list: bool,
    get: Option<String>,
    set: Option<String>,
) -> Result<()> {
    if let Some(assignment) = set {
        let (key, value) = assignment
            .split_once('=')
            .context("Expected --set key=value")?;
        config.set_value(key.trim(), value.trim())?;
        config.save(config_path)?;
        println!(
            "{}",
            format!("✓ Set {} = {}", key.trim(), value.trim()).green()
        );
        return Ok(());
    }

    if let Some(key) = get {
        match config.get_value(&key) {
            Some(value) => println!("{}", value),
            None => bail!("Unknown configuration key: {}", key),
        }
        return Ok(());
    }

    if list {
        for (key, value) in config.list_values() {
            println!("{} = {}", key, value);
        }
        return Ok(());
    }

    println!("Use --list, --get <key>, or --set key=value");
    Ok(())
}
