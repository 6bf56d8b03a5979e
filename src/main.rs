//! Timetable CLI.
//!
//! Builds a course timetable from constraint and preference files (or a
//! JSON catalog) and writes it as a tab-delimited table.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_timetable::config::SchedulerConfig;
use u_timetable::io::{catalog_from_json, catalog_from_text, render_table};
use u_timetable::models::Catalog;
use u_timetable::scheduler::{ScheduleKpi, Timetabler};

#[derive(Parser)]
#[command(name = "timetable")]
#[command(about = "Greedy course timetabling with conflict-aware enrollment")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file for the schedule table (stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Scheduler configuration (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Random seed for enrollment (overrides the config file)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print slot times as "HH:MM-HH:MM DAYS" instead of slot ids
    #[arg(long, global = true)]
    human_times: bool,

    /// Write KPIs and unscheduled sections to this file (JSON)
    #[arg(long, global = true)]
    report: Option<PathBuf>,

    /// External validator, run as `<program> <constraints> <prefs> <output>`
    #[arg(long, global = true)]
    validator: Option<PathBuf>,

    /// Run N independent trials (seeds `seed`, `seed + 1`, ...) and report
    /// aggregate KPIs instead of writing a table
    #[arg(long, global = true)]
    trials: Option<usize>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule from whitespace-delimited constraint and preference files.
    Text {
        /// Constraint file (rooms, slots, courses, teachers)
        constraints: PathBuf,
        /// Preference file used for popularity
        prefs: PathBuf,
        /// Preference file used for enrollment (defaults to `prefs`)
        #[arg(long)]
        registrations: Option<PathBuf>,
    },

    /// Schedule from a JSON catalog.
    Json {
        /// Catalog file
        catalog: PathBuf,
    },
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_config(cli: &Cli) -> Result<SchedulerConfig> {
    let mut config = match &cli.config {
        Some(path) => serde_json::from_str(&read(path)?)
            .with_context(|| format!("invalid config {}", path.display()))?,
        None => SchedulerConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

fn load_catalog(command: &Commands) -> Result<Catalog> {
    let catalog = match command {
        Commands::Text {
            constraints,
            prefs,
            registrations,
        } => {
            let registrations = registrations.as_deref().map(read).transpose()?;
            catalog_from_text(
                &read(constraints)?,
                &read(prefs)?,
                registrations.as_deref(),
            )
            .with_context(|| format!("failed to parse {}", constraints.display()))?
        }
        Commands::Json { catalog } => catalog_from_json(&read(catalog)?)
            .with_context(|| format!("failed to parse {}", catalog.display()))?,
    };
    Ok(catalog)
}

fn run_validator(program: &Path, command: &Commands, output: Option<&Path>) -> Result<()> {
    let Commands::Text {
        constraints, prefs, ..
    } = command
    else {
        warn!("validator needs text input files; skipping");
        return Ok(());
    };
    let Some(output) = output else {
        warn!("validator needs --output; skipping");
        return Ok(());
    };

    let status = Command::new(program)
        .arg(constraints)
        .arg(prefs)
        .arg(output)
        .status()
        .with_context(|| format!("failed to run validator {}", program.display()))?;
    if status.success() {
        info!(%status, "validator passed");
    } else {
        warn!(%status, "validator reported problems");
    }
    Ok(())
}

fn run_trials(
    timetabler: &Timetabler,
    catalog: &Catalog,
    trials: usize,
    report: Option<&Path>,
) -> Result<()> {
    info!(trials, "running experiment");
    let set = timetabler.run_trials(catalog, trials);
    let Some(summary) = set.summary() else {
        warn!("no trials requested");
        return Ok(());
    };

    info!(
        trials = summary.trials,
        scheduled = %format!("{:.1}", summary.avg_scheduled_sections),
        enrolled = %format!("{:.1}", summary.avg_enrollment),
        min_enrolled = summary.min_enrollment,
        max_enrolled = summary.max_enrollment,
        fill = %format!("{:.1}%", summary.avg_seat_fill_rate * 100.0),
        satisfaction = %format!("{:.1}%", summary.avg_request_satisfaction_rate * 100.0),
        avg_ms = %format!("{:.2}", set.avg_duration_ms()),
        "experiment summary"
    );

    if let Some(path) = report {
        let report = serde_json::json!({
            "summary": summary,
            "avg_duration_ms": set.avg_duration_ms(),
            "trials": set.results,
        });
        fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let mut catalog = load_catalog(&cli.command)?;

    let timetabler = Timetabler::new(config);
    timetabler.check(&catalog)?;
    if let Some(trials) = cli.trials {
        return run_trials(&timetabler, &catalog, trials, cli.report.as_deref());
    }
    let outcome = timetabler.run_seeded(&mut catalog);

    let table = render_table(&outcome.schedule, &catalog, cli.human_times);
    match &cli.output {
        Some(path) => fs::write(path, &table)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{table}"),
    }

    let kpi = ScheduleKpi::calculate(&outcome.schedule, &catalog);
    info!(
        scheduled = kpi.scheduled_sections,
        unscheduled = kpi.unscheduled_sections,
        enrolled = kpi.total_enrollment,
        fill = %format!("{:.1}%", kpi.seat_fill_rate * 100.0),
        satisfaction = %format!("{:.1}%", kpi.request_satisfaction_rate * 100.0),
        "schedule summary"
    );
    for section in &outcome.schedule.unscheduled {
        warn!(
            course = %section.course_id,
            section = ?section.section,
            reason = ?section.reason,
            "section not scheduled"
        );
    }

    if let Some(path) = &cli.report {
        let report = serde_json::json!({
            "kpi": kpi,
            "enrollment": outcome.enrollment,
            "core_courses": outcome.core_courses,
            "unscheduled": outcome.schedule.unscheduled,
        });
        fs::write(path, serde_json::to_string_pretty(&report)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    if let Some(program) = &cli.validator {
        run_validator(program, &cli.command, cli.output.as_deref())?;
    }
    Ok(())
}
