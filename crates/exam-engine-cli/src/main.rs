//! `exam-schedule`: assign exam slots and calendar days from the command line.
//!
//! Logging goes to stderr and is off unless `EXAM_SCHEDULE_LOG` is set to an
//! `env_logger` filter (e.g. `EXAM_SCHEDULE_LOG=debug`).

mod input;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use exam_engine::{plan, ScheduleRequest};

#[derive(Parser, Debug)]
#[command(
    name = "exam-schedule",
    version,
    about = "Assign conflict-free exam slots and calendar dates"
)]
struct Cli {
    /// JSON request file (`-` reads stdin)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Comma-separated exam names, added to any from --input
    #[arg(short, long, value_name = "LIST")]
    exams: Option<String>,

    /// Conflict as `A-B`; repeatable
    #[arg(short, long = "conflict", value_name = "A-B")]
    conflicts: Vec<String>,

    /// First candidate exam day (YYYY-MM-DD)
    #[arg(short, long, value_name = "DATE")]
    start: Option<String>,

    /// Day with no exams (YYYY-MM-DD); repeatable
    #[arg(long = "holiday", value_name = "DATE")]
    holidays: Vec<String>,

    /// Minimum rest days between exam days [default: 2]
    #[arg(short, long, value_name = "DAYS")]
    gap: Option<u32>,

    /// Reject malformed conflicts instead of dropping them
    #[arg(long)]
    strict: bool,

    /// Include the step-by-step assignment trace
    #[arg(long)]
    steps: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    if std::env::var("EXAM_SCHEDULE_LOG").is_ok() {
        let env = env_logger::Env::new()
            .filter("EXAM_SCHEDULE_LOG")
            .write_style("EXAM_SCHEDULE_LOG_STYLE");
        env_logger::init_from_env(env);
    }

    let cli = Cli::parse();
    log::debug!("arguments: {:?}", cli);

    let request = build_request(&cli)?;
    log::info!(
        "scheduling {} exams with {} conflicts",
        request.exams.len(),
        request.conflicts.len()
    );

    let report = plan(&request).context("scheduling failed")?;
    log::info!(
        "{} exams placed in {} slots",
        report.total_exams,
        report.total_slots
    );

    match cli.format {
        Format::Text => println!("{}", render::report_text(&report)),
        Format::Json => println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to serialize report")?
        ),
    }
    Ok(())
}

/// Merge the optional JSON request with inline flags.
///
/// List flags extend the file's lists; scalar flags override its values.
fn build_request(cli: &Cli) -> Result<ScheduleRequest> {
    let mut request = match &cli.input {
        Some(path) => input::read_request(path)?,
        None => ScheduleRequest::default(),
    };

    if let Some(list) = &cli.exams {
        request.exams.extend(input::parse_exam_list(list));
    }
    for line in &cli.conflicts {
        match input::parse_conflict_line(line) {
            Some(pair) => request.conflicts.push(pair),
            None => log::warn!("ignoring malformed conflict '{line}'"),
        }
    }
    request.holidays.extend(cli.holidays.iter().cloned());

    if let Some(start) = &cli.start {
        request.start = Some(start.clone());
    }
    if let Some(gap) = cli.gap {
        request.options.gap_days = gap;
    }
    request.options.strict_pairs |= cli.strict;
    request.options.include_steps |= cli.steps;

    Ok(request)
}
