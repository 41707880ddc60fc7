//! LeetRepeat CLI
//!
//! Command-line review queue for coding-practice problems.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use colored::Colorize;
use leetrepeat_core::{
    due_label, grade_info, Config, Grade, NewProblem, Problem, ReviewTracker, SqliteRepository,
    GRADE_INFO,
};
use tracing_subscriber::EnvFilter;

/// LeetRepeat - spaced repetition for coding problems
#[derive(Parser)]
#[command(name = "leetrepeat")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Schedule coding-problem reviews with SM-2")]
#[command(long_about = "LeetRepeat tracks the problems you have solved and tells you when to solve them again.\n\nAfter each attempt, grade your recall from 0 (blackout) to 5 (perfect) and the SM-2 algorithm picks the next review date.")]
struct Cli {
    /// Directory holding the problem database
    /// (defaults to $LEETREPEAT_DATA_DIR, then the platform data directory)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Track a new problem (due immediately)
    Add {
        /// Problem URL
        url: String,
        /// Title (derived from the URL when omitted)
        #[arg(long)]
        title: Option<String>,
    },

    /// List problems due for review
    Due,

    /// List problems not yet due, soonest first
    Upcoming {
        /// Maximum number of problems to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Grade a review attempt (0-5)
    Grade {
        /// Problem id or unique id prefix
        id: String,
        /// Recall grade, 0 (blackout) to 5 (perfect)
        #[arg(allow_hyphen_values = true)]
        grade: String,
    },

    /// Show what each grade would do, without saving
    Preview {
        /// Problem id or unique id prefix
        id: String,
    },

    /// Stop tracking a problem
    Remove {
        /// Problem id or unique id prefix
        id: String,
    },

    /// Show collection statistics
    Stats,

    /// Explain the 0-5 grading scale
    Grades,

    /// Export all problems as JSON
    Export {
        /// Output file path
        output: PathBuf,
    },

    /// Import problems from a JSON export
    Import {
        /// Path to export file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .with_ansi(false)
        .init();

    if let Commands::Grades = cli.command {
        return run_grades();
    }

    let tracker = open_tracker(cli.data_dir)?;
    let now = Local::now();

    match cli.command {
        Commands::Add { url, title } => run_add(&tracker, url, title, &now),
        Commands::Due => run_due(&tracker, &now),
        Commands::Upcoming { limit } => run_upcoming(&tracker, limit, &now),
        Commands::Grade { id, grade } => run_grade(&tracker, &id, &grade, &now),
        Commands::Preview { id } => run_preview(&tracker, &id, &now),
        Commands::Remove { id } => run_remove(&tracker, &id),
        Commands::Stats => run_stats(&tracker, &now),
        Commands::Export { output } => run_export(&tracker, output),
        Commands::Import { file } => run_import(&tracker, file),
        Commands::Grades => run_grades(),
    }
}

type Tracker = ReviewTracker<SqliteRepository>;

fn open_tracker(data_dir: Option<PathBuf>) -> anyhow::Result<Tracker> {
    let config = Config::resolve(data_dir)?;
    tracing::debug!("Using data directory {}", config.data_dir.display());
    let repo = SqliteRepository::from_config(&config)?;
    Ok(ReviewTracker::new(repo))
}

/// Run add command
fn run_add(
    tracker: &Tracker,
    url: String,
    title: Option<String>,
    now: &DateTime<Local>,
) -> anyhow::Result<()> {
    if url.trim().is_empty() {
        anyhow::bail!("URL cannot be empty");
    }

    let problem = tracker.add_problem(NewProblem { url, title }, now)?;

    println!("{}", "=== LeetRepeat Add ===".cyan().bold());
    println!();
    println!("{}: {}", "Title".white().bold(), problem.title);
    println!("{}: {}", "URL".white().bold(), problem.url);
    println!("{}: {}", "ID".white().bold(), problem.short_id().dimmed());
    println!();
    println!("{}", "Added. It is due for review now.".green());

    Ok(())
}

/// Run due command
fn run_due(tracker: &Tracker, now: &DateTime<Local>) -> anyhow::Result<()> {
    let queue = tracker.queue(now)?;

    println!("{}", "=== Due for Review ===".cyan().bold());
    println!();

    if queue.due.is_empty() {
        println!("{}", "Nothing due. Come back later!".dimmed());
        if let Some(next) = queue.upcoming.first() {
            println!(
                "{}: {} ({})",
                "Next Review".white().bold(),
                truncate(&next.title, 50),
                due_label(&next.state.next_review_at, now)
            );
        }
        return Ok(());
    }

    for problem in &queue.due {
        print_problem_line(problem, now);
    }
    println!();
    println!("{} due", queue.due.len().to_string().yellow().bold());

    Ok(())
}

/// Run upcoming command
fn run_upcoming(tracker: &Tracker, limit: usize, now: &DateTime<Local>) -> anyhow::Result<()> {
    let queue = tracker.queue(now)?;

    println!("{}", "=== Upcoming Reviews ===".cyan().bold());
    println!();

    if queue.upcoming.is_empty() {
        println!("{}", "No upcoming reviews.".dimmed());
        return Ok(());
    }

    for problem in queue.upcoming.iter().take(limit) {
        print_problem_line(problem, now);
    }

    let hidden = queue.upcoming.len().saturating_sub(limit);
    if hidden > 0 {
        println!();
        println!("{}", format!("... and {} more", hidden).dimmed());
    }

    Ok(())
}

/// Run grade command
fn run_grade(
    tracker: &Tracker,
    id: &str,
    grade: &str,
    now: &DateTime<Local>,
) -> anyhow::Result<()> {
    let grade: Grade = grade.parse()?;
    let id = tracker.resolve_id(id)?;
    let problem = tracker.grade(&id, grade, now)?;
    let info = grade_info(grade);
    let state = &problem.state;

    println!("{}", "=== LeetRepeat Review ===".cyan().bold());
    println!();
    println!("{}: {}", "Problem".white().bold(), problem.title);
    println!(
        "{}: {} - {}",
        "Grade".white().bold(),
        grade,
        if grade.is_pass() {
            info.label.green()
        } else {
            info.label.red()
        }
    );
    println!("{}: {:.2}", "Easiness Factor".white().bold(), state.easiness_factor);
    println!("{}: {}", "Repetitions".white().bold(), state.repetition_count);
    println!("{}: {} day(s)", "Interval".white().bold(), state.interval_days);
    println!(
        "{}: {} ({})",
        "Next Review".white().bold(),
        due_label(&state.next_review_at, now),
        format_local(&state.next_review_at)
    );

    Ok(())
}

/// Run preview command
fn run_preview(tracker: &Tracker, id: &str, now: &DateTime<Local>) -> anyhow::Result<()> {
    let id = tracker.resolve_id(id)?;
    let problem = tracker.get(&id)?;
    let preview = tracker.preview(&id, now)?;

    println!("{}", "=== Grade Preview ===".cyan().bold());
    println!();
    println!("{}: {}", "Problem".white().bold(), problem.title);
    println!(
        "{}: EF {:.2}, {} repetition(s), {} day interval",
        "Current".white().bold(),
        problem.state.easiness_factor,
        problem.state.repetition_count,
        problem.state.interval_days
    );
    println!();

    for outcome in &preview.outcomes {
        let info = grade_info(outcome.grade);
        let label = format!("{} {:15}", outcome.grade, info.label);
        println!(
            "  {}  EF {:.2}  {:>4} day(s)  {}",
            if outcome.grade.is_pass() {
                label.green()
            } else {
                label.red()
            },
            outcome.state.easiness_factor,
            outcome.state.interval_days,
            due_label(&outcome.state.next_review_at, now)
        );
    }

    Ok(())
}

/// Run remove command
fn run_remove(tracker: &Tracker, id: &str) -> anyhow::Result<()> {
    let id = tracker.resolve_id(id)?;
    let problem = tracker.get(&id)?;

    if !tracker.remove(&id)? {
        anyhow::bail!("Problem {} was already removed", id);
    }
    println!("{} {}", "Removed".green(), problem.title);

    Ok(())
}

/// Run stats command
fn run_stats(tracker: &Tracker, now: &DateTime<Local>) -> anyhow::Result<()> {
    let stats = tracker.stats(now)?;

    println!("{}", "=== LeetRepeat Statistics ===".cyan().bold());
    println!();
    println!("{}: {}", "Total Problems".white().bold(), stats.total_problems);
    println!("{}: {}", "Due Now".white().bold(), stats.due_now);
    println!("{}: {}", "Upcoming".white().bold(), stats.upcoming);
    println!("{}: {}", "Total Reviews".white().bold(), stats.total_reviews);
    println!("{}: {:.2}", "Average Easiness".white().bold(), stats.average_easiness);

    if let Some(next) = stats.next_due_at {
        println!(
            "{}: {} ({})",
            "Next Review".white().bold(),
            due_label(&next, now),
            format_local(&next)
        );
    }

    Ok(())
}

/// Run grades command
fn run_grades() -> anyhow::Result<()> {
    println!("{}", "=== Grading Scale ===".cyan().bold());
    println!();

    for info in &GRADE_INFO {
        let label = format!("{} {:15}", info.grade, info.label);
        let label = if info.grade >= Grade::PASS_THRESHOLD {
            label.green()
        } else {
            label.red()
        };
        println!("  {} {}", label, info.description.dimmed());
    }
    println!();
    println!(
        "{}",
        format!(
            "Grades below {} reset the repetition streak.",
            Grade::PASS_THRESHOLD
        )
        .dimmed()
    );

    Ok(())
}

/// Run export command
fn run_export(tracker: &Tracker, output: PathBuf) -> anyhow::Result<()> {
    let problems = tracker.export()?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = std::fs::File::create(&output)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &problems)?;
    writer.flush()?;

    println!(
        "{}",
        format!("Exported {} problem(s) to {}", problems.len(), output.display()).green()
    );

    Ok(())
}

/// Run import command
fn run_import(tracker: &Tracker, file: PathBuf) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&file)?;
    let problems: Vec<Problem> = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid export file {}: {}", file.display(), e))?;

    let imported = tracker.import(problems)?;
    println!(
        "{}",
        format!("Imported {} problem(s) from {}", imported, file.display()).green()
    );

    Ok(())
}

fn print_problem_line(problem: &Problem, now: &DateTime<Local>) {
    println!(
        "  {}  {:40}  {:>10}  {}",
        problem.short_id().dimmed(),
        truncate(&problem.title, 40),
        due_label(&problem.state.next_review_at, now).to_string().yellow(),
        problem.url.dimmed()
    );
}

fn format_local(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn truncate(s: &str, max_chars: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_chars {
        s
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
