use crate::database_factory::DatabaseConfig;
use crate::problem::{NewProblem, RevisionInput};
use crate::problem_list::{ProblemFilter, SortBy, SortOrder};
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Spaced-repetition tracker for solved coding-interview problems
#[derive(Parser, Debug, Clone)]
#[command(name = "codetrack")]
#[command(about = "Track solved problems and when to revise them", long_about = None)]
#[command(version)]
pub struct Args {
    /// Use in-memory database for testing
    #[arg(long, global = true, help = "Use in-memory database for testing")]
    pub test: bool,

    /// Custom database file path
    #[arg(long, global = true, value_name = "PATH", help = "Use custom database file path")]
    pub db_path: Option<PathBuf>,

    /// Override current date for testing (YYYY-MM-DD format)
    #[arg(
        long,
        global = true,
        value_name = "DATE",
        help = "Override current date (YYYY-MM-DD format)"
    )]
    pub override_date: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Stat cards, top patterns and difficulty split
    Dashboard,
    /// Problems that need revision
    Due,
    /// List problems with optional filters
    List {
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        pattern: Option<String>,
        /// Only problems needing revision
        #[arg(long)]
        due: bool,
        /// date, title, difficulty or revisions
        #[arg(long, default_value = "date")]
        sort: String,
        /// Ascending instead of descending order
        #[arg(long)]
        asc: bool,
    },
    /// Log a newly solved problem
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        pattern: String,
        /// Easy, Medium or Hard
        #[arg(long)]
        difficulty: String,
        #[arg(long, default_value = "")]
        platform: String,
        #[arg(long, default_value = "")]
        link: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// May be given more than once
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Low, Medium, High or Critical
        #[arg(long)]
        priority: Option<String>,
        /// Days between revisions
        #[arg(long)]
        interval: Option<i64>,
    },
    /// Record a revision of a problem
    Revise {
        id: i64,
        /// Minutes spent on this revision
        #[arg(long)]
        time_spent: Option<i64>,
        /// Confidence from 1 to 5
        #[arg(long)]
        rating: Option<i64>,
    },
    /// Problem counts per pattern
    Patterns {
        #[arg(long, default_value_t = 12)]
        top: usize,
    },
    /// Problems added per day
    Timeline {
        #[arg(long, default_value_t = 30)]
        days: usize,
    },
    /// Month grid of active days
    Calendar {
        /// YYYY-MM, defaults to the current month
        #[arg(long)]
        month: Option<String>,
    },
    /// Problems touched on one day
    Day { date: String },
    /// Write every problem to a JSON file
    Export { file: PathBuf },
    /// Load problems from a JSON export
    Import {
        file: PathBuf,
        /// Append instead of replacing the stored problems
        #[arg(long)]
        merge: bool,
    },
}

impl Args {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Validate the override_date argument if provided
    pub fn validate_override_date(&self) -> Result<Option<NaiveDate>, String> {
        match &self.override_date {
            Some(date_str) => NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| {
                    format!(
                        "Invalid date format for --override-date: '{}'. Expected YYYY-MM-DD",
                        date_str
                    )
                }),
            None => Ok(None),
        }
    }

    pub fn database_config(&self) -> Result<DatabaseConfig, String> {
        let mut builder = DatabaseConfig::builder().override_date(self.validate_override_date()?);
        if self.test {
            builder = builder.test_mode();
        }
        if let Some(path) = &self.db_path {
            builder = builder.path(path.to_string_lossy());
        }
        Ok(builder.build())
    }
}

/// Builds the list filter and ordering from `list` options
pub fn list_options(
    search: Option<&str>,
    pattern: Option<&str>,
    due: bool,
    sort: &str,
    asc: bool,
) -> Result<(ProblemFilter, SortBy, SortOrder), String> {
    let sort_by = SortBy::from(sort).ok_or_else(|| {
        format!(
            "Unknown sort '{}'. Expected date, title, difficulty or revisions",
            sort
        )
    })?;
    let filter = ProblemFilter {
        search: search.unwrap_or_default().to_string(),
        pattern: pattern.map(str::to_string),
        only_due: due,
    };
    let order = if asc { SortOrder::Asc } else { SortOrder::Desc };
    Ok((filter, sort_by, order))
}

/// Parses `YYYY-MM` into a year and month
pub fn parse_month(text: &str) -> Result<(i32, u32), String> {
    NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d")
        .map(|date| (date.year(), date.month()))
        .map_err(|_| format!("Invalid month '{}'. Expected YYYY-MM", text))
}

pub fn parse_day(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}'. Expected YYYY-MM-DD", text))
}

#[allow(clippy::too_many_arguments)]
pub fn new_problem(
    title: &str,
    pattern: &str,
    difficulty: &str,
    platform: &str,
    link: &str,
    notes: &str,
    tags: &[String],
    priority: Option<&str>,
    interval: Option<i64>,
) -> Result<NewProblem, String> {
    if title.trim().is_empty() {
        return Err("Title must not be empty".to_string());
    }
    if crate::problem::Difficulty::from(difficulty).is_none() {
        return Err(format!(
            "Unknown difficulty '{}'. Expected Easy, Medium or Hard",
            difficulty
        ));
    }
    if let Some(days) = interval {
        if days <= 0 {
            return Err(format!("Interval must be positive, got {}", days));
        }
    }

    Ok(NewProblem {
        title: title.trim().to_string(),
        pattern: pattern.to_string(),
        difficulty: difficulty.to_string(),
        platform: platform.to_string(),
        link: link.to_string(),
        notes: notes.to_string(),
        tags: tags.to_vec(),
        priority: priority.map(str::to_string),
        revision_interval: interval,
        approaches: Vec::new(),
    })
}

pub fn revision_input(time_spent: Option<i64>, rating: Option<i64>) -> RevisionInput {
    RevisionInput {
        date: None,
        time_spent,
        rating,
    }
}
