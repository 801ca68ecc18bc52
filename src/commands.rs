use crate::cli::{self, Command};
use crate::database::Database;
use crate::problem_list;
use crate::report;
use crate::snapshot::JsonSnapshot;
use crate::stats::{RevisionStats, StatsOptions};
use chrono::Datelike;
use log::info;
use std::error::Error;

/// Runs one subcommand against the database and returns the text to print
pub fn run_command(db: &Database, command: &Command) -> Result<String, Box<dyn Error>> {
    let now = db.get_current_time();

    match command {
        Command::Dashboard => {
            let problems = db.all_problems()?;
            Ok(report::render_dashboard(&RevisionStats::new(&problems, now)))
        }
        Command::Due => {
            let problems = db.all_problems()?;
            let stats = RevisionStats::new(&problems, now);
            Ok(report::render_due(&stats.due(), now))
        }
        Command::List {
            search,
            pattern,
            due,
            sort,
            asc,
        } => {
            let (filter, sort_by, order) =
                cli::list_options(search.as_deref(), pattern.as_deref(), *due, sort, *asc)?;
            let problems = db.all_problems()?;
            let selected = problem_list::apply(&problems, &filter, sort_by, order, now);
            Ok(report::render_problem_list(&selected, now))
        }
        Command::Add {
            title,
            pattern,
            difficulty,
            platform,
            link,
            notes,
            tags,
            priority,
            interval,
        } => {
            let new_problem = cli::new_problem(
                title,
                pattern,
                difficulty,
                platform,
                link,
                notes,
                tags,
                priority.as_deref(),
                *interval,
            )?;
            let problem = db.create_problem(&new_problem)?;
            Ok(report::render_problem(&problem, now))
        }
        Command::Revise {
            id,
            time_spent,
            rating,
        } => {
            let problem = db.record_revision(*id, &cli::revision_input(*time_spent, *rating))?;
            Ok(report::render_problem(&problem, now))
        }
        Command::Patterns { top } => {
            let problems = db.all_problems()?;
            let options = StatsOptions {
                pattern_panel: *top,
                ..StatsOptions::default()
            };
            let stats = RevisionStats::with_options(&problems, now, options);
            Ok(report::render_patterns(&stats.pattern_panel()))
        }
        Command::Timeline { days } => {
            let problems = db.all_problems()?;
            let options = StatsOptions {
                timeline_days: *days,
                ..StatsOptions::default()
            };
            let stats = RevisionStats::with_options(&problems, now, options);
            Ok(report::render_timeline(&stats.timeline()))
        }
        Command::Calendar { month } => {
            let (year, month) = match month {
                Some(text) => cli::parse_month(text)?,
                None => (now.year(), now.month()),
            };
            let problems = db.all_problems()?;
            let stats = RevisionStats::new(&problems, now);
            let calendar = stats
                .month(year, month)
                .ok_or_else(|| format!("Invalid month {}-{:02}", year, month))?;
            Ok(report::render_calendar(&calendar))
        }
        Command::Day { date } => {
            let day = cli::parse_day(date)?;
            let problems = db.all_problems()?;
            let stats = RevisionStats::new(&problems, now);
            Ok(report::render_day(day, &stats.on_day(day), now))
        }
        Command::Export { file } => {
            let problems = db.all_problems()?;
            JsonSnapshot::save(file, &problems)?;
            info!("Exported {} problems to {}", problems.len(), file.display());
            Ok(format!(
                "Exported {} to {}\n",
                crate::time_format::plural(problems.len() as i64, "problem"),
                file.display()
            ))
        }
        Command::Import { file, merge } => {
            let snapshot = JsonSnapshot::load(file)?;
            let imported = if *merge {
                db.merge(snapshot.problems())?
            } else {
                db.replace_all(snapshot.problems())?
            };
            Ok(format!(
                "Imported {} ({})\n",
                crate::time_format::plural(imported as i64, "problem"),
                if *merge { "merged" } else { "replaced existing" }
            ))
        }
    }
}
