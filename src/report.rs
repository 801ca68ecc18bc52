//! Plain-text rendering of problems and statistics for the terminal.
//!
//! Every renderer returns the finished text so callers decide where it goes.
//! Colors come from `colored` and disappear when it is switched off.

use crate::problem::{Difficulty, Problem};
use crate::revision::{effective_interval, needs_revision};
use crate::stats::{Bucket, CalendarMonth, DailyCount, DifficultyBreakdown, RevisionStats};
use crate::time_format::{format_due_status, format_minutes, plural};
use chrono::{DateTime, NaiveDate, Utc};
use colored::{ColoredString, Colorize};

const BAR_WIDTH: f64 = 20.0;

fn heading(title: &str) -> Vec<String> {
    vec![
        title.bold().to_string(),
        "=".repeat(title.chars().count()),
    ]
}

fn bar(share: f64) -> String {
    let width = (share / 100.0 * BAR_WIDTH).round() as usize;
    "█".repeat(width)
}

fn finish(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn colored_difficulty(problem: &Problem) -> ColoredString {
    let label = problem.difficulty.as_str();
    match problem.difficulty_level() {
        Some(Difficulty::Easy) => label.green(),
        Some(Difficulty::Medium) => label.yellow(),
        Some(Difficulty::Hard) => label.red(),
        None => label.normal(),
    }
}

/// One line per problem: id, title, difficulty, pattern and revision status
fn problem_line(problem: &Problem, now: DateTime<Utc>) -> String {
    let status = format_due_status(problem, now);
    let status = if needs_revision(problem, now) {
        status.red()
    } else {
        status.normal()
    };

    format!(
        "  #{} {} [{}] {} | {} | {}",
        problem.id,
        problem.title.bold(),
        colored_difficulty(problem),
        problem.pattern,
        plural(problem.revision_count, "revision"),
        status
    )
}

fn pattern_lines(buckets: &[Bucket]) -> Vec<String> {
    let width = buckets
        .iter()
        .map(|bucket| bucket.name.chars().count())
        .max()
        .unwrap_or(0);

    buckets
        .iter()
        .map(|bucket| {
            format!(
                "  {:<width$}  {:<20} {}",
                bucket.name,
                bar(bucket.share),
                bucket.count,
                width = width
            )
        })
        .collect()
}

fn difficulty_lines(breakdown: &DifficultyBreakdown) -> Vec<String> {
    breakdown
        .entries()
        .iter()
        .map(|(difficulty, count)| {
            format!(
                "  {:<6}  {:>3}  ({:.0}%)",
                difficulty.as_str(),
                count,
                breakdown.percent(*difficulty)
            )
        })
        .collect()
}

/// The dashboard: stat cards, top patterns and difficulty split
pub fn render_dashboard(stats: &RevisionStats) -> String {
    let summary = stats.summary();
    let mut lines = heading("Dashboard");

    lines.push(format!(
        "Total problems:   {}",
        summary.total.to_string().cyan()
    ));
    lines.push(format!(
        "Current streak:   {} (longest {})",
        plural(summary.current_streak as i64, "day").yellow(),
        summary.longest_streak
    ));
    lines.push(format!("This week:        {}", summary.this_week));
    let due = summary.needs_revision.to_string();
    lines.push(format!(
        "Needs revision:   {}",
        if summary.needs_revision > 0 {
            due.red()
        } else {
            due.green()
        }
    ));
    lines.push(format!(
        "Avg time spent:   {}",
        format_minutes(summary.avg_time_spent)
    ));
    lines.push(format!("Total revisions:  {}", summary.total_revisions));
    lines.push(format!("Average rating:   {:.1}", summary.average_rating));

    let missing = stats.missing_days();
    if !missing.is_empty() {
        let days: Vec<String> = missing
            .iter()
            .map(|day| day.format("%m-%d").to_string())
            .collect();
        lines.push(format!(
            "Days without revisions (last {}): {}",
            stats.options().activity_window_days,
            days.join(", ")
        ));
    }

    let patterns = stats.chart_patterns();
    if !patterns.is_empty() {
        lines.push(String::new());
        lines.push("Top patterns".bold().to_string());
        lines.extend(pattern_lines(&patterns));
    }

    let breakdown = stats.difficulty();
    if breakdown.total() > 0 {
        lines.push(String::new());
        lines.push("Difficulty".bold().to_string());
        lines.extend(difficulty_lines(&breakdown));
    }

    finish(lines)
}

/// Problems needing revision with how overdue they are
pub fn render_due(problems: &[&Problem], now: DateTime<Utc>) -> String {
    if problems.is_empty() {
        return finish(vec!["Nothing to revise. All caught up!".green().to_string()]);
    }

    let mut lines = vec![format!(
        "{} need revision",
        plural(problems.len() as i64, "problem")
    )];
    lines.extend(problems.iter().map(|problem| problem_line(problem, now)));
    finish(lines)
}

pub fn render_problem_list(problems: &[&Problem], now: DateTime<Utc>) -> String {
    if problems.is_empty() {
        return finish(vec!["No problems match.".to_string()]);
    }

    let lines = problems
        .iter()
        .map(|problem| problem_line(problem, now))
        .collect();
    finish(lines)
}

/// Full details of a single problem
pub fn render_problem(problem: &Problem, now: DateTime<Utc>) -> String {
    let mut lines = vec![format!("#{} {}", problem.id, problem.title.bold())];

    lines.push(format!("  Pattern:     {}", problem.pattern));
    lines.push(format!("  Difficulty:  {}", colored_difficulty(problem)));
    if !problem.platform.is_empty() {
        lines.push(format!("  Platform:    {}", problem.platform));
    }
    if !problem.link.is_empty() {
        lines.push(format!("  Link:        {}", problem.link));
    }
    if !problem.tags.is_empty() {
        lines.push(format!("  Tags:        {}", problem.tags.join(", ")));
    }
    if let Some(priority) = problem.priority_level() {
        lines.push(format!("  Priority:    {}", priority.as_str()));
    }
    lines.push(format!(
        "  Revisions:   {} (every {})",
        problem.revision_count,
        plural(effective_interval(problem), "day")
    ));
    lines.push(format!(
        "  Time spent:  {}",
        format_minutes(problem.total_time_spent)
    ));
    if problem.average_rating > 0.0 {
        lines.push(format!("  Rating:      {:.1}", problem.average_rating));
    }
    lines.push(format!("  Status:      {}", format_due_status(problem, now)));
    if !problem.notes.is_empty() {
        lines.push(format!("  Notes:       {}", problem.notes));
    }

    finish(lines)
}

pub fn render_patterns(buckets: &[Bucket]) -> String {
    let mut lines = heading("Pattern statistics");
    if buckets.is_empty() {
        lines.push("No problems yet.".to_string());
    } else {
        lines.extend(pattern_lines(buckets));
    }
    finish(lines)
}

/// Problems added per day, one bar per day
pub fn render_timeline(counts: &[DailyCount]) -> String {
    let mut lines = heading("Problems added");
    if counts.is_empty() {
        lines.push("No problems yet.".to_string());
    }

    for entry in counts {
        lines.push(format!(
            "  {}  {} {}",
            entry.day.format("%Y-%m-%d"),
            "█".repeat(entry.count).cyan(),
            entry.count
        ));
    }
    finish(lines)
}

/// A Sunday-first month grid; active days are marked with `*`
pub fn render_calendar(month: &CalendarMonth) -> String {
    let mut lines = heading(&month.first.format("%B %Y").to_string());
    lines.push("Su  Mo  Tu  We  Th  Fr  Sa".to_string());

    let mut cells: Vec<String> = (0..month.leading_blanks)
        .map(|_| "    ".to_string())
        .collect();
    for cell in &month.days {
        let day = cell.day.format("%e").to_string();
        if cell.count > 0 {
            cells.push(format!("{}* ", day.green()));
        } else {
            cells.push(format!("{}  ", day));
        }
    }

    for week in cells.chunks(7) {
        lines.push(week.concat().trim_end().to_string());
    }

    lines.push(String::new());
    lines.push(format!("Total: {}", month.total()));
    if let Some(busiest) = month.busiest() {
        lines.push(format!(
            "Busiest day: {} ({})",
            busiest.day.format("%Y-%m-%d"),
            plural(busiest.count as i64, "problem")
        ));
    }
    finish(lines)
}

/// Problems touched on one calendar day
pub fn render_day(day: NaiveDate, problems: &[&Problem], now: DateTime<Utc>) -> String {
    let mut lines = heading(&format!("Problems on {}", day.format("%Y-%m-%d")));
    if problems.is_empty() {
        lines.push("Nothing logged on this day.".to_string());
    }
    lines.extend(problems.iter().map(|problem| problem_line(problem, now)));
    finish(lines)
}
