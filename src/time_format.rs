use crate::problem::Problem;
use crate::revision::{needs_revision, next_revision_at};
use chrono::{DateTime, Utc};

/// "1 day", "3 days"
pub fn plural(count: i64, unit: &str) -> String {
    format!("{} {}{}", count, unit, if count == 1 { "" } else { "s" })
}

/// Formats a future datetime as human-readable time until that moment
///
/// Examples:
/// - Now or past: "now"
/// - 5 minutes ahead: "in 5 minutes"
/// - 2 hours ahead: "in 2 hours"
/// - 1 day ahead: "tomorrow"
/// - 3 days ahead: "in 3 days"
/// - 30 days or more: "on 2025-12-10"
pub fn format_time_until(future_date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = future_date.signed_duration_since(now);

    if duration.num_seconds() <= 0 {
        "now".to_string()
    } else if duration.num_minutes() < 60 {
        format!("in {}", plural(duration.num_minutes().max(1), "minute"))
    } else if duration.num_hours() < 24 {
        format!("in {}", plural(duration.num_hours(), "hour"))
    } else if duration.num_days() == 1 {
        "tomorrow".to_string()
    } else if duration.num_days() < 30 {
        format!("in {}", plural(duration.num_days(), "day"))
    } else {
        format!("on {}", future_date.format("%Y-%m-%d"))
    }
}

/// How long ago a deadline passed: "overdue by 3 days", "overdue by 5 hours"
pub fn format_overdue(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let late = now.signed_duration_since(deadline);

    if late.num_days() >= 1 {
        format!("overdue by {}", plural(late.num_days(), "day"))
    } else if late.num_hours() >= 1 {
        format!("overdue by {}", plural(late.num_hours(), "hour"))
    } else {
        "just became due".to_string()
    }
}

/// Revision status line for a problem at `now`
pub fn format_due_status(problem: &Problem, now: DateTime<Utc>) -> String {
    match next_revision_at(problem) {
        None => "never revised".to_string(),
        Some(deadline) if needs_revision(problem, now) => format_overdue(deadline, now),
        Some(deadline) => format!("due {}", format_time_until(deadline, now)),
    }
}

/// Minutes as "45m" or "2h 05m"
pub fn format_minutes(minutes: i64) -> String {
    if minutes < 60 {
        format!("{}m", minutes)
    } else {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    }
}
