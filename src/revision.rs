use crate::dates::days_between;
use crate::problem::Problem;
use chrono::{DateTime, Duration, Utc};

/// Interval used when a problem has no positive interval of its own
pub const DEFAULT_REVISION_INTERVAL_DAYS: i64 = 7;

pub fn effective_interval(problem: &Problem) -> i64 {
    match problem.revision_interval {
        Some(days) if days > 0 => days,
        _ => DEFAULT_REVISION_INTERVAL_DAYS,
    }
}

/// Fractional days since the last revision, `None` if never (readably) revised
pub fn days_since_revision(problem: &Problem, now: DateTime<Utc>) -> Option<f64> {
    problem
        .last_revised_at()
        .map(|last_revised| days_between(last_revised, now))
}

/// Whether a problem is due for revision at `now`.
///
/// Due when it was never revised, or when strictly more than its interval has
/// elapsed since the last revision. Reaching the interval exactly is not enough.
pub fn needs_revision(problem: &Problem, now: DateTime<Utc>) -> bool {
    match days_since_revision(problem, now) {
        Some(elapsed) => elapsed > effective_interval(problem) as f64,
        None => true,
    }
}

/// The last instant at which the problem is still not due
pub fn next_revision_at(problem: &Problem) -> Option<DateTime<Utc>> {
    problem
        .last_revised_at()
        .and_then(|last_revised| {
            last_revised.checked_add_signed(Duration::days(effective_interval(problem)))
        })
}

pub fn due_problems(problems: &[Problem], now: DateTime<Utc>) -> Vec<&Problem> {
    problems
        .iter()
        .filter(|problem| needs_revision(problem, now))
        .collect()
}
