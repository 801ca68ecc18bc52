use crate::problem::Problem;
use crate::revision::needs_revision;
use crate::stats::streak::{current_streak, longest_streak};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Counters shown on the dashboard stat cards
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardSummary {
    pub total: usize,
    pub needs_revision: usize,
    pub this_week: usize,
    /// Rounded mean of `total_time_spent` in minutes
    pub avg_time_spent: i64,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_revisions: i64,
    pub average_rating: f64,
}

impl DashboardSummary {
    pub fn compute(problems: &[Problem], now: DateTime<Utc>) -> Self {
        DashboardSummary {
            total: problems.len(),
            needs_revision: needs_revision_count(problems, now),
            this_week: this_week_count(problems, now),
            avg_time_spent: avg_time_spent(problems),
            current_streak: current_streak(problems, now),
            longest_streak: longest_streak(problems),
            total_revisions: problems
                .iter()
                .fold(0i64, |total, p| total.saturating_add(p.revision_count.max(0))),
            average_rating: average_rating(problems),
        }
    }
}

pub fn needs_revision_count(problems: &[Problem], now: DateTime<Utc>) -> usize {
    problems
        .iter()
        .filter(|problem| needs_revision(problem, now))
        .count()
}

/// Whether the problem was worked on between `week_ago` and `today`, inclusive.
///
/// Problems with an empty revision log fall back to their creation day.
fn active_in_window(problem: &Problem, week_ago: NaiveDate, today: NaiveDate) -> bool {
    let in_window = |day: NaiveDate| day >= week_ago && day <= today;

    if problem.solved_dates.is_empty() {
        return problem
            .created()
            .map(|created| in_window(created.date_naive()))
            .unwrap_or(false);
    }

    problem
        .revision_dates()
        .any(|instant| in_window(instant.date_naive()))
}

/// Problems with activity in the last seven days, today included
pub fn this_week_count(problems: &[Problem], now: DateTime<Utc>) -> usize {
    let today = now.date_naive();
    let week_ago = today - Duration::days(7);

    problems
        .iter()
        .filter(|problem| active_in_window(problem, week_ago, today))
        .count()
}

/// Average minutes spent per problem, rounded; 0 for an empty collection
pub fn avg_time_spent(problems: &[Problem]) -> i64 {
    if problems.is_empty() {
        return 0;
    }

    // Imported totals are unchecked
    let total: i128 = problems.iter().map(|p| i128::from(p.total_time_spent)).sum();
    (total as f64 / problems.len() as f64).round() as i64
}

/// Mean rating over problems that have been rated at least once
pub fn average_rating(problems: &[Problem]) -> f64 {
    let rated: Vec<f64> = problems
        .iter()
        .map(|p| p.average_rating)
        .filter(|rating| rating.is_finite() && *rating > 0.0)
        .collect();

    if rated.is_empty() {
        0.0
    } else {
        rated.iter().sum::<f64>() / rated.len() as f64
    }
}
