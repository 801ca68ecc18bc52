use crate::dates::previous_day;
use crate::problem::Problem;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeSet;

/// Unique calendar days (UTC) carrying at least one readable revision event
pub fn active_days(problems: &[Problem]) -> BTreeSet<NaiveDate> {
    problems
        .iter()
        .flat_map(Problem::revision_dates)
        .map(|instant| instant.date_naive())
        .collect()
}

/// Calculate the number of consecutive days with revisions, ending today or yesterday.
///
/// Walks the unique active days from newest to oldest. The first day may be
/// today or yesterday; every following day must be exactly one day before the
/// previous one. Days after today are ignored. Returns 0 when there are no
/// revision events at all.
pub fn current_streak(problems: &[Problem], now: DateTime<Utc>) -> u32 {
    let today = now.date_naive();
    let days = active_days(problems);

    let mut streak = 0;
    let mut expected: Option<NaiveDate> = None;

    for day in days.iter().rev().filter(|day| **day <= today) {
        let continues = match expected {
            None => (today - *day).num_days() <= 1,
            Some(next) => *day == next,
        };
        if !continues {
            break;
        }

        streak += 1;
        match previous_day(*day) {
            Some(previous) => expected = Some(previous),
            None => break,
        }
    }

    streak
}

/// Longest run of consecutive active days anywhere in the history
pub fn longest_streak(problems: &[Problem]) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut last: Option<NaiveDate> = None;

    for day in active_days(problems) {
        run = match last {
            Some(previous) if day - previous == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        last = Some(day);
    }

    longest
}

/// The last `window` days up to and including today, newest first
fn trailing_window(now: DateTime<Utc>, window: u32) -> Vec<NaiveDate> {
    let mut days = Vec::with_capacity(window as usize);
    let mut current = Some(now.date_naive());
    while let Some(day) = current {
        if days.len() >= window as usize {
            break;
        }
        days.push(day);
        current = previous_day(day);
    }
    days
}

/// Days in the trailing window that had a revision, sorted descending.
///
/// Example: with revisions on 2025-01-15, 2025-01-13 and 2025-01-02 and a
/// 10-day window ending 2025-01-15, returns [2025-01-15, 2025-01-13].
pub fn days_with_revisions(problems: &[Problem], now: DateTime<Utc>, window: u32) -> Vec<NaiveDate> {
    let active = active_days(problems);
    trailing_window(now, window)
        .into_iter()
        .filter(|day| active.contains(day))
        .collect()
}

/// Days in the trailing window without any revision, sorted descending
pub fn missing_days(problems: &[Problem], now: DateTime<Utc>, window: u32) -> Vec<NaiveDate> {
    let active = active_days(problems);
    trailing_window(now, window)
        .into_iter()
        .filter(|day| !active.contains(day))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateValue;
    use crate::problem::SolvedDate;

    fn fixed_now() -> DateTime<Utc> {
        chrono::NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc()
    }

    fn days_ago(days: i64) -> DateTime<Utc> {
        fixed_now() - Duration::days(days)
    }

    fn problem_revised_on(dates: &[DateTime<Utc>]) -> Problem {
        Problem {
            solved_dates: dates
                .iter()
                .map(|date| SolvedDate::event(*date, None, None))
                .collect(),
            ..Problem::default()
        }
    }

    #[test]
    fn test_streak_empty_collection() {
        assert_eq!(current_streak(&[], fixed_now()), 0);
    }

    #[test]
    fn test_streak_problems_without_events() {
        let problems = vec![Problem::default(), Problem::default()];
        assert_eq!(current_streak(&problems, fixed_now()), 0);
    }

    #[test]
    fn test_streak_today_and_yesterday() {
        let problems = vec![problem_revised_on(&[days_ago(0), days_ago(1)])];
        assert_eq!(current_streak(&problems, fixed_now()), 2);
    }

    #[test]
    fn test_streak_only_two_days_ago_is_broken() {
        let problems = vec![problem_revised_on(&[days_ago(2)])];
        assert_eq!(current_streak(&problems, fixed_now()), 0);
    }

    #[test]
    fn test_streak_starting_yesterday_counts() {
        let problems = vec![problem_revised_on(&[days_ago(1), days_ago(2), days_ago(3)])];
        assert_eq!(current_streak(&problems, fixed_now()), 3);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let problems = vec![problem_revised_on(&[days_ago(0), days_ago(1), days_ago(3)])];
        assert_eq!(current_streak(&problems, fixed_now()), 2);
    }

    #[test]
    fn test_streak_dedupes_same_day_across_problems() {
        let morning = fixed_now() - Duration::hours(11);
        let evening = fixed_now() + Duration::hours(11);
        let problems = vec![
            problem_revised_on(&[morning, days_ago(1)]),
            problem_revised_on(&[evening, days_ago(1) + Duration::hours(3)]),
            problem_revised_on(&[days_ago(2)]),
        ];
        assert_eq!(current_streak(&problems, fixed_now()), 3);
    }

    #[test]
    fn test_streak_skips_unreadable_dates() {
        let mut problem = problem_revised_on(&[days_ago(0), days_ago(1)]);
        problem
            .solved_dates
            .push(SolvedDate::Bare(DateValue::Text("whenever".to_string())));
        problem
            .solved_dates
            .push(SolvedDate::Bare(DateValue::Text("2025-01-15".to_string())));
        assert_eq!(current_streak(&[problem], fixed_now()), 2);
    }

    #[test]
    fn test_streak_ignores_future_events() {
        let problems = vec![problem_revised_on(&[days_ago(-3), days_ago(0), days_ago(1)])];
        assert_eq!(current_streak(&problems, fixed_now()), 2);
    }

    #[test]
    fn test_longest_streak() {
        let problems = vec![problem_revised_on(&[
            days_ago(0),
            days_ago(5),
            days_ago(6),
            days_ago(7),
            days_ago(8),
            days_ago(10),
        ])];
        assert_eq!(longest_streak(&problems), 4);
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn test_days_with_revisions_in_window() {
        let problems = vec![problem_revised_on(&[days_ago(0), days_ago(2), days_ago(13)])];
        let days = days_with_revisions(&problems, fixed_now(), 10);
        assert_eq!(
            days,
            vec![days_ago(0).date_naive(), days_ago(2).date_naive()]
        );
    }

    #[test]
    fn test_missing_days_empty() {
        let missing = missing_days(&[], fixed_now(), 10);
        // today + 9 days back
        assert_eq!(missing.len(), 10);
        assert_eq!(missing[0], fixed_now().date_naive());
    }

    #[test]
    fn test_missing_days_with_recent_revision() {
        let problems = vec![problem_revised_on(&[days_ago(0)])];
        let missing = missing_days(&problems, fixed_now(), 10);
        assert_eq!(missing.len(), 9);
        assert!(!missing.contains(&fixed_now().date_naive()));
    }
}
