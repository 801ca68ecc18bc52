use chrono::{DateTime, NaiveDate, Utc};
use codetrack::dates::DateValue;
use codetrack::problem::{Problem, SolvedDate};
use codetrack::report;
use codetrack::stats::RevisionStats;

fn fixed_now() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
}

fn text(value: &str) -> Option<DateValue> {
    Some(DateValue::Text(value.to_string()))
}

fn solved(dates: &[&str]) -> Vec<SolvedDate> {
    dates
        .iter()
        .map(|date| SolvedDate::Bare(DateValue::Text(date.to_string())))
        .collect()
}

/// Two weeks of practice, including one problem with a broken creation date
fn sample_problems() -> Vec<Problem> {
    vec![
        Problem {
            id: 1,
            title: "Two Sum".to_string(),
            pattern: "Hash Map".to_string(),
            difficulty: "Easy".to_string(),
            created_at: text("2025-01-10T09:00:00Z"),
            last_revised: text("2025-01-15T08:00:00Z"),
            revision_interval: Some(7),
            revision_count: 2,
            total_time_spent: 30,
            average_rating: 4.0,
            solved_dates: solved(&[
                "2025-01-10T09:00:00Z",
                "2025-01-14T08:00:00Z",
                "2025-01-15T08:00:00Z",
            ]),
            ..Problem::default()
        },
        Problem {
            id: 2,
            title: "3Sum".to_string(),
            pattern: "Two Pointers".to_string(),
            difficulty: "Medium".to_string(),
            created_at: text("2025-01-02T10:00:00Z"),
            last_revised: text("2025-01-03T10:00:00Z"),
            revision_interval: Some(7),
            revision_count: 1,
            total_time_spent: 45,
            average_rating: 3.0,
            solved_dates: solved(&["2025-01-02T10:00:00Z", "2025-01-03T10:00:00Z"]),
            ..Problem::default()
        },
        Problem {
            id: 3,
            title: "Valid Anagram".to_string(),
            pattern: "Hash Map".to_string(),
            difficulty: "Easy".to_string(),
            created_at: text("2025-01-13T18:00:00Z"),
            solved_dates: solved(&["2025-01-13T18:00:00Z"]),
            ..Problem::default()
        },
        Problem {
            id: 4,
            title: "Word Ladder".to_string(),
            pattern: "Graph".to_string(),
            difficulty: "Hard".to_string(),
            created_at: text("garbage"),
            last_revised: text("2025-01-12T12:00:00Z"),
            revision_interval: Some(14),
            revision_count: 1,
            total_time_spent: 60,
            solved_dates: solved(&["2025-01-12T12:00:00Z"]),
            ..Problem::default()
        },
    ]
}

#[test]
fn test_dashboard_no_color() {
    colored::control::set_override(false);
    let problems = sample_problems();
    let output = report::render_dashboard(&RevisionStats::new(&problems, fixed_now()));

    insta::assert_snapshot!("dashboard_no_color", output);
}

#[test]
fn test_due_no_color() {
    colored::control::set_override(false);
    let problems = sample_problems();
    let stats = RevisionStats::new(&problems, fixed_now());
    let output = report::render_due(&stats.due(), fixed_now());

    insta::assert_snapshot!("due_no_color", output);
}

#[test]
fn test_calendar_no_color() {
    colored::control::set_override(false);
    let problems = sample_problems();
    let stats = RevisionStats::new(&problems, fixed_now());
    let month = stats.month(2025, 1).unwrap();
    let output = report::render_calendar(&month);

    insta::assert_snapshot!("calendar_no_color", output);
}

#[test]
fn test_day_view_lists_problem_solved_that_day() {
    colored::control::set_override(false);
    let problems = sample_problems();
    let stats = RevisionStats::new(&problems, fixed_now());
    let day = NaiveDate::from_ymd_opt(2025, 1, 13).unwrap();

    let output = report::render_day(day, &stats.on_day(day), fixed_now());
    assert_eq!(
        output,
        "Problems on 2025-01-13\n\
         ======================\n  \
         #3 Valid Anagram [Easy] Hash Map | 0 revisions | never revised\n"
    );
}

#[test]
fn test_day_view_falls_back_to_creation_day() {
    colored::control::set_override(false);
    let problems = vec![Problem {
        id: 5,
        title: "Coin Change".to_string(),
        pattern: "Dynamic Programming".to_string(),
        difficulty: "Medium".to_string(),
        created_at: text("2025-01-05T09:00:00Z"),
        solved_dates: solved(&["2025-01-06T09:00:00Z"]),
        ..Problem::default()
    }];
    let stats = RevisionStats::new(&problems, fixed_now());
    let day = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();

    let output = report::render_day(day, &stats.on_day(day), fixed_now());
    assert_eq!(
        output,
        "Problems on 2025-01-05\n\
         ======================\n  \
         #5 Coin Change [Medium] Dynamic Programming | 0 revisions | never revised\n"
    );
}
