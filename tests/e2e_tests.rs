use chrono::{DateTime, NaiveDate, Utc};
use codetrack::cli::Command;
use codetrack::commands::run_command;
use codetrack::database::Database;
use codetrack::database_factory::{DatabaseConfig, DatabaseFactory};
use std::path::PathBuf;
use std::sync::Arc;

fn fixed_now() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(2025, 1, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_utc()
}

fn create_test_db() -> Database {
    colored::control::set_override(false);
    Database::with_date_provider(":memory:", Arc::new(fixed_now)).unwrap()
}

fn add(title: &str, pattern: &str, difficulty: &str) -> Command {
    Command::Add {
        title: title.to_string(),
        pattern: pattern.to_string(),
        difficulty: difficulty.to_string(),
        platform: "LeetCode".to_string(),
        link: String::new(),
        notes: String::new(),
        tags: vec![],
        priority: None,
        interval: None,
    }
}

fn list(sort: &str, due: bool) -> Command {
    Command::List {
        search: None,
        pattern: None,
        due,
        sort: sort.to_string(),
        asc: true,
    }
}

#[test]
fn test_add_then_revise_flow() {
    let db = create_test_db();

    let output = run_command(&db, &add("Two Sum", "Hash Map", "Easy")).unwrap();
    assert!(output.starts_with("#1 Two Sum\n"));
    assert!(output.contains("  Platform:    LeetCode\n"));
    assert!(output.contains("  Status:      never revised\n"));

    let due = run_command(&db, &Command::Due).unwrap();
    assert!(due.starts_with("1 problem need revision\n"));

    let revise = Command::Revise {
        id: 1,
        time_spent: Some(25),
        rating: Some(4),
    };
    let output = run_command(&db, &revise).unwrap();
    assert!(output.contains("  Revisions:   1 (every 7 days)\n"));
    assert!(output.contains("  Time spent:  25m\n"));
    assert!(output.contains("  Rating:      4.0\n"));
    assert!(output.contains("  Status:      due in 7 days\n"));

    assert_eq!(
        run_command(&db, &Command::Due).unwrap(),
        "Nothing to revise. All caught up!\n"
    );
}

#[test]
fn test_invalid_input_is_reported() {
    let db = create_test_db();
    run_command(&db, &add("Two Sum", "Hash Map", "Easy")).unwrap();

    assert!(run_command(&db, &add("Bad", "Graph", "Impossible")).is_err());
    assert!(run_command(&db, &list("newest", false)).is_err());

    let bad_rating = Command::Revise {
        id: 1,
        time_spent: None,
        rating: Some(6),
    };
    let error = run_command(&db, &bad_rating).unwrap_err();
    assert!(error.to_string().contains("rating must be between 1 and 5"));

    let unknown = Command::Revise {
        id: 99,
        time_spent: None,
        rating: None,
    };
    let error = run_command(&db, &unknown).unwrap_err();
    assert_eq!(error.to_string(), "Problem not found with id: 99");

    let bad_day = Command::Day {
        date: "15/01/2025".to_string(),
    };
    assert!(run_command(&db, &bad_day).is_err());
}

#[test]
fn test_list_sorted_by_title() {
    let db = create_test_db();
    run_command(&db, &add("Word Ladder", "Graph", "Hard")).unwrap();
    run_command(&db, &add("Climbing Stairs", "Dynamic Programming", "Easy")).unwrap();

    let output = run_command(&db, &list("title", false)).unwrap();
    assert_eq!(
        output,
        "  #2 Climbing Stairs [Easy] Dynamic Programming | 0 revisions | never revised\n  \
         #1 Word Ladder [Hard] Graph | 0 revisions | never revised\n"
    );
}

#[test]
fn test_views_over_one_day_of_work() {
    let db = create_test_db();
    run_command(&db, &add("Two Sum", "Hash Map", "Easy")).unwrap();
    run_command(&db, &add("Group Anagrams", "Hash Map", "Medium")).unwrap();

    let patterns = run_command(&db, &Command::Patterns { top: 12 }).unwrap();
    assert!(patterns.contains("  Hash Map  ████████████████████ 2"));

    let timeline = run_command(&db, &Command::Timeline { days: 30 }).unwrap();
    assert!(timeline.contains("  2025-01-15  ██ 2"));

    let day = Command::Day {
        date: "2025-01-15".to_string(),
    };
    let output = run_command(&db, &day).unwrap();
    assert!(output.starts_with("Problems on 2025-01-15\n"));
    assert!(output.contains("#2 Group Anagrams"));

    let calendar = run_command(&db, &Command::Calendar { month: None }).unwrap();
    assert!(calendar.starts_with("January 2025\n"));
    assert!(calendar.contains("Busiest day: 2025-01-15 (2 problems)"));

    let dashboard = run_command(&db, &Command::Dashboard).unwrap();
    assert!(dashboard.contains("Total problems:   2\n"));
    assert!(dashboard.contains("Current streak:   1 day (longest 1)\n"));
}

#[test]
fn test_export_and_import_commands() {
    let db = create_test_db();
    run_command(&db, &add("Two Sum", "Hash Map", "Easy")).unwrap();
    run_command(&db, &add("Jump Game", "Greedy", "Medium")).unwrap();

    let file = std::env::temp_dir()
        .join(format!("codetrack-e2e-{}", std::process::id()))
        .join("problems.json");
    let output = run_command(&db, &Command::Export { file: file.clone() }).unwrap();
    assert!(output.starts_with("Exported 2 problems to "));

    let config = DatabaseConfig::builder()
        .test_mode()
        .date_ymd(2025, 1, 15)
        .build();
    let other = DatabaseFactory::create(config).unwrap();
    let output = run_command(
        &other,
        &Command::Import {
            file: file.clone(),
            merge: false,
        },
    )
    .unwrap();
    assert_eq!(output, "Imported 2 problems (replaced existing)\n");

    run_command(&other, &Command::Import { file, merge: true }).unwrap();
    assert_eq!(other.count_problems().unwrap(), 4);

    let missing = Command::Import {
        file: PathBuf::from("/nonexistent/codetrack.json"),
        merge: false,
    };
    assert!(run_command(&other, &missing).is_err());
}
