use chrono::{DateTime, Duration, Utc};
use codetrack::database::Database;
use codetrack::problem::{NewProblem, RevisionInput};
use codetrack::store::StoreError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

const PROBLEMS: [(&str, &str, &str); 12] = [
    ("Two Sum", "Hash Map", "Easy"),
    ("Valid Anagram", "Hash Map", "Easy"),
    ("Container With Most Water", "Two Pointers", "Medium"),
    ("3Sum", "Two Pointers", "Medium"),
    ("Longest Substring Without Repeating Characters", "Sliding Window", "Medium"),
    ("Minimum Window Substring", "Sliding Window", "Hard"),
    ("Search in Rotated Sorted Array", "Binary Search", "Medium"),
    ("Merge Intervals", "Merge Intervals", "Medium"),
    ("Number of Islands", "Graph", "Medium"),
    ("Word Ladder", "Graph", "Hard"),
    ("Top K Frequent Elements", "Heap", "Medium"),
    ("Climbing Stairs", "Dynamic Programming", "Easy"),
];

const PLATFORMS: [&str; 3] = ["LeetCode", "NeetCode", "HackerRank"];

/// Store whose clock can be moved so history can be backdated
fn open_with_clock(path: &str) -> Result<(Database, Arc<AtomicI64>), StoreError> {
    let clock = Arc::new(AtomicI64::new(Utc::now().timestamp_millis()));
    let reader = Arc::clone(&clock);
    let db = Database::with_date_provider(
        path,
        Arc::new(move || {
            DateTime::from_timestamp_millis(reader.load(Ordering::Relaxed)).unwrap_or_else(Utc::now)
        }),
    )?;
    Ok((db, clock))
}

/// Adds the sample problems with random history ending at `today`.
///
/// Returns the id of the problem revised today to keep the streak alive.
fn seed<R: Rng>(
    db: &Database,
    clock: &AtomicI64,
    today: DateTime<Utc>,
    rng: &mut R,
) -> Result<Option<i64>, StoreError> {
    let set_now = |instant: DateTime<Utc>| clock.store(instant.timestamp_millis(), Ordering::Relaxed);

    let mut latest_id = None;
    for (title, pattern, difficulty) in PROBLEMS {
        let solved_at = today - Duration::days(rng.gen_range(3..45)) - Duration::hours(rng.gen_range(0..12));
        set_now(solved_at);

        let problem = db.create_problem(&NewProblem {
            title: title.to_string(),
            pattern: pattern.to_string(),
            difficulty: difficulty.to_string(),
            platform: PLATFORMS.choose(rng).copied().unwrap_or("LeetCode").to_string(),
            revision_interval: Some([3, 7, 14][rng.gen_range(0..3)]),
            ..NewProblem::default()
        })?;
        latest_id = Some(problem.id);

        // A few revisions between the solve and today
        let mut revised_at = solved_at;
        for _ in 0..rng.gen_range(0..4) {
            revised_at += Duration::days(rng.gen_range(1..8));
            if revised_at >= today {
                break;
            }
            set_now(revised_at);
            db.record_revision(
                problem.id,
                &RevisionInput {
                    date: None,
                    time_spent: Some(rng.gen_range(5..60)),
                    rating: Some(rng.gen_range(1..=5)),
                },
            )?;
        }
    }

    // Keep today's streak alive
    set_now(today);
    if let Some(id) = latest_id {
        db.record_revision(
            id,
            &RevisionInput {
                date: None,
                time_spent: Some(10),
                rating: Some(5),
            },
        )?;
    }

    Ok(latest_id)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let path = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "/tmp/codetrack_demo.db".to_string());

    let (db, clock) = open_with_clock(&path)?;
    seed(&db, &clock, Utc::now(), &mut rand::thread_rng())?;

    println!(
        "Demo database created at {} with {} problems",
        path,
        db.count_problems()?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use codetrack::stats::streak::current_streak;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_seeding_twice_revises_the_newest_problem() {
        let (db, clock) = open_with_clock(":memory:").unwrap();
        // The clock keeps millisecond precision
        let today = DateTime::from_timestamp_millis(Utc::now().timestamp_millis()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let first = seed(&db, &clock, today, &mut rng).unwrap();
        let second = seed(&db, &clock, today, &mut rng).unwrap();
        assert_eq!(first, Some(PROBLEMS.len() as i64));
        assert_eq!(second, Some(2 * PROBLEMS.len() as i64));

        let newest = db.get_problem(2 * PROBLEMS.len() as i64).unwrap().unwrap();
        assert_eq!(newest.last_revised_at(), Some(today));
        assert_eq!(db.count_problems().unwrap(), 2 * PROBLEMS.len() as i64);
        assert!(current_streak(&db.all_problems().unwrap(), today) >= 1);
    }

    #[test]
    fn test_seeding_after_first_problem_was_deleted() {
        let (db, clock) = open_with_clock(":memory:").unwrap();
        let today = Utc::now();
        let mut rng = StdRng::seed_from_u64(11);

        seed(&db, &clock, today, &mut rng).unwrap();
        db.delete_problem(1).unwrap();

        assert!(seed(&db, &clock, today, &mut rng).is_ok());
    }
}
