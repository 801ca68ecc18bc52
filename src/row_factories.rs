use crate::dates::DateValue;
use crate::problem::{Approach, Problem, RevisionEvent, SolvedDate};
use rusqlite::Row;

/// Factory for creating Problem objects from database rows
pub struct ProblemRowFactory;

impl ProblemRowFactory {
    /// Creates a Problem (without tags, approaches or revision log) from a database row
    /// Expected columns: id, title, pattern, difficulty, platform, link, notes,
    ///                   priority, revision_interval, revision_count, last_revised,
    ///                   created_at, total_time_spent, average_rating
    pub fn from_row(row: &Row) -> rusqlite::Result<Problem> {
        Ok(Problem {
            id: row.get(0)?,
            title: row.get(1)?,
            pattern: row.get(2)?,
            difficulty: row.get(3)?,
            platform: row.get(4)?,
            link: row.get(5)?,
            notes: row.get(6)?,
            priority: row.get(7)?,
            revision_interval: row.get(8)?,
            revision_count: row.get(9)?,
            last_revised: row.get::<_, Option<String>>(10)?.map(DateValue::Text),
            created_at: row.get::<_, Option<String>>(11)?.map(DateValue::Text),
            total_time_spent: row.get(12)?,
            average_rating: row.get(13)?,
            tags: Vec::new(),
            solved_dates: Vec::new(),
            approaches: Vec::new(),
        })
    }
}

/// Factory for creating revision log entries from database rows
pub struct SolvedDateRowFactory;

impl SolvedDateRowFactory {
    /// Creates a SolvedDate from a database row
    /// Expected columns: date, time_spent, rating
    pub fn from_row(row: &Row) -> rusqlite::Result<SolvedDate> {
        Ok(SolvedDate::Event(RevisionEvent {
            date: row.get::<_, Option<String>>(0)?.map(DateValue::Text),
            time_spent: row.get(1)?,
            rating: row.get(2)?,
        }))
    }
}

pub struct ApproachRowFactory;

impl ApproachRowFactory {
    /// Expected columns: notes, code
    pub fn from_row(row: &Row) -> rusqlite::Result<Approach> {
        Ok(Approach {
            notes: row.get(0)?,
            code: row.get(1)?,
        })
    }
}

/// Column text for a date; unreadable values keep their original text when they have one
pub fn date_to_column(value: &DateValue) -> Option<String> {
    match value {
        DateValue::Text(text) => Some(text.clone()),
        DateValue::Millis(ms) => Some(
            value
                .resolve()
                .map(|instant| instant.to_rfc3339())
                .unwrap_or_else(|| ms.to_string()),
        ),
        DateValue::Unrecognized(_) => None,
    }
}
