use crate::problem::SolvedDate;
use crate::row_factories::{SolvedDateRowFactory, date_to_column};
use rusqlite::{Connection, Result, params};

pub struct SolvedDatesRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SolvedDatesRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        SolvedDatesRepository { conn }
    }

    pub fn insert(&self, problem_id: i64, entry: &SolvedDate) -> Result<i64> {
        let date = entry.date_value().and_then(date_to_column);
        self.conn.execute(
            "INSERT INTO solved_dates (problem_id, date, time_spent, rating)
             VALUES (?1, ?2, ?3, ?4)",
            params![problem_id, date, entry.time_spent(), entry.rating()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// The revision log of a problem in insertion order
    pub fn for_problem(&self, problem_id: i64) -> Result<Vec<SolvedDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT date, time_spent, rating FROM solved_dates
             WHERE problem_id = ?1
             ORDER BY id ASC",
        )?;

        let entries = stmt.query_map([problem_id], SolvedDateRowFactory::from_row)?;
        entries.collect()
    }

    /// Mean of all given ratings, `None` if no event was rated
    pub fn average_rating(&self, problem_id: i64) -> Result<Option<f64>> {
        self.conn.query_row(
            "SELECT AVG(rating) FROM solved_dates
             WHERE problem_id = ?1 AND rating IS NOT NULL",
            [problem_id],
            |row| row.get(0),
        )
    }
}
