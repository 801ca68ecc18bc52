use crate::database::solved_dates::SolvedDatesRepository;
use crate::problem::{Approach, NewProblem, Problem};
use crate::row_factories::{ApproachRowFactory, ProblemRowFactory, date_to_column};
use crate::revision::DEFAULT_REVISION_INTERVAL_DAYS;
use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, OptionalExtension, Result, params};

const PROBLEM_COLUMNS: &str = "id, title, pattern, difficulty, platform, link, notes,
    priority, revision_interval, revision_count, last_revised,
    created_at, total_time_spent, average_rating";

pub struct ProblemsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ProblemsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        ProblemsRepository { conn }
    }

    /// Inserts a freshly solved problem with zeroed aggregates
    pub fn insert(&self, problem: &NewProblem, created_at: DateTime<Utc>) -> Result<i64> {
        let interval = problem
            .revision_interval
            .unwrap_or(DEFAULT_REVISION_INTERVAL_DAYS);

        self.conn.execute(
            "INSERT INTO problems (title, pattern, difficulty, platform, link, notes,
                                   priority, revision_interval, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                problem.title,
                problem.pattern,
                problem.difficulty,
                problem.platform,
                problem.link,
                problem.notes,
                problem.priority,
                interval,
                created_at.to_rfc3339()
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        self.replace_tags(id, &problem.tags)?;
        self.replace_approaches(id, &problem.approaches)?;
        debug!("Created problem id={} ({})", id, problem.title);
        Ok(id)
    }

    /// Inserts a complete problem as found in a snapshot, aggregates included.
    ///
    /// A positive id is kept when `keep_id` is set; otherwise a new one is assigned.
    pub fn insert_snapshot(&self, problem: &Problem, keep_id: bool) -> Result<i64> {
        let id = if keep_id && problem.id > 0 {
            Some(problem.id)
        } else {
            None
        };

        self.conn.execute(
            "INSERT INTO problems (id, title, pattern, difficulty, platform, link, notes,
                                   priority, revision_interval, revision_count, last_revised,
                                   created_at, total_time_spent, average_rating)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                id,
                problem.title,
                problem.pattern,
                problem.difficulty,
                problem.platform,
                problem.link,
                problem.notes,
                problem.priority,
                problem.revision_interval,
                problem.revision_count,
                problem.last_revised.as_ref().and_then(date_to_column),
                problem.created_at.as_ref().and_then(date_to_column),
                problem.total_time_spent,
                problem.average_rating
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        self.replace_tags(id, &problem.tags)?;
        self.replace_approaches(id, &problem.approaches)?;
        let events = SolvedDatesRepository::new(self.conn);
        for entry in &problem.solved_dates {
            events.insert(id, entry)?;
        }
        Ok(id)
    }

    /// Updates descriptive fields; the revision history is left untouched.
    /// Returns false when no problem has this id.
    pub fn update(&self, id: i64, problem: &NewProblem) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE problems
             SET title = ?1, pattern = ?2, difficulty = ?3, platform = ?4, link = ?5,
                 notes = ?6, priority = ?7, revision_interval = ?8
             WHERE id = ?9",
            params![
                problem.title,
                problem.pattern,
                problem.difficulty,
                problem.platform,
                problem.link,
                problem.notes,
                problem.priority,
                problem.revision_interval,
                id
            ],
        )?;

        if changed == 0 {
            return Ok(false);
        }

        self.replace_tags(id, &problem.tags)?;
        self.replace_approaches(id, &problem.approaches)?;
        Ok(true)
    }

    /// Deletes a problem; tags, approaches and events cascade
    pub fn delete(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM problems WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    pub fn delete_all(&self) -> Result<usize> {
        self.conn.execute("DELETE FROM problems", [])
    }

    /// Stores the denormalized aggregates after a revision
    pub fn update_aggregates(
        &self,
        id: i64,
        revision_count: i64,
        last_revised: DateTime<Utc>,
        total_time_spent: i64,
        average_rating: f64,
    ) -> Result<()> {
        self.conn.execute(
            "UPDATE problems
             SET revision_count = ?1, last_revised = ?2, total_time_spent = ?3,
                 average_rating = ?4
             WHERE id = ?5",
            params![
                revision_count,
                last_revised.to_rfc3339(),
                total_time_spent,
                average_rating,
                id
            ],
        )?;
        Ok(())
    }

    pub fn get(&self, id: i64) -> Result<Option<Problem>> {
        let query = format!("SELECT {} FROM problems WHERE id = ?1", PROBLEM_COLUMNS);
        let problem = self
            .conn
            .query_row(&query, [id], ProblemRowFactory::from_row)
            .optional()?;

        match problem {
            Some(problem) => Ok(Some(self.load_children(problem)?)),
            None => Ok(None),
        }
    }

    /// Every problem with its tags, approaches and revision log, oldest first
    pub fn all(&self) -> Result<Vec<Problem>> {
        let query = format!("SELECT {} FROM problems ORDER BY id ASC", PROBLEM_COLUMNS);
        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map([], ProblemRowFactory::from_row)?;

        let mut result = Vec::new();
        for row in rows {
            result.push(self.load_children(row?)?);
        }

        debug!("Loaded {} problems from database", result.len());
        Ok(result)
    }

    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row("SELECT COUNT(*) FROM problems", [], |row| row.get(0))
    }

    fn load_children(&self, mut problem: Problem) -> Result<Problem> {
        problem.tags = self.tags(problem.id)?;
        problem.approaches = self.approaches(problem.id)?;
        problem.solved_dates = SolvedDatesRepository::new(self.conn).for_problem(problem.id)?;
        Ok(problem)
    }

    fn tags(&self, problem_id: i64) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT tag FROM problem_tags WHERE problem_id = ?1 ORDER BY position ASC",
        )?;
        let tags = stmt.query_map([problem_id], |row| row.get(0))?;
        tags.collect()
    }

    fn approaches(&self, problem_id: i64) -> Result<Vec<Approach>> {
        let mut stmt = self.conn.prepare(
            "SELECT notes, code FROM approaches WHERE problem_id = ?1 ORDER BY position ASC",
        )?;
        let approaches = stmt.query_map([problem_id], ApproachRowFactory::from_row)?;
        approaches.collect()
    }

    fn replace_tags(&self, problem_id: i64, tags: &[String]) -> Result<()> {
        self.conn
            .execute("DELETE FROM problem_tags WHERE problem_id = ?1", [problem_id])?;
        for (position, tag) in tags.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO problem_tags (problem_id, position, tag) VALUES (?1, ?2, ?3)",
                params![problem_id, position as i64, tag],
            )?;
        }
        Ok(())
    }

    fn replace_approaches(&self, problem_id: i64, approaches: &[Approach]) -> Result<()> {
        self.conn
            .execute("DELETE FROM approaches WHERE problem_id = ?1", [problem_id])?;
        for (position, approach) in approaches.iter().enumerate() {
            self.conn.execute(
                "INSERT INTO approaches (problem_id, position, notes, code) VALUES (?1, ?2, ?3, ?4)",
                params![problem_id, position as i64, approach.notes, approach.code],
            )?;
        }
        Ok(())
    }
}
