pub mod connection;
pub mod problems;
pub mod solved_dates;

use crate::date_provider::{DateProvider, SystemDateProvider};
use crate::problem::{NewProblem, Problem, RevisionInput, SolvedDate};
use crate::store::{ProblemStore, StoreError, validate_revision};
use chrono::{DateTime, Utc};
use log::{debug, info};
use rusqlite::Connection;
use std::sync::Arc;

pub use problems::ProblemsRepository;
pub use solved_dates::SolvedDatesRepository;

/// Main Database struct providing access to all repositories
pub struct Database {
    pub conn: Connection,
    date_provider: Arc<dyn DateProvider>,
}

impl Database {
    pub fn new(db_path: &str) -> Result<Self, StoreError> {
        Self::init(db_path, Arc::new(SystemDateProvider))
    }

    pub fn with_date_provider(
        db_path: &str,
        date_provider: Arc<dyn DateProvider>,
    ) -> Result<Self, StoreError> {
        Self::init(db_path, date_provider)
    }

    fn init(db_path: &str, date_provider: Arc<dyn DateProvider>) -> Result<Self, StoreError> {
        let conn = connection::init_connection(db_path)?;
        debug!("Opened database at {}", db_path);
        Ok(Database {
            conn,
            date_provider,
        })
    }

    /// Helper method to get the current time (delegates to date provider)
    pub fn get_current_time(&self) -> DateTime<Utc> {
        self.date_provider.get_current_time()
    }

    // ===== Problems Repository Access =====

    /// Stores a newly solved problem and logs its first solve at the current time
    pub fn create_problem(&self, problem: &NewProblem) -> Result<Problem, StoreError> {
        let now = self.get_current_time();
        let tx = self.conn.unchecked_transaction()?;

        let id = ProblemsRepository::new(&tx).insert(problem, now)?;
        SolvedDatesRepository::new(&tx).insert(id, &SolvedDate::event(now, None, None))?;
        tx.commit()?;

        info!("Added problem {} '{}'", id, problem.title);
        self.get_problem(id)?.ok_or(StoreError::NotFound(id))
    }

    pub fn get_problem(&self, id: i64) -> Result<Option<Problem>, StoreError> {
        let repo = ProblemsRepository::new(&self.conn);
        Ok(repo.get(id)?)
    }

    pub fn update_problem(&self, id: i64, problem: &NewProblem) -> Result<Problem, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        if !ProblemsRepository::new(&tx).update(id, problem)? {
            return Err(StoreError::NotFound(id));
        }
        tx.commit()?;

        self.get_problem(id)?.ok_or(StoreError::NotFound(id))
    }

    pub fn delete_problem(&self, id: i64) -> Result<(), StoreError> {
        let repo = ProblemsRepository::new(&self.conn);
        if !repo.delete(id)? {
            return Err(StoreError::NotFound(id));
        }
        info!("Deleted problem {}", id);
        Ok(())
    }

    pub fn count_problems(&self) -> Result<i64, StoreError> {
        let repo = ProblemsRepository::new(&self.conn);
        Ok(repo.count()?)
    }

    pub fn all_problems(&self) -> Result<Vec<Problem>, StoreError> {
        let repo = ProblemsRepository::new(&self.conn);
        Ok(repo.all()?)
    }

    // ===== Revisions =====

    /// Appends a revision event and refreshes the problem's aggregates
    pub fn record_revision(&self, id: i64, input: &RevisionInput) -> Result<Problem, StoreError> {
        validate_revision(input)?;

        let now = self.get_current_time();
        let tx = self.conn.unchecked_transaction()?;
        let problems = ProblemsRepository::new(&tx);
        let events = SolvedDatesRepository::new(&tx);

        let current = problems.get(id)?.ok_or(StoreError::NotFound(id))?;

        let total_time_spent = current
            .total_time_spent
            .checked_add(input.time_spent.unwrap_or(0))
            .ok_or_else(|| {
                StoreError::InvalidInput(format!("total time spent overflows for problem {}", id))
            })?;
        let revision_count = current.revision_count.checked_add(1).ok_or_else(|| {
            StoreError::InvalidInput(format!("revision count overflows for problem {}", id))
        })?;

        let date = input.date.unwrap_or(now);
        events.insert(id, &SolvedDate::event(date, input.time_spent, input.rating))?;

        let average_rating = match input.rating {
            Some(_) => events
                .average_rating(id)?
                .map(|mean| (mean * 10.0).round() / 10.0)
                .unwrap_or(current.average_rating),
            None => current.average_rating,
        };

        problems.update_aggregates(
            id,
            revision_count,
            now,
            total_time_spent,
            average_rating,
        )?;
        tx.commit()?;

        debug!("Recorded revision {} of problem {}", revision_count, id);
        self.get_problem(id)?.ok_or(StoreError::NotFound(id))
    }

    // ===== Import =====

    /// Drops every stored problem and loads the given list, keeping its ids
    pub fn replace_all(&self, problems: &[Problem]) -> Result<usize, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let repo = ProblemsRepository::new(&tx);

        let removed = repo.delete_all()?;
        for problem in problems {
            repo.insert_snapshot(problem, true)?;
        }
        tx.commit()?;

        info!(
            "Replaced {} stored problems with {} imported",
            removed,
            problems.len()
        );
        Ok(problems.len())
    }

    /// Appends the given list to the stored problems under fresh ids
    pub fn merge(&self, problems: &[Problem]) -> Result<usize, StoreError> {
        let tx = self.conn.unchecked_transaction()?;
        let repo = ProblemsRepository::new(&tx);

        for problem in problems {
            repo.insert_snapshot(problem, false)?;
        }
        tx.commit()?;

        info!("Merged {} imported problems", problems.len());
        Ok(problems.len())
    }
}

impl ProblemStore for Database {
    fn fetch_all_problems(&self) -> Result<Vec<Problem>, StoreError> {
        self.all_problems()
    }

    fn record_revision_event(&self, id: i64, input: &RevisionInput) -> Result<Problem, StoreError> {
        self.record_revision(id, input)
    }
}
