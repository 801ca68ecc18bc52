use crate::problem::{Problem, RevisionInput};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Problem not found with id: {0}")]
    NotFound(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Store is read-only")]
    ReadOnly,
}

/// Source of problem snapshots and sink for revision events
pub trait ProblemStore {
    /// The full current problem list
    fn fetch_all_problems(&self) -> Result<Vec<Problem>, StoreError>;

    /// Log a revision against a problem and return the updated problem
    fn record_revision_event(&self, id: i64, input: &RevisionInput)
    -> Result<Problem, StoreError>;
}

/// Rejects revision input the stores would otherwise persist as-is
pub fn validate_revision(input: &RevisionInput) -> Result<(), StoreError> {
    if let Some(rating) = input.rating {
        if !(1..=5).contains(&rating) {
            return Err(StoreError::InvalidInput(format!(
                "rating must be between 1 and 5, got {}",
                rating
            )));
        }
    }

    if let Some(minutes) = input.time_spent {
        if minutes < 0 {
            return Err(StoreError::InvalidInput(format!(
                "time spent must not be negative, got {}",
                minutes
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_revision_accepts_empty_input() {
        assert!(validate_revision(&RevisionInput::default()).is_ok());
    }

    #[test]
    fn test_validate_revision_rating_range() {
        for rating in 1..=5 {
            let input = RevisionInput {
                rating: Some(rating),
                ..RevisionInput::default()
            };
            assert!(validate_revision(&input).is_ok());
        }

        let input = RevisionInput {
            rating: Some(6),
            ..RevisionInput::default()
        };
        let err = validate_revision(&input).unwrap_err();
        assert!(err.to_string().contains("between 1 and 5"));
    }

    #[test]
    fn test_validate_revision_negative_time() {
        let input = RevisionInput {
            time_spent: Some(-5),
            ..RevisionInput::default()
        };
        assert!(matches!(
            validate_revision(&input),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(
            StoreError::NotFound(42).to_string(),
            "Problem not found with id: 42"
        );
    }
}
