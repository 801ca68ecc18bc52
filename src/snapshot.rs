//! Exported problem lists stored as a single JSON array.
//!
//! The file uses the same camelCase field names as the web API export, so
//! exports from either side can be imported here.

use crate::problem::{Problem, RevisionInput};
use crate::store::{ProblemStore, StoreError};
use log::debug;
use std::path::{Path, PathBuf};

/// A problem list read from a JSON export.
pub struct JsonSnapshot {
    path: PathBuf,
    problems: Vec<Problem>,
}

impl JsonSnapshot {
    /// Reads and parses the export at `path`.
    ///
    /// Unreadable dates inside an otherwise valid file are kept as-is and
    /// only surface as missing values in the statistics.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = std::fs::read_to_string(&path)?;
        let problems: Vec<Problem> = serde_json::from_str(&data)?;

        debug!("Loaded {} problems from {}", problems.len(), path.display());
        Ok(Self { path, problems })
    }

    /// Writes `problems` to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(path: impl AsRef<Path>, problems: &[Problem]) -> Result<(), StoreError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(problems)?;
        std::fs::write(path, json)?;
        debug!("Wrote {} problems to {}", problems.len(), path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn into_problems(self) -> Vec<Problem> {
        self.problems
    }
}

impl ProblemStore for JsonSnapshot {
    fn fetch_all_problems(&self) -> Result<Vec<Problem>, StoreError> {
        Ok(self.problems.clone())
    }

    fn record_revision_event(&self, _id: i64, _input: &RevisionInput) -> Result<Problem, StoreError> {
        Err(StoreError::ReadOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::DateValue;

    fn temp_file(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("codetrack-snapshot-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_load_web_export() {
        let path = temp_file("web_export.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"[{
                "id": 3,
                "title": "Merge Intervals",
                "pattern": "Merge Intervals",
                "difficulty": "Medium",
                "revisionInterval": 5,
                "createdAt": 1736942400000,
                "lastRevised": "not a date",
                "solvedDates": ["2025-01-15T12:00:00.000Z", {"date": "2025-01-16", "timeSpent": 12, "rating": 4}]
            }]"#,
        )
        .unwrap();

        let snapshot = JsonSnapshot::load(&path).unwrap();
        let problem = &snapshot.problems()[0];
        assert_eq!(problem.revision_interval, Some(5));
        assert_eq!(problem.created_at, Some(DateValue::Millis(1_736_942_400_000)));
        assert!(problem.last_revised_at().is_none());
        assert_eq!(problem.revision_dates().count(), 2);
        assert_eq!(problem.solved_dates[1].time_spent(), Some(12));
    }

    #[test]
    fn test_load_export_with_null_columns() {
        let path = temp_file("null_columns.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(
            &path,
            r#"[{
                "id": 1,
                "title": "Two Sum",
                "pattern": "Hash Map",
                "difficulty": "Easy",
                "platform": null,
                "link": null,
                "notes": null,
                "totalTimeSpent": null,
                "averageRating": null
            }]"#,
        )
        .unwrap();

        let snapshot = JsonSnapshot::load(&path).unwrap();
        let problem = &snapshot.problems()[0];
        assert_eq!(problem.title, "Two Sum");
        assert!(problem.platform.is_empty());
        assert_eq!(problem.total_time_spent, 0);
    }

    #[test]
    fn test_save_then_load_keeps_problems() {
        let path = temp_file("nested/export.json");
        let problems = vec![Problem {
            id: 1,
            title: "Two Sum".to_string(),
            pattern: "Hash Map".to_string(),
            difficulty: "Easy".to_string(),
            tags: vec!["array".to_string()],
            ..Problem::default()
        }];

        JsonSnapshot::save(&path, &problems).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"revisionCount\""));

        let snapshot = JsonSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.path(), path.as_path());
        assert_eq!(snapshot.into_problems(), problems);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = temp_file("broken.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(JsonSnapshot::load(&path), Err(StoreError::Json(_))));
        assert!(matches!(
            JsonSnapshot::load(temp_file("missing.json")),
            Err(StoreError::Io(_))
        ));
    }

    #[test]
    fn test_snapshot_is_read_only() {
        let snapshot = JsonSnapshot {
            path: PathBuf::from("unused.json"),
            problems: Vec::new(),
        };
        assert!(snapshot.fetch_all_problems().unwrap().is_empty());
        assert!(matches!(
            snapshot.record_revision_event(1, &RevisionInput::default()),
            Err(StoreError::ReadOnly)
        ));
    }
}
