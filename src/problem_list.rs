use crate::problem::Problem;
use crate::revision::needs_revision;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemFilter {
    /// Case-insensitive substring of the title
    pub search: String,
    /// Exact pattern; `None` keeps every pattern
    pub pattern: Option<String>,
    pub only_due: bool,
}

impl ProblemFilter {
    pub fn matches(&self, problem: &Problem, now: DateTime<Utc>) -> bool {
        let matches_search = self.search.is_empty()
            || problem
                .title
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let matches_pattern = self
            .pattern
            .as_deref()
            .map(|pattern| problem.pattern == pattern)
            .unwrap_or(true);
        let matches_due = !self.only_due || needs_revision(problem, now);

        matches_search && matches_pattern && matches_due
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Date,
    Title,
    Difficulty,
    RevisionCount,
}

impl SortBy {
    pub fn as_str(&self) -> &str {
        match self {
            SortBy::Date => "date",
            SortBy::Title => "title",
            SortBy::Difficulty => "difficulty",
            SortBy::RevisionCount => "revisions",
        }
    }

    pub fn from(s: &str) -> Option<Self> {
        match s {
            "date" => Some(SortBy::Date),
            "title" => Some(SortBy::Title),
            "difficulty" => Some(SortBy::Difficulty),
            "revisions" | "revisionCount" => Some(SortBy::RevisionCount),
            _ => None,
        }
    }

    fn compare(&self, a: &Problem, b: &Problem) -> Ordering {
        match self {
            SortBy::Date => a.created().cmp(&b.created()),
            SortBy::Title => a.title.cmp(&b.title),
            SortBy::Difficulty => a.difficulty_level().cmp(&b.difficulty_level()),
            SortBy::RevisionCount => a.revision_count.cmp(&b.revision_count),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter then sort a snapshot for the list view.
///
/// Unreadable creation dates and unknown difficulties sort before everything else.
pub fn apply<'a>(
    problems: &'a [Problem],
    filter: &ProblemFilter,
    sort_by: SortBy,
    order: SortOrder,
    now: DateTime<Utc>,
) -> Vec<&'a Problem> {
    let mut selected: Vec<&Problem> = problems
        .iter()
        .filter(|problem| filter.matches(problem, now))
        .collect();

    selected.sort_by(|a, b| {
        let ordering = sort_by.compare(a, b);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    selected
}
