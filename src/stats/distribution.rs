use crate::problem::{Difficulty, Problem};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// A category and how many problems fall in it
#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub name: String,
    pub count: usize,
    /// Percentage of the largest bucket, used for bar widths
    pub share: f64,
}

/// Count problems per pattern, most common first.
///
/// Patterns with equal counts keep the order in which they were first seen.
/// Only the first `top_n` buckets are returned.
pub fn pattern_distribution(problems: &[Problem], top_n: usize) -> Vec<Bucket> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for problem in problems {
        let pattern = problem.pattern.as_str();
        match index.get(pattern) {
            Some(&position) => order[position].1 += 1,
            None => {
                index.insert(pattern, order.len());
                order.push((pattern, 1));
            }
        }
    }

    // stable sort keeps first-seen order among ties
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order.truncate(top_n);

    let max_count = order.first().map(|(_, count)| *count).unwrap_or(0);
    order
        .into_iter()
        .map(|(name, count)| Bucket {
            name: name.to_string(),
            count,
            share: percentage(count, max_count),
        })
        .collect()
}

/// Problems per difficulty; unrecognized difficulties are not counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DifficultyBreakdown {
    pub easy: usize,
    pub medium: usize,
    pub hard: usize,
}

impl DifficultyBreakdown {
    pub fn count(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn total(&self) -> usize {
        self.easy + self.medium + self.hard
    }

    pub fn percent(&self, difficulty: Difficulty) -> f64 {
        percentage(self.count(difficulty), self.total())
    }

    pub fn entries(&self) -> [(Difficulty, usize); 3] {
        Difficulty::ALL.map(|difficulty| (difficulty, self.count(difficulty)))
    }
}

pub fn difficulty_distribution(problems: &[Problem]) -> DifficultyBreakdown {
    let mut breakdown = DifficultyBreakdown::default();
    for difficulty in problems.iter().filter_map(Problem::difficulty_level) {
        match difficulty {
            Difficulty::Easy => breakdown.easy += 1,
            Difficulty::Medium => breakdown.medium += 1,
            Difficulty::Hard => breakdown.hard += 1,
        }
    }
    breakdown
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub day: NaiveDate,
    pub count: usize,
}

/// Problems added per calendar day, oldest first, limited to the `days` most recent entries
pub fn problems_over_time(problems: &[Problem], days: usize) -> Vec<DailyCount> {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for created in problems.iter().filter_map(Problem::created) {
        *per_day.entry(created.date_naive()).or_insert(0) += 1;
    }

    let skip = per_day.len().saturating_sub(days);
    per_day
        .into_iter()
        .skip(skip)
        .map(|(day, count)| DailyCount { day, count })
        .collect()
}

/// `part` as a percentage of `whole`, 0 when `whole` is 0
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
