pub mod calendar;
pub mod distribution;
pub mod streak;
pub mod summary;

use crate::problem::Problem;
use chrono::{DateTime, NaiveDate, Utc};

pub use calendar::{CalendarDay, CalendarMonth};
pub use distribution::{Bucket, DailyCount, DifficultyBreakdown};
pub use summary::DashboardSummary;

/// How many entries the bucketed views keep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsOptions {
    /// Patterns shown in the dashboard chart
    pub chart_patterns: usize,
    /// Patterns shown in the pattern statistics panel
    pub pattern_panel: usize,
    pub timeline_days: usize,
    pub activity_window_days: u32,
}

impl Default for StatsOptions {
    fn default() -> Self {
        StatsOptions {
            chart_patterns: 8,
            pattern_panel: 12,
            timeline_days: 30,
            activity_window_days: 10,
        }
    }
}

/// Statistics facade over one snapshot of problems at a fixed instant
pub struct RevisionStats<'a> {
    problems: &'a [Problem],
    now: DateTime<Utc>,
    options: StatsOptions,
}

impl<'a> RevisionStats<'a> {
    pub fn new(problems: &'a [Problem], now: DateTime<Utc>) -> Self {
        Self::with_options(problems, now, StatsOptions::default())
    }

    pub fn with_options(problems: &'a [Problem], now: DateTime<Utc>, options: StatsOptions) -> Self {
        RevisionStats {
            problems,
            now,
            options,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn options(&self) -> StatsOptions {
        self.options
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary::compute(self.problems, self.now)
    }

    pub fn due(&self) -> Vec<&'a Problem> {
        crate::revision::due_problems(self.problems, self.now)
    }

    pub fn chart_patterns(&self) -> Vec<Bucket> {
        distribution::pattern_distribution(self.problems, self.options.chart_patterns)
    }

    pub fn pattern_panel(&self) -> Vec<Bucket> {
        distribution::pattern_distribution(self.problems, self.options.pattern_panel)
    }

    pub fn difficulty(&self) -> DifficultyBreakdown {
        distribution::difficulty_distribution(self.problems)
    }

    pub fn timeline(&self) -> Vec<DailyCount> {
        distribution::problems_over_time(self.problems, self.options.timeline_days)
    }

    pub fn on_day(&self, day: NaiveDate) -> Vec<&'a Problem> {
        calendar::problems_on_day(self.problems, day)
    }

    pub fn month(&self, year: i32, month: u32) -> Option<CalendarMonth> {
        calendar::month_calendar(self.problems, year, month)
    }

    pub fn missing_days(&self) -> Vec<NaiveDate> {
        streak::missing_days(self.problems, self.now, self.options.activity_window_days)
    }
}
