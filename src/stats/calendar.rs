use crate::problem::Problem;
use chrono::{Datelike, NaiveDate};

/// Whether a problem shows up in the calendar cell for `day`.
///
/// A revision on that day counts; otherwise the creation day is used.
/// Unreadable dates never match.
fn touches_day(problem: &Problem, day: NaiveDate) -> bool {
    if problem
        .revision_dates()
        .any(|instant| instant.date_naive() == day)
    {
        return true;
    }

    problem
        .created()
        .map(|created| created.date_naive() == day)
        .unwrap_or(false)
}

pub fn problems_on_day(problems: &[Problem], day: NaiveDate) -> Vec<&Problem> {
    problems
        .iter()
        .filter(|problem| touches_day(problem, day))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub day: NaiveDate,
    pub count: usize,
}

/// One month of day cells, laid out on a Sunday-first grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub first: NaiveDate,
    /// Empty cells before the 1st
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    pub fn total(&self) -> usize {
        self.days.iter().map(|cell| cell.count).sum()
    }

    pub fn busiest(&self) -> Option<CalendarDay> {
        self.days
            .iter()
            .copied()
            .filter(|cell| cell.count > 0)
            .max_by(|a, b| a.count.cmp(&b.count).then(b.day.cmp(&a.day)))
    }
}

/// Problem counts for every day of `month`; `None` for an invalid year/month
pub fn month_calendar(problems: &[Problem], year: i32, month: u32) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let days = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|day| CalendarDay {
            day,
            count: problems_on_day(problems, day).len(),
        })
        .collect();

    Some(CalendarMonth {
        first,
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
