//! Calendar grids for week and month views.
//!
//! A month grid always has 42 cells (six rows of seven) starting on the
//! Sunday on or before the 1st. Cells outside the month carry
//! `in_month = false` but still list their tasks.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::{Task, TaskDate};
use crate::window::{DateWindow, WEEK_LEN};

/// Cells in a month grid
pub const MONTH_GRID_CELLS: u64 = 42;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: TaskDate,
    pub in_month: bool,
    pub tasks: Vec<Task>,
}

/// Group tasks by their `date` key, keeping input order within a day.
pub fn group_by_date(tasks: &[Task]) -> BTreeMap<TaskDate, Vec<Task>> {
    let mut grouped: BTreeMap<TaskDate, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        grouped.entry(task.date.clone()).or_default().push(task.clone());
    }
    grouped
}

/// Seven cells, Sunday through Saturday, for the week holding `reference`.
pub fn week_calendar(reference: &TaskDate, tasks: &[Task]) -> Result<Vec<CalendarDay>> {
    let window = DateWindow::week_of(reference)?;
    let first = TaskDate::parse(&window.start)?.to_naive();
    build_grid(first, WEEK_LEN, tasks, |_| true)
}

pub fn month_calendar(year: i32, month: u32, tasks: &[Task]) -> Result<Vec<CalendarDay>> {
    DateWindow::month(year, month)?;
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidInput(format!("no such month: {year:04}-{month:02}")))?;
    let back = u64::from(first_of_month.weekday().num_days_from_sunday());
    let first = first_of_month
        .checked_sub_days(Days::new(back))
        .ok_or_else(|| Error::InvalidInput(format!("no grid for {year:04}-{month:02}")))?;
    build_grid(first, MONTH_GRID_CELLS, tasks, |day| {
        day.year() == year && day.month() == month
    })
}

fn build_grid<F>(first: NaiveDate, cells: u64, tasks: &[Task], in_month: F) -> Result<Vec<CalendarDay>>
where
    F: Fn(NaiveDate) -> bool,
{
    let mut grouped = group_by_date(tasks);
    (0..cells)
        .map(|offset| {
            let day = first
                .checked_add_days(Days::new(offset))
                .ok_or_else(|| Error::InvalidInput(format!("calendar overflows after {first}")))?;
            let date = TaskDate::from_naive(day);
            let tasks = grouped.remove(&date).unwrap_or_default();
            Ok(CalendarDay {
                date,
                in_month: in_month(day),
                tasks,
            })
        })
        .collect()
}
