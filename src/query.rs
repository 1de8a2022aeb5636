//! Task query service: turns a day, week, month or explicit range selection
//! into a window and reads it from the store.

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::store::TaskStore;
use crate::task::{Task, TaskDate};
use crate::window::DateWindow;

/// Tasks inside a window, ordered by `(date, startTime)`.
#[derive(Debug, Clone, Serialize)]
pub struct WindowedTasks {
    pub window: DateWindow,
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Copy)]
pub struct TaskQueryService<'a> {
    store: &'a TaskStore,
}

impl<'a> TaskQueryService<'a> {
    pub fn new(store: &'a TaskStore) -> Self {
        Self { store }
    }

    pub fn tasks_for_date(&self, date: &str) -> Result<WindowedTasks> {
        let window = DateWindow::day(date)?;
        let tasks = self.store.find_by_date(&window.start)?;
        Ok(WindowedTasks { window, tasks })
    }

    pub fn tasks_for_week(&self, reference: &str) -> Result<WindowedTasks> {
        let reference = TaskDate::parse(reference)?;
        let window = DateWindow::week_of(&reference)?;
        debug!(reference = %reference, start = %window.start, end = %window.end, "week window");
        self.read(window)
    }

    pub fn tasks_for_month(&self, year: i32, month: u32) -> Result<WindowedTasks> {
        let window = DateWindow::month(year, month)?;
        debug!(year, month, start = %window.start, end = %window.end, "month window");
        self.read(window)
    }

    pub fn tasks_for_range(&self, start: &str, end: &str) -> Result<WindowedTasks> {
        self.read(DateWindow::range(start, end)?)
    }

    fn read(&self, window: DateWindow) -> Result<WindowedTasks> {
        let tasks = self.store.find_by_date_range(&window.start, &window.end)?;
        Ok(WindowedTasks { window, tasks })
    }
}
