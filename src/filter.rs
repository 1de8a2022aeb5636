//! Presentation filter applied to an already-fetched task list.
//!
//! Status, type and text search combine with AND. The filter never touches
//! the store and never reorders its input.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::task::{Task, TaskStatus, TaskType};

/// Keyword that disables a status or type filter
pub const ALL: &str = "all";

/// Either every value, or a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Choice<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Choice::All => true,
            Choice::Only(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Choice::All)
    }
}

impl<T> FromStr for Choice<T>
where
    T: FromStr<Err = Error>,
{
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL) {
            return Ok(Choice::All);
        }
        trimmed.parse().map(Choice::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::All => f.write_str(ALL),
            Choice::Only(value) => value.fmt(f),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    search: String,
    pub status: Choice<TaskStatus>,
    pub kind: Choice<TaskType>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring search. Surrounding whitespace is ignored
    /// and a blank query matches everything.
    pub fn with_search(mut self, query: &str) -> Self {
        self.search = query.trim().to_lowercase();
        self
    }

    pub fn with_status(mut self, status: Choice<TaskStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_kind(mut self, kind: Choice<TaskType>) -> Self {
        self.kind = kind;
        self
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_noop(&self) -> bool {
        self.search.is_empty() && self.status.is_all() && self.kind.is_all()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.status.admits(&task.status) && self.kind.admits(&task.kind) && self.matches_text(task)
    }

    /// Matching tasks, in input order.
    pub fn apply<'t>(&self, tasks: &'t [Task]) -> Vec<&'t Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }

    fn matches_text(&self, task: &Task) -> bool {
        if self.search.is_empty() {
            return true;
        }
        [
            task.title.as_str(),
            task.description.as_str(),
            task.kind.as_str(),
            task.status.as_str(),
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&self.search))
    }
}
