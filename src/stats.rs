//! Per-status counts over a task list.

use serde::Serialize;

use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub inprogress: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl StatusCounts {
    pub fn from_tasks<'a>(tasks: impl IntoIterator<Item = &'a Task>) -> Self {
        let mut counts = Self::default();
        for task in tasks {
            counts.record(task.status);
        }
        counts
    }

    pub fn record(&mut self, status: TaskStatus) {
        self.total += 1;
        match status {
            TaskStatus::Pending => self.pending += 1,
            TaskStatus::InProgress => self.inprogress += 1,
            TaskStatus::Completed => self.completed += 1,
            TaskStatus::Overdue => self.overdue += 1,
        }
    }

    pub fn get(&self, status: TaskStatus) -> usize {
        match status {
            TaskStatus::Pending => self.pending,
            TaskStatus::InProgress => self.inprogress,
            TaskStatus::Completed => self.completed,
            TaskStatus::Overdue => self.overdue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TasksConfig;
    use crate::task::NewTask;
    use chrono::Utc;

    fn with_status(status: &str) -> Task {
        NewTask::new("t", "2024-03-01", "09:00", "10:00")
            .with_status(status)
            .into_task(&TasksConfig::default(), Utc::now())
            .expect("task")
    }

    #[test]
    fn empty_list_counts_zero() {
        assert_eq!(StatusCounts::from_tasks(&Vec::<Task>::new()), StatusCounts::default());
    }

    #[test]
    fn counts_each_status() {
        let tasks: Vec<Task> = ["pending", "completed", "completed", "overdue", "inprogress"]
            .into_iter()
            .map(with_status)
            .collect();
        let counts = StatusCounts::from_tasks(&tasks);
        assert_eq!(counts.total, 5);
        assert_eq!(counts.get(TaskStatus::Completed), 2);
        assert_eq!(counts.pending + counts.inprogress + counts.completed + counts.overdue, 5);
    }
}
