//! Task command service: create, update and delete.
//!
//! Only presence and enum checks are made. There is no cross-field
//! validation, so an `endTime` earlier than `startTime` is stored as given.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::TaskStore;
use crate::task::{NewTask, Task, TaskPatch, TaskStatus};

/// Acknowledgment returned by a successful delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteAck {
    pub id: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy)]
pub struct TaskCommandService<'a> {
    store: &'a TaskStore,
}

impl<'a> TaskCommandService<'a> {
    pub fn new(store: &'a TaskStore) -> Self {
        Self { store }
    }

    pub fn create(&self, fields: NewTask) -> Result<Task> {
        let missing = missing_fields(&fields);
        if !missing.is_empty() {
            return Err(Error::InvalidInput(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        self.store.create(fields)
    }

    pub fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        self.store.update(id, patch)
    }

    pub fn set_status(&self, id: &str, status: TaskStatus) -> Result<Task> {
        self.store.update(id, &TaskPatch::status(status))
    }

    pub fn delete(&self, id: &str) -> Result<DeleteAck> {
        let removed = self.store.delete(id)?;
        Ok(DeleteAck {
            id: removed.id,
            message: "Task deleted".to_string(),
        })
    }
}

/// Required fields that are absent or blank, in declaration order.
pub fn missing_fields(fields: &NewTask) -> Vec<&'static str> {
    [
        ("title", fields.title.as_deref()),
        ("date", fields.date.as_deref()),
        ("startTime", fields.start_time.as_deref()),
        ("endTime", fields.end_time.as_deref()),
    ]
    .into_iter()
    .filter(|(_, value)| value.map_or(true, |value| value.trim().is_empty()))
    .map(|(name, _)| name)
    .collect()
}
