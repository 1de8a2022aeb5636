//! Task store.
//!
//! The store exclusively owns persisted task records. It keeps no cache:
//! every call re-reads `tasks.jsonl`, and every mutation re-reads, applies
//! and rewrites it while holding the collection lock. Concurrent writers
//! are serialized per operation, so two racing updates to one record resolve
//! as last write wins.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info};

use crate::config::{Config, TasksConfig};
use crate::error::{Error, Result};
use crate::lock::FileLock;
use crate::storage::Storage;
use crate::task::{date_key, is_date_shaped, sort_by_schedule, NewTask, Task, TaskPatch};

#[derive(Debug, Clone)]
pub struct TaskStore {
    storage: Storage,
    config: TasksConfig,
    lock_timeout_ms: u64,
}

impl TaskStore {
    pub fn new(storage: Storage, config: TasksConfig, lock_timeout_ms: u64) -> Self {
        Self {
            storage,
            config,
            lock_timeout_ms,
        }
    }

    /// Open the store under `root`, reading `.daybook.toml` if present.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = Config::load_from_root(&root);
        Self::with_config(root, &config)
    }

    pub fn with_config(root: PathBuf, config: &Config) -> Self {
        let storage = Storage::for_root(root, config);
        Self::new(storage, config.tasks.clone(), config.store.lock_timeout_ms)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn config(&self) -> &TasksConfig {
        &self.config
    }

    /// Validate `fields`, assign id and timestamps, and persist the record.
    pub fn create(&self, fields: NewTask) -> Result<Task> {
        let task = fields.into_task(&self.config, Utc::now())?;
        self.mutate(|tasks| {
            tasks.push(task.clone());
            Ok(())
        })?;
        info!(id = %task.id, date = %task.date, "task created");
        Ok(task)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Task> {
        let id = require_id(id)?;
        self.load()?
            .into_iter()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    /// Tasks on exactly `date`, ascending by start time.
    pub fn find_by_date(&self, date: &str) -> Result<Vec<Task>> {
        let date = date_key(date)?;
        let mut tasks: Vec<Task> = self
            .load()?
            .into_iter()
            .filter(|task| task.date.as_str() == date)
            .collect();
        sort_by_schedule(&mut tasks);
        debug!(date = %date, count = tasks.len(), "find by date");
        Ok(tasks)
    }

    /// Tasks with `start <= date <= end` under string comparison, ascending
    /// by `(date, startTime)`.
    ///
    /// Bounds need the `YYYY-MM-DD` shape but not a real calendar day, so
    /// `2024-02-31` is a valid upper bound. `start > end` yields nothing.
    pub fn find_by_date_range(&self, start: &str, end: &str) -> Result<Vec<Task>> {
        let start = require_bound("start", start)?;
        let end = require_bound("end", end)?;
        let mut tasks: Vec<Task> = self
            .load()?
            .into_iter()
            .filter(|task| {
                let date = task.date.as_str();
                start <= date && date <= end
            })
            .collect();
        sort_by_schedule(&mut tasks);
        debug!(start, end, count = tasks.len(), "find by date range");
        Ok(tasks)
    }

    /// Every stored task, ascending by `(date, startTime)`.
    pub fn list(&self) -> Result<Vec<Task>> {
        let mut tasks = self.load()?;
        sort_by_schedule(&mut tasks);
        Ok(tasks)
    }

    /// Merge `patch` over the stored record and bump `updatedAt`.
    pub fn update(&self, id: &str, patch: &TaskPatch) -> Result<Task> {
        let id = require_id(id)?;
        let updated = self.mutate(|tasks| {
            let task = tasks
                .iter_mut()
                .find(|task| task.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            patch.apply(task, Utc::now())?;
            Ok(task.clone())
        })?;
        info!(id = %updated.id, "task updated");
        Ok(updated)
    }

    /// Permanently remove a record. Unknown ids are `NotFound`.
    pub fn delete(&self, id: &str) -> Result<Task> {
        let id = require_id(id)?;
        let removed = self.mutate(|tasks| {
            let index = tasks
                .iter()
                .position(|task| task.id == id)
                .ok_or_else(|| Error::NotFound(id.to_string()))?;
            Ok(tasks.remove(index))
        })?;
        info!(id = %removed.id, "task deleted");
        Ok(removed)
    }

    /// Resolve a full id or an unambiguous id prefix (case-insensitive).
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        let trimmed = require_id(input)?;
        let needle = trimmed.to_ascii_lowercase();
        let tasks = self.load()?;

        if let Some(task) = tasks.iter().find(|task| task.id == needle) {
            return Ok(task.id.clone());
        }

        let mut matches: Vec<String> = tasks
            .into_iter()
            .filter(|task| task.id.starts_with(&needle))
            .map(|task| task.id)
            .collect();
        matches.sort();
        match matches.len() {
            0 => Err(Error::NotFound(trimmed.to_string())),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::InvalidInput(format!(
                "ambiguous task id '{}': {}",
                trimmed,
                matches.join(", ")
            ))),
        }
    }

    fn tasks_path(&self) -> PathBuf {
        self.storage.tasks_file()
    }

    fn load(&self) -> Result<Vec<Task>> {
        read_tasks(&self.storage, &self.tasks_path()).map_err(Error::into_store_error)
    }

    /// Lock, re-read, apply `f`, and rewrite the collection. Nothing is
    /// written when `f` fails.
    fn mutate<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Vec<Task>) -> Result<T>,
    {
        let path = self.tasks_path();
        let _lock = FileLock::acquire(self.storage.tasks_lock_file(), self.lock_timeout_ms)
            .map_err(Error::into_store_error)?;
        let mut tasks = read_tasks(&self.storage, &path).map_err(Error::into_store_error)?;
        let result = f(&mut tasks)?;
        self.storage
            .write_jsonl(&path, &tasks)
            .map_err(Error::into_store_error)?;
        Ok(result)
    }
}

fn read_tasks(storage: &Storage, path: &Path) -> Result<Vec<Task>> {
    storage.read_jsonl(path)
}

fn require_id(id: &str) -> Result<&str> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("task id cannot be empty".to_string()));
    }
    Ok(trimmed)
}

fn require_bound<'a>(label: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(format!("{label} date is required")));
    }
    if !is_date_shaped(trimmed) {
        return Err(Error::InvalidInput(format!(
            "{label} date must be YYYY-MM-DD, got '{trimmed}'"
        )));
    }
    Ok(trimmed)
}
