//! Storage layer for daybook
//!
//! All persistent state lives in the data directory (default `.daybook/`)
//! under the daybook root.
//!
//! # Directory Structure
//!
//! ```text
//! .daybook.toml                 # Optional configuration
//! .daybook/
//!   tasks.jsonl                 # Task collection, one record per line
//!   tasks.lock                  # Advisory lock taken by writers
//! ```

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::lock;

const TASKS_FILE: &str = "tasks.jsonl";
const TASKS_LOCK: &str = "tasks.lock";

/// Storage manager for daybook state
#[derive(Debug, Clone)]
pub struct Storage {
    /// Daybook root (where `.daybook.toml` lives)
    root: PathBuf,
    /// Directory holding the collection
    data_dir: PathBuf,
}

impl Storage {
    pub fn new(root: PathBuf, data_dir: PathBuf) -> Self {
        Self { root, data_dir }
    }

    /// Storage rooted at `root`, with the data directory taken from `config`
    pub fn for_root(root: PathBuf, config: &Config) -> Self {
        let data_dir = config.data_dir_in(&root);
        Self::new(root, data_dir)
    }

    // =========================================================================
    // Path accessors
    // =========================================================================

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path to the task collection (JSONL format)
    pub fn tasks_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    /// Path to the writer lock for the task collection
    pub fn tasks_lock_file(&self) -> PathBuf {
        self.data_dir.join(TASKS_LOCK)
    }

    // =========================================================================
    // Directory initialization
    // =========================================================================

    /// Create the data directory and an empty collection if missing
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;

        let tasks_file = self.tasks_file();
        if !tasks_file.exists() {
            File::create(&tasks_file)?;
        }

        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.tasks_file().exists()
    }

    // =========================================================================
    // File I/O helpers
    // =========================================================================

    /// Read all records from a JSONL file. A missing file reads as empty.
    pub fn read_jsonl<T: DeserializeOwned>(&self, path: &Path) -> Result<Vec<T>> {
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: T = serde_json::from_str(&line)?;
            records.push(record);
        }

        Ok(records)
    }

    /// Replace a JSONL file with `records`, atomically.
    ///
    /// Callers that race with other writers must hold the collection lock.
    pub fn write_jsonl<T: Serialize>(&self, path: &Path, records: &[T]) -> Result<()> {
        let mut buffer = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buffer, record)?;
            buffer.push(b'\n');
        }
        lock::write_atomic(path, &buffer)
    }
}
