//! daybook - scheduled task store
//!
//! Tasks are placed on a calendar date with a start and end time, carry a
//! status and a category, and are read back through date windows.
//!
//! # Core Concepts
//!
//! - **Task**: a titled entry on one `YYYY-MM-DD` date with `HH:mm` bounds
//! - **Window**: an inclusive date range compared as strings; weeks run
//!   Sunday through Saturday and months end on a loose day `31` bound
//! - **Store**: the single owner of task records, persisted as JSON Lines
//!
//! # Module Organization
//!
//! - `task`: Task model, field validation and id generation
//! - `store`: Persistent task collection
//! - `window`: Day, week, month and range windows
//! - `query`: Windowed reads over the store
//! - `command`: Create, update, status and delete operations
//! - `filter`: Client-side search, status and type filtering
//! - `stats`: Per-status counts
//! - `calendar`: Week rows and 42-cell month grids
//! - `storage`: On-disk layout and JSONL I/O
//! - `lock`: File locking and atomic writes
//! - `config`: Configuration loading from `.daybook.toml`
//! - `error`: Error types and exit codes
//! - `output`: Human and JSON output for the CLI
//! - `cli`: Command-line interface using clap

pub mod calendar;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod filter;
pub mod lock;
pub mod output;
pub mod query;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;
pub mod window;

pub use error::{Error, Result};
pub use store::TaskStore;
pub use task::{NewTask, Task, TaskPatch, TaskStatus, TaskType};
