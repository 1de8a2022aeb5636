//! Task data model.
//!
//! A task is a single schedulable item: a title, an optional description, a
//! calendar date, a start/end time, a status and a category. Dates and times
//! are kept as fixed-width zero-padded text (`YYYY-MM-DD`, `HH:mm`) so that
//! lexicographic order and chronological order agree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::config::TasksConfig;
use crate::error::{Error, Result};

/// Length of a `YYYY-MM-DD` date key
pub const DATE_LEN: usize = 10;
const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_LEN: usize = 5;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Overdue,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Completed => "completed",
            TaskStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == trimmed)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown task status '{trimmed}' (expected pending|inprogress|completed|overdue)"
                ))
            })
    }
}

/// Task category
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Work,
    Study,
    Health,
    Personal,
    #[default]
    Other,
}

impl TaskType {
    pub const ALL: [TaskType; 5] = [
        TaskType::Work,
        TaskType::Study,
        TaskType::Health,
        TaskType::Personal,
        TaskType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Work => "work",
            TaskType::Study => "study",
            TaskType::Health => "health",
            TaskType::Personal => "personal",
            TaskType::Other => "other",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        TaskType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == trimmed)
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "unknown task type '{trimmed}' (expected work|study|health|personal|other)"
                ))
            })
    }
}

/// A real calendar date stored as `YYYY-MM-DD`.
///
/// Ordering is the ordering of the underlying string, which matches
/// chronological order because the format is fixed-width.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskDate(String);

impl TaskDate {
    /// Parse a date, truncating richer timestamps (`2024-03-01T09:00:00Z`)
    /// to their first ten characters.
    pub fn parse(input: &str) -> Result<Self> {
        let key = date_key(input)?;
        NaiveDate::parse_from_str(key, DATE_FORMAT).map_err(|_| {
            Error::InvalidInput(format!("date '{key}' is not a calendar date"))
        })?;
        Ok(Self(key.to_string()))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date.format(DATE_FORMAT).to_string())
    }

    pub fn to_naive(&self) -> NaiveDate {
        // Construction guarantees a valid calendar date.
        NaiveDate::parse_from_str(&self.0, DATE_FORMAT).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaskDate {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        TaskDate::parse(&value)
    }
}

impl From<TaskDate> for String {
    fn from(value: TaskDate) -> Self {
        value.0
    }
}

/// `HH:mm` 24-hour clock time
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(String);

impl TimeOfDay {
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let bytes = trimmed.as_bytes();
        let shaped = bytes.len() == TIME_LEN
            && bytes[2] == b':'
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes[3..].iter().all(u8::is_ascii_digit);
        if !shaped {
            return Err(Error::InvalidInput(format!(
                "time must be HH:mm, got '{trimmed}'"
            )));
        }
        let hours: u32 = trimmed[..2].parse().unwrap_or(u32::MAX);
        let minutes: u32 = trimmed[3..].parse().unwrap_or(u32::MAX);
        if hours > 23 || minutes > 59 {
            return Err(Error::InvalidInput(format!(
                "time '{trimmed}' is out of range"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        TimeOfDay::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.0
    }
}

/// The `YYYY-MM-DD` lookup key of `input`: trimmed, cut to ten characters
/// and shape-checked. `2024-02-30` is a valid key that no task can carry.
pub fn date_key(input: &str) -> Result<&str> {
    let trimmed = input.trim();
    let key = trimmed.get(..DATE_LEN).unwrap_or(trimmed);
    if !is_date_shaped(key) {
        return Err(Error::InvalidInput(format!(
            "date must be YYYY-MM-DD, got '{trimmed}'"
        )));
    }
    Ok(key)
}

/// True when `value` has the `YYYY-MM-DD` shape (digits and dashes only).
///
/// Says nothing about whether the date exists on a calendar.
pub fn is_date_shaped(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == DATE_LEN
        && bytes.iter().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// A persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub date: TaskDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(rename = "type", default)]
    pub kind: TaskType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ascending by `date`, then `startTime`.
pub fn sort_by_schedule(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
}

pub fn generate_task_id() -> String {
    Ulid::new().to_string().to_lowercase()
}

/// Caller-supplied fields for a new task. Everything is optional here so
/// that missing fields can be reported instead of failing to deserialize.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            date: Some(date.into()),
            start_time: Some(start_time.into()),
            end_time: Some(end_time.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Check presence and enum membership, then build the record.
    pub fn into_task(self, config: &TasksConfig, now: DateTime<Utc>) -> Result<Task> {
        let title = require_title(self.title.as_deref())?;
        let date = TaskDate::parse(require("date", self.date.as_deref())?)?;
        let start_time = TimeOfDay::parse(require("startTime", self.start_time.as_deref())?)?;
        let end_time = TimeOfDay::parse(require("endTime", self.end_time.as_deref())?)?;
        let status = match self.status.as_deref() {
            Some(value) => value.parse()?,
            None => config.initial_status()?,
        };
        let kind = match self.kind.as_deref() {
            Some(value) => value.parse()?,
            None => config.initial_type()?,
        };

        Ok(Task {
            id: generate_task_id(),
            title,
            description: self.description.unwrap_or_default(),
            date,
            start_time,
            end_time,
            status,
            kind,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status.as_str().to_string()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.date.is_none()
            && self.start_time.is_none()
            && self.end_time.is_none()
            && self.status.is_none()
            && self.kind.is_none()
    }

    /// Validate every supplied field, then merge into `task`.
    ///
    /// Nothing is written when any field is invalid.
    pub fn apply(&self, task: &mut Task, now: DateTime<Utc>) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidInput("nothing to update".to_string()));
        }

        let title = self
            .title
            .as_deref()
            .map(|value| require_title(Some(value)))
            .transpose()?;
        let date = self.date.as_deref().map(TaskDate::parse).transpose()?;
        let start_time = self.start_time.as_deref().map(TimeOfDay::parse).transpose()?;
        let end_time = self.end_time.as_deref().map(TimeOfDay::parse).transpose()?;
        let status = self
            .status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?;
        let kind = self
            .kind
            .as_deref()
            .map(str::parse::<TaskType>)
            .transpose()?;

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = self.description.as_ref() {
            task.description = description.clone();
        }
        if let Some(date) = date {
            task.date = date;
        }
        if let Some(start_time) = start_time {
            task.start_time = start_time;
        }
        if let Some(end_time) = end_time {
            task.end_time = end_time;
        }
        if let Some(status) = status {
            task.status = status;
        }
        if let Some(kind) = kind {
            task.kind = kind;
        }
        task.updated_at = now;
        Ok(())
    }
}

fn require<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::InvalidInput(format!("{field} is required"))),
    }
}

fn require_title(value: Option<&str>) -> Result<String> {
    Ok(require("title", value)?.trim().to_string())
}
