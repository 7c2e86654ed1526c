//! Task model for taskboard.
//!
//! A [`Task`] is serialized with camelCase field names and the priority labels
//! `rendah` / `sedang` / `tinggi`, which keeps exports readable by the browser
//! dashboard that first produced this format. English priority labels are
//! accepted on input.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ulid::Ulid;

use crate::error::{Error, Result};

/// Urgency tier of a task
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum Priority {
    #[serde(rename = "rendah", alias = "low")]
    #[value(alias = "rendah")]
    Low,
    #[serde(rename = "sedang", alias = "medium")]
    #[value(alias = "sedang")]
    Medium,
    #[serde(rename = "tinggi", alias = "high")]
    #[value(alias = "tinggi")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    /// Sort rank (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Label used in the persisted and exported JSON
    pub fn wire_label(&self) -> &'static str {
        match self {
            Priority::Low => "rendah",
            Priority::Medium => "sedang",
            Priority::High => "tinggi",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "rendah" => Ok(Priority::Low),
            "medium" | "sedang" => Ok(Priority::Medium),
            "high" | "tinggi" => Ok(Priority::High),
            other => Err(Error::InvalidArgument(format!(
                "invalid priority '{other}' (expected low|medium|high)"
            ))),
        }
    }
}

/// Lifecycle stage of a task
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    ToDo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [TaskStatus::ToDo, TaskStatus::InProgress, TaskStatus::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "to-do",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Done => "done",
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
        match s.trim().to_ascii_lowercase().as_str() {
            "to-do" | "todo" => Ok(TaskStatus::ToDo),
            "in-progress" | "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(Error::InvalidArgument(format!(
                "invalid status '{other}' (expected to-do|in-progress|done)"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub priority: Priority,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_due_date"
    )]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Build a task from a draft with a fresh id and creation timestamps.
    pub fn from_draft(draft: TaskDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_task_id(),
            title: draft.title,
            description: draft.description,
            priority: draft.priority,
            status: draft.status,
            category: draft.category,
            tags: draft.tags,
            assignee: draft.assignee,
            due_date: draft.due_date,
            estimated_time: draft.estimated_time,
            actual_time: draft.actual_time,
            completed_at: draft.completed_at,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }
}

/// Everything a caller supplies to create a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_priority")]
    pub priority: Priority,
    #[serde(default = "default_status")]
    pub status: TaskStatus,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub estimated_time: Option<u32>,
    #[serde(default)]
    pub actual_time: Option<u32>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

fn default_priority() -> Priority {
    Priority::Medium
}

fn default_status() -> TaskStatus {
    TaskStatus::ToDo
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority: default_priority(),
            status: default_status(),
            category: None,
            tags: Vec::new(),
            assignee: None,
            due_date: None,
            estimated_time: None,
            actual_time: None,
            completed_at: None,
        }
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn actual_time(mut self, minutes: u32) -> Self {
        self.actual_time = Some(minutes);
        self
    }
}

/// Partial update applied by `TaskRepository::update`.
///
/// Outer `None` leaves a field alone; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub category: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub assignee: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub estimated_time: Option<Option<u32>>,
    pub actual_time: Option<Option<u32>>,
    pub completed_at: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(assignee) = self.assignee {
            task.assignee = assignee;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(estimated_time) = self.estimated_time {
            task.estimated_time = estimated_time;
        }
        if let Some(actual_time) = self.actual_time {
            task.actual_time = actual_time;
        }
        if let Some(completed_at) = self.completed_at {
            task.completed_at = completed_at;
        }
    }
}

/// Generate a task id: a lowercase ULID (millisecond timestamp + 80 random bits).
pub fn generate_task_id() -> String {
    Ulid::new().to_string().to_ascii_lowercase()
}

/// Parse a due date given as `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_due_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| {
            Error::InvalidArgument(format!(
                "invalid date '{trimmed}' (expected YYYY-MM-DD)"
            ))
        })
}

fn deserialize_due_date<'de, D>(deserializer: D) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_due_date(value)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn deserialize_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}
