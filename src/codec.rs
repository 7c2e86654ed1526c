//! JSON import/export of task collections.
//!
//! Export is a pretty-printed JSON array of tasks. Import is deliberately
//! lenient: any JSON array is accepted and its elements are handed back as
//! [`TaskCandidate`]s; shape validation happens when the repository merges
//! them (`TaskRepository::import_batch`).

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::task::Task;

const REQUIRED_FIELDS: [&str; 4] = ["id", "title", "priority", "status"];

/// An unvalidated record from an import payload
#[derive(Debug, Clone, PartialEq)]
pub struct TaskCandidate(Value);

impl TaskCandidate {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Whether `id`, `title`, `priority` and `status` are present and non-empty
    pub fn has_required_fields(&self) -> bool {
        match self.0.as_object() {
            Some(record) => REQUIRED_FIELDS
                .iter()
                .all(|field| non_empty_string(record, field)),
            None => false,
        }
    }

    /// Decode into a task. A missing `createdAt` is filled with `now` and a
    /// missing `updatedAt` with `createdAt`; present values are kept verbatim.
    pub fn into_task(self, now: DateTime<Utc>) -> Result<Task> {
        if !self.has_required_fields() {
            return Err(Error::MalformedImport(format!(
                "record lacks one of {}",
                REQUIRED_FIELDS.join(", ")
            )));
        }
        let Value::Object(mut record) = self.0 else {
            return Err(Error::MalformedImport("record is not an object".to_string()));
        };

        let created_at = match record.get("createdAt") {
            Some(Value::String(value)) if !value.trim().is_empty() => Value::String(value.clone()),
            _ => Value::String(now.to_rfc3339()),
        };
        record.insert("createdAt".to_string(), created_at.clone());
        if !matches!(record.get("updatedAt"), Some(Value::String(value)) if !value.trim().is_empty())
        {
            record.insert("updatedAt".to_string(), created_at);
        }

        serde_json::from_value(Value::Object(record))
            .map_err(|err| Error::MalformedImport(err.to_string()))
    }
}

impl From<Task> for TaskCandidate {
    fn from(task: Task) -> Self {
        // Task serialization cannot fail: every field is a plain value.
        Self(serde_json::to_value(task).unwrap_or(Value::Null))
    }
}

fn non_empty_string(record: &Map<String, Value>, field: &str) -> bool {
    matches!(record.get(field), Some(Value::String(value)) if !value.is_empty())
}

/// Serialize the collection as a pretty-printed JSON array.
pub fn export_tasks(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Parse an import payload; anything but a JSON array yields an empty list.
pub fn import_tasks(text: &str) -> Vec<TaskCandidate> {
    match try_import_tasks(text) {
        Ok(candidates) => candidates,
        Err(err) => {
            tracing::warn!(target: "taskboard::codec", error = %err, "import payload rejected");
            Vec::new()
        }
    }
}

/// Parse an import payload, reporting why it was rejected.
pub fn try_import_tasks(text: &str) -> Result<Vec<TaskCandidate>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| Error::MalformedImport(format!("invalid JSON: {err}")))?;
    match value {
        Value::Array(items) => Ok(items.into_iter().map(TaskCandidate).collect()),
        other => Err(Error::MalformedImport(format!(
            "expected a JSON array, found {}",
            json_kind(&other)
        ))),
    }
}

/// Suggested file name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("tasks-{}.json", date.format("%Y-%m-%d"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
