//! In-memory task collection.
//!
//! [`TaskRepository`] is the single owner of the authoritative task list. It
//! assigns ids and timestamps and applies every mutation; it knows nothing
//! about persistence (see [`crate::dashboard::Dashboard`] for that).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::codec::TaskCandidate;
use crate::error::{Error, Result};
use crate::task::{Task, TaskDraft, TaskPatch, TaskStatus};

/// Outcome of merging an imported batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub rejected: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub imported_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an existing collection (e.g. loaded from storage).
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn create(&mut self, draft: TaskDraft) -> Task {
        let task = Task::from_draft(draft, Utc::now());
        tracing::debug!(target: "taskboard::repository", id = %task.id, "created task");
        self.tasks.push(task.clone());
        task
    }

    /// Merge `patch` into the task with `id` and refresh `updatedAt`.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.update_at(id, patch, Utc::now())
    }

    /// Set the status; reaching `done` also stamps `completedAt`.
    ///
    /// Moving away from `done` keeps the previous `completedAt`.
    pub fn set_status(&mut self, id: &str, status: TaskStatus) -> Result<Task> {
        let now = Utc::now();
        let mut patch = TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        };
        if status == TaskStatus::Done {
            patch.completed_at = Some(Some(now));
        }
        self.update_at(id, patch, now)
    }

    /// Remove the task with `id`; absent ids are a no-op.
    pub fn delete(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        tracing::debug!(target: "taskboard::repository", id, "deleted task");
        Some(self.tasks.remove(index))
    }

    /// Append every candidate that has a non-empty id, title, priority and
    /// status and decodes into a task. Ids are not checked against the
    /// existing collection.
    pub fn import_batch(&mut self, candidates: Vec<TaskCandidate>) -> ImportReport {
        let now = Utc::now();
        let mut report = ImportReport::default();
        for candidate in candidates {
            match candidate.into_task(now) {
                Ok(task) => {
                    report.imported += 1;
                    report.imported_ids.push(task.id.clone());
                    self.tasks.push(task);
                }
                Err(err) => {
                    report.rejected += 1;
                    tracing::debug!(target: "taskboard::repository", error = %err, "dropped import record");
                }
            }
        }
        if report.rejected > 0 {
            tracing::warn!(
                target: "taskboard::repository",
                imported = report.imported,
                rejected = report.rejected,
                "import dropped malformed records"
            );
        }
        report
    }

    /// Resolve a full id or a unique, case-insensitive id prefix.
    pub fn resolve_id(&self, input: &str) -> Result<String> {
        let needle = input.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(Error::InvalidArgument("task id cannot be empty".to_string()));
        }

        if let Some(task) = self
            .tasks
            .iter()
            .find(|task| task.id.to_ascii_lowercase() == needle)
        {
            return Ok(task.id.clone());
        }

        let mut matches: Vec<&str> = self
            .tasks
            .iter()
            .filter(|task| task.id.to_ascii_lowercase().starts_with(&needle))
            .map(|task| task.id.as_str())
            .collect();
        matches.sort_unstable();
        matches.dedup();

        match matches.as_slice() {
            [] => Err(Error::TaskNotFound(input.trim().to_string())),
            [single] => Ok(single.to_string()),
            many => Err(Error::InvalidArgument(format!(
                "ambiguous task id '{}': {}",
                input.trim(),
                many.join(", ")
            ))),
        }
    }

    fn update_at(&mut self, id: &str, patch: TaskPatch, now: DateTime<Utc>) -> Result<Task> {
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        patch.apply(task);
        // Imported tasks may carry a createdAt from another clock.
        task.updated_at = now.max(task.created_at);
        tracing::debug!(target: "taskboard::repository", id, "updated task");
        Ok(task.clone())
    }
}
