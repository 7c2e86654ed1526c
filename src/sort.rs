//! Display ordering and status buckets.

use serde::{Deserialize, Serialize};

use crate::task::{Task, TaskStatus};

/// Order by priority (high first), then newest `createdAt` first.
///
/// The sort is stable: full ties keep their input order.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| {
        right
            .priority
            .rank()
            .cmp(&left.priority.rank())
            .then_with(|| right.created_at.cmp(&left.created_at))
    });
}

/// Sorted copy of `tasks`
pub fn sorted(tasks: &[Task]) -> Vec<Task> {
    let mut tasks = tasks.to_vec();
    sort_tasks(&mut tasks);
    tasks
}

/// Tasks partitioned by status; every bucket is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksByStatus {
    #[serde(rename = "to-do")]
    pub to_do: Vec<Task>,
    #[serde(rename = "in-progress")]
    pub in_progress: Vec<Task>,
    pub done: Vec<Task>,
}

impl TasksByStatus {
    pub fn bucket(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::ToDo => &self.to_do,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn bucket_mut(&mut self, status: TaskStatus) -> &mut Vec<Task> {
        match status {
            TaskStatus::ToDo => &mut self.to_do,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }
}

/// Partition already-sorted tasks by status, preserving order in each bucket.
pub fn group_by_status(tasks: &[Task]) -> TasksByStatus {
    let mut grouped = TasksByStatus::default();
    for task in tasks {
        grouped.bucket_mut(task.status).push(task.clone());
    }
    grouped
}
