//! Summary metrics over a task collection.

use serde::Serialize;

use crate::task::{Task, TaskStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Percentage of tasks that are done, 0 for an empty set
    pub completion_rate: f64,
    /// Mean `actualTime` in minutes over done tasks that recorded one
    pub avg_completion_time: f64,
}

/// Recompute stats from scratch over `tasks`.
///
/// An `actualTime` of zero counts as not recorded.
pub fn compute(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = count_status(tasks, TaskStatus::Done);
    let in_progress = count_status(tasks, TaskStatus::InProgress);

    let timed: Vec<u32> = tasks
        .iter()
        .filter(|task| task.status == TaskStatus::Done)
        .filter_map(|task| task.actual_time.filter(|minutes| *minutes > 0))
        .collect();
    let avg_completion_time = if timed.is_empty() {
        0.0
    } else {
        timed.iter().map(|minutes| f64::from(*minutes)).sum::<f64>() / timed.len() as f64
    };

    TaskStats {
        total,
        completed,
        in_progress,
        completion_rate: ratio_pct(completed, total),
        avg_completion_time,
    }
}

pub(crate) fn count_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status == status).count()
}

pub(crate) fn ratio_pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
