//! Task filtering.
//!
//! A [`TaskFilter`] combines optional dimensions with AND; set-valued
//! dimensions match when the task's value is one of the listed values. An
//! empty set or missing value imposes no constraint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task, TaskStatus};

/// Inclusive due-date window; either bound may be open
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| date >= start) && self.end.map_or(true, |end| date <= end)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub status: Vec<TaskStatus>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub priority: Vec<Priority>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignee: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date_range: Option<DateRange>,
}

impl TaskFilter {
    /// A filter that matches every task
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.active_dimensions() == 0
    }

    /// Number of dimensions that constrain the result
    pub fn active_dimensions(&self) -> usize {
        [
            self.search_needle().is_some(),
            !self.status.is_empty(),
            !self.priority.is_empty(),
            !self.category.is_empty(),
            !self.tags.is_empty(),
            !self.assignee.is_empty(),
            self.due_date_range.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    pub fn matches(&self, task: &Task) -> bool {
        if !self.status.is_empty() && !self.status.contains(&task.status) {
            return false;
        }

        if !self.priority.is_empty() && !self.priority.contains(&task.priority) {
            return false;
        }

        // Tasks without a category or assignee are not excluded by those dimensions.
        if !self.category.is_empty() {
            if let Some(category) = task.category.as_ref() {
                if !self.category.contains(category) {
                    return false;
                }
            }
        }

        if !self.tags.is_empty() && !task.tags.iter().any(|tag| self.tags.contains(tag)) {
            return false;
        }

        if !self.assignee.is_empty() {
            if let Some(assignee) = task.assignee.as_ref() {
                if !self.assignee.contains(assignee) {
                    return false;
                }
            }
        }

        if let Some(needle) = self.search_needle() {
            let needle = needle.to_lowercase();
            let hit = task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
                || task
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(range) = self.due_date_range.as_ref() {
            match task.due_date {
                Some(due) if range.contains(due) => {}
                _ => return false,
            }
        }

        true
    }

    fn search_needle(&self) -> Option<&str> {
        self.search.as_deref().filter(|needle| !needle.is_empty())
    }
}

/// Tasks matching `filter`, in input order
pub fn apply(tasks: &[Task], filter: &TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task))
        .cloned()
        .collect()
}
