//! Distinct filterable values present in a collection.

use serde::Serialize;

use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub assignees: Vec<String>,
}

/// Categories, tags and assignees in first-seen order
pub fn facets(tasks: &[Task]) -> Facets {
    let mut facets = Facets::default();
    for task in tasks {
        if let Some(category) = task.category.as_ref() {
            push_unique(&mut facets.categories, category);
        }
        for tag in &task.tags {
            push_unique(&mut facets.tags, tag);
        }
        if let Some(assignee) = task.assignee.as_ref() {
            push_unique(&mut facets.assignees, assignee);
        }
    }
    facets
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
