//! tb task command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::analytics::format_duration;
use crate::cli::context::{load_context, require_saved};
use crate::cli::{FilterArgs, UpdateArgs};
use crate::error::{Error, Result};
use crate::output::{emit_success, short_id, HumanOutput, OutputOptions};
use crate::sort::TasksByStatus;
use crate::task::{parse_due_date, Priority, Task, TaskDraft, TaskPatch, TaskStatus};

pub struct AddOptions {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub assignee: Option<String>,
    pub due: Option<String>,
    pub estimate: Option<u32>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ListOptions {
    pub filter: FilterArgs,
    pub grouped: bool,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ShowOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct UpdateOptions {
    pub update: UpdateArgs,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct StatusOptions {
    pub id: String,
    pub status: TaskStatus,
    pub actual: Option<u32>,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct RmOptions {
    pub id: String,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct TaskListOutput {
    total: usize,
    tasks: Vec<Task>,
    #[serde(rename = "tasksByStatus", skip_serializing_if = "Option::is_none")]
    tasks_by_status: Option<TasksByStatus>,
}

#[derive(Serialize)]
struct TaskDeleteOutput {
    id: String,
    deleted: bool,
}

pub fn run_add(options: AddOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let title = options.title.trim();
    if title.is_empty() {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }

    let defaults = &ctx.config.tasks;
    let mut draft = TaskDraft::new(title)
        .priority(options.priority.unwrap_or(defaults.default_priority))
        .status(options.status.unwrap_or(defaults.default_status));
    if let Some(description) = options.description {
        draft = draft.description(description);
    }
    if let Some(category) = non_empty(options.category) {
        draft = draft.category(category);
    }
    for tag in options.tags.into_iter().filter_map(|tag| non_empty(Some(tag))) {
        draft = draft.tag(tag);
    }
    if let Some(assignee) = non_empty(options.assignee) {
        draft = draft.assignee(assignee);
    }
    if let Some(due) = options.due.as_deref() {
        draft = draft.due(parse_due_date(due)?);
    }
    draft.estimated_time = options.estimate;

    let (task, persist) = ctx.dashboard.create(draft);
    require_saved(persist)?;

    let mut human = HumanOutput::new("Task created");
    ctx.push_load_warnings(&mut human);
    push_task_summary(&mut human, &task);
    human.push_next_step(format!("tb done {}", short_id(&task.id)));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "add",
        &task,
        Some(&human),
    )
}

pub fn run_list(options: ListOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let filter = options.filter.into_filter()?;
    let view = ctx.dashboard.view(&filter);

    let mut human = HumanOutput::new("Tasks");
    ctx.push_load_warnings(&mut human);
    human.push_summary("Total", view.tasks.len().to_string());
    if !filter.is_empty() {
        human.push_summary("Active filters", filter.active_dimensions().to_string());
    }
    if options.grouped {
        for status in TaskStatus::ALL {
            human.push_tasks(status.to_string(), view.tasks_by_status.bucket(status));
        }
    } else if !view.tasks.is_empty() {
        human.push_tasks("Tasks", &view.tasks);
    } else {
        human.push_next_step("tb add <title>");
    }

    let output = TaskListOutput {
        total: view.tasks.len(),
        tasks_by_status: options.grouped.then(|| view.tasks_by_status.clone()),
        tasks: view.tasks,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "list",
        &output,
        Some(&human),
    )
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let resolved = ctx.dashboard.resolve_id(&options.id)?;
    let task = ctx
        .dashboard
        .repository()
        .get(&resolved)
        .ok_or_else(|| Error::TaskNotFound(resolved.clone()))?;

    let mut human = HumanOutput::new(format!("Task {}", task.id));
    ctx.push_load_warnings(&mut human);
    push_task_summary(&mut human, task);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "show",
        task,
        Some(&human),
    )
}

pub fn run_update(options: UpdateOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let args = options.update;
    let resolved = ctx.dashboard.resolve_id(&args.id)?;
    let patch = build_patch(args)?;
    if patch.is_empty() {
        return Err(Error::InvalidArgument(
            "nothing to update; pass at least one field flag".to_string(),
        ));
    }

    let (task, persist) = ctx.dashboard.update(&resolved, patch)?;
    require_saved(persist)?;

    let mut human = HumanOutput::new("Task updated");
    ctx.push_load_warnings(&mut human);
    push_task_summary(&mut human, &task);

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "update",
        &task,
        Some(&human),
    )
}

pub fn run_status(options: StatusOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let resolved = ctx.dashboard.resolve_id(&options.id)?;

    if let Some(actual) = options.actual {
        let patch = TaskPatch {
            actual_time: Some(Some(actual)),
            ..TaskPatch::default()
        };
        let (_, persist) = ctx.dashboard.update(&resolved, patch)?;
        require_saved(persist)?;
    }
    let (task, persist) = ctx.dashboard.set_status(&resolved, options.status)?;
    require_saved(persist)?;

    let command = if options.status == TaskStatus::Done {
        "done"
    } else {
        "status"
    };
    let mut human = HumanOutput::new(format!("Task {}", task.status));
    ctx.push_load_warnings(&mut human);
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    if let Some(completed_at) = task.completed_at {
        human.push_summary("Completed", completed_at.to_rfc3339());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        command,
        &task,
        Some(&human),
    )
}

pub fn run_rm(options: RmOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let resolved = ctx.dashboard.resolve_id(&options.id)?;
    let (removed, persist) = ctx.dashboard.delete(&resolved);
    require_saved(persist)?;

    let mut human = HumanOutput::new("Task deleted");
    ctx.push_load_warnings(&mut human);
    human.push_summary("ID", resolved.clone());
    if let Some(task) = removed.as_ref() {
        human.push_summary("Title", task.title.clone());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "rm",
        &TaskDeleteOutput {
            id: resolved,
            deleted: removed.is_some(),
        },
        Some(&human),
    )
}

fn build_patch(args: UpdateArgs) -> Result<TaskPatch> {
    let mut patch = TaskPatch {
        title: args.title.map(|title| title.trim().to_string()),
        description: args.description,
        priority: args.priority,
        status: args.status,
        estimated_time: args.estimate.map(Some),
        actual_time: args.actual.map(Some),
        ..TaskPatch::default()
    };
    if matches!(patch.title.as_deref(), Some("")) {
        return Err(Error::InvalidArgument("title cannot be empty".to_string()));
    }

    if args.clear_category {
        patch.category = Some(None);
    } else if args.category.is_some() {
        patch.category = Some(non_empty(args.category));
    }
    if args.clear_tags {
        patch.tags = Some(Vec::new());
    } else if !args.tags.is_empty() {
        patch.tags = Some(
            args.tags
                .into_iter()
                .filter_map(|tag| non_empty(Some(tag)))
                .collect(),
        );
    }
    if args.clear_assignee {
        patch.assignee = Some(None);
    } else if args.assignee.is_some() {
        patch.assignee = Some(non_empty(args.assignee));
    }
    if args.clear_due {
        patch.due_date = Some(None);
    } else if let Some(due) = args.due.as_deref() {
        patch.due_date = Some(Some(parse_due_date(due)?));
    }
    Ok(patch)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn push_task_summary(human: &mut HumanOutput, task: &Task) {
    human.push_summary("ID", task.id.clone());
    human.push_summary("Title", task.title.clone());
    human.push_summary("Status", task.status.to_string());
    human.push_summary("Priority", task.priority.to_string());
    if let Some(category) = task.category.as_ref() {
        human.push_summary("Category", category.clone());
    }
    if !task.tags.is_empty() {
        human.push_summary("Tags", task.tags.join(", "));
    }
    if let Some(assignee) = task.assignee.as_ref() {
        human.push_summary("Assignee", assignee.clone());
    }
    if let Some(due) = task.due_date {
        human.push_summary("Due", due.to_string());
    }
    if let Some(minutes) = task.estimated_time {
        human.push_summary("Estimated", format_duration(u64::from(minutes)));
    }
    if let Some(minutes) = task.actual_time {
        human.push_summary("Actual", format_duration(u64::from(minutes)));
    }
    human.push_summary("Created", task.created_at.to_rfc3339());
    human.push_summary("Updated", task.updated_at.to_rfc3339());
    if let Some(completed_at) = task.completed_at {
        human.push_summary("Completed", completed_at.to_rfc3339());
    }
    if !task.description.is_empty() {
        human.push_note(task.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update_args(id: &str) -> UpdateArgs {
        UpdateArgs {
            id: id.to_string(),
            title: None,
            description: None,
            priority: None,
            status: None,
            category: None,
            clear_category: false,
            tags: Vec::new(),
            clear_tags: false,
            assignee: None,
            clear_assignee: false,
            due: None,
            clear_due: false,
            estimate: None,
            actual: None,
        }
    }

    #[test]
    fn empty_update_builds_empty_patch() {
        let patch = build_patch(update_args("abc")).expect("patch");
        assert!(patch.is_empty());
    }

    #[test]
    fn clear_flags_clear_fields() {
        let args = UpdateArgs {
            clear_category: true,
            clear_tags: true,
            clear_due: true,
            ..update_args("abc")
        };
        let patch = build_patch(args).expect("patch");
        assert_eq!(patch.category, Some(None));
        assert_eq!(patch.tags, Some(Vec::new()));
        assert_eq!(patch.due_date, Some(None));
        assert_eq!(patch.assignee, None);
    }

    #[test]
    fn blank_title_is_rejected() {
        let args = UpdateArgs {
            title: Some("   ".to_string()),
            ..update_args("abc")
        };
        assert!(matches!(build_patch(args), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn tags_are_trimmed_and_blank_ones_dropped() {
        let args = UpdateArgs {
            tags: vec![" ops ".to_string(), "  ".to_string()],
            ..update_args("abc")
        };
        let patch = build_patch(args).expect("patch");
        assert_eq!(patch.tags, Some(vec!["ops".to_string()]));
    }
}
