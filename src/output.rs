//! Rendering of command results.
//!
//! With `--json` every command prints one envelope:
//!
//! ```text
//! { schema_version, command, status, data | error, warnings?, next_steps? }
//! ```
//!
//! Otherwise a [`HumanOutput`] report is printed: a header, `key: value`
//! summary lines, then titled blocks of task rows or preformatted lines.

use serde::Serialize;

use crate::error::{Error, ErrorBody, Result};
use crate::task::Task;

pub const SCHEMA_VERSION: &str = "taskboard.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
enum Block {
    /// Task rows under a counted heading
    Tasks { title: String, rows: Vec<String> },
    /// Lines printed verbatim, e.g. a calendar grid
    Lines { title: String, lines: Vec<String> },
}

/// Text report for one command
#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    summary: Vec<(String, String)>,
    notes: Vec<String>,
    blocks: Vec<Block>,
    warnings: Vec<String>,
    next_steps: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            summary: Vec::new(),
            notes: Vec::new(),
            blocks: Vec::new(),
            warnings: Vec::new(),
            next_steps: Vec::new(),
        }
    }

    pub fn push_summary(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.summary.push((key.into(), value.into()));
    }

    /// Free text shown under the summary, such as a task description
    pub fn push_note(&mut self, value: impl Into<String>) {
        self.notes.push(value.into());
    }

    /// A block of task rows; an empty slice still prints its heading.
    pub fn push_tasks(&mut self, title: impl Into<String>, tasks: &[Task]) {
        self.blocks.push(Block::Tasks {
            title: title.into(),
            rows: tasks.iter().map(task_row).collect(),
        });
    }

    pub fn push_lines(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.blocks.push(Block::Lines {
            title: title.into(),
            lines,
        });
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }

    pub fn push_next_step(&mut self, value: impl Into<String>) {
        self.next_steps.push(value.into());
    }
}

/// One-line rendering of a task: `[status][priority] <short id> <title> ...`
pub fn task_row(task: &Task) -> String {
    let mut row = format!(
        "[{}][{}] {} {}",
        task.status,
        task.priority,
        short_id(&task.id),
        task.title
    );
    if let Some(due) = task.due_date {
        row.push_str(&format!(" (due: {due})"));
    }
    if let Some(category) = task.category.as_ref() {
        row.push_str(&format!(" (category: {category})"));
    }
    if let Some(assignee) = task.assignee.as_ref() {
        row.push_str(&format!(" @{assignee}"));
    }
    if !task.tags.is_empty() {
        row.push_str(&format!(" #{}", task.tags.join(" #")));
    }
    row
}

/// Leading part of a ULID, unique enough to type back as an id prefix
pub fn short_id(id: &str) -> &str {
    id.get(..10).unwrap_or(id)
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    schema_version: &'static str,
    command: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    next_steps: Vec<String>,
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let envelope = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data: Some(data),
            error: None,
            warnings: human.map(|h| h.warnings.clone()).unwrap_or_default(),
            next_steps: human.map(|h| h.next_steps.clone()).unwrap_or_default(),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    if let (false, Some(human)) = (options.quiet, human) {
        println!("{}", format_human(human));
    }
    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    let hint = err.hint();
    if json {
        let envelope = Envelope::<()> {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            data: None,
            error: Some(ErrorBody::from(err)),
            warnings: Vec::new(),
            next_steps: hint.into_iter().collect(),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = hint {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = vec![output.header.clone()];

    if !output.summary.is_empty() {
        lines.push(String::new());
        for (key, value) in &output.summary {
            lines.push(format!("{key}: {value}"));
        }
    }
    if !output.notes.is_empty() {
        lines.push(String::new());
        lines.extend(output.notes.iter().cloned());
    }

    for block in &output.blocks {
        lines.push(String::new());
        match block {
            Block::Tasks { title, rows } => {
                lines.push(format!("{title} ({}):", rows.len()));
                if rows.is_empty() {
                    lines.push("  (none)".to_string());
                }
                lines.extend(rows.iter().map(|row| format!("  {row}")));
            }
            Block::Lines { title, lines: body } => {
                lines.push(format!("{title}:"));
                lines.extend(body.iter().map(|line| format!("  {line}")));
            }
        }
    }

    push_list(&mut lines, "Warnings", &output.warnings);
    push_list(&mut lines, "Next steps", &output.next_steps);
    lines.join("\n")
}

fn push_list(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    lines.push(String::new());
    lines.push(format!("{title}:"));
    lines.extend(items.iter().map(|item| format!("- {item}")));
}

/// Command name for the error envelope, read from raw arguments (without the
/// program name) so it is known even when parsing fails.
pub fn command_name<I>(args: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let command = loop {
        match args.next() {
            Some(arg) if arg == "--dir" => {
                args.next();
            }
            Some(arg) if arg.starts_with('-') => {}
            Some(arg) => break arg,
            None => return "tb".to_string(),
        }
    };

    if command == "config" {
        if let Some(sub) = args.find(|arg| !arg.starts_with('-')) {
            return format!("config {sub}");
        }
    }
    command
}
