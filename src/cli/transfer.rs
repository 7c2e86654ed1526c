//! tb export / import.

use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use serde::Serialize;

use crate::cli::context::{load_context, require_saved};
use crate::cli::FilterArgs;
use crate::codec;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct ExportOptions {
    pub output: Option<PathBuf>,
    pub filter: FilterArgs,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct ImportOptions {
    pub file: PathBuf,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ExportOutput {
    path: String,
    count: usize,
}

pub fn run_export(options: ExportOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let filter = options.filter.into_filter()?;
    let tasks = ctx.dashboard.view(&filter).tasks;
    let text = codec::export_tasks(&tasks)?;

    let target = options
        .output
        .unwrap_or_else(|| PathBuf::from(codec::export_file_name(Local::now().date_naive())));
    if target.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.write_all(b"\n")?;
        return Ok(());
    }
    std::fs::write(&target, text)?;
    tracing::debug!(target: "taskboard::cli", path = %target.display(), count = tasks.len(), "exported tasks");

    let mut human = HumanOutput::new("Tasks exported");
    ctx.push_load_warnings(&mut human);
    human.push_summary("File", target.display().to_string());
    human.push_summary("Tasks", tasks.len().to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "export",
        &ExportOutput {
            path: target.display().to_string(),
            count: tasks.len(),
        },
        Some(&human),
    )
}

pub fn run_import(options: ImportOptions) -> Result<()> {
    let mut ctx = load_context(options.dir)?;
    let text = std::fs::read_to_string(&options.file)?;
    let candidates = codec::try_import_tasks(&text)?;
    let (report, persist) = ctx.dashboard.import_batch(candidates);
    require_saved(persist)?;

    let mut human = HumanOutput::new("Tasks imported");
    ctx.push_load_warnings(&mut human);
    human.push_summary("File", options.file.display().to_string());
    human.push_summary("Imported", report.imported.to_string());
    human.push_summary("Rejected", report.rejected.to_string());
    if report.rejected > 0 {
        human.push_warning(format!(
            "{} record(s) lacked id, title, priority or status and were skipped",
            report.rejected
        ));
    }
    human.push_next_step("tb list".to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "import",
        &report,
        Some(&human),
    )
}
