//! Shared command setup: data directory, config and the opened dashboard.

use std::path::PathBuf;

use crate::config::{self, Config};
use crate::dashboard::Dashboard;
use crate::error::{Error, Result};
use crate::output::HumanOutput;
use crate::storage::{FileStore, LoadOutcome, PersistStatus, TaskStore};

pub(crate) struct CommandContext {
    pub config: Config,
    pub dashboard: Dashboard<FileStore>,
    config_warning: Option<String>,
}

impl CommandContext {
    /// Warnings to show alongside the command output
    pub fn load_warnings(&self) -> Vec<String> {
        let mut warnings: Vec<String> = self.config_warning.iter().cloned().collect();
        match self.dashboard.load_outcome() {
            LoadOutcome::Corrupt(reason) => warnings.push(format!(
                "stored tasks could not be read ({reason}); starting from an empty board"
            )),
            LoadOutcome::Partial { skipped } => warnings.push(format!(
                "{skipped} stored record(s) could not be decoded; the next change will drop them"
            )),
            LoadOutcome::Loaded | LoadOutcome::Missing => {}
        }
        warnings
    }

    pub fn push_load_warnings(&self, human: &mut HumanOutput) {
        for warning in self.load_warnings() {
            human.push_warning(warning);
        }
    }
}

pub(crate) fn load_context(dir: Option<PathBuf>) -> Result<CommandContext> {
    let data_dir = config::resolve_data_dir(dir)?;
    std::fs::create_dir_all(&data_dir)?;
    let (config, config_warning) = Config::load_from_dir_checked(&data_dir);
    let store = TaskStore::with_key(
        FileStore::new(data_dir.clone()),
        config.tasks.storage_key.clone(),
    );
    let dashboard = Dashboard::from_store(store);
    tracing::debug!(
        target: "taskboard::cli",
        dir = %data_dir.display(),
        tasks = dashboard.tasks().len(),
        "opened board"
    );

    Ok(CommandContext {
        config,
        dashboard,
        config_warning,
    })
}

/// The process exits after each command, so an unsaved mutation is lost.
pub(crate) fn require_saved(status: PersistStatus) -> Result<()> {
    match status {
        PersistStatus::Saved => Ok(()),
        PersistStatus::Failed(reason) => Err(Error::Persistence(reason)),
    }
}
