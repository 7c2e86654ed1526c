//! tb config command implementations.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{self, Config, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};

pub struct ShowOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct InitOptions {
    pub force: bool,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct ConfigOutput<'a> {
    data_dir: String,
    config_path: String,
    exists: bool,
    config: &'a Config,
}

pub fn run_show(options: ShowOptions) -> Result<()> {
    let data_dir = config::resolve_data_dir(options.dir)?;
    let config_path = data_dir.join(CONFIG_FILE);
    let exists = config_path.exists();
    let config = if exists {
        Config::load(&config_path)?
    } else {
        Config::default()
    };

    let mut human = HumanOutput::new("Configuration");
    human.push_summary("Data dir", data_dir.display().to_string());
    human.push_summary(
        "Config file",
        if exists {
            config_path.display().to_string()
        } else {
            format!("{} (not present, using defaults)", config_path.display())
        },
    );
    human.push_summary("Default priority", config.tasks.default_priority.to_string());
    human.push_summary("Default status", config.tasks.default_status.to_string());
    human.push_summary("Storage key", config.tasks.storage_key.clone());
    human.push_summary("Week window", format!("{} days", config.analytics.week_days));
    human.push_summary("Top categories", config.analytics.top_categories.to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "config show",
        &ConfigOutput {
            data_dir: data_dir.display().to_string(),
            config_path: config_path.display().to_string(),
            exists,
            config: &config,
        },
        Some(&human),
    )
}

pub fn run_init(options: InitOptions) -> Result<()> {
    let data_dir = config::resolve_data_dir(options.dir)?;
    std::fs::create_dir_all(&data_dir)?;
    let config_path = data_dir.join(CONFIG_FILE);
    if config_path.exists() && !options.force {
        return Err(Error::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )));
    }

    let config = Config::default();
    config.save(&config_path)?;

    let mut human = HumanOutput::new("Configuration written");
    human.push_summary("File", config_path.display().to_string());
    human.push_next_step("tb config show".to_string());

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "config init",
        &ConfigOutput {
            data_dir: data_dir.display().to_string(),
            config_path: config_path.display().to_string(),
            exists: true,
            config: &config,
        },
        Some(&human),
    )
}
