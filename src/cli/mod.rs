//! Command-line interface for tb
//!
//! This module defines the CLI structure using clap derive macros.
//! Commands are implemented in the submodules.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::filter::{DateRange, TaskFilter};
use crate::task::{parse_due_date, Priority, TaskStatus};

mod config;
mod context;
mod task;
mod transfer;
mod view;

/// tb - a local task board
///
/// Track tasks with priorities, statuses, due dates and tags, and view
/// filtered lists, a due-date calendar and completion analytics.
#[derive(Parser, Debug)]
#[command(name = "tb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Data directory (defaults to the platform data directory)
    #[arg(long, global = true, env = "TASKBOARD_DIR")]
    pub dir: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a task
    Add {
        /// Task title
        title: String,

        #[arg(short, long)]
        description: Option<String>,

        /// low, medium or high (default from config)
        #[arg(short, long, value_enum)]
        priority: Option<Priority>,

        /// to-do, in-progress or done (default from config)
        #[arg(short, long, value_enum)]
        status: Option<TaskStatus>,

        #[arg(short, long)]
        category: Option<String>,

        /// Tag (repeatable or comma separated)
        #[arg(short, long = "tag", value_delimiter = ',')]
        tags: Vec<String>,

        #[arg(short, long)]
        assignee: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        /// Estimated minutes
        #[arg(long)]
        estimate: Option<u32>,
    },

    /// List tasks, highest priority first
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Group the list by status
        #[arg(long)]
        grouped: bool,
    },

    /// Show a single task
    Show {
        /// Task id or unique prefix
        id: String,
    },

    /// Edit task fields
    Update(UpdateArgs),

    /// Move a task to another status
    Status {
        /// Task id or unique prefix
        id: String,

        #[arg(value_enum)]
        status: TaskStatus,
    },

    /// Mark a task done
    Done {
        /// Task id or unique prefix
        id: String,

        /// Minutes actually spent
        #[arg(long)]
        actual: Option<u32>,
    },

    /// Delete a task
    Rm {
        /// Task id or unique prefix
        id: String,
    },

    /// Completion statistics
    Stats {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Priority and category breakdown, weekly throughput, productivity score
    Analytics {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Month calendar of due dates
    Calendar {
        /// Month to show (YYYY-MM, defaults to the current month)
        #[arg(long)]
        month: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Distinct categories, tags and assignees
    Facets,

    /// Export tasks as a JSON array
    Export {
        /// Output file (defaults to tasks-<date>.json; "-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Import tasks from a JSON array file
    Import {
        /// File to import
        file: PathBuf,
    },

    /// Configuration file management
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Write a default taskboard.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Filter flags shared by the read commands
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Case-insensitive text in title, description or tags
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long = "status", value_enum, value_delimiter = ',')]
    pub statuses: Vec<TaskStatus>,

    #[arg(long = "priority", value_enum, value_delimiter = ',')]
    pub priorities: Vec<Priority>,

    #[arg(long = "category", value_delimiter = ',')]
    pub categories: Vec<String>,

    #[arg(long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    #[arg(long = "assignee", value_delimiter = ',')]
    pub assignees: Vec<String>,

    /// Earliest due date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub due_from: Option<String>,

    /// Latest due date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub due_to: Option<String>,
}

impl FilterArgs {
    pub fn into_filter(self) -> Result<TaskFilter> {
        let start = self.due_from.as_deref().map(parse_due_date).transpose()?;
        let end = self.due_to.as_deref().map(parse_due_date).transpose()?;
        let due_date_range = if start.is_some() || end.is_some() {
            Some(DateRange { start, end })
        } else {
            None
        };

        Ok(TaskFilter {
            search: self.search,
            status: self.statuses,
            priority: self.priorities,
            category: self.categories,
            tags: self.tags,
            assignee: self.assignees,
            due_date_range,
        })
    }
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Task id or unique prefix
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub description: Option<String>,

    #[arg(short, long, value_enum)]
    pub priority: Option<Priority>,

    #[arg(short, long, value_enum)]
    pub status: Option<TaskStatus>,

    #[arg(short, long)]
    pub category: Option<String>,

    #[arg(long, conflicts_with = "category")]
    pub clear_category: bool,

    /// Replace tags (repeatable or comma separated)
    #[arg(short, long = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,

    #[arg(short, long)]
    pub assignee: Option<String>,

    #[arg(long, conflicts_with = "assignee")]
    pub clear_assignee: bool,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    #[arg(long, conflicts_with = "due")]
    pub clear_due: bool,

    /// Estimated minutes
    #[arg(long)]
    pub estimate: Option<u32>,

    /// Minutes actually spent
    #[arg(long)]
    pub actual: Option<u32>,
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let dir = self.dir;
        let json = self.json;
        let quiet = self.quiet;

        match self.command {
            Commands::Add {
                title,
                description,
                priority,
                status,
                category,
                tags,
                assignee,
                due,
                estimate,
            } => task::run_add(task::AddOptions {
                title,
                description,
                priority,
                status,
                category,
                tags,
                assignee,
                due,
                estimate,
                dir,
                json,
                quiet,
            }),
            Commands::List { filter, grouped } => task::run_list(task::ListOptions {
                filter,
                grouped,
                dir,
                json,
                quiet,
            }),
            Commands::Show { id } => task::run_show(task::ShowOptions {
                id,
                dir,
                json,
                quiet,
            }),
            Commands::Update(update) => task::run_update(task::UpdateOptions {
                update,
                dir,
                json,
                quiet,
            }),
            Commands::Status { id, status } => task::run_status(task::StatusOptions {
                id,
                status,
                actual: None,
                dir,
                json,
                quiet,
            }),
            Commands::Done { id, actual } => task::run_status(task::StatusOptions {
                id,
                status: TaskStatus::Done,
                actual,
                dir,
                json,
                quiet,
            }),
            Commands::Rm { id } => task::run_rm(task::RmOptions {
                id,
                dir,
                json,
                quiet,
            }),
            Commands::Stats { filter } => view::run_stats(view::StatsOptions {
                filter,
                dir,
                json,
                quiet,
            }),
            Commands::Analytics { filter } => view::run_analytics(view::AnalyticsOptions {
                filter,
                dir,
                json,
                quiet,
            }),
            Commands::Calendar { month, filter } => view::run_calendar(view::CalendarOptions {
                month,
                filter,
                dir,
                json,
                quiet,
            }),
            Commands::Facets => view::run_facets(view::FacetsOptions { dir, json, quiet }),
            Commands::Export { output, filter } => transfer::run_export(transfer::ExportOptions {
                output,
                filter,
                dir,
                json,
                quiet,
            }),
            Commands::Import { file } => transfer::run_import(transfer::ImportOptions {
                file,
                dir,
                json,
                quiet,
            }),
            Commands::Config(cmd) => match cmd {
                ConfigCommands::Show => config::run_show(config::ShowOptions { dir, json, quiet }),
                ConfigCommands::Init { force } => config::run_init(config::InitOptions {
                    force,
                    dir,
                    json,
                    quiet,
                }),
            },
        }
    }
}
