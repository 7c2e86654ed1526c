//! taskboard - a local task board library
//!
//! The core of the `tb` CLI: an in-memory task collection with filtering,
//! ordering, statistics and JSON import/export, persisted to a key-value
//! byte store.
//!
//! # Core Concepts
//!
//! - **Tasks**: titled units of work with a priority, status, optional
//!   category, tags, assignee, due date and time tracking
//! - **Filters**: AND across dimensions, OR within a dimension
//! - **Dashboard**: repository plus store; every mutation is written back and
//!   reports a persistence status instead of failing
//!
//! # Module Organization
//!
//! - `task`: Task model, drafts and patches
//! - `repository`: Authoritative in-memory collection and mutations
//! - `filter`: Task filters and their evaluation
//! - `sort`: Display order and status grouping
//! - `stats`: Completion statistics
//! - `analytics`: Distributions, weekly throughput and productivity score
//! - `calendar`: Month grid of due dates
//! - `facets`: Distinct categories, tags and assignees
//! - `codec`: JSON import/export
//! - `storage`: Key-value stores and the task store adapter
//! - `dashboard`: Repository and store behind one handle
//! - `config`: Configuration loading from `taskboard.toml`
//! - `output`: Human and JSON output for the CLI
//! - `cli`: Command-line interface using clap
//! - `error`: Error types and result aliases

pub mod analytics;
pub mod calendar;
pub mod cli;
pub mod codec;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod facets;
pub mod filter;
pub mod output;
pub mod repository;
pub mod sort;
pub mod stats;
pub mod storage;
pub mod task;

pub use dashboard::{Dashboard, DashboardView};
pub use error::{Error, Result};
pub use filter::TaskFilter;
pub use repository::TaskRepository;
pub use task::{Priority, Task, TaskDraft, TaskPatch, TaskStatus};
