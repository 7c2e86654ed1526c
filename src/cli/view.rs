//! Read-only board views: stats, analytics, calendar and facets.

use std::path::PathBuf;

use chrono::{Datelike, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::analytics::{self, format_duration};
use crate::calendar::{self, MonthView};
use crate::cli::context::load_context;
use crate::cli::FilterArgs;
use crate::error::{Error, Result};
use crate::facets;
use crate::filter;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::task::Task;

pub struct StatsOptions {
    pub filter: FilterArgs,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct AnalyticsOptions {
    pub filter: FilterArgs,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct CalendarOptions {
    pub month: Option<String>,
    pub filter: FilterArgs,
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

pub struct FacetsOptions {
    pub dir: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(Serialize)]
struct CalendarOutput {
    today: NaiveDate,
    #[serde(rename = "dueToday")]
    due_today: Vec<Task>,
    month: MonthView,
}

pub fn run_stats(options: StatsOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let filter = options.filter.into_filter()?;
    let stats = ctx.dashboard.view(&filter).stats;

    let mut human = HumanOutput::new("Task stats");
    ctx.push_load_warnings(&mut human);
    human.push_summary("Total", stats.total.to_string());
    human.push_summary("Completed", stats.completed.to_string());
    human.push_summary("In progress", stats.in_progress.to_string());
    human.push_summary("Completion rate", format!("{:.0}%", stats.completion_rate));
    human.push_summary(
        "Avg completion time",
        format_duration(stats.avg_completion_time.round() as u64),
    );

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "stats",
        &stats,
        Some(&human),
    )
}

pub fn run_analytics(options: AnalyticsOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let filter = options.filter.into_filter()?;
    let tasks = filter::apply(ctx.dashboard.tasks(), &filter);
    let report = analytics::analyze_with(&tasks, Utc::now(), &ctx.config.analytics);

    let mut human = HumanOutput::new("Task analytics");
    ctx.push_load_warnings(&mut human);
    human.push_summary("Total", report.stats.total.to_string());
    human.push_summary(
        "Completion rate",
        format!("{:.0}%", report.stats.completion_rate),
    );
    human.push_summary(
        "Completed this week",
        format!(
            "{} ({:.0}% of completed)",
            report.completed_this_week, report.weekly_share
        ),
    );
    human.push_summary("Avg tasks per day", format!("{:.1}", report.avg_tasks_per_day));
    human.push_summary("Productivity score", report.productivity_score.to_string());
    human.push_lines(
        "By priority",
        report
            .by_priority
            .iter()
            .map(|share| share_line(&share.priority.to_string(), share.count, share.percentage))
            .collect(),
    );
    if !report.top_categories.is_empty() {
        human.push_lines(
            "Top categories",
            report
                .top_categories
                .iter()
                .map(|share| share_line(&share.category, share.count, share.percentage))
                .collect(),
        );
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "analytics",
        &report,
        Some(&human),
    )
}

pub fn run_calendar(options: CalendarOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let filter = options.filter.into_filter()?;
    let tasks = filter::apply(ctx.dashboard.tasks(), &filter);
    let today = Local::now().date_naive();
    let (year, month) = match options.month.as_deref() {
        Some(value) => parse_month(value)?,
        None => (today.year(), today.month()),
    };

    let view = calendar::month_view(&tasks, year, month)?;
    let due_today = calendar::tasks_due_on(&tasks, today);

    let mut human = HumanOutput::new(format!("Calendar {year}-{month:02}"));
    ctx.push_load_warnings(&mut human);
    human.push_summary(
        "Due this month",
        view.days().map(|day| day.tasks.len()).sum::<usize>().to_string(),
    );
    human.push_summary("Due today", due_today.len().to_string());
    human.push_lines("Month (* = tasks due)", month_grid(&view));
    for day in view.days().filter(|day| !day.tasks.is_empty()) {
        human.push_tasks(format!("Due {}", day.date), &day.tasks);
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "calendar",
        &CalendarOutput {
            today,
            due_today,
            month: view,
        },
        Some(&human),
    )
}

pub fn run_facets(options: FacetsOptions) -> Result<()> {
    let ctx = load_context(options.dir)?;
    let facets = facets::facets(ctx.dashboard.tasks());

    let mut human = HumanOutput::new("Facets");
    ctx.push_load_warnings(&mut human);
    human.push_summary("Categories", join_or_none(&facets.categories));
    human.push_summary("Tags", join_or_none(&facets.tags));
    human.push_summary("Assignees", join_or_none(&facets.assignees));

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "facets",
        &facets,
        Some(&human),
    )
}

fn parse_month(value: &str) -> Result<(i32, u32)> {
    let invalid = || Error::InvalidArgument(format!("invalid month '{value}' (expected YYYY-MM)"));
    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

fn month_grid(view: &MonthView) -> Vec<String> {
    let mut grid = vec!["Su Mo Tu We Th Fr Sa".to_string()];
    for week in view.weeks() {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                Some(day) if !day.tasks.is_empty() => format!("{:>2}*", day.date.day()),
                Some(day) => format!("{:>2} ", day.date.day()),
                None => "   ".to_string(),
            })
            .collect();
        grid.push(row.trim_end().to_string());
    }
    grid
}

fn share_line(label: &str, count: usize, percentage: f64) -> String {
    format!("{label}: {count} ({percentage:.0}%)")
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.join(", ")
    }
}
