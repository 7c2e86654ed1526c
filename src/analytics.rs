//! Dashboard analytics: distributions, weekly throughput and a productivity score.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::config::AnalyticsConfig;
use crate::stats::{self, ratio_pct, TaskStats};
use crate::task::{Priority, Task};

/// Days used for the average-tasks-per-day figure
const TASKS_PER_DAY_WINDOW: f64 = 30.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityShare {
    pub priority: Priority,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub category: String,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub generated_at: DateTime<Utc>,
    pub stats: TaskStats,
    pub by_priority: Vec<PriorityShare>,
    pub top_categories: Vec<CategoryShare>,
    pub completed_this_week: usize,
    pub weekly_share: f64,
    pub avg_tasks_per_day: f64,
    pub productivity_score: i64,
}

/// Analytics with the default window (7 days) and top-5 categories
pub fn analyze(tasks: &[Task], now: DateTime<Utc>) -> Analytics {
    analyze_with(tasks, now, &AnalyticsConfig::default())
}

pub fn analyze_with(tasks: &[Task], now: DateTime<Utc>, config: &AnalyticsConfig) -> Analytics {
    let stats = stats::compute(tasks);
    let window_start = now
        .checked_sub_signed(Duration::days(i64::from(config.week_days)))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let completed_this_week = completed_since(tasks, window_start);

    let avg_tasks_per_day = if tasks.is_empty() {
        0.0
    } else {
        round_to_tenth(tasks.len() as f64 / TASKS_PER_DAY_WINDOW)
    };

    Analytics {
        generated_at: now,
        stats,
        by_priority: priority_distribution(tasks),
        top_categories: top_categories(tasks, config.top_categories),
        completed_this_week,
        weekly_share: ratio_pct(completed_this_week, stats.completed),
        avg_tasks_per_day,
        productivity_score: productivity_score(stats.completion_rate, completed_this_week),
    }
}

/// Count of tasks per priority, highest first
pub fn priority_distribution(tasks: &[Task]) -> Vec<PriorityShare> {
    Priority::ALL
        .iter()
        .map(|priority| {
            let count = tasks.iter().filter(|task| task.priority == *priority).count();
            PriorityShare {
                priority: *priority,
                count,
                percentage: ratio_pct(count, tasks.len()),
            }
        })
        .collect()
}

/// Most frequent categories, ties kept in first-seen order
pub fn top_categories(tasks: &[Task], limit: usize) -> Vec<CategoryShare> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for category in tasks.iter().filter_map(|task| task.category.as_ref()) {
        match counts.iter_mut().find(|(name, _)| name == category) {
            Some((_, count)) => *count += 1,
            None => counts.push((category.clone(), 1)),
        }
    }
    counts.sort_by(|left, right| right.1.cmp(&left.1));
    counts
        .into_iter()
        .take(limit)
        .map(|(category, count)| CategoryShare {
            category,
            count,
            percentage: ratio_pct(count, tasks.len()),
        })
        .collect()
}

/// Tasks whose `completedAt` is at or after `since`
pub fn completed_since(tasks: &[Task], since: DateTime<Utc>) -> usize {
    tasks
        .iter()
        .filter(|task| task.completed_at.is_some_and(|at| at >= since))
        .count()
}

/// `round(completionRate * 0.6 + completedThisWeek * 10 * 0.4)`
pub fn productivity_score(completion_rate: f64, completed_this_week: usize) -> i64 {
    (completion_rate * 0.6 + completed_this_week as f64 * 10.0 * 0.4).round() as i64
}

/// Human duration for a minute count: `45m`, `2h`, `1h 30m`.
pub fn format_duration(minutes: u64) -> String {
    if minutes < 60 {
        return format!("{minutes}m");
    }
    let hours = minutes / 60;
    let rest = minutes % 60;
    if rest > 0 {
        format!("{hours}h {rest}m")
    } else {
        format!("{hours}h")
    }
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
