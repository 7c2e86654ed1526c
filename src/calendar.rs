//! Month calendar of due dates.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::task::Task;

/// Tasks whose due date is `date`, in input order
pub fn tasks_due_on(tasks: &[Task], date: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| task.due_date == Some(date))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

/// A Sunday-first month grid. Leading `None` cells pad the first week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<DayCell>>,
}

impl MonthView {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first = first_of_month(year, month)?;
        let offset = first.weekday().num_days_from_sunday() as usize;
        let mut cells: Vec<Option<DayCell>> = vec![None; offset];
        cells.extend(
            first
                .iter_days()
                .take_while(|date| date.month() == month)
                .map(|date| {
                    Some(DayCell {
                        date,
                        tasks: Vec::new(),
                    })
                }),
        );
        Ok(Self { year, month, cells })
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().flatten()
    }

    pub fn day(&self, day: u32) -> Option<&DayCell> {
        self.days().find(|cell| cell.date.day() == day)
    }

    /// Grid rows of seven cells; the last row may be shorter.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<DayCell>]> {
        self.cells.chunks(7)
    }

    pub fn next(&self) -> Result<Self> {
        let (year, month) = next_month(self.year, self.month);
        Self::new(year, month)
    }

    pub fn prev(&self) -> Result<Self> {
        let (year, month) = prev_month(self.year, self.month);
        Self::new(year, month)
    }
}

/// Month grid with each day's due tasks attached
pub fn month_view(tasks: &[Task], year: i32, month: u32) -> Result<MonthView> {
    let mut view = MonthView::new(year, month)?;
    for cell in view.cells.iter_mut().flatten() {
        cell.tasks = tasks_due_on(tasks, cell.date);
    }
    Ok(view)
}

pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

pub fn prev_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| Error::InvalidArgument(format!("invalid month {year}-{month:02}")))
}
