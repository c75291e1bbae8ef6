//! Calendar view helpers: tasks bucketed by the calendar date of their due date.

use super::task::Task;
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

/// Groups tasks by due date. Tasks without a due date are left out.
pub fn by_due_date(tasks: &[Task]) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut days: BTreeMap<NaiveDate, Vec<&Task>> = BTreeMap::new();
    for task in tasks {
        if let Some(due) = task.due_date {
            days.entry(due.date_naive()).or_default().push(task);
        }
    }
    days
}

/// Same as [`by_due_date`] restricted to one month.
pub fn month(tasks: &[Task], year: i32, month: u32) -> BTreeMap<NaiveDate, Vec<&Task>> {
    let mut days = by_due_date(tasks);
    days.retain(|date, _| date.year() == year && date.month() == month);
    days
}

/// A day is overdue when it lies before `today` and still has unfinished tasks.
pub fn is_overdue(day: NaiveDate, tasks: &[&Task], today: NaiveDate) -> bool {
    day < today && tasks.iter().any(|task| !task.is_completed())
}
