//! Productivity statistics derived from the task list.
//!
//! Everything here is a pure function of its input: nothing is cached or
//! persisted, so callers recompute after every mutation.
//!
//! ## Metrics
//!
//! ```text
//! Average completion time    = Σ actual time of completed / completed count
//! Procrastination coefficient = Σ (actual / estimated) / completed count
//! ```
//!
//! The coefficient sums only completed tasks that carry both a positive
//! estimate and a recorded actual time, yet divides by every completed task.
//! Completed tasks without timing therefore pull the value towards zero.
//! With no completed tasks at all the coefficient is 1.0.

use super::task::{Task, TaskCategory, TaskPriority};
use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Reported in place of a computed peak hour (2 PM).
pub const MOST_PRODUCTIVE_HOUR: u32 = 14;

/// Length of the trailing completion window.
pub const PROGRESS_DAYS: u64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    pub date: NaiveDate,
    pub completed: usize,
    /// Minutes.
    pub time_spent: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductivityStats {
    pub tasks_completed: usize,
    /// Minutes.
    pub total_time_spent: u64,
    /// Minutes.
    pub average_completion_time: f64,
    pub procrastination_coefficient: f64,
    pub most_productive_hour: u32,
    pub category_breakdown: BTreeMap<TaskCategory, usize>,
    pub daily_progress: Vec<DailyProgress>,
}

/// Computes the metrics snapshot. `today` is the last day of the
/// daily-progress window.
pub fn compute(tasks: &[Task], today: NaiveDate) -> ProductivityStats {
    let completed: Vec<&Task> = tasks.iter().filter(|task| task.is_completed()).collect();

    let total_time_spent: u64 = completed.iter().map(|task| u64::from(task.actual_time.unwrap_or(0))).sum();

    let average_completion_time = if completed.is_empty() {
        0.0
    } else {
        total_time_spent as f64 / completed.len() as f64
    };

    ProductivityStats {
        tasks_completed: completed.len(),
        total_time_spent,
        average_completion_time,
        procrastination_coefficient: procrastination_coefficient(&completed),
        most_productive_hour: MOST_PRODUCTIVE_HOUR,
        category_breakdown: category_breakdown(tasks),
        daily_progress: daily_progress(tasks, today),
    }
}

fn procrastination_coefficient(completed: &[&Task]) -> f64 {
    if completed.is_empty() {
        return 1.0;
    }

    let ratio_sum: f64 = completed
        .iter()
        .filter_map(|task| match task.actual_time {
            Some(actual) if task.estimated_time > 0 => Some(f64::from(actual) / f64::from(task.estimated_time)),
            _ => None,
        })
        .sum();

    ratio_sum / completed.len() as f64
}

/// Number of tasks per category, counting every task regardless of status.
/// All categories are present, empty ones with zero.
pub fn category_breakdown(tasks: &[Task]) -> BTreeMap<TaskCategory, usize> {
    let mut breakdown: BTreeMap<TaskCategory, usize> = TaskCategory::ALL.iter().map(|c| (*c, 0)).collect();
    for task in tasks {
        *breakdown.entry(task.category).or_insert(0) += 1;
    }
    breakdown
}

/// Number of tasks per priority, all priorities present.
pub fn priority_breakdown(tasks: &[Task]) -> BTreeMap<TaskPriority, usize> {
    let mut breakdown: BTreeMap<TaskPriority, usize> = TaskPriority::ALL.iter().map(|p| (*p, 0)).collect();
    for task in tasks {
        *breakdown.entry(task.priority).or_insert(0) += 1;
    }
    breakdown
}

/// Completions per UTC calendar day for the seven days ending at `today`,
/// oldest first. Days without completions are reported with zeros.
pub fn daily_progress(tasks: &[Task], today: NaiveDate) -> Vec<DailyProgress> {
    (0..PROGRESS_DAYS)
        .rev()
        .map(|offset| {
            let date = today.checked_sub_days(Days::new(offset)).unwrap_or(NaiveDate::MIN);
            let (completed, time_spent) = tasks
                .iter()
                .filter(|task| task.completed_at.map(|at| at.date_naive()) == Some(date))
                .fold((0usize, 0u64), |(count, minutes), task| {
                    (count + 1, minutes + u64::from(task.actual_time.unwrap_or(0)))
                });
            DailyProgress { date, completed, time_spent }
        })
        .collect()
}

/// Verbal rating of a procrastination coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcrastinationLevel {
    Excellent,
    Good,
    Fair,
    NeedsImprovement,
}

impl ProcrastinationLevel {
    pub fn from_coefficient(coefficient: f64) -> Self {
        if coefficient <= 1.2 {
            ProcrastinationLevel::Excellent
        } else if coefficient <= 1.5 {
            ProcrastinationLevel::Good
        } else if coefficient <= 2.0 {
            ProcrastinationLevel::Fair
        } else {
            ProcrastinationLevel::NeedsImprovement
        }
    }
}

impl fmt::Display for ProcrastinationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProcrastinationLevel::Excellent => "Excellent",
            ProcrastinationLevel::Good => "Good",
            ProcrastinationLevel::Fair => "Fair",
            ProcrastinationLevel::NeedsImprovement => "Needs improvement",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procrastination_levels() {
        assert_eq!(ProcrastinationLevel::from_coefficient(0.4), ProcrastinationLevel::Excellent);
        assert_eq!(ProcrastinationLevel::from_coefficient(1.2), ProcrastinationLevel::Excellent);
        assert_eq!(ProcrastinationLevel::from_coefficient(1.5), ProcrastinationLevel::Good);
        assert_eq!(ProcrastinationLevel::from_coefficient(1.9), ProcrastinationLevel::Fair);
        assert_eq!(ProcrastinationLevel::from_coefficient(2.1), ProcrastinationLevel::NeedsImprovement);
    }

    #[test]
    fn test_window_crosses_month_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 2).unwrap();
        let days: Vec<NaiveDate> = daily_progress(&[], today).iter().map(|d| d.date).collect();

        assert_eq!(days.len(), 7);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 2, 25).unwrap());
        assert_eq!(days[4], NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(days[6], today);
    }
}
