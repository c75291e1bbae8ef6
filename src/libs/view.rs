use super::calendar;
use super::formatter::{format_date, format_hours, format_minutes};
use super::messages::Message;
use super::stats::{self, ProcrastinationLevel, ProductivityStats};
use super::task::Task;
use crate::{msg_info, msg_print};
use chrono::NaiveDate;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "CATEGORY", "PRIORITY", "STATUS", "EST", "ACTUAL", "DUE", "SUBTASKS"]);
        for task in tasks {
            let done = task.subtasks.iter().filter(|s| s.completed).count();
            table.add_row(row![
                task.id,
                task.title,
                task.category,
                task.priority,
                task.status,
                format_minutes(u64::from(task.estimated_time)),
                task.actual_time.map(|m| format_minutes(u64::from(m))).unwrap_or_else(|| "-".to_string()),
                format_date(task.due_date),
                format!("{}/{}", done, task.subtasks.len())
            ]);
        }
        table.printstd();
    }

    pub fn task(task: &Task) {
        let mut table = Table::new();

        table.add_row(row!["ID", task.id]);
        table.add_row(row!["TITLE", task.title]);
        table.add_row(row!["DESCRIPTION", task.description.as_deref().unwrap_or("-")]);
        table.add_row(row!["CATEGORY", task.category]);
        table.add_row(row!["PRIORITY", task.priority]);
        table.add_row(row!["STATUS", task.status]);
        table.add_row(row!["ESTIMATED", format_minutes(u64::from(task.estimated_time))]);
        table.add_row(row![
            "ACTUAL",
            task.actual_time.map(|m| format_minutes(u64::from(m))).unwrap_or_else(|| "-".to_string())
        ]);
        table.add_row(row!["DUE", format_date(task.due_date)]);
        table.add_row(row!["CREATED", task.created_at.to_rfc3339()]);
        table.add_row(row!["UPDATED", task.updated_at.to_rfc3339()]);
        table.add_row(row!["COMPLETED", task.completed_at.map(|d| d.to_rfc3339()).unwrap_or_else(|| "-".to_string())]);
        table.add_row(row!["TAGS", task.tags.iter().cloned().collect::<Vec<_>>().join(", ")]);
        table.add_row(row!["SESSIONS", task.pomodoro_sessions.len()]);
        table.printstd();

        if !task.subtasks.is_empty() {
            let mut subtasks = Table::new();
            subtasks.add_row(row!["SUBTASK ID", "TITLE", "DONE"]);
            for subtask in &task.subtasks {
                subtasks.add_row(row![subtask.id, subtask.title, if subtask.completed { "x" } else { "" }]);
            }
            subtasks.printstd();
        }
    }

    pub fn stats(stats: &ProductivityStats, tasks: &[Task]) {
        msg_print!(Message::StatsHeader, true);
        let mut summary = Table::new();
        summary.add_row(row!["COMPLETED", "TIME SPENT", "AVG PER TASK", "PROCRASTINATION"]);
        summary.add_row(row![
            stats.tasks_completed,
            format_hours(stats.total_time_spent),
            format!("{}m", stats.average_completion_time.round()),
            format!("{:.1}x", stats.procrastination_coefficient)
        ]);
        summary.printstd();

        msg_print!(Message::DailyProgressHeader, true);
        let mut daily = Table::new();
        daily.add_row(row!["DATE", "COMPLETED", "TIME"]);
        for day in &stats.daily_progress {
            daily.add_row(row![day.date.format("%b %-d"), day.completed, format_hours(day.time_spent)]);
        }
        daily.printstd();

        msg_print!(Message::CategoryBreakdownHeader, true);
        let total = tasks.len();
        let priorities = stats::priority_breakdown(tasks);
        let mut breakdown = Table::new();
        breakdown.add_row(row!["CATEGORY", "TASKS", "%", "PRIORITY", "TASKS"]);
        for ((category, count), (priority, by_priority)) in stats.category_breakdown.iter().zip(priorities.iter()) {
            breakdown.add_row(row![category, count, format!("{:.0}", percentage(*count, total)), priority, by_priority]);
        }
        breakdown.printstd();

        let level = ProcrastinationLevel::from_coefficient(stats.procrastination_coefficient);
        msg_print!(Message::ProcrastinationSummary {
            coefficient: stats.procrastination_coefficient,
            level: level.to_string(),
        });
        msg_print!(Message::PeakHour(stats.most_productive_hour));
    }

    pub fn calendar(tasks: &[Task], year: i32, month: u32, today: NaiveDate) {
        let days = calendar::month(tasks, year, month);
        if days.is_empty() {
            msg_info!(Message::NoDueTasks);
            return;
        }

        let mut table = Table::new();
        table.add_row(row!["DATE", "TASKS", "OVERDUE"]);
        for (day, day_tasks) in &days {
            let titles = day_tasks.iter().map(|t| format!("[{}] {}", t.status, t.title)).collect::<Vec<_>>().join("\n");
            let overdue = if calendar::is_overdue(*day, day_tasks, today) { "!" } else { "" };
            table.add_row(row![day.format("%a %d"), titles, overdue]);
        }
        table.printstd();
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
