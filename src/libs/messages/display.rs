use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(title, id) => format!("Task \"{}\" created ({})", title, id),
            Message::TaskUpdated(title) => format!("Task \"{}\" updated", title),
            Message::TaskCompleted(title) => format!("Task \"{}\" completed", title),
            Message::TaskReopened(title) => format!("Task \"{}\" reopened", title),
            Message::TaskDeleted(title) => format!("Task \"{}\" deleted", title),
            Message::TaskNotFound(id) => format!("Task with id {} not found", id),
            Message::TaskNoChanges => "No changes given, nothing to update".to_string(),
            Message::TasksNotFound => "Tasks not found((".to_string(),
            Message::TasksHeader(count) => format!("Tasks ({})", count),
            Message::ConfirmDeleteTask(title) => format!("Delete task \"{}\"?", title),
            Message::TimeLogged { minutes, title } => format!("{} minutes added to \"{}\"", minutes, title),
            Message::InvalidDueDate(value) => format!("Invalid due date '{}', expected YYYY-MM-DD or RFC 3339", value),

            // === SUBTASK MESSAGES ===
            Message::SubtaskAdded(title, id) => format!("Subtask \"{}\" added ({})", title, id),
            Message::SubtaskToggled { title, completed } => {
                format!("Subtask of \"{}\" marked {}", title, if *completed { "done" } else { "not done" })
            }
            Message::SubtaskNotFound(id) => format!("Subtask with id {} not found", id),

            // === STORAGE MESSAGES ===
            Message::StorageCorrupted(reason) => format!("Stored tasks could not be read and were ignored: {}", reason),

            // === STATS MESSAGES ===
            Message::StatsHeader => "Productivity".to_string(),
            Message::DailyProgressHeader => "Last 7 days".to_string(),
            Message::CategoryBreakdownHeader => "Tasks by category".to_string(),
            Message::ProcrastinationSummary { coefficient, level } => {
                format!("You take {:.1}x the estimated time ({})", coefficient, level)
            }
            Message::PeakHour(hour) => format!("{:02}:00 is your peak productivity hour", hour),

            // === CALENDAR MESSAGES ===
            Message::CalendarHeader(month) => format!("Due dates for {}", month),
            Message::NoDueTasks => "No tasks with due dates".to_string(),
            Message::InvalidMonth(value) => format!("Invalid month '{}', expected YYYY-MM", value),

            // === POMODORO MESSAGES ===
            Message::PomodoroStarted { mode, title } => format!("{}: {}", mode, title),
            Message::PomodoroStopHint => "Press Ctrl-C to stop early and keep the time spent".to_string(),
            Message::PomodoroInterrupted => "Focus period stopped early".to_string(),
            Message::PomodoroNothingToLog => "Less than a second elapsed, nothing logged".to_string(),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModulePomodoro => "Pomodoro settings".to_string(),
            Message::PromptWorkDuration => "Focus period length (minutes)".to_string(),
            Message::PromptShortBreakDuration => "Short break length (minutes)".to_string(),
            Message::PromptLongBreakDuration => "Long break length (minutes)".to_string(),
            Message::PromptLongBreakInterval => "Focus periods before a long break".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
        };
        write!(f, "{}", text)
    }
}
