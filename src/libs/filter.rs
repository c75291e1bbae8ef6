use super::task::{Task, TaskCategory, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};

/// Criteria for narrowing a task list. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub category: Option<TaskCategory>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    /// Case-insensitive substring of the title or description.
    pub search_term: Option<String>,
    /// Inclusive due-date range. Tasks without a due date never match.
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        if self.category.is_some_and(|category| task.category != category) {
            return false;
        }
        if self.status.is_some_and(|status| task.status != status) {
            return false;
        }
        if self.priority.is_some_and(|priority| task.priority != priority) {
            return false;
        }
        if let Some(term) = self.search_term.as_deref().filter(|term| !term.is_empty()) {
            let term = term.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&term);
            let in_description = task.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&term));
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some((start, end)) = self.date_range {
            match task.due_date {
                Some(due) if due >= start && due <= end => {}
                _ => return false,
            }
        }
        true
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|task| self.matches(task)).cloned().collect()
    }
}
