//! Task data model.
//!
//! A [`Task`] owns its subtasks and pomodoro sessions; nothing below a task
//! is persisted on its own. The serialized shape uses camelCase field names
//! and kebab-case enum values, with every timestamp written as an RFC 3339
//! string and parsed back into a [`DateTime<Utc>`] on read.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Life area a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TaskCategory {
    Work,
    DailyLife,
    School,
    Personal,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 4] = [TaskCategory::Work, TaskCategory::DailyLife, TaskCategory::School, TaskCategory::Personal];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "work",
            TaskCategory::DailyLife => "daily-life",
            TaskCategory::School => "school",
            TaskCategory::Personal => "personal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [TaskPriority::Low, TaskPriority::Medium, TaskPriority::High, TaskPriority::Urgent];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
    Paused,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Paused => "paused",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl SubTask {
    pub fn new(title: &str, created_at: DateTime<Utc>) -> Self {
        SubTask {
            id: new_id(),
            title: title.to_string(),
            completed: false,
            created_at,
        }
    }
}

/// A focus period spent on a task. `task_id` points back at the owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PomodoroSession {
    pub id: String,
    pub task_id: String,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Minutes.
    pub duration: u32,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Minutes.
    pub estimated_time: u32,
    /// Minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub pomodoro_sessions: Vec<PomodoroSession>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Moves the task to `status`, keeping `completed_at` in step: stamped
    /// on the transition into completed, kept while it stays completed,
    /// cleared on any other status.
    pub fn set_status(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        match status {
            TaskStatus::Completed if self.status != TaskStatus::Completed || self.completed_at.is_none() => {
                self.completed_at = Some(now);
            }
            TaskStatus::Completed => {}
            _ => self.completed_at = None,
        }
        self.status = status;
    }

    /// Applies a partial update. `id` and `created_at` are never touched;
    /// `updated_at` is set to `now`.
    pub fn apply(&mut self, update: TaskUpdate, now: DateTime<Utc>) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(status) = update.status {
            self.set_status(status, now);
        }
        if let Some(estimated_time) = update.estimated_time {
            self.estimated_time = estimated_time;
        }
        if let Some(actual_time) = update.actual_time {
            self.actual_time = actual_time;
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
        if let Some(subtasks) = update.subtasks {
            self.subtasks = subtasks;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(sessions) = update.pomodoro_sessions {
            self.pomodoro_sessions = sessions;
        }
        self.updated_at = now;
    }
}

/// Fields supplied by the user when creating a task. The store assigns the
/// id and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub category: TaskCategory,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub estimated_time: u32,
    pub actual_time: Option<u32>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: BTreeSet<String>,
}

impl NewTask {
    pub fn new(title: &str, category: TaskCategory, priority: TaskPriority, estimated_time: u32) -> Self {
        NewTask {
            title: title.to_string(),
            description: None,
            category,
            priority,
            status: TaskStatus::Todo,
            estimated_time,
            actual_time: None,
            due_date: None,
            tags: BTreeSet::new(),
        }
    }

    pub fn into_task(self, now: DateTime<Utc>) -> Task {
        let mut task = Task {
            id: new_id(),
            title: self.title,
            description: self.description,
            category: self.category,
            priority: self.priority,
            status: TaskStatus::Todo,
            estimated_time: self.estimated_time,
            actual_time: self.actual_time,
            due_date: self.due_date,
            created_at: now,
            updated_at: now,
            completed_at: None,
            subtasks: Vec::new(),
            tags: self.tags,
            pomodoro_sessions: Vec::new(),
        };
        task.set_status(self.status, now);
        task
    }
}

/// Partial update for a task. `None` leaves a field alone; for optional
/// fields `Some(None)` clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub category: Option<TaskCategory>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub estimated_time: Option<u32>,
    pub actual_time: Option<Option<u32>>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub subtasks: Option<Vec<SubTask>>,
    pub tags: Option<BTreeSet<String>>,
    pub pomodoro_sessions: Option<Vec<PomodoroSession>>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        TaskUpdate {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TaskUpdate::default()
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
