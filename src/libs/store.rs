//! Task persistence over an injected key-value backend.
//!
//! The whole collection lives as one JSON array under
//! [`StorageKey::Tasks`]. Every operation is a full read-modify-write of that
//! array with no locking: two stores sharing a backend overwrite each other
//! and the last write wins.
//!
//! ## Failure behavior
//!
//! - **Absent key**: an empty collection, [`LoadSource::Absent`]
//! - **Corrupt text**: an empty collection, [`LoadSource::Corrupted`], plus a
//!   warning in the log. Never an error.
//! - **Backend or serialization failure**: logged and returned as
//!   [`StoreError`]
//! - **Unknown id** on update/remove: a no-op reported as `None`/`false`
//!
//! ## Usage
//!
//! ```rust
//! use duckdone::libs::storage::MemoryStorage;
//! use duckdone::libs::store::TaskStore;
//! use duckdone::libs::task::{NewTask, TaskCategory, TaskPriority};
//!
//! let store = TaskStore::new(MemoryStorage::new());
//! let task = store.create(NewTask::new("Review notes", TaskCategory::School, TaskPriority::Medium, 30))?;
//! store.complete(&task.id)?;
//! assert_eq!(store.stats()?.tasks_completed, 1);
//! # Ok::<(), duckdone::libs::error::StoreError>(())
//! ```

use super::error::{StoreError, StoreResult};
use super::stats::{self, ProductivityStats};
use super::storage::{KeyValueStore, StorageKey};
use super::task::{new_id, NewTask, PomodoroSession, SubTask, Task, TaskStatus, TaskUpdate};
use chrono::{DateTime, Duration, Utc};

/// Where the tasks returned by [`TaskStore::load`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing stored under the key yet.
    Absent,
    /// Parsed from stored text.
    Stored,
    /// Stored text could not be parsed; the reason is kept for diagnostics.
    Corrupted(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub tasks: Vec<Task>,
    pub source: LoadSource,
}

type Clock = Box<dyn Fn() -> DateTime<Utc>>;

pub struct TaskStore<S: KeyValueStore> {
    backend: S,
    clock: Clock,
}

impl<S: KeyValueStore> TaskStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_clock(backend, Utc::now)
    }

    /// Store whose timestamps come from `clock` instead of the system time.
    pub fn with_clock(backend: S, clock: impl Fn() -> DateTime<Utc> + 'static) -> Self {
        TaskStore {
            backend,
            clock: Box::new(clock),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    /// Reads the collection, telling apart an empty store from unreadable text.
    pub fn load(&self) -> StoreResult<Loaded> {
        let key = StorageKey::Tasks.as_str();
        let raw = match self.backend.get(key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!(key, error = %e, "failed to read tasks");
                return Err(e);
            }
        };

        let Some(raw) = raw else {
            tracing::debug!(key, "no stored tasks");
            return Ok(Loaded {
                tasks: Vec::new(),
                source: LoadSource::Absent,
            });
        };

        match serde_json::from_str::<Vec<Task>>(&raw) {
            Ok(tasks) => {
                tracing::debug!(key, count = tasks.len(), "loaded tasks");
                Ok(Loaded {
                    tasks,
                    source: LoadSource::Stored,
                })
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "stored tasks are unreadable, starting from an empty list");
                Ok(Loaded {
                    tasks: Vec::new(),
                    source: LoadSource::Corrupted(e.to_string()),
                })
            }
        }
    }

    pub fn get_all(&self) -> StoreResult<Vec<Task>> {
        Ok(self.load()?.tasks)
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<Task>> {
        Ok(self.get_all()?.into_iter().find(|task| task.id == id))
    }

    /// Overwrites the stored collection with `tasks`.
    pub fn save_all(&self, tasks: &[Task]) -> StoreResult<()> {
        let key = StorageKey::Tasks.as_str();
        let raw = serde_json::to_string(tasks).inspect_err(|e| {
            tracing::error!(key, error = %e, "failed to serialize tasks");
        })?;

        self.backend.set(key, &raw).inspect_err(|e| {
            tracing::error!(key, count = tasks.len(), error = %e, "failed to save tasks");
        })?;

        tracing::debug!(key, count = tasks.len(), bytes = raw.len(), "saved tasks");
        Ok(())
    }

    /// Appends a fully formed task.
    pub fn add(&self, task: Task) -> StoreResult<()> {
        let mut tasks = self.get_all()?;
        if tasks.iter().any(|t| t.id == task.id) {
            return Err(StoreError::DuplicateId(task.id));
        }
        tasks.push(task);
        self.save_all(&tasks)
    }

    /// Builds a task with a fresh id and timestamps and appends it.
    pub fn create(&self, new_task: NewTask) -> StoreResult<Task> {
        let task = new_task.into_task(self.now());
        self.add(task.clone())?;
        Ok(task)
    }

    /// Merges `update` into the task with `id`. Returns `Ok(None)` without
    /// writing anything when the id is unknown.
    pub fn update(&self, id: &str, update: TaskUpdate) -> StoreResult<Option<Task>> {
        self.modify(id, |task, now| {
            task.apply(update, now);
            Ok(())
        })
    }

    pub fn complete(&self, id: &str) -> StoreResult<Option<Task>> {
        self.update(id, TaskUpdate::status(TaskStatus::Completed))
    }

    pub fn reopen(&self, id: &str) -> StoreResult<Option<Task>> {
        self.update(id, TaskUpdate::status(TaskStatus::Todo))
    }

    /// Removes the task with `id`. Returns whether anything was removed; an
    /// unknown id leaves the stored collection untouched.
    pub fn remove(&self, id: &str) -> StoreResult<bool> {
        let mut tasks = self.get_all()?;
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            tracing::debug!(id, "remove: no such task");
            return Ok(false);
        }
        self.save_all(&tasks)?;
        Ok(true)
    }

    pub fn add_subtask(&self, id: &str, title: &str) -> StoreResult<Option<SubTask>> {
        let mut created = None;
        self.modify(id, |task, now| {
            let subtask = SubTask::new(title, now);
            created = Some(subtask.clone());
            task.subtasks.push(subtask);
            task.updated_at = now;
            Ok(())
        })?;
        Ok(created)
    }

    /// Flips the completed flag of a subtask and returns the new value.
    /// `None` when either the task or the subtask does not exist.
    pub fn toggle_subtask(&self, id: &str, subtask_id: &str) -> StoreResult<Option<bool>> {
        let mut tasks = self.get_all()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        let Some(subtask) = task.subtasks.iter_mut().find(|s| s.id == subtask_id) else {
            return Ok(None);
        };
        subtask.completed = !subtask.completed;
        let completed = subtask.completed;
        task.updated_at = self.now();
        self.save_all(&tasks)?;
        Ok(Some(completed))
    }

    /// Adds `minutes` of focus time to a task and records the period as a
    /// completed pomodoro session that ends now. Nothing is written when the
    /// total would no longer fit in `actual_time`.
    pub fn log_time(&self, id: &str, minutes: u32) -> StoreResult<Option<Task>> {
        self.modify(id, |task, now| {
            let total = task.actual_time.unwrap_or(0).checked_add(minutes).ok_or_else(|| StoreError::TimeOverflow {
                id: task.id.clone(),
                minutes,
            })?;
            task.actual_time = Some(total);
            task.pomodoro_sessions.push(PomodoroSession {
                id: new_id(),
                task_id: task.id.clone(),
                start_time: now - Duration::minutes(i64::from(minutes)),
                end_time: Some(now),
                duration: minutes,
                completed: true,
            });
            task.updated_at = now;
            Ok(())
        })
    }

    /// Snapshot of productivity metrics for the stored tasks, with the
    /// seven-day window ending on the current UTC date.
    pub fn stats(&self) -> StoreResult<ProductivityStats> {
        let tasks = self.get_all()?;
        Ok(stats::compute(&tasks, self.now().date_naive()))
    }

    fn modify(
        &self,
        id: &str,
        change: impl FnOnce(&mut Task, DateTime<Utc>) -> StoreResult<()>,
    ) -> StoreResult<Option<Task>> {
        let mut tasks = self.get_all()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            tracing::debug!(id, "update: no such task");
            return Ok(None);
        };
        change(task, self.now())?;
        let updated = task.clone();
        self.save_all(&tasks)?;
        Ok(Some(updated))
    }
}
