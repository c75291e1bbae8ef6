//! Core library modules.
//!
//! ## Features
//!
//! - **Task model**: tasks, subtasks and pomodoro sessions with their serialized shape
//! - **Persistence**: the task store over an injected key-value backend
//! - **Productivity analysis**: completion totals, procrastination coefficient, daily progress
//! - **Planning**: filters, due-date calendar, pomodoro timer
//! - **Infrastructure**: configuration, data directory, messages, console rendering
//!
//! ## Usage
//!
//! ```rust
//! use duckdone::libs::storage::MemoryStorage;
//! use duckdone::libs::store::TaskStore;
//! use duckdone::libs::task::{NewTask, TaskCategory, TaskPriority};
//!
//! let store = TaskStore::new(MemoryStorage::new());
//! store.create(NewTask::new("Water plants", TaskCategory::DailyLife, TaskPriority::Low, 5))?;
//! assert_eq!(store.get_all()?.len(), 1);
//! # Ok::<(), duckdone::libs::error::StoreError>(())
//! ```

pub mod calendar;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod messages;
pub mod pomodoro;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;
pub mod view;
