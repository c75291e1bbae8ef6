//! # duckdone
//!
//! A personal task and productivity tracker.
//!
//! ## Features
//!
//! - **Task Management**: Create, update, complete and delete tasks with subtasks and tags
//! - **Pluggable Storage**: Tasks persist as JSON text in any key-value store
//! - **Productivity Statistics**: Time totals, procrastination coefficient, 7-day progress
//! - **Calendar**: Tasks grouped by due date with overdue detection
//! - **Pomodoro Timer**: Focus and break periods logged against tasks
//!
//! ## Usage
//!
//! ```rust,no_run
//! use duckdone::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
