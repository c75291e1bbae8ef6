pub mod calendar;
pub mod init;
pub mod pomodoro;
pub mod stats;
pub mod subtask;
pub mod task;

use crate::db::kv::SqliteStorage;
use crate::libs::messages::Message;
use crate::libs::error::StoreResult;
use crate::libs::storage::KeyValueStore;
use crate::libs::store::{LoadSource, TaskStore};
use crate::{msg_debug, msg_warning};
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Create, list, edit and complete tasks", arg_required_else_help = true)]
    Task(task::TaskArgs),
    #[command(about = "Add or toggle subtasks", arg_required_else_help = true)]
    Subtask(subtask::SubtaskArgs),
    #[command(about = "Show productivity statistics")]
    Stats(stats::StatsArgs),
    #[command(about = "Show tasks by due date")]
    Calendar(calendar::CalendarArgs),
    #[command(about = "Run a focus period and log it against a task")]
    Pomodoro(pomodoro::PomodoroArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Subtask(args) => subtask::cmd(args),
            Commands::Stats(args) => stats::cmd(args),
            Commands::Calendar(args) => calendar::cmd(args),
            Commands::Pomodoro(args) => pomodoro::cmd(args).await,
        }
    }
}

/// Opens the task store backed by the application database, warning up
/// front when the stored tasks are unreadable and the next write would
/// replace them.
pub(crate) fn open_store() -> Result<TaskStore<SqliteStorage>> {
    let store = TaskStore::new(SqliteStorage::new()?);
    if let Some(notice) = storage_notice(&store)? {
        msg_warning!(notice);
    }
    Ok(store)
}

/// The warning to show for the current state of stored tasks, if any.
pub(crate) fn storage_notice<S: KeyValueStore>(store: &TaskStore<S>) -> StoreResult<Option<Message>> {
    let loaded = store.load()?;
    msg_debug!(format!("Loaded {} tasks ({:?})", loaded.tasks.len(), loaded.source));
    Ok(match loaded.source {
        LoadSource::Corrupted(reason) => Some(Message::StorageCorrupted(reason)),
        LoadSource::Absent | LoadSource::Stored => None,
    })
}
