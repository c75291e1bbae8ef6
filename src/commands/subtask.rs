use super::open_store;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_success};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct SubtaskArgs {
    #[command(subcommand)]
    command: SubtaskCommand,
}

#[derive(Debug, Subcommand)]
enum SubtaskCommand {
    #[command(about = "Append a subtask")]
    Add { task_id: String, title: String },
    #[command(about = "Flip the done flag of a subtask")]
    Toggle { task_id: String, subtask_id: String },
}

pub fn cmd(subtask_args: SubtaskArgs) -> Result<()> {
    let store = open_store()?;

    match subtask_args.command {
        SubtaskCommand::Add { task_id, title } => {
            let subtask = store
                .add_subtask(&task_id, &title)?
                .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(task_id)))?;
            msg_success!(Message::SubtaskAdded(subtask.title, subtask.id));
        }
        SubtaskCommand::Toggle { task_id, subtask_id } => {
            let Some(task) = store.get(&task_id)? else {
                msg_bail_anyhow!(Message::TaskNotFound(task_id));
            };
            let completed = store
                .toggle_subtask(&task_id, &subtask_id)?
                .ok_or_else(|| msg_error_anyhow!(Message::SubtaskNotFound(subtask_id)))?;
            msg_success!(Message::SubtaskToggled {
                title: task.title,
                completed,
            });
        }
    }

    Ok(())
}
