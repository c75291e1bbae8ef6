use super::open_store;
use crate::libs::filter::TaskFilter;
use crate::libs::messages::Message;
use crate::libs::task::{NewTask, TaskCategory, TaskPriority, TaskStatus, TaskUpdate};
use crate::libs::view::View;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommand,
}

#[derive(Debug, Subcommand)]
enum TaskCommand {
    #[command(about = "Create a task")]
    Add(AddArgs),
    #[command(about = "List tasks")]
    List(ListArgs),
    #[command(about = "Show a single task")]
    Show { id: String },
    #[command(about = "Change task fields")]
    Edit(EditArgs),
    #[command(about = "Mark a task completed")]
    Done { id: String },
    #[command(about = "Move a completed task back to todo")]
    Reopen { id: String },
    #[command(about = "Delete a task")]
    Delete {
        id: String,
        #[arg(short, long, help = "Skip confirmation")]
        yes: bool,
    },
    #[command(about = "Add minutes of work to a task")]
    Log { id: String, minutes: u32 },
}

#[derive(Debug, Args)]
struct AddArgs {
    title: String,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(short, long, value_enum, default_value_t = TaskCategory::Work)]
    category: TaskCategory,
    #[arg(short, long, value_enum, default_value_t = TaskPriority::Medium)]
    priority: TaskPriority,
    #[arg(short, long, default_value_t = 25, help = "Estimated minutes")]
    estimate: u32,
    #[arg(long, help = "Due date, YYYY-MM-DD or RFC 3339")]
    due: Option<String>,
    #[arg(short, long = "tag")]
    tags: Vec<String>,
}

#[derive(Debug, Args)]
struct ListArgs {
    #[arg(short, long, value_enum)]
    category: Option<TaskCategory>,
    #[arg(short, long, value_enum)]
    status: Option<TaskStatus>,
    #[arg(short, long, value_enum)]
    priority: Option<TaskPriority>,
    #[arg(short = 'q', long, help = "Search title and description")]
    search: Option<String>,
    #[arg(long, help = "Due on or after, YYYY-MM-DD")]
    from: Option<String>,
    #[arg(long, help = "Due on or before, YYYY-MM-DD")]
    to: Option<String>,
}

#[derive(Debug, Args)]
struct EditArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long, conflicts_with = "clear_description")]
    description: Option<String>,
    #[arg(long)]
    clear_description: bool,
    #[arg(long, value_enum)]
    category: Option<TaskCategory>,
    #[arg(long, value_enum)]
    priority: Option<TaskPriority>,
    #[arg(long, value_enum)]
    status: Option<TaskStatus>,
    #[arg(long, help = "Estimated minutes")]
    estimate: Option<u32>,
    #[arg(long, help = "Actual minutes")]
    actual: Option<u32>,
    #[arg(long, conflicts_with = "clear_due")]
    due: Option<String>,
    #[arg(long)]
    clear_due: bool,
    #[arg(long = "tag", help = "Replace tags")]
    tags: Vec<String>,
}

pub fn cmd(task_args: TaskArgs) -> Result<()> {
    let store = open_store()?;

    match task_args.command {
        TaskCommand::Add(args) => {
            let mut new_task = NewTask::new(&args.title, args.category, args.priority, args.estimate);
            new_task.description = args.description;
            new_task.due_date = args.due.as_deref().map(parse_due_date).transpose()?;
            new_task.tags = args.tags.into_iter().collect();

            let task = store.create(new_task)?;
            msg_success!(Message::TaskCreated(task.title, task.id));
        }
        TaskCommand::List(args) => {
            let filter = TaskFilter {
                category: args.category,
                status: args.status,
                priority: args.priority,
                search_term: args.search,
                date_range: match (args.from.as_deref(), args.to.as_deref()) {
                    (None, None) => None,
                    (from, to) => Some((
                        from.map(parse_due_date).transpose()?.unwrap_or(DateTime::<Utc>::MIN_UTC),
                        to.map(parse_day_end).transpose()?.unwrap_or(DateTime::<Utc>::MAX_UTC),
                    )),
                },
            };
            let tasks = filter.apply(&store.get_all()?);
            if tasks.is_empty() {
                msg_info!(Message::TasksNotFound);
                return Ok(());
            }
            msg_print!(Message::TasksHeader(tasks.len()), true);
            View::tasks(&tasks);
        }
        TaskCommand::Show { id } => match store.get(&id)? {
            Some(task) => View::task(&task),
            None => msg_bail_anyhow!(Message::TaskNotFound(id)),
        },
        TaskCommand::Edit(args) => {
            let id = args.id.clone();
            let update = edit_update(args)?;
            if update.is_empty() {
                msg_info!(Message::TaskNoChanges);
                return Ok(());
            }
            let task = store.update(&id, update)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id)))?;
            msg_success!(Message::TaskUpdated(task.title));
        }
        TaskCommand::Done { id } => {
            let task = store.complete(&id)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id)))?;
            msg_success!(Message::TaskCompleted(task.title));
        }
        TaskCommand::Reopen { id } => {
            let task = store.reopen(&id)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id)))?;
            msg_success!(Message::TaskReopened(task.title));
        }
        TaskCommand::Delete { id, yes } => {
            let Some(task) = store.get(&id)? else {
                msg_bail_anyhow!(Message::TaskNotFound(id));
            };
            let confirmed = yes
                || Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt(Message::ConfirmDeleteTask(task.title.clone()).to_string())
                    .default(false)
                    .interact()?;
            if !confirmed {
                msg_info!(Message::OperationCancelled);
                return Ok(());
            }
            store.remove(&id)?;
            msg_success!(Message::TaskDeleted(task.title));
        }
        TaskCommand::Log { id, minutes } => {
            let task = store.log_time(&id, minutes)?.ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(id)))?;
            msg_success!(Message::TimeLogged { minutes, title: task.title });
        }
    }

    Ok(())
}

fn edit_update(args: EditArgs) -> Result<TaskUpdate> {
    let description = match (args.description, args.clear_description) {
        (_, true) => Some(None),
        (Some(description), false) => Some(Some(description)),
        (None, false) => None,
    };
    let due_date = match (args.due, args.clear_due) {
        (_, true) => Some(None),
        (Some(due), false) => Some(Some(parse_due_date(&due)?)),
        (None, false) => None,
    };

    Ok(TaskUpdate {
        title: args.title,
        description,
        category: args.category,
        priority: args.priority,
        status: args.status,
        estimated_time: args.estimate,
        actual_time: args.actual.map(Some),
        due_date,
        tags: (!args.tags.is_empty()).then(|| args.tags.into_iter().collect()),
        ..Default::default()
    })
}

/// Accepts an RFC 3339 timestamp or a plain `YYYY-MM-DD` date, which is
/// taken as midnight UTC.
pub fn parse_due_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|at| at.and_utc())
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(value.to_string())))
}

/// Like [`parse_due_date`], but a plain date means the last second of that day.
fn parse_day_end(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|at| at.and_utc())
        .ok_or_else(|| msg_error_anyhow!(Message::InvalidDueDate(value.to_string())))
}
