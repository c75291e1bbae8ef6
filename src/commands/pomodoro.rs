//! Foreground pomodoro: counts one focus period down in the terminal and
//! logs it against a task. Ctrl-C ends the period early and logs the
//! minutes spent so far, rounded up.

use super::open_store;
use crate::libs::config::Config;
use crate::libs::formatter::format_clock;
use crate::libs::messages::Message;
use crate::libs::pomodoro::{PomodoroTimer, TimerEvent, MAX_PERIOD_MINUTES};
use crate::libs::storage::KeyValueStore;
use crate::libs::store::TaskStore;
use crate::libs::task::Task;
use crate::{msg_bail_anyhow, msg_error_anyhow, msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use std::io::{self, Write};
use std::time::Duration;

#[derive(Debug, Args)]
pub struct PomodoroArgs {
    task_id: String,
    #[arg(
        short,
        long,
        help = "Override the configured focus length (minutes)",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PERIOD_MINUTES))
    )]
    minutes: Option<u32>,
}

/// How a focus period came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusEnd {
    Finished,
    Interrupted,
}

pub async fn cmd(pomodoro_args: PomodoroArgs) -> Result<()> {
    let store = open_store()?;
    let Some(task) = store.get(&pomodoro_args.task_id)? else {
        msg_bail_anyhow!(Message::TaskNotFound(pomodoro_args.task_id));
    };

    let mut config = Config::read()?.pomodoro_or_default();
    if let Some(minutes) = pomodoro_args.minutes {
        config.work_duration = minutes;
    }
    config.validate()?;

    let mut timer = PomodoroTimer::new(config);
    msg_info!(Message::PomodoroStarted {
        mode: timer.mode().to_string(),
        title: task.title.clone(),
    });
    msg_info!(Message::PomodoroStopHint);
    timer.start();

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately
    ticker.tick().await;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let end = loop {
        print!("\r{} ", format_clock(timer.time_left()));
        io::stdout().flush()?;
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(TimerEvent::WorkCompleted { .. }) = timer.tick(1) {
                    println!();
                    break FocusEnd::Finished;
                }
            }
            result = &mut ctrl_c => {
                result?;
                println!();
                msg_info!(Message::PomodoroInterrupted);
                break FocusEnd::Interrupted;
            }
        }
    };

    match record_focus(&store, &task.id, &mut timer, end)? {
        Some((minutes, task)) => msg_success!(Message::TimeLogged { minutes, title: task.title }),
        None => msg_info!(Message::PomodoroNothingToLog),
    }
    Ok(())
}

/// Logs the focus period that just ended against `task_id`. A finished
/// period counts in full; an interrupted one counts the elapsed minutes,
/// rounded up. Returns `None` when there was nothing to log.
fn record_focus<S: KeyValueStore>(
    store: &TaskStore<S>,
    task_id: &str,
    timer: &mut PomodoroTimer,
    end: FocusEnd,
) -> Result<Option<(u32, Task)>> {
    let minutes = match end {
        FocusEnd::Finished => Some(timer.config().work_duration),
        FocusEnd::Interrupted => timer.stop(),
    };
    let Some(minutes) = minutes else {
        return Ok(None);
    };

    let task = store
        .log_time(task_id, minutes)?
        .ok_or_else(|| msg_error_anyhow!(Message::TaskNotFound(task_id.to_string())))?;
    Ok(Some((minutes, task)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::pomodoro::PomodoroConfig;
    use crate::libs::storage::MemoryStorage;
    use crate::libs::task::{NewTask, TaskCategory, TaskPriority};

    fn store_with_task() -> (TaskStore<MemoryStorage>, Task) {
        let store = TaskStore::new(MemoryStorage::new());
        let task = store
            .create(NewTask::new("Write essay", TaskCategory::School, TaskPriority::High, 50))
            .unwrap();
        (store, task)
    }

    #[test]
    fn test_interrupted_focus_logs_elapsed_minutes() {
        let (store, task) = store_with_task();
        let mut timer = PomodoroTimer::new(PomodoroConfig::default());
        timer.start();
        timer.tick(7 * 60 + 10);

        let (minutes, logged) = record_focus(&store, &task.id, &mut timer, FocusEnd::Interrupted)
            .unwrap()
            .unwrap();

        assert_eq!(minutes, 8);
        assert_eq!(logged.actual_time, Some(8));
        assert_eq!(logged.pomodoro_sessions.len(), 1);
        assert_eq!(logged.pomodoro_sessions[0].duration, 8);
        assert_eq!(timer.time_left(), 25 * 60);
    }

    #[test]
    fn test_finished_focus_logs_full_period() {
        let (store, task) = store_with_task();
        let mut timer = PomodoroTimer::new(PomodoroConfig::default());
        timer.start();
        assert!(timer.tick(25 * 60).is_some());

        let (minutes, logged) = record_focus(&store, &task.id, &mut timer, FocusEnd::Finished)
            .unwrap()
            .unwrap();

        assert_eq!(minutes, 25);
        assert_eq!(logged.actual_time, Some(25));
    }

    #[test]
    fn test_interrupt_before_first_second_logs_nothing() {
        let (store, task) = store_with_task();
        let mut timer = PomodoroTimer::new(PomodoroConfig::default());
        timer.start();

        assert!(record_focus(&store, &task.id, &mut timer, FocusEnd::Interrupted)
            .unwrap()
            .is_none());
        let stored = store.get(&task.id).unwrap().unwrap();
        assert_eq!(stored.actual_time, None);
        assert!(stored.pomodoro_sessions.is_empty());
    }

    #[test]
    fn test_unknown_task_is_an_error() {
        let (store, _) = store_with_task();
        let mut timer = PomodoroTimer::new(PomodoroConfig::default());
        timer.start();
        timer.tick(90);

        let err = record_focus(&store, "missing", &mut timer, FocusEnd::Interrupted).unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
