use super::open_store;
use crate::libs::stats;
use crate::libs::view::View;
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[arg(long, help = "Print the snapshot as JSON")]
    json: bool,
}

pub fn cmd(stats_args: StatsArgs) -> Result<()> {
    let store = open_store()?;
    let tasks = store.get_all()?;
    let snapshot = stats::compute(&tasks, Utc::now().date_naive());

    if stats_args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        View::stats(&snapshot, &tasks);
    }

    Ok(())
}
