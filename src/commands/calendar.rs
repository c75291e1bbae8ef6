use super::open_store;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_error_anyhow, msg_print};
use anyhow::Result;
use chrono::{Datelike, NaiveDate, Utc};
use clap::Args;

#[derive(Debug, Args)]
pub struct CalendarArgs {
    #[arg(short, long, help = "Month to show, YYYY-MM (default: current month)")]
    month: Option<String>,
}

pub fn cmd(calendar_args: CalendarArgs) -> Result<()> {
    let today = Utc::now().date_naive();
    let first = match calendar_args.month.as_deref() {
        Some(month) => parse_month(month)?,
        None => today.with_day(1).unwrap_or(today),
    };

    let store = open_store()?;
    let tasks = store.get_all()?;

    msg_print!(Message::CalendarHeader(first.format("%B %Y").to_string()), true);
    View::calendar(&tasks, first.year(), first.month(), today);

    Ok(())
}

/// First day of the month given as `YYYY-MM`.
fn parse_month(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", value), "%Y-%m-%d").map_err(|_| msg_error_anyhow!(Message::InvalidMonth(value.to_string())))
}
