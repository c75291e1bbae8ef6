//! Application configuration.
//!
//! Settings live as pretty-printed JSON in `config.json` inside the
//! platform data directory (see [`DataStorage`]). A missing file is not an
//! error: every module falls back to its defaults.
//!
//! ```rust,no_run
//! use duckdone::libs::config::Config;
//!
//! let config = Config::read()?;
//! let pomodoro = config.pomodoro_or_default();
//! println!("Focus for {} minutes", pomodoro.work_duration);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use super::pomodoro::{PomodoroConfig, PomodoroError};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    /// Pomodoro timer durations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pomodoro: Option<PomodoroConfig>,
}

impl Config {
    /// Loads the configuration, returning defaults when no file exists.
    ///
    /// # Errors
    ///
    /// Fails when the file exists but cannot be read or parsed, or when it
    /// holds pomodoro durations the timer cannot run.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), PomodoroError> {
        self.pomodoro.as_ref().map_or(Ok(()), PomodoroConfig::validate)
    }

    pub fn pomodoro_or_default(&self) -> PomodoroConfig {
        self.pomodoro.unwrap_or_default()
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.pomodoro_or_default();

        msg_print!(Message::ConfigModulePomodoro);
        config.pomodoro = Some(PomodoroConfig {
            work_duration: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptWorkDuration.to_string())
                .default(default.work_duration)
                .interact_text()?,
            short_break_duration: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptShortBreakDuration.to_string())
                .default(default.short_break_duration)
                .interact_text()?,
            long_break_duration: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptLongBreakDuration.to_string())
                .default(default.long_break_duration)
                .interact_text()?,
            long_break_interval: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptLongBreakInterval.to_string())
                .default(default.long_break_interval)
                .interact_text()?,
        });
        config.validate()?;

        Ok(config)
    }
}
