//! Pomodoro countdown timer.
//!
//! The timer cycles between focus periods and breaks:
//!
//! ```text
//! Work ──▶ ShortBreak ──▶ Work ──▶ ... ──▶ Work ──▶ LongBreak ──▶ Work
//!                                  (every `long_break_interval` work sessions)
//! ```
//!
//! The timer owns no clock. Callers feed elapsed seconds into
//! [`PomodoroTimer::tick`]. Stopping a focus period early yields the minutes spent so they
//! can be logged against a task with
//! [`TaskStore::log_time`](crate::libs::store::TaskStore::log_time).

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Longest accepted period, in minutes.
pub const MAX_PERIOD_MINUTES: u32 = 24 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PomodoroError {
    #[error("{field} must be between 1 and {max} minutes, got {value}", max = MAX_PERIOD_MINUTES)]
    InvalidDuration { field: &'static str, value: u32 },

    #[error("long_break_interval must be at least 1")]
    InvalidInterval,
}

/// Durations in minutes.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PomodoroConfig {
    pub work_duration: u32,
    pub short_break_duration: u32,
    pub long_break_duration: u32,
    /// Number of work sessions between long breaks.
    pub long_break_interval: u32,
}

impl PomodoroConfig {
    /// Checks that every period lasts between one minute and
    /// [`MAX_PERIOD_MINUTES`] and that long breaks come around at all.
    pub fn validate(&self) -> Result<(), PomodoroError> {
        let periods = [
            ("work_duration", self.work_duration),
            ("short_break_duration", self.short_break_duration),
            ("long_break_duration", self.long_break_duration),
        ];
        for (field, value) in periods {
            if !(1..=MAX_PERIOD_MINUTES).contains(&value) {
                return Err(PomodoroError::InvalidDuration { field, value });
            }
        }
        if self.long_break_interval == 0 {
            return Err(PomodoroError::InvalidInterval);
        }
        Ok(())
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        PomodoroConfig {
            work_duration: 25,
            short_break_duration: 5,
            long_break_duration: 15,
            long_break_interval: 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl fmt::Display for TimerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TimerMode::Work => "Focus Time",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        };
        f.write_str(label)
    }
}

/// Emitted by [`PomodoroTimer::tick`] when a period runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    /// A focus period finished; `next` is the break that follows.
    WorkCompleted { next: TimerMode },
    BreakCompleted,
}

#[derive(Debug, Clone)]
pub struct PomodoroTimer {
    config: PomodoroConfig,
    mode: TimerMode,
    time_left: u32,
    running: bool,
    session_count: u32,
    total_time_spent: u32,
}

impl PomodoroTimer {
    pub fn new(config: PomodoroConfig) -> Self {
        PomodoroTimer {
            config,
            mode: TimerMode::Work,
            time_left: config.work_duration.saturating_mul(60),
            running: false,
            session_count: 0,
            total_time_spent: 0,
        }
    }

    pub fn config(&self) -> &PomodoroConfig {
        &self.config
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Seconds remaining in the current period.
    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Completed focus periods.
    pub fn session_count(&self) -> u32 {
        self.session_count
    }

    /// Minutes of completed focus periods.
    pub fn total_time_spent(&self) -> u32 {
        self.total_time_spent
    }

    /// Seconds in a full period of the current mode.
    pub fn current_duration(&self) -> u32 {
        self.duration_of(self.mode)
    }

    /// Percentage of the current period already elapsed.
    pub fn progress(&self) -> f64 {
        let total = self.current_duration();
        if total == 0 {
            return 100.0;
        }
        f64::from(total - self.time_left.min(total)) / f64::from(total) * 100.0
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stops the timer and restores the full duration of the current mode.
    pub fn reset(&mut self) {
        self.running = false;
        self.time_left = self.current_duration();
    }

    /// Advances the countdown by `seconds`. Does nothing while paused. When
    /// the period runs out the timer stops and switches mode; leftover
    /// seconds are not carried into the next period.
    pub fn tick(&mut self, seconds: u32) -> Option<TimerEvent> {
        if !self.running {
            return None;
        }
        self.time_left = self.time_left.saturating_sub(seconds);
        if self.time_left > 0 {
            return None;
        }

        self.running = false;
        let event = match self.mode {
            TimerMode::Work => {
                self.session_count += 1;
                self.total_time_spent = self.total_time_spent.saturating_add(self.config.work_duration);
                let interval = self.config.long_break_interval.max(1);
                let next = if self.session_count % interval == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                };
                self.mode = next;
                TimerEvent::WorkCompleted { next }
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => {
                self.mode = TimerMode::Work;
                TimerEvent::BreakCompleted
            }
        };
        self.time_left = self.current_duration();
        Some(event)
    }

    /// Abandons the current period and returns to a fresh focus period.
    /// Returns the minutes spent, rounded up, when a focus period was cut
    /// short after at least one second.
    pub fn stop(&mut self) -> Option<u32> {
        let spent = match self.mode {
            TimerMode::Work => {
                let elapsed = self.current_duration().saturating_sub(self.time_left);
                Some(elapsed.div_ceil(60)).filter(|minutes| *minutes > 0)
            }
            _ => None,
        };
        self.running = false;
        self.mode = TimerMode::Work;
        self.time_left = self.current_duration();
        spent
    }

    fn duration_of(&self, mode: TimerMode) -> u32 {
        let minutes = match mode {
            TimerMode::Work => self.config.work_duration,
            TimerMode::ShortBreak => self.config.short_break_duration,
            TimerMode::LongBreak => self.config.long_break_duration,
        };
        minutes.saturating_mul(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> PomodoroConfig {
        PomodoroConfig {
            work_duration: 2,
            short_break_duration: 1,
            long_break_duration: 3,
            long_break_interval: 2,
        }
    }

    #[test]
    fn test_paused_timer_does_not_count_down() {
        let mut timer = PomodoroTimer::new(PomodoroConfig::default());
        assert_eq!(timer.tick(60), None);
        assert_eq!(timer.time_left(), 25 * 60);
    }

    #[test]
    fn test_cycle_reaches_long_break_on_interval() {
        let mut timer = PomodoroTimer::new(quick());

        timer.start();
        assert_eq!(timer.tick(120), Some(TimerEvent::WorkCompleted { next: TimerMode::ShortBreak }));
        assert!(!timer.is_running());
        assert_eq!(timer.time_left(), 60);

        timer.start();
        assert_eq!(timer.tick(60), Some(TimerEvent::BreakCompleted));
        assert_eq!(timer.mode(), TimerMode::Work);

        timer.start();
        assert_eq!(timer.tick(200), Some(TimerEvent::WorkCompleted { next: TimerMode::LongBreak }));
        assert_eq!(timer.time_left(), 180);
        assert_eq!(timer.session_count(), 2);
        assert_eq!(timer.total_time_spent(), 4);
    }

    #[test]
    fn test_stop_rounds_partial_minutes_up() {
        let mut timer = PomodoroTimer::new(PomodoroConfig::default());
        timer.start();
        timer.tick(61);
        assert_eq!(timer.stop(), Some(2));
        assert_eq!(timer.mode(), TimerMode::Work);
        assert_eq!(timer.time_left(), 25 * 60);

        // Nothing elapsed, nothing to log
        assert_eq!(timer.stop(), None);
    }

    #[test]
    fn test_stop_during_break_logs_nothing() {
        let mut timer = PomodoroTimer::new(quick());
        timer.start();
        timer.tick(120);
        timer.start();
        timer.tick(30);
        assert_eq!(timer.stop(), None);
        assert_eq!(timer.mode(), TimerMode::Work);
    }

    #[test]
    fn test_validate_rejects_empty_and_oversized_periods() {
        assert_eq!(PomodoroConfig::default().validate(), Ok(()));
        assert_eq!(quick().validate(), Ok(()));

        let zero = PomodoroConfig {
            work_duration: 0,
            ..PomodoroConfig::default()
        };
        assert_eq!(
            zero.validate(),
            Err(PomodoroError::InvalidDuration {
                field: "work_duration",
                value: 0
            })
        );

        let huge = PomodoroConfig {
            long_break_duration: 80_000_000,
            ..PomodoroConfig::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(PomodoroError::InvalidDuration {
                field: "long_break_duration",
                ..
            })
        ));

        let never = PomodoroConfig {
            long_break_interval: 0,
            ..PomodoroConfig::default()
        };
        assert_eq!(never.validate(), Err(PomodoroError::InvalidInterval));
    }

    #[test]
    fn test_oversized_durations_do_not_overflow() {
        let mut timer = PomodoroTimer::new(PomodoroConfig {
            work_duration: 80_000_000,
            ..PomodoroConfig::default()
        });
        assert_eq!(timer.time_left(), u32::MAX);

        timer.start();
        assert_eq!(timer.tick(60), None);
        assert_eq!(timer.stop(), Some(1));
    }

    #[test]
    fn test_progress_and_reset() {
        let mut timer = PomodoroTimer::new(quick());
        timer.start();
        timer.tick(30);
        assert!((timer.progress() - 25.0).abs() < 1e-9);

        timer.reset();
        assert!(!timer.is_running());
        assert_eq!(timer.progress(), 0.0);
    }
}
