#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String, String), // title, id
    TaskUpdated(String),
    TaskCompleted(String),
    TaskReopened(String),
    TaskDeleted(String),
    TaskNotFound(String), // id
    TaskNoChanges,
    TasksNotFound,
    TasksHeader(usize),
    ConfirmDeleteTask(String),
    TimeLogged { minutes: u32, title: String },
    InvalidDueDate(String),

    // === SUBTASK MESSAGES ===
    SubtaskAdded(String, String), // title, id
    SubtaskToggled { title: String, completed: bool },
    SubtaskNotFound(String),

    // === STORAGE MESSAGES ===
    StorageCorrupted(String),

    // === STATS MESSAGES ===
    StatsHeader,
    DailyProgressHeader,
    CategoryBreakdownHeader,
    ProcrastinationSummary { coefficient: f64, level: String },
    PeakHour(u32),

    // === CALENDAR MESSAGES ===
    CalendarHeader(String), // month
    NoDueTasks,
    InvalidMonth(String),

    // === POMODORO MESSAGES ===
    PomodoroStarted { mode: String, title: String },
    PomodoroStopHint,
    PomodoroInterrupted,
    PomodoroNothingToLog,

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModulePomodoro,
    PromptWorkDuration,
    PromptShortBreakDuration,
    PromptLongBreakDuration,
    PromptLongBreakInterval,

    // === GENERAL MESSAGES ===
    OperationCancelled,
}
