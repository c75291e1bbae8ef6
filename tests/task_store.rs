#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use duckdone::libs::error::StoreError;
    use duckdone::libs::storage::{KeyValueStore, MemoryStorage, StorageKey};
    use duckdone::libs::store::{LoadSource, TaskStore};
    use duckdone::libs::task::{NewTask, PomodoroSession, SubTask, Task, TaskCategory, TaskPriority, TaskStatus, TaskUpdate};
    use std::cell::Cell;
    use test_context::{test_context, TestContext};

    const TASKS_KEY: &str = "duck-done-tasks";

    struct StoreTestContext {
        storage: MemoryStorage,
        store: TaskStore<MemoryStorage>,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let storage = MemoryStorage::new();
            let store = TaskStore::with_clock(storage.clone(), stepping_clock(start()));
            StoreTestContext { storage, store }
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 15, 9, 0, 0).unwrap()
    }

    /// Clock that moves one second forward on every reading.
    fn stepping_clock(from: DateTime<Utc>) -> impl Fn() -> DateTime<Utc> {
        let ticks = Cell::new(0);
        move || {
            let n = ticks.get();
            ticks.set(n + 1);
            from + Duration::seconds(n)
        }
    }

    fn new_task(title: &str, estimated: u32) -> NewTask {
        NewTask::new(title, TaskCategory::Work, TaskPriority::Medium, estimated)
    }

    fn raw(ctx: &StoreTestContext) -> Option<String> {
        ctx.storage.get(TASKS_KEY).unwrap()
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_adds_are_all_returned(ctx: &mut StoreTestContext) {
        for i in 1..=5 {
            ctx.store.create(new_task(&format!("Task {}", i), 10 * i)).unwrap();
        }

        let tasks = ctx.store.get_all().unwrap();
        assert_eq!(tasks.len(), 5);
        let titles: Vec<&str> = tasks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["Task 1", "Task 2", "Task 3", "Task 4", "Task 5"]);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_date_fields_round_trip(ctx: &mut StoreTestContext) {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + Duration::milliseconds(678);
        let mut task = new_task("Dated", 30).into_task(created);
        task.due_date = Some(Utc.with_ymd_and_hms(2024, 2, 29, 23, 59, 59).unwrap());
        task.status = TaskStatus::Completed;
        task.completed_at = Some(created + Duration::hours(5));
        task.subtasks.push(SubTask::new("step", created + Duration::minutes(1)));
        task.pomodoro_sessions.push(PomodoroSession {
            id: "s1".to_string(),
            task_id: task.id.clone(),
            start_time: created + Duration::minutes(10),
            end_time: Some(created + Duration::minutes(35)),
            duration: 25,
            completed: true,
        });
        task.pomodoro_sessions.push(PomodoroSession {
            id: "s2".to_string(),
            task_id: task.id.clone(),
            start_time: created + Duration::minutes(40),
            end_time: None,
            duration: 25,
            completed: false,
        });

        ctx.store.add(task.clone()).unwrap();
        let loaded = ctx.store.get_all().unwrap();

        assert_eq!(loaded, vec![task]);
        assert_eq!(loaded[0].created_at, created);
        assert!(loaded[0].pomodoro_sessions[1].end_time.is_none());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_stored_layout(ctx: &mut StoreTestContext) {
        let mut new = new_task("Layout", 15);
        new.category = TaskCategory::DailyLife;
        ctx.store.create(new).unwrap();

        let value: serde_json::Value = serde_json::from_str(&raw(ctx).unwrap()).unwrap();
        let stored = &value.as_array().unwrap()[0];
        assert_eq!(stored["category"], "daily-life");
        assert_eq!(stored["estimatedTime"], 15);
        assert_eq!(stored["createdAt"], "2024-04-15T09:00:00Z");
        assert!(stored.get("dueDate").is_none());
        assert_eq!(StorageKey::Tasks.as_str(), TASKS_KEY);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_complete_sets_completed_at_and_bumps_updated_at(ctx: &mut StoreTestContext) {
        let task = ctx.store.create(new_task("Finish me", 20)).unwrap();
        assert!(task.completed_at.is_none());

        let update = TaskUpdate::status(TaskStatus::Completed);
        ctx.store.update(&task.id, update).unwrap().unwrap();

        let stored = ctx.store.get(&task.id).unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::Completed);
        assert!(stored.completed_at.is_some());
        assert!(stored.updated_at > task.updated_at);
        assert_eq!(stored.created_at, task.created_at);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_updated_at_increases_with_system_clock(_ctx: &mut StoreTestContext) {
        let store = TaskStore::new(MemoryStorage::new());
        let earlier = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let task = new_task("Old", 5).into_task(earlier);
        store.add(task.clone()).unwrap();

        store.update(&task.id, TaskUpdate::status(TaskStatus::Completed)).unwrap();

        let stored = store.get(&task.id).unwrap().unwrap();
        assert!(stored.updated_at > earlier);
        assert!(stored.completed_at.is_some());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_reopen_clears_completion(ctx: &mut StoreTestContext) {
        let task = ctx.store.create(new_task("Again", 20)).unwrap();
        ctx.store.complete(&task.id).unwrap();

        let reopened = ctx.store.reopen(&task.id).unwrap().unwrap();
        assert_eq!(reopened.status, TaskStatus::Todo);
        assert!(reopened.completed_at.is_none());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_update_merges_fields(ctx: &mut StoreTestContext) {
        let task = ctx.store.create(new_task("Draft", 20)).unwrap();

        let update = TaskUpdate {
            title: Some("Final".to_string()),
            priority: Some(TaskPriority::Urgent),
            actual_time: Some(Some(35)),
            tags: Some(["writing".to_string(), "q2".to_string()].into_iter().collect()),
            ..Default::default()
        };
        let updated = ctx.store.update(&task.id, update).unwrap().unwrap();

        assert_eq!(updated.title, "Final");
        assert_eq!(updated.priority, TaskPriority::Urgent);
        assert_eq!(updated.actual_time, Some(35));
        assert_eq!(updated.estimated_time, 20);
        assert!(updated.tags.contains("writing"));
        assert_eq!(ctx.store.get(&task.id).unwrap().unwrap(), updated);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_update_unknown_id_is_noop(ctx: &mut StoreTestContext) {
        ctx.store.create(new_task("Only", 10)).unwrap();
        let before = raw(ctx);

        let result = ctx.store.update("missing", TaskUpdate::status(TaskStatus::Completed)).unwrap();

        assert!(result.is_none());
        assert_eq!(raw(ctx), before);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_remove(ctx: &mut StoreTestContext) {
        let keep = ctx.store.create(new_task("Keep", 10)).unwrap();
        let gone = ctx.store.create(new_task("Gone", 10)).unwrap();

        assert!(ctx.store.remove(&gone.id).unwrap());
        let remaining = ctx.store.get_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, keep.id);
        assert!(remaining.iter().all(|t| t.id != gone.id));

        let before = raw(ctx);
        assert!(!ctx.store.remove(&gone.id).unwrap());
        assert_eq!(raw(ctx), before);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_absent_and_corrupt_storage(ctx: &mut StoreTestContext) {
        let loaded = ctx.store.load().unwrap();
        assert!(loaded.tasks.is_empty());
        assert_eq!(loaded.source, LoadSource::Absent);

        ctx.storage.set(TASKS_KEY, "{not json").unwrap();
        let loaded = ctx.store.load().unwrap();
        assert!(loaded.tasks.is_empty());
        assert!(matches!(loaded.source, LoadSource::Corrupted(_)));
        assert!(ctx.store.get_all().unwrap().is_empty());

        // Valid JSON of the wrong shape counts as corrupt too
        ctx.storage.set(TASKS_KEY, r#"[{"id": 1}]"#).unwrap();
        assert!(ctx.store.get_all().unwrap().is_empty());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_add_over_corrupt_storage_starts_fresh(ctx: &mut StoreTestContext) {
        ctx.storage.set(TASKS_KEY, "garbage").unwrap();

        ctx.store.create(new_task("Fresh", 10)).unwrap();

        let loaded = ctx.store.load().unwrap();
        assert_eq!(loaded.source, LoadSource::Stored);
        assert_eq!(loaded.tasks.len(), 1);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_duplicate_id_is_rejected(ctx: &mut StoreTestContext) {
        let task = ctx.store.create(new_task("Once", 10)).unwrap();

        let err = ctx.store.add(task.clone()).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(id) if id == task.id));
        assert_eq!(ctx.store.get_all().unwrap().len(), 1);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_quota_exceeded_is_reported(_ctx: &mut StoreTestContext) {
        let storage = MemoryStorage::with_quota(600);
        let store = TaskStore::with_clock(storage, stepping_clock(start()));
        store.create(new_task("Fits", 10)).unwrap();

        let mut big = new_task("Too big", 10);
        big.description = Some("x".repeat(1000));
        let err = store.create(big).unwrap_err();

        assert!(matches!(err, StoreError::QuotaExceeded { .. }));
        let tasks = store.get_all().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Fits");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_last_writer_wins_across_handles(ctx: &mut StoreTestContext) {
        let other_tab = TaskStore::new(ctx.storage.clone());
        let task = ctx.store.create(new_task("Shared", 10)).unwrap();

        // Both handles read the same collection, then write independently
        let mut stale: Vec<Task> = other_tab.get_all().unwrap();
        ctx.store.create(new_task("Lost", 10)).unwrap();
        stale[0].title = "Renamed elsewhere".to_string();
        other_tab.save_all(&stale).unwrap();

        let tasks = ctx.store.get_all().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task.id);
        assert_eq!(tasks[0].title, "Renamed elsewhere");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_subtasks(ctx: &mut StoreTestContext) {
        let task = ctx.store.create(new_task("Parent", 30)).unwrap();

        let first = ctx.store.add_subtask(&task.id, "first").unwrap().unwrap();
        ctx.store.add_subtask(&task.id, "second").unwrap().unwrap();
        assert!(ctx.store.add_subtask("missing", "orphan").unwrap().is_none());

        assert_eq!(ctx.store.toggle_subtask(&task.id, &first.id).unwrap(), Some(true));
        assert_eq!(ctx.store.toggle_subtask(&task.id, "missing").unwrap(), None);

        let stored = ctx.store.get(&task.id).unwrap().unwrap();
        let titles: Vec<&str> = stored.subtasks.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert!(stored.subtasks[0].completed);
        assert!(!stored.subtasks[1].completed);
        assert!(stored.updated_at > task.updated_at);

        assert_eq!(ctx.store.toggle_subtask(&task.id, &first.id).unwrap(), Some(false));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_log_time_accumulates_and_records_sessions(ctx: &mut StoreTestContext) {
        let task = ctx.store.create(new_task("Focus", 50)).unwrap();

        ctx.store.log_time(&task.id, 25).unwrap().unwrap();
        let logged = ctx.store.log_time(&task.id, 10).unwrap().unwrap();

        assert_eq!(logged.actual_time, Some(35));
        assert_eq!(logged.pomodoro_sessions.len(), 2);
        let session = &logged.pomodoro_sessions[1];
        assert_eq!(session.task_id, task.id);
        assert_eq!(session.duration, 10);
        assert!(session.completed);
        assert_eq!(session.end_time.unwrap() - session.start_time, Duration::minutes(10));

        assert!(ctx.store.log_time("missing", 5).unwrap().is_none());
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_log_time_rejects_overflowing_total(ctx: &mut StoreTestContext) {
        let task = ctx.store.create(new_task("Marathon", 60)).unwrap();
        let near_limit = TaskUpdate {
            actual_time: Some(Some(u32::MAX - 5)),
            ..Default::default()
        };
        ctx.store.update(&task.id, near_limit).unwrap().unwrap();
        ctx.store.log_time(&task.id, 5).unwrap().unwrap();
        let before = raw(ctx);

        let err = ctx.store.log_time(&task.id, 1).unwrap_err();
        assert!(matches!(err, StoreError::TimeOverflow { minutes: 1, .. }));

        assert_eq!(raw(ctx), before);
        let stored = ctx.store.get(&task.id).unwrap().unwrap();
        assert_eq!(stored.actual_time, Some(u32::MAX));
        assert_eq!(stored.pomodoro_sessions.len(), 1);
    }
}
