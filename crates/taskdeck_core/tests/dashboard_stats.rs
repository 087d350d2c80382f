use chrono::{Duration, TimeZone, Utc};
use taskdeck_core::{
    dashboard_stats, recent_tasks, MemoryBlobStore, Task, TaskDraft, TaskPatch, TaskPriority,
    TaskStatus, TaskStore, User, UserDraft, UserRole,
};
use uuid::Uuid;

#[test]
fn stats_count_statuses_priorities_and_overdue() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let tasks = vec![
        // Past due but completed: not overdue.
        task(1, TaskPriority::Low, TaskStatus::Completed, now - Duration::days(3)),
        // Past due and still in progress: overdue.
        task(2, TaskPriority::Medium, TaskStatus::InProgress, now - Duration::days(1)),
        // Future due: not overdue.
        task(3, TaskPriority::Low, TaskStatus::Pending, now + Duration::days(2)),
        // Past due and pending: overdue.
        task(4, TaskPriority::High, TaskStatus::Pending, now - Duration::hours(6)),
    ];

    let stats = dashboard_stats(&tasks, None, now);

    assert_eq!(stats.total, 4);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.in_progress, 1);
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.high_priority, 1);
    assert_eq!(stats.overdue, 2);
    assert_eq!(stats.completion_rate_percent, 25);
}

#[test]
fn due_exactly_now_is_not_overdue() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let tasks = vec![task(1, TaskPriority::High, TaskStatus::Pending, now)];

    let stats = dashboard_stats(&tasks, None, now);
    assert_eq!(stats.overdue, 0);
}

#[test]
fn assigned_to_me_counts_current_user_assignments_only() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let me = user(7);
    let mut mine = task(1, TaskPriority::Low, TaskStatus::Pending, now);
    mine.assigned_to = me.id;
    let tasks = vec![
        mine,
        task(2, TaskPriority::Low, TaskStatus::Pending, now),
    ];

    let with_session = dashboard_stats(&tasks, Some(&me), now);
    assert_eq!(with_session.assigned_to_me, 1);

    let without_session = dashboard_stats(&tasks, None, now);
    assert_eq!(without_session.assigned_to_me, 0);
}

#[test]
fn recent_tasks_orders_newest_update_first_and_truncates() {
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let mut tasks = Vec::new();
    for offset in 0..5u32 {
        let mut item = task(
            u128::from(offset) + 1,
            TaskPriority::Low,
            TaskStatus::Pending,
            base,
        );
        item.updated_at = base + Duration::minutes(i64::from(offset));
        tasks.push(item);
    }

    let recent = recent_tasks(&tasks, 4);

    assert_eq!(recent.len(), 4);
    let ids: Vec<_> = recent.iter().map(|t| t.id).collect();
    assert_eq!(
        ids,
        vec![
            Uuid::from_u128(5),
            Uuid::from_u128(4),
            Uuid::from_u128(3),
            Uuid::from_u128(2),
        ]
    );
}

#[test]
fn recent_tasks_leaves_the_input_sequence_alone() {
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let mut newer = task(1, TaskPriority::Low, TaskStatus::Pending, base);
    newer.updated_at = base + Duration::hours(1);
    let tasks = vec![newer, task(2, TaskPriority::Low, TaskStatus::Pending, base)];
    let input_ids: Vec<_> = tasks.iter().map(|t| t.id).collect();

    let _ = recent_tasks(&tasks, 1);

    let after_ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
    assert_eq!(after_ids, input_ids);
}

#[test]
fn recent_tasks_ties_keep_insertion_order() {
    let base = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let tasks = vec![
        task(1, TaskPriority::Low, TaskStatus::Pending, base),
        task(2, TaskPriority::Low, TaskStatus::Pending, base),
    ];

    let recent = recent_tasks(&tasks, 2);
    let ids: Vec<_> = recent.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![Uuid::from_u128(1), Uuid::from_u128(2)]);
}

#[test]
fn dashboard_over_a_live_store_reflects_the_latest_update() {
    let blob = MemoryBlobStore::new();
    let mut store = TaskStore::open(&blob).unwrap();
    let first = store.add_task(store_draft("first")).unwrap();
    let second = store.add_task(store_draft("second")).unwrap();

    let patch = TaskPatch {
        status: Some(TaskStatus::Completed),
        ..TaskPatch::default()
    };
    store.update_task(first, patch).unwrap();

    let recent = recent_tasks(store.tasks(), 4);
    assert_eq!(recent[0].id, first);
    assert_eq!(recent[1].id, second);

    let stats = dashboard_stats(store.tasks(), None, Utc::now());
    assert_eq!(stats.total, 2);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.completion_rate_percent, 50);
}

fn user(id: u128) -> User {
    User::with_id(
        Uuid::from_u128(id),
        UserDraft {
            email: format!("user{id}@example.com"),
            name: format!("User {id}"),
            role: UserRole::User,
        },
    )
}

fn task(id: u128, priority: TaskPriority, status: TaskStatus, due: chrono::DateTime<Utc>) -> Task {
    let created = Utc.with_ymd_and_hms(2025, 5, 1, 0, 0, 0).unwrap();
    Task::with_id(
        Uuid::from_u128(id),
        TaskDraft {
            title: format!("task {id}"),
            description: String::new(),
            due_date: due,
            priority,
            status,
            assigned_to: Uuid::from_u128(900),
            created_by: Uuid::from_u128(900),
        },
        created,
    )
}

fn store_draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: String::new(),
        due_date: Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap(),
        priority: TaskPriority::Medium,
        status: TaskStatus::Pending,
        assigned_to: Uuid::from_u128(900),
        created_by: Uuid::from_u128(900),
    }
}
