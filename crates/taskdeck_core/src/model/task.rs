//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical work-item record and its draft/patch companions.
//! - Provide the priority ranking used by list-view ordering.
//!
//! # Invariants
//! - `updated_at >= created_at` always; `validate()` is the single check.
//! - `created_at` is immutable after creation; patches cannot touch it.
//! - `assigned_to`/`created_by` are soft references: they may point at a
//!   user that no longer exists and reads must tolerate that.

use crate::model::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Urgency bucket for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    /// Sort weight used by view ordering: high=3, medium=2, low=1.
    pub fn rank(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Stable string form matching the persisted wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Stable string form matching the persisted wire value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }
}

/// Parses one task status from its wire string form.
pub fn parse_task_status(value: &str) -> Option<TaskStatus> {
    match value {
        "pending" => Some(TaskStatus::Pending),
        "in-progress" => Some(TaskStatus::InProgress),
        "completed" => Some(TaskStatus::Completed),
        _ => None,
    }
}

/// Canonical work-item record.
///
/// Serialized with camelCase field names so persisted blobs stay readable
/// by the host UI that owned this data first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID used for lookups, updates and deletes.
    pub id: TaskId,
    pub title: String,
    pub description: String,
    /// Deadline; view ordering breaks priority ties on it, earliest first.
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Soft reference to the assignee's `User::id`; the target may have
    /// been removed from the roster.
    pub assigned_to: UserId,
    /// Soft reference to the author's `User::id`.
    pub created_by: UserId,
    /// Stamped once at creation, then immutable.
    pub created_at: DateTime<Utc>,
    /// Refreshed by every mutation; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Task fields minus id and timestamps, as accepted by the add-task command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub assigned_to: UserId,
    pub created_by: UserId,
}

/// Field-by-field merge patch for the update-task command.
///
/// `None` leaves the field untouched; `Some` overrides it. The id and both
/// timestamps are deliberately absent: ids never change, `created_at` is
/// immutable and `updated_at` is stamped by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub assigned_to: Option<UserId>,
    pub created_by: Option<UserId>,
}

impl TaskPatch {
    /// Applies every set field onto `task`, leaving the rest unchanged.
    ///
    /// Timestamp refresh is the caller's job; this only merges fields.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(assigned_to) = self.assigned_to {
            task.assigned_to = assigned_to;
        }
        if let Some(created_by) = self.created_by {
            task.created_by = created_by;
        }
    }
}

/// Validation failure for a task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `updated_at` fell behind `created_at`.
    UpdatedBeforeCreated {
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UpdatedBeforeCreated {
                created_at,
                updated_at,
            } => write!(
                f,
                "task updated_at {updated_at} is earlier than created_at {created_at}"
            ),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Creates a task with a generated stable ID.
    ///
    /// Both timestamps start at `created_at`, so a freshly created task
    /// always satisfies `created_at == updated_at`.
    pub fn new(draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), draft, created_at)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by fixtures where identity or ordering must be reproducible.
    pub fn with_id(id: TaskId, draft: TaskDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            due_date: draft.due_date,
            priority: draft.priority,
            status: draft.status,
            assigned_to: draft.assigned_to,
            created_by: draft.created_by,
            created_at,
            updated_at: created_at,
        }
    }

    /// Checks record-level invariants.
    ///
    /// Stores call this before persisting and after restoring, so invalid
    /// state is rejected instead of silently round-tripped.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.updated_at < self.created_at {
            return Err(TaskValidationError::UpdatedBeforeCreated {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Returns whether the task is past due and still open at `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now && self.status != TaskStatus::Completed
    }
}
