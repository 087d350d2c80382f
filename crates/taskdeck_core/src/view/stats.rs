//! Dashboard statistics and the recently-updated shortlist.
//!
//! # Responsibility
//! - Count the task sequence into the dashboard's summary figures.
//! - Select the most recently updated tasks for the dashboard shortlist.
//!
//! # Invariants
//! - Overdue means due strictly before `now` and not completed.
//! - The completion rate is a rounded whole percentage, zero for an
//!   empty sequence.

use crate::model::task::{Task, TaskPriority, TaskStatus};
use crate::model::user::User;
use chrono::{DateTime, Utc};

/// Summary figures shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub pending: usize,
    pub high_priority: usize,
    /// Tasks due before `now` that are not completed.
    pub overdue: usize,
    /// Tasks assigned to the current user; zero without a session.
    pub assigned_to_me: usize,
    /// `completed / total` as a rounded whole percentage.
    pub completion_rate_percent: u8,
}

/// Computes dashboard statistics over the full task sequence.
///
/// `now` is passed in rather than read from the clock so callers and
/// tests evaluate overdue against one fixed instant.
pub fn dashboard_stats(
    tasks: &[Task],
    current_user: Option<&User>,
    now: DateTime<Utc>,
) -> DashboardStats {
    let mut stats = DashboardStats {
        total: tasks.len(),
        ..DashboardStats::default()
    };

    for task in tasks {
        match task.status {
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Pending => stats.pending += 1,
        }
        if task.priority == TaskPriority::High {
            stats.high_priority += 1;
        }
        if task.is_overdue(now) {
            stats.overdue += 1;
        }
        if let Some(user) = current_user {
            if task.assigned_to == user.id {
                stats.assigned_to_me += 1;
            }
        }
    }

    if stats.total > 0 {
        stats.completion_rate_percent =
            ((stats.completed as f64 / stats.total as f64) * 100.0).round() as u8;
    }
    stats
}

/// Most recently updated tasks, newest first, truncated to `limit`.
///
/// Sorts a copy; the input sequence keeps its insertion order. Ties on
/// `updated_at` preserve input order.
pub fn recent_tasks(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut ordered = tasks.to_vec();
    ordered.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    ordered.truncate(limit);
    ordered
}
