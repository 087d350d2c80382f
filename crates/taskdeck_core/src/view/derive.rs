//! List-view filter and ordering pipeline.
//!
//! # Responsibility
//! - Scope tasks to the selected view and the current user's visibility.
//! - Apply free-text and status filters.
//! - Order the result by priority rank, then due date.
//!
//! # Invariants
//! - The pipeline runs in a fixed order: view scope, search, status
//!   filter, sort. Filters never reorder; the sort is stable.
//! - Without a current user the default view matches nothing.

use crate::model::task::{parse_task_status, Task, TaskPriority, TaskStatus};
use crate::model::user::User;

/// Task list views selectable in the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskView {
    /// All tasks for admins, own assignments for everyone else.
    #[default]
    Tasks,
    HighPriority,
    InProgress,
    Completed,
}

impl TaskView {
    /// Stable string form used by navigation state.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::HighPriority => "high-priority",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    /// Human-readable heading for the view.
    pub fn title(self) -> &'static str {
        match self {
            Self::Tasks => "All Tasks",
            Self::HighPriority => "High Priority Tasks",
            Self::InProgress => "Tasks In Progress",
            Self::Completed => "Completed Tasks",
        }
    }
}

/// Parses one task view from its string form.
pub fn parse_task_view(value: &str) -> Option<TaskView> {
    match value {
        "tasks" => Some(TaskView::Tasks),
        "high-priority" => Some(TaskView::HighPriority),
        "in-progress" => Some(TaskView::InProgress),
        "completed" => Some(TaskView::Completed),
        _ => None,
    }
}

/// Status filter applied after the view scope and search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(TaskStatus),
}

impl StatusFilter {
    /// Returns whether a task with the given status passes the filter.
    pub fn matches(self, status: TaskStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => status == wanted,
        }
    }

    /// Stable string form: `all` or the status wire string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }
}

/// Parses one status filter from its string form.
pub fn parse_status_filter(value: &str) -> Option<StatusFilter> {
    if value == "all" {
        return Some(StatusFilter::All);
    }
    parse_task_status(value).map(StatusFilter::Only)
}

/// Query state of one task list view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewQuery {
    pub view: TaskView,
    /// Case-insensitive substring matched against title and description;
    /// empty means no free-text filtering.
    pub search: String,
    pub status: StatusFilter,
}

/// Derives the ordered task list for one view query.
///
/// # Contract
/// - Deterministic and side-effect free; `tasks` is never reordered.
/// - Pipeline order: view scope, free-text filter, status filter, then a
///   stable sort by priority rank descending and due date ascending.
pub fn derive_view(tasks: &[Task], current_user: Option<&User>, query: &ViewQuery) -> Vec<Task> {
    let mut view: Vec<Task> = tasks
        .iter()
        .filter(|task| in_view_scope(task, query.view, current_user))
        .filter(|task| matches_search(task, &query.search))
        .filter(|task| query.status.matches(task.status))
        .cloned()
        .collect();

    view.sort_by(|a, b| {
        b.priority
            .rank()
            .cmp(&a.priority.rank())
            .then_with(|| a.due_date.cmp(&b.due_date))
    });
    view
}

fn in_view_scope(task: &Task, view: TaskView, current_user: Option<&User>) -> bool {
    match view {
        TaskView::HighPriority => task.priority == TaskPriority::High,
        TaskView::InProgress => task.status == TaskStatus::InProgress,
        TaskView::Completed => task.status == TaskStatus::Completed,
        TaskView::Tasks => match current_user {
            Some(user) if user.is_admin() => true,
            Some(user) => task.assigned_to == user.id,
            None => false,
        },
    }
}

fn matches_search(task: &Task, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    task.title.to_lowercase().contains(&needle)
        || task.description.to_lowercase().contains(&needle)
}
