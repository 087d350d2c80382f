//! Core state logic for TaskDeck.
//! This crate is the single source of truth for session, roster and task
//! invariants; rendering and routing live with the embedding host.

pub mod blob;
pub mod logging;
pub mod model;
pub mod store;
pub mod view;

pub use blob::{BlobError, BlobResult, BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    parse_task_status, Task, TaskDraft, TaskId, TaskPatch, TaskPriority, TaskStatus,
    TaskValidationError,
};
pub use model::user::{User, UserDraft, UserId, UserRole};
pub use store::{
    SessionStore, StoreError, StoreResult, TaskStore, CURRENT_USER_KEY, TASKS_KEY, USERS_KEY,
};
pub use store::session_store::{BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_ID, UNKNOWN_USER};
pub use view::{
    dashboard_stats, derive_view, parse_status_filter, parse_task_view, recent_tasks,
    DashboardStats, StatusFilter, TaskView, ViewQuery,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
