//! Pure view derivations over the task sequence.
//!
//! # Responsibility
//! - Turn the raw task sequence into the filtered, ordered list a task
//!   view renders.
//! - Compute dashboard statistics and the recently-updated shortlist.
//!
//! # Invariants
//! - Everything in this module is deterministic and side-effect free;
//!   inputs are borrowed, outputs are fresh values.
//! - Ordering is stable: ties preserve input order.

pub mod derive;
pub mod stats;

pub use derive::{
    derive_view, parse_status_filter, parse_task_view, StatusFilter, TaskView, ViewQuery,
};
pub use stats::{dashboard_stats, recent_tasks, DashboardStats};
