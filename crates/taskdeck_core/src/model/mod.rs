//! Domain records for the task-management core.
//!
//! # Responsibility
//! - Define the canonical `User` and `Task` shapes shared by stores and views.
//! - Own the serialized wire format of the persisted blobs.
//!
//! # Invariants
//! - Every record is identified by a stable uuid, generated once at creation.
//! - Serialized field and enum spellings are fixed; changing them breaks
//!   previously persisted blobs.

pub mod task;
pub mod user;
