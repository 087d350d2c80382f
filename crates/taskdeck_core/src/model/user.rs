//! User identity record.
//!
//! # Responsibility
//! - Define the roster entry shape shared by session handling and task views.
//!
//! # Invariants
//! - `id` is stable and never reused for another user.
//! - Email uniqueness is a store-level concern; the record itself does not
//!   enforce it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a roster entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type UserId = Uuid;

/// Authorization role attached to a user.
///
/// Admins see every task in the default list view and may manage the
/// roster; regular users only see their own assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    /// Lowercase spelling used on the wire and in log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

/// Roster entry for one account.
///
/// Records are replace-on-add: a user is never mutated in place, only
/// appended to or removed from the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable global ID referenced by `Task::assigned_to`/`created_by`.
    pub id: UserId,
    /// Login email, matched exactly (case-sensitive) as stored.
    pub email: String,
    /// Display name shown by the presentation layer.
    pub name: String,
    pub role: UserRole,
}

/// User fields minus the generated id, as accepted by registration and
/// admin-driven add-user commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl User {
    /// Creates a user with a freshly generated stable ID.
    pub fn new(draft: UserDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Creates a user with a caller-provided stable ID.
    ///
    /// Used by the roster bootstrap path and by fixtures where identity
    /// must be reproducible.
    pub fn with_id(id: UserId, draft: UserDraft) -> Self {
        Self {
            id,
            email: draft.email,
            name: draft.name,
            role: draft.role,
        }
    }

    /// Returns whether this user holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
