//! Session and user-roster store.
//!
//! # Responsibility
//! - Keep the user roster and the current session user in memory.
//! - Persist both under the `users` and `currentUser` blob keys on every
//!   mutation.
//! - Seed the bootstrap administrator into an empty installation.
//!
//! # Invariants
//! - The roster preserves insertion order.
//! - The session never changes unless `login`, `register` or `logout`
//!   succeeds end to end.
//! - Credentials are accepted but never verified, stored or logged; the
//!   password is a placeholder for an external credential service.

use crate::blob::BlobStore;
use crate::model::user::{User, UserDraft, UserId, UserRole};
use crate::store::{
    read_json, remove_key, write_json, StoreResult, CURRENT_USER_KEY, USERS_KEY,
};
use log::{debug, info, warn};
use uuid::Uuid;

/// Fixed id of the seeded administrator.
///
/// A constant id keeps a freshly seeded roster reproducible across runs
/// and fixtures.
pub const BOOTSTRAP_ADMIN_ID: UserId = Uuid::from_u128(0x0000_0000_0000_4000_8000_0000_0000_0001);

/// Email of the seeded administrator.
pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@taskmanager.com";

/// Display name returned for user ids no roster entry resolves.
pub const UNKNOWN_USER: &str = "Unknown User";

fn bootstrap_admin() -> User {
    User::with_id(
        BOOTSTRAP_ADMIN_ID,
        UserDraft {
            email: BOOTSTRAP_ADMIN_EMAIL.to_string(),
            name: "Admin User".to_string(),
            role: UserRole::Admin,
        },
    )
}

/// Roster and session state mirrored into a blob store.
pub struct SessionStore<'b> {
    blob: &'b dyn BlobStore,
    roster: Vec<User>,
    current_user: Option<User>,
}

impl<'b> SessionStore<'b> {
    /// Restores roster and session from the blob store.
    ///
    /// # Contract
    /// - When no roster was ever persisted, seeds exactly one
    ///   administrator (`BOOTSTRAP_ADMIN_ID`) and persists the roster.
    /// - An existing roster, including an empty one, is restored as-is.
    /// - A persisted session survives re-open until explicit `logout`.
    pub fn open(blob: &'b dyn BlobStore) -> StoreResult<Self> {
        let roster = match read_json::<Vec<User>>(blob, USERS_KEY)? {
            Some(users) => users,
            None => {
                let seeded = vec![bootstrap_admin()];
                write_json(blob, USERS_KEY, &seeded)?;
                info!("event=session_open module=store status=seeded roster_len=1");
                seeded
            }
        };
        let current_user = read_json::<User>(blob, CURRENT_USER_KEY)?;
        info!(
            "event=session_open module=store status=ok roster_len={} has_session={}",
            roster.len(),
            current_user.is_some()
        );
        Ok(Self {
            blob,
            roster,
            current_user,
        })
    }

    /// Attempts to start a session for the given email.
    ///
    /// # Contract
    /// - The first roster entry with an exactly equal email wins.
    /// - The password is accepted but not verified.
    /// - On a match the session is persisted and `true` is returned;
    ///   otherwise no state changes and `false` is returned.
    pub fn login(&mut self, email: &str, _password: &str) -> StoreResult<bool> {
        let Some(user) = self.roster.iter().find(|user| user.email == email) else {
            info!("event=login module=store status=rejected");
            return Ok(false);
        };
        let user = user.clone();
        write_json(self.blob, CURRENT_USER_KEY, &user)?;
        info!(
            "event=login module=store status=ok user_id={} role={}",
            user.id,
            user.role.as_str()
        );
        self.current_user = Some(user);
        Ok(true)
    }

    /// Registers a new account and starts its session.
    ///
    /// # Contract
    /// - Rejected with `Ok(false)` when any roster entry already holds
    ///   the email; nothing changes.
    /// - Otherwise appends a fresh `UserRole::User` entry, persists the
    ///   roster, then persists and adopts the session.
    pub fn register(&mut self, email: &str, _password: &str, name: &str) -> StoreResult<bool> {
        if self.roster.iter().any(|user| user.email == email) {
            info!("event=register module=store status=rejected reason=email_taken");
            return Ok(false);
        }
        let user = User::new(UserDraft {
            email: email.to_string(),
            name: name.to_string(),
            role: UserRole::User,
        });

        let mut next_roster = self.roster.clone();
        next_roster.push(user.clone());
        write_json(self.blob, USERS_KEY, &next_roster)?;
        self.roster = next_roster;

        write_json(self.blob, CURRENT_USER_KEY, &user)?;
        info!(
            "event=register module=store status=ok user_id={} roster_len={}",
            user.id,
            self.roster.len()
        );
        self.current_user = Some(user);
        Ok(true)
    }

    /// Ends the session; the roster is untouched.
    pub fn logout(&mut self) -> StoreResult<()> {
        remove_key(self.blob, CURRENT_USER_KEY)?;
        self.current_user = None;
        info!("event=logout module=store status=ok");
        Ok(())
    }

    /// Appends a user from the given draft and returns its generated id.
    ///
    /// Duplicate emails are tolerated; `login` resolves them to the first
    /// match. A duplicate is still worth flagging in the log.
    pub fn add_user(&mut self, draft: UserDraft) -> StoreResult<UserId> {
        if self.roster.iter().any(|user| user.email == draft.email) {
            warn!("event=add_user module=store status=duplicate_email");
        }
        let user = User::new(draft);
        let id = user.id;

        let mut next_roster = self.roster.clone();
        next_roster.push(user);
        write_json(self.blob, USERS_KEY, &next_roster)?;
        self.roster = next_roster;
        info!(
            "event=add_user module=store status=ok user_id={} roster_len={}",
            id,
            self.roster.len()
        );
        Ok(id)
    }

    /// Removes a user by id; a no-op when absent.
    ///
    /// Tasks referencing the user are never touched; readers resolve the
    /// dangling id through [`SessionStore::display_name`].
    pub fn remove_user(&mut self, id: UserId) -> StoreResult<()> {
        let Some(index) = self.roster.iter().position(|user| user.id == id) else {
            debug!("event=remove_user module=store status=noop user_id={id}");
            return Ok(());
        };

        let mut next_roster = self.roster.clone();
        next_roster.remove(index);
        write_json(self.blob, USERS_KEY, &next_roster)?;
        self.roster = next_roster;
        info!(
            "event=remove_user module=store status=ok user_id={} roster_len={}",
            id,
            self.roster.len()
        );
        Ok(())
    }

    /// Current session user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// Roster in insertion order.
    pub fn users(&self) -> &[User] {
        &self.roster
    }

    /// Looks up one roster entry by id.
    pub fn user_by_id(&self, id: UserId) -> Option<&User> {
        self.roster.iter().find(|user| user.id == id)
    }

    /// Resolves an id to a display name, falling back to the
    /// `Unknown User` sentinel for dangling references.
    pub fn display_name(&self, id: UserId) -> String {
        self.user_by_id(id)
            .map(|user| user.name.clone())
            .unwrap_or_else(|| UNKNOWN_USER.to_string())
    }
}
