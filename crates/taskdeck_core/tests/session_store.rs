use taskdeck_core::{
    BlobStore, MemoryBlobStore, SessionStore, SqliteBlobStore, UserDraft, UserRole,
    BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_ID, CURRENT_USER_KEY, UNKNOWN_USER,
};
use uuid::Uuid;

#[test]
fn open_on_empty_blob_seeds_bootstrap_admin() {
    let blob = MemoryBlobStore::new();
    let store = SessionStore::open(&blob).unwrap();

    assert_eq!(store.users().len(), 1);
    let admin = &store.users()[0];
    assert_eq!(admin.id, BOOTSTRAP_ADMIN_ID);
    assert_eq!(admin.email, BOOTSTRAP_ADMIN_EMAIL);
    assert_eq!(admin.name, "Admin User");
    assert_eq!(admin.role, UserRole::Admin);
    assert!(store.current_user().is_none());

    // The seeded roster is persisted immediately, not lazily.
    assert!(blob.get("users").unwrap().is_some());
}

#[test]
fn bootstrap_admin_login_succeeds_with_any_password() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();

    assert!(store.login(BOOTSTRAP_ADMIN_EMAIL, "anything at all").unwrap());

    let user = store.current_user().unwrap();
    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(user.id, BOOTSTRAP_ADMIN_ID);
}

#[test]
fn login_with_unknown_email_returns_false_and_keeps_state() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();

    assert!(!store.login("nobody@example.com", "pw").unwrap());
    assert!(store.current_user().is_none());
    assert!(blob.get(CURRENT_USER_KEY).unwrap().is_none());
}

#[test]
fn login_resolves_duplicate_emails_to_first_roster_match() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();

    store
        .add_user(draft("shared@example.com", "First Holder"))
        .unwrap();
    store
        .add_user(draft("shared@example.com", "Second Holder"))
        .unwrap();

    assert!(store.login("shared@example.com", "pw").unwrap());
    assert_eq!(store.current_user().unwrap().name, "First Holder");
}

#[test]
fn register_new_email_appends_user_and_starts_session() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();

    assert!(store.register("kim@example.com", "pw", "Kim").unwrap());

    assert_eq!(store.users().len(), 2);
    let user = store.current_user().unwrap();
    assert_eq!(user.email, "kim@example.com");
    assert_eq!(user.name, "Kim");
    assert_eq!(user.role, UserRole::User);
}

#[test]
fn register_duplicate_email_returns_false_and_grows_roster_once() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();

    assert!(store.register("kim@example.com", "pw", "Kim").unwrap());
    let first_session = store.current_user().unwrap().clone();

    assert!(!store.register("kim@example.com", "other", "Kim Again").unwrap());

    assert_eq!(store.users().len(), 2);
    assert_eq!(store.current_user(), Some(&first_session));
}

#[test]
fn register_with_bootstrap_admin_email_is_rejected() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();

    assert!(!store.register(BOOTSTRAP_ADMIN_EMAIL, "pw", "Impostor").unwrap());
    assert_eq!(store.users().len(), 1);
}

#[test]
fn logout_clears_session_but_not_roster() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();
    store.login(BOOTSTRAP_ADMIN_EMAIL, "pw").unwrap();

    store.logout().unwrap();

    assert!(store.current_user().is_none());
    assert!(blob.get(CURRENT_USER_KEY).unwrap().is_none());
    assert_eq!(store.users().len(), 1);
}

#[test]
fn session_survives_store_reopen_until_logout() {
    let blob = MemoryBlobStore::new();
    {
        let mut store = SessionStore::open(&blob).unwrap();
        store.login(BOOTSTRAP_ADMIN_EMAIL, "pw").unwrap();
    }

    let reopened = SessionStore::open(&blob).unwrap();
    assert_eq!(reopened.current_user().unwrap().id, BOOTSTRAP_ADMIN_ID);
}

#[test]
fn reopen_restores_roster_without_reseeding() {
    let blob = MemoryBlobStore::new();
    {
        let mut store = SessionStore::open(&blob).unwrap();
        store.register("kim@example.com", "pw", "Kim").unwrap();
    }

    let reopened = SessionStore::open(&blob).unwrap();
    assert_eq!(reopened.users().len(), 2);
    let admins = reopened
        .users()
        .iter()
        .filter(|user| user.id == BOOTSTRAP_ADMIN_ID)
        .count();
    assert_eq!(admins, 1);
}

#[test]
fn add_user_returns_id_and_persists_entry() {
    let blob = MemoryBlobStore::new();
    let id = {
        let mut store = SessionStore::open(&blob).unwrap();
        store.add_user(draft("lee@example.com", "Lee")).unwrap()
    };

    let reopened = SessionStore::open(&blob).unwrap();
    let user = reopened.user_by_id(id).unwrap();
    assert_eq!(user.email, "lee@example.com");
    assert_eq!(user.name, "Lee");
}

#[test]
fn add_user_tolerates_duplicate_emails() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();

    let first = store.add_user(draft("dup@example.com", "One")).unwrap();
    let second = store.add_user(draft("dup@example.com", "Two")).unwrap();

    assert_ne!(first, second);
    assert_eq!(store.users().len(), 3);
}

#[test]
fn remove_user_deletes_entry_and_absent_id_is_noop() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();
    let id = store.add_user(draft("gone@example.com", "Gone")).unwrap();

    store.remove_user(id).unwrap();
    assert!(store.user_by_id(id).is_none());

    let before = store.users().to_vec();
    store.remove_user(Uuid::from_u128(0xdead)).unwrap();
    assert_eq!(store.users(), before.as_slice());
}

#[test]
fn removing_the_session_user_leaves_session_dangling() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();
    let id = store.add_user(draft("temp@example.com", "Temp")).unwrap();
    store.login("temp@example.com", "pw").unwrap();

    store.remove_user(id).unwrap();

    // Tasks and sessions keep their soft reference; readers resolve it
    // through display_name.
    assert_eq!(store.current_user().unwrap().id, id);
    assert_eq!(store.display_name(id), UNKNOWN_USER);
}

#[test]
fn display_name_resolves_roster_entries_and_falls_back() {
    let blob = MemoryBlobStore::new();
    let store = SessionStore::open(&blob).unwrap();

    assert_eq!(store.display_name(BOOTSTRAP_ADMIN_ID), "Admin User");
    assert_eq!(store.display_name(Uuid::from_u128(0xbeef)), UNKNOWN_USER);
}

#[test]
fn persisted_session_blob_keeps_original_wire_shape() {
    let blob = MemoryBlobStore::new();
    let mut store = SessionStore::open(&blob).unwrap();
    store.login(BOOTSTRAP_ADMIN_EMAIL, "pw").unwrap();

    let raw = blob.get(CURRENT_USER_KEY).unwrap().unwrap();
    assert!(raw.contains("\"email\":\"admin@taskmanager.com\""));
    assert!(raw.contains("\"role\":\"admin\""));
}

#[test]
fn session_store_runs_on_sqlite_blobs() {
    let blob = SqliteBlobStore::open_in_memory().unwrap();
    {
        let mut store = SessionStore::open(&blob).unwrap();
        store.register("kim@example.com", "pw", "Kim").unwrap();
    }

    let reopened = SessionStore::open(&blob).unwrap();
    assert_eq!(reopened.users().len(), 2);
    assert_eq!(reopened.current_user().unwrap().email, "kim@example.com");
}

fn draft(email: &str, name: &str) -> UserDraft {
    UserDraft {
        email: email.to_string(),
        name: name.to_string(),
        role: UserRole::User,
    }
}
