use std::fs;

use serde_json::{json, Value};
use tasklist_tui::session::{Session, SessionManager, SessionState, TOKEN_KEY, USERNAME_KEY};
use tasklist_tui::storage::{FileStore, KeyValueStore, StorageError};
use tempfile::TempDir;

fn read_json(dir: &TempDir) -> Value {
    let raw = fs::read_to_string(dir.path().join("storage.json")).expect("storage file");
    serde_json::from_str(&raw).expect("storage file is JSON")
}

#[test]
fn missing_file_is_an_empty_store() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = FileStore::open(dir.path().join("storage.json")).expect("open");
    assert_eq!(store.get(TOKEN_KEY), None);
    assert!(!dir.path().join("storage.json").exists());
}

#[test]
fn entries_survive_reopening() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("nested").join("storage.json");

    let mut store = FileStore::open(&path).expect("open");
    store.set(TOKEN_KEY, "abc123").expect("set token");
    store.set(USERNAME_KEY, "al").expect("set username");

    let reopened = FileStore::open(&path).expect("reopen");
    assert_eq!(reopened.get(TOKEN_KEY).as_deref(), Some("abc123"));
    assert_eq!(reopened.get(USERNAME_KEY).as_deref(), Some("al"));
}

#[test]
fn corrupt_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("storage.json");
    fs::write(&path, "[1, 2, 3]").expect("write");

    let err = FileStore::open(&path).err().expect("array is not a store");
    assert!(matches!(err, StorageError::Parse { .. }));
}

#[test]
fn session_is_restored_after_restart() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("storage.json");
    fs::write(&path, json!({"token": "abc123", "username": "al"}).to_string())
        .expect("write");

    let manager = SessionManager::new(FileStore::open(&path).expect("open"));

    assert_eq!(
        manager.state(),
        SessionState::Authenticated(Session {
            token: "abc123".into(),
            username: "al".into(),
        })
    );
}

#[test]
fn logout_removes_both_entries_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("storage.json");
    fs::write(
        &path,
        json!({"token": "abc123", "username": "al", "theme": "dark"}).to_string(),
    )
    .expect("write");

    let mut manager = SessionManager::new(FileStore::open(&path).expect("open"));
    manager.logout();

    assert_eq!(read_json(&dir), json!({"theme": "dark"}));
    let reopened = SessionManager::new(FileStore::open(&path).expect("reopen"));
    assert!(!reopened.is_authenticated());
}

#[test]
fn half_session_on_disk_is_cleared() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let path = dir.path().join("storage.json");
    fs::write(&path, json!({"username": "al"}).to_string()).expect("write");

    let manager = SessionManager::new(FileStore::open(&path).expect("open"));

    assert!(!manager.is_authenticated());
    assert_eq!(read_json(&dir), json!({}));
}
