//! Integration tests for the file-backed preference store

use std::fs;

use subfollow::preferences::{
    store_speed, FilePreferences, PreferenceStore, SpeedSource, StoredSpeed, SPEED_KEY,
};
use tempfile::TempDir;

#[test]
fn speed_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("preferences.toml");

    let mut store = FilePreferences::open(&path).unwrap();
    store_speed(&mut store, 1.25, chrono::Duration::days(365)).unwrap();
    assert!(path.exists());

    let reopened = FilePreferences::open(&path).unwrap();
    assert_eq!(reopened.get(SPEED_KEY).as_deref(), Some("1.25"));
}

#[test]
fn expired_entries_are_dropped_on_open() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.toml");
    fs::write(
        &path,
        "[entries.playback_speed]\nvalue = \"2\"\nexpires_at = 1\n",
    )
    .unwrap();

    let store = FilePreferences::open(&path).unwrap();
    assert_eq!(store.get(SPEED_KEY), None);
}

#[test]
fn stored_speed_falls_back_after_removal() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.toml");
    let mut store = FilePreferences::open(&path).unwrap();
    store_speed(&mut store, 3.0, chrono::Duration::days(1)).unwrap();

    let shared = FilePreferences::open(&path).unwrap().shared();
    let speed = StoredSpeed::new(shared.clone(), 1.0);
    assert_eq!(speed.speed_factor(), 3.0);

    assert!(shared.borrow_mut().remove(SPEED_KEY).unwrap());
    assert_eq!(speed.speed_factor(), 1.0);

    // Removal was written through
    let reopened = FilePreferences::open(&path).unwrap();
    assert_eq!(reopened.get(SPEED_KEY), None);
}

#[test]
fn invalid_stored_value_uses_fallback() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.toml");
    let mut store = FilePreferences::open(&path).unwrap();
    store
        .set(SPEED_KEY, "fast", chrono::Duration::days(1))
        .unwrap();

    let speed = StoredSpeed::new(store.shared(), 0.75);
    assert_eq!(speed.speed_factor(), 0.75);
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("preferences.toml");
    fs::write(&path, "entries = [").unwrap();

    let err = FilePreferences::open(&path).unwrap_err();
    assert!(err.to_string().contains("preferences.toml"));
}
