use super::*;

// =============================================================================
// FileTokenStore
// =============================================================================

#[test]
fn file_store_missing_file_loads_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn file_store_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("nested/deeper/token.json"));
    store.save("abc123").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
    assert!(!store.temp_path().exists(), "temp file should be renamed away");
}

#[test]
fn file_store_save_overwrites_previous_token() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));
    store.save("first").unwrap();
    store.save("second").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("second"));
}

#[test]
fn file_store_remove_deletes_and_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));
    store.save("abc").unwrap();
    store.remove().unwrap();
    assert!(!store.path().exists());
    store.remove().unwrap();
    assert_eq!(store.load().unwrap(), None);
}

#[test]
fn file_store_corrupt_contents_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(&path, "not json").unwrap();
    let store = FileTokenStore::new(path);
    assert!(matches!(store.load(), Err(StoreError::Json(_))));
}

#[test]
fn file_store_empty_file_loads_none() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token.json");
    std::fs::write(&path, "").unwrap();
    assert_eq!(FileTokenStore::new(path).load().unwrap(), None);
}

#[cfg(unix)]
#[test]
fn file_store_writes_owner_only_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("token.json"));
    store.save("secret").unwrap();
    let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

// =============================================================================
// MemoryTokenStore
// =============================================================================

#[test]
fn memory_store_round_trip_and_remove() {
    let store = MemoryTokenStore::new();
    assert_eq!(store.load().unwrap(), None);
    store.save("tok").unwrap();
    assert_eq!(store.load().unwrap().as_deref(), Some("tok"));
    store.remove().unwrap();
    assert_eq!(store.load().unwrap(), None);
}
