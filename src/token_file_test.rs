use super::*;

fn store_in(dir: &tempfile::TempDir) -> FileTokenStore {
    FileTokenStore::new(dir.path().join("nested").join("token"))
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert_eq!(store_in(&dir).load(), None);
}

#[test]
fn save_creates_parent_dirs_and_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    store.save("tok-1").expect("save");

    assert_eq!(store.load().as_deref(), Some("tok-1"));
    assert!(store.path().exists());
}

#[test]
fn save_replaces_previous_token() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);

    store.save("a-much-longer-token").expect("first");
    store.save("short").expect("second");

    assert_eq!(store.load().as_deref(), Some("short"));
}

#[test]
fn whitespace_only_file_is_signed_out() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    store.save("  \n").expect("save");

    assert_eq!(store.load(), None);
}

#[test]
fn clear_removes_file_and_tolerates_absence() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    store.save("tok").expect("save");

    store.clear().expect("clear");
    store.clear().expect("clear again");

    assert_eq!(store.load(), None);
    assert!(!store.path().exists());
}

#[cfg(unix)]
#[test]
fn token_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().expect("tempdir");
    let store = store_in(&dir);
    store.save("tok").expect("save");

    let mode = std::fs::metadata(store.path()).expect("metadata").permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
