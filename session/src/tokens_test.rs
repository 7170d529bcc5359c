use super::*;

#[test]
fn memory_store_starts_empty_and_round_trips() {
    let store = MemoryTokenStore::new();
    assert_eq!(store.load(), None);

    store.save("abc").expect("save");
    assert_eq!(store.load().as_deref(), Some("abc"));

    store.clear().expect("clear");
    assert_eq!(store.load(), None);
}

#[test]
fn clones_share_one_slot() {
    let store = MemoryTokenStore::with_token("first");
    let other = store.clone();

    other.save("second").expect("save");

    assert_eq!(store.load().as_deref(), Some("second"));
}

#[test]
fn clearing_absent_token_succeeds() {
    assert!(MemoryTokenStore::new().clear().is_ok());
}
