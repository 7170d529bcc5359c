#![cfg(not(feature = "csr"))]

use super::*;

#[test]
fn load_is_empty_off_browser() {
    assert_eq!(LocalStorageTokens.load(), None);
}

#[test]
fn save_reports_unavailable_off_browser() {
    assert!(matches!(LocalStorageTokens.save("tok"), Err(StorageError::Unavailable(_))));
}

#[test]
fn clear_is_a_no_op_off_browser() {
    assert_eq!(LocalStorageTokens.clear(), Ok(()));
}
