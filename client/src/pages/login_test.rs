use super::*;
use session::{ApiError, ErrorDetail, StorageError};
use std::time::Duration;

#[test]
fn wrong_credentials_use_fixed_message() {
    let error = SessionError::Api(ApiError::Status {
        status: 401,
        detail: ErrorDetail::Message("Incorrect username or password".to_owned()),
    });
    assert_eq!(login_error_message(&error), LOGIN_FAILED_MESSAGE);
}

#[test]
fn connectivity_failures_are_told_apart() {
    let offline = SessionError::Api(ApiError::Network("refused".to_owned()));
    let slow = SessionError::Api(ApiError::Timeout(Duration::from_secs(15)));
    assert_eq!(login_error_message(&offline), CONNECTIVITY_MESSAGE);
    assert_eq!(login_error_message(&slow), CONNECTIVITY_MESSAGE);
}

#[test]
fn storage_failure_reads_as_login_failure() {
    let error = SessionError::Storage(StorageError::Unavailable("no localStorage".to_owned()));
    assert_eq!(login_error_message(&error), LOGIN_FAILED_MESSAGE);
}
