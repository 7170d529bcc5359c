use super::*;
use serde_json::json;

// =============================================================================
// ErrorDetail::from_body
// =============================================================================

#[test]
fn string_detail_is_business_message() {
    let detail = ErrorDetail::from_body(&json!({ "detail": "Group name already exists" }));
    assert_eq!(detail, ErrorDetail::Message("Group name already exists".to_owned()));
    assert_eq!(detail.message().as_deref(), Some("Group name already exists"));
}

#[test]
fn list_detail_renders_first_field_error() {
    let detail = ErrorDetail::from_body(&json!({
        "detail": [
            { "loc": ["body", "name"], "msg": "field required", "type": "missing" },
            { "loc": ["body", "description"], "msg": "field required", "type": "missing" }
        ]
    }));
    assert!(matches!(detail, ErrorDetail::Validation(ref errors) if errors.len() == 2));
    assert_eq!(detail.message().as_deref(), Some("Invalid field 'name': field required"));
}

#[test]
fn short_loc_falls_back_to_last_segment() {
    let detail = ErrorDetail::from_body(&json!({ "detail": [{ "loc": ["body"], "msg": "bad body" }] }));
    assert_eq!(detail.message().as_deref(), Some("Invalid field 'body': bad body"));
}

#[test]
fn empty_loc_uses_generic_field_name() {
    let detail = ErrorDetail::from_body(&json!({ "detail": [{ "loc": [], "msg": "nope" }] }));
    assert_eq!(detail.message().as_deref(), Some("Invalid field 'field': nope"));
}

#[test]
fn numeric_loc_segment_is_rendered() {
    let error = FieldError { loc: vec![json!("body"), json!(2)], msg: "x".to_owned() };
    assert_eq!(error.field().as_deref(), Some("2"));
}

#[test]
fn empty_list_detail_is_unknown() {
    let body = json!({ "detail": [] });
    assert_eq!(ErrorDetail::from_body(&body), ErrorDetail::Unknown(body));
}

#[test]
fn body_without_detail_is_unknown() {
    let body = json!({ "error": "boom" });
    let detail = ErrorDetail::from_body(&body);
    assert_eq!(detail, ErrorDetail::Unknown(body));
    assert_eq!(detail.message(), None);
}

#[test]
fn null_body_displays_placeholder() {
    assert_eq!(ErrorDetail::from_body(&serde_json::Value::Null).to_string(), "<empty body>");
}

// =============================================================================
// ApiError::user_message
// =============================================================================

#[test]
fn network_and_timeout_share_connectivity_message() {
    assert_eq!(ApiError::Network("refused".to_owned()).user_message("x"), CONNECTIVITY_MESSAGE);
    assert_eq!(
        ApiError::Timeout(Duration::from_secs(15)).user_message("x"),
        CONNECTIVITY_MESSAGE
    );
}

#[test]
fn status_error_prefers_api_detail() {
    let error = ApiError::Status {
        status: 400,
        detail: ErrorDetail::Message("You are already a member of this group".to_owned()),
    };
    assert_eq!(error.user_message("fallback"), "You are already a member of this group");
    assert_eq!(error.status(), Some(400));
    assert!(!error.is_unauthorized());
}

#[test]
fn unknown_detail_uses_fallback() {
    let error = ApiError::Status { status: 500, detail: ErrorDetail::Unknown(json!("oops")) };
    assert_eq!(error.user_message(UNKNOWN_ERROR_MESSAGE), UNKNOWN_ERROR_MESSAGE);
}

#[test]
fn unauthorized_is_detected() {
    let error = ApiError::Status { status: 401, detail: ErrorDetail::Message("nope".to_owned()) };
    assert!(error.is_unauthorized());
    assert!(!error.is_connectivity());
}

#[test]
fn status_error_display_includes_code_and_detail() {
    let error = ApiError::Status { status: 404, detail: ErrorDetail::Message("Group not found".to_owned()) };
    assert_eq!(error.to_string(), "HTTP 404: Group not found");
}

#[test]
fn session_error_storage_uses_fallback() {
    let error = SessionError::from(StorageError::Unavailable("no window".to_owned()));
    assert_eq!(error.user_message("could not save"), "could not save");
    assert!(error.as_api().is_none());
}
