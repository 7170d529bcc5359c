#![cfg(not(feature = "csr"))]

use super::*;
use crate::net::api::new_session;

#[test]
fn new_context_mirrors_initial_session() {
    let auth = AuthContext::new(new_session());
    assert_eq!(auth.state.get_untracked(), Session::initial());
    assert_eq!(auth.decision(), GuardDecision::Pending);
}

#[test]
fn logout_lands_on_home_and_signs_out() {
    let auth = AuthContext::new(new_session());

    assert_eq!(auth.logout(), "/");
    assert!(auth.user().is_none());
}

#[test]
fn copies_share_one_store() {
    let auth = AuthContext::new(new_session());
    let copy = auth;
    copy.state.set(Session { user: None, loading: false });
    assert!(!auth.state.get_untracked().loading);
}

#[test]
fn retained_refresh_produces_notice() {
    let outcome = RefreshOutcome::Retained(session::ApiError::Network("refused".to_owned()));

    let notice = refresh_notice(&outcome).expect("notice");

    assert!(notice.ends_with(session::CONNECTIVITY_MESSAGE));
}

#[test]
fn replaced_or_skipped_refresh_is_silent() {
    assert_eq!(refresh_notice(&RefreshOutcome::Skipped), None);
}
