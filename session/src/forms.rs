//! Client-side form checks and the fixed user-facing messages.
//!
//! These only catch empty input before a round trip; the API remains the
//! authority on everything else and its `detail` is shown as-is.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use crate::types::{Credentials, NewComment, NewGroup, NewPost, PostUpdate, Registration};

/// Shown for any failed login, whatever the API said.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Check your username and password.";
/// Shown after registration succeeds and the form switches to login.
pub const REGISTERED_MESSAGE: &str = "Account created. You can sign in now.";
/// Fallback when registration fails without a usable detail.
pub const REGISTER_FAILED_MESSAGE: &str = "Could not create the account.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("choose a forum to post in")]
    NoForum,
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() { Err(FormError::Missing(field)) } else { Ok(value.to_owned()) }
}

/// Passwords are sent untrimmed but may not be blank.
fn password(value: &str) -> Result<String, FormError> {
    if value.trim().is_empty() { Err(FormError::Missing("password")) } else { Ok(value.to_owned()) }
}

/// # Errors
///
/// [`FormError::Missing`] for a blank username or password.
pub fn validate_login(username: &str, pass: &str) -> Result<Credentials, FormError> {
    Ok(Credentials::new(required(username, "username")?, password(pass)?))
}

/// # Errors
///
/// [`FormError::Missing`] for blank fields, [`FormError::InvalidEmail`] when
/// the address has no `@`.
pub fn validate_registration(username: &str, email: &str, pass: &str) -> Result<Registration, FormError> {
    let username = required(username, "username")?;
    let email = required(email, "email")?;
    if !email.contains('@') {
        return Err(FormError::InvalidEmail);
    }
    Ok(Registration { username, email, password: password(pass)? })
}

/// # Errors
///
/// [`FormError::Missing`] for a blank name.
pub fn validate_group(name: &str, description: &str) -> Result<NewGroup, FormError> {
    Ok(NewGroup { name: required(name, "name")?, description: description.trim().to_owned() })
}

/// # Errors
///
/// [`FormError::Missing`] for a blank title or text, [`FormError::NoForum`]
/// when no target forum was chosen.
pub fn validate_post(title: &str, text: &str, group_id: Option<i64>) -> Result<NewPost, FormError> {
    let title = required(title, "title")?;
    let text = required(text, "text")?;
    let group_id = group_id.ok_or(FormError::NoForum)?;
    Ok(NewPost { title, text, group_id })
}

/// # Errors
///
/// [`FormError::Missing`] for a blank title or text.
pub fn validate_post_update(title: &str, text: &str) -> Result<PostUpdate, FormError> {
    Ok(PostUpdate { title: Some(required(title, "title")?), text: Some(required(text, "text")?) })
}

/// # Errors
///
/// [`FormError::Missing`] for a blank comment.
pub fn validate_comment(text: &str) -> Result<NewComment, FormError> {
    required(text, "comment").map(NewComment::new)
}
