//! Small presentation helpers for post and profile rendering.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Date part of an ISO 8601 timestamp, e.g. `2024-05-01`.
pub fn short_date(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

/// Uppercase first letter of a username, for the member avatar.
pub fn initial(username: &str) -> String {
    username.chars().next().map(|c| c.to_uppercase().collect()).unwrap_or_else(|| "?".to_owned())
}

/// Parse an optional numeric id from a route or query parameter.
pub fn parse_id(raw: Option<String>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse().ok())
}

/// `"1 comment"` / `"3 comments"`.
pub fn count_label(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 { format!("1 {singular}") } else { format!("{count} {plural}") }
}
