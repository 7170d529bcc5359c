//! Text rendering for command output.
//!
//! Every command produces an [`Output`]: a human-readable block plus the JSON
//! it was rendered from, so `--json` prints exactly what the API returned.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::{Value, json};
use session::types::{Group, GroupDetails, Post, UserProfile};
use session::{FeedSection, Membership, ReceivedComment};

use crate::error::CliError;

#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub text: String,
    pub json: Value,
}

impl Output {
    pub fn new(text: String, json: Value) -> Self {
        Self { text, json }
    }

    /// A one-line acknowledgement.
    pub fn message(text: impl Into<String>) -> Self {
        let text = text.into();
        let json = json!({ "message": text });
        Self { text, json }
    }

    /// Text rendered from a serializable value.
    ///
    /// # Errors
    ///
    /// [`CliError::Json`] if `value` does not serialize.
    pub fn from_value<T: Serialize>(text: String, value: &T) -> Result<Self, CliError> {
        Ok(Self { text, json: serde_json::to_value(value)? })
    }

    /// Write to stdout in the selected format.
    ///
    /// # Errors
    ///
    /// [`CliError::Json`] if pretty-printing fails.
    pub fn print(&self, as_json: bool) -> Result<(), CliError> {
        if as_json {
            println!("{}", serde_json::to_string_pretty(&self.json)?);
        } else {
            println!("{}", self.text.trim_end());
        }
        Ok(())
    }
}

/// Date part of an ISO 8601 timestamp.
pub fn short_date(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

pub fn groups(groups: &[Group]) -> String {
    if groups.is_empty() {
        return "No forums yet.\n".to_owned();
    }
    let mut out = String::new();
    for group in groups {
        let _ = write!(out, "#{:<4} {}", group.id, group.name);
        if let Some(creator) = &group.creator {
            let _ = write!(out, "  (by {})", creator.username);
        }
        out.push('\n');
        if let Some(description) = group.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "      {description}");
        }
    }
    out
}

pub fn group_details(details: &GroupDetails, membership: Membership) -> String {
    let group = &details.group;
    let mut out = format!("{} (#{})\n", group.name, group.id);
    if let Some(description) = group.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "{description}");
    }
    let creator_id = group.creator.as_ref().map(|creator| creator.id);
    let _ = writeln!(out, "\nMembers ({}):", details.members.len());
    for member in &details.members {
        let badge = if Some(member.id) == creator_id { " (creator)" } else { "" };
        let _ = writeln!(out, "  {}{badge}", member.username);
    }

    let mut actions = Vec::new();
    if !membership.signed_in {
        actions.push("sign in to join".to_owned());
    }
    if membership.can_join() {
        actions.push(format!("mural groups join {}", group.id));
    }
    if membership.can_post() {
        actions.push(format!("mural posts create --group {}", group.id));
    }
    if membership.can_leave() {
        actions.push(format!("mural groups leave {}", group.id));
    }
    if membership.can_delete() {
        actions.push(format!("mural groups delete {} --yes", group.id));
    }
    let _ = writeln!(out, "\nActions: {}", actions.join(" | "));
    out
}

pub fn post(post: &Post, viewer_id: Option<i64>) -> String {
    let mut out = String::new();
    let owned = viewer_id.is_some_and(|id| post.is_owned_by(id));
    let _ = writeln!(
        out,
        "[#{}] {}{}",
        post.id,
        post.title,
        if owned { "  (yours)" } else { "" }
    );
    let _ = writeln!(out, "  by {} on {}", post.author.username, short_date(&post.date));
    for line in post.text.lines() {
        let _ = writeln!(out, "  {line}");
    }
    if !post.comments.is_empty() {
        let _ = writeln!(out, "  Comments ({}):", post.comments.len());
        for comment in &post.comments {
            let mine = viewer_id.is_some_and(|id| comment.is_owned_by(id));
            let _ = writeln!(
                out,
                "    [#{}] {}: {}{}",
                comment.id,
                comment.commenter.username,
                comment.text,
                if mine { "  (yours)" } else { "" }
            );
        }
    }
    out
}

pub fn feed(sections: &[FeedSection], viewer_id: i64) -> String {
    if sections.is_empty() {
        return "You have not joined any forums yet. Try `mural groups list`.\n".to_owned();
    }
    let mut out = String::new();
    for section in sections {
        let _ = writeln!(out, "== {} (#{}) ==", section.group.name, section.group.id);
        if section.posts.is_empty() {
            let _ = writeln!(out, "No posts yet.");
        }
        for entry in &section.posts {
            out.push_str(&post(entry, Some(viewer_id)));
        }
        out.push('\n');
    }
    out
}

pub fn whoami(profile: &UserProfile) -> String {
    let mut out = format!("{} <{}> (#{})\n", profile.username, profile.email, profile.id);
    if profile.groups.is_empty() {
        out.push_str("Forums: none\n");
    } else {
        let names: Vec<&str> = profile.groups.iter().map(|group| group.name.as_str()).collect();
        let _ = writeln!(out, "Forums: {}", names.join(", "));
    }
    out
}

pub fn profile(profile: &UserProfile, posts: &[Post], received: &[ReceivedComment]) -> String {
    let mut out = whoami(profile);
    let _ = writeln!(out, "\nMy posts ({}):", posts.len());
    for entry in posts {
        let forum = entry.group.as_ref().map_or("?", |group| group.name.as_str());
        let _ = writeln!(
            out,
            "  [#{}] {} in {} ({} comments)",
            entry.id,
            entry.title,
            forum,
            entry.comments.len()
        );
    }
    let _ = writeln!(out, "\nRecent activity ({}):", received.len());
    for item in received {
        let _ = writeln!(
            out,
            "  {} commented \"{}\" on \"{}\" ({})",
            item.comment.commenter.username,
            item.comment.text,
            item.post_title,
            short_date(&item.comment.date)
        );
    }
    out
}
