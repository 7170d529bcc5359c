//! View-model assembly shared by the web pages and the terminal client.
//!
//! DESIGN
//! ======
//! Views receive flat API lists and need them shaped: the feed grouped by
//! forum, the profile's received comments newest first, and the group page's
//! available actions. Doing that here keeps the two clients in agreement and
//! keeps it testable without a renderer.

#[cfg(test)]
#[path = "feed_test.rs"]
mod feed_test;

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::types::{Comment, Group, GroupDetails, Post, UserProfile};

// =============================================================================
// FEED
// =============================================================================

/// One forum section of the feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedSection {
    pub group: Group,
    pub posts: Vec<Post>,
}

/// Group `posts` by forum in a single pass.
///
/// Every forum the profile lists gets a section, in profile order, even with
/// no posts. Posts from forums the profile does not list yet (a stale
/// profile) get sections appended in first-seen order. Posts without a forum
/// are dropped. Post order within a section is the API's.
#[must_use]
pub fn assemble_feed(profile: &UserProfile, posts: Vec<Post>) -> Vec<FeedSection> {
    let mut sections: Vec<FeedSection> = profile
        .groups
        .iter()
        .cloned()
        .map(|summary| FeedSection { group: Group::from(summary), posts: Vec::new() })
        .collect();
    let mut index: HashMap<i64, usize> =
        sections.iter().enumerate().map(|(position, section)| (section.group.id, position)).collect();

    for post in posts {
        let Some(group) = post.group.clone() else {
            tracing::debug!(post_id = post.id, "feed: dropping post without a forum");
            continue;
        };
        let position = *index.entry(group.id).or_insert_with(|| {
            sections.push(FeedSection { group: group.clone(), posts: Vec::new() });
            sections.len() - 1
        });
        let section = &mut sections[position];
        if section.group.description.is_none() && group.description.is_some() {
            section.group = group;
        }
        section.posts.push(post);
    }
    sections
}

/// Remove a forum's section after the user left it.
pub fn drop_section(sections: &mut Vec<FeedSection>, group_id: i64) {
    sections.retain(|section| section.group.id != group_id);
}

// =============================================================================
// PROFILE
// =============================================================================

/// A comment left on one of the user's posts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReceivedComment {
    pub post_id: i64,
    pub post_title: String,
    pub comment: Comment,
}

/// All comments on `posts`, newest first, each labelled with its post title.
#[must_use]
pub fn received_comments(posts: &[Post]) -> Vec<ReceivedComment> {
    let mut comments: Vec<ReceivedComment> = posts
        .iter()
        .flat_map(|post| {
            post.comments.iter().map(|comment| ReceivedComment {
                post_id: post.id,
                post_title: post.title.clone(),
                comment: comment.clone(),
            })
        })
        .collect();
    // ISO 8601 strings from one server sort chronologically as text.
    comments.sort_by_key(|received| Reverse(received.comment.date.clone()));
    comments
}

// =============================================================================
// GROUP MEMBERSHIP
// =============================================================================

/// The viewer's relationship to a group, from its detail record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Membership {
    pub signed_in: bool,
    pub is_member: bool,
    pub is_creator: bool,
}

impl Membership {
    #[must_use]
    pub fn of(details: &GroupDetails, viewer: Option<&UserProfile>) -> Self {
        let Some(viewer) = viewer else {
            return Self::default();
        };
        Self {
            signed_in: true,
            is_member: details.members.iter().any(|member| member.id == viewer.id),
            is_creator: details.group.creator.as_ref().is_some_and(|creator| creator.id == viewer.id),
        }
    }

    #[must_use]
    pub fn can_join(self) -> bool {
        self.signed_in && !self.is_member
    }

    /// Creators cannot leave; they delete instead.
    #[must_use]
    pub fn can_leave(self) -> bool {
        self.signed_in && self.is_member && !self.is_creator
    }

    #[must_use]
    pub fn can_delete(self) -> bool {
        self.signed_in && self.is_creator
    }

    #[must_use]
    pub fn can_post(self) -> bool {
        self.signed_in && self.is_member
    }
}
