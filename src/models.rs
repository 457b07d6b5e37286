//! Data models for the aggregator.
//!
//! Source entities mirror the remote API's JSON shape (camelCase keys).
//! Derived records are built fresh by the aggregator on every call.

use serde::{Deserialize, Serialize};

/// A post as served by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    /// Identifier of the authoring user.
    pub user_id: i64,
    pub title: String,
    pub body: String,
}

/// A user as served by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// A comment as served by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    /// Identifier of the post this comment belongs to.
    pub post_id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

/// A post joined with its author, ready for a list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostOverview {
    /// Same as the source post's id.
    pub id: i64,
    pub avatar_url: String,
    pub title: String,
    pub author_name: String,
}

/// A post joined with its comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    /// Same as the source post's id.
    pub id: i64,
    pub body: String,
    /// Comments in source order; may be empty.
    pub comments: Vec<PostComment>,
}

/// A comment with its post reference resolved away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostComment {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl From<Comment> for PostComment {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            name: comment.name,
            email: comment.email,
            body: comment.body,
        }
    }
}

impl PostDetail {
    /// Returns the number of attached comments.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }
}
