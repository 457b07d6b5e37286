//! Error types for fetching and joining.
//!
//! [`SourceError`] covers what the data source can report; [`AggregateError`]
//! adds the join failure on top of it. The binary wraps both in `anyhow`.

use thiserror::Error;

/// Errors returned by a [`crate::source::DataSource`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// Network, HTTP status or decoding failure.
    #[error("Failed to fetch {resource}: {message}")]
    Transport { resource: String, message: String },

    /// The requested post does not exist.
    #[error("Post {id} not found")]
    NotFound { id: i64 },
}

impl SourceError {
    pub fn transport(resource: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            resource: resource.into(),
            message: message.into(),
        }
    }
}

/// Errors returned by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// A fetch failed; the source error is passed through unchanged.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// A post references a user that the user collection does not contain.
    #[error("No user {user_id} found for post {post_id}")]
    LookupMiss { post_id: i64, user_id: i64 },
}

impl AggregateError {
    /// Whether this error is a not-found from the single-post fetch.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Source(SourceError::NotFound { .. }))
    }
}

pub type Result<T, E = AggregateError> = std::result::Result<T, E>;
