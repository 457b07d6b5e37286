//! Data source abstraction.
//!
//! The aggregator reads everything through [`DataSource`]; the HTTP
//! implementation talks to a JSONPlaceholder-style REST API.

pub mod http;

pub use http::{HttpDataSource, SourceConfig};

use crate::error::SourceError;
use crate::models::{Comment, Post, User};
use std::future::Future;

/// Read operations the aggregator needs from its environment.
pub trait DataSource: Send + Sync {
    /// Fetch every post, in source order.
    fn get_posts(&self) -> impl Future<Output = Result<Vec<Post>, SourceError>> + Send;

    /// Fetch every user, in source order.
    fn get_users(&self) -> impl Future<Output = Result<Vec<User>, SourceError>> + Send;

    /// Fetch every comment, in source order.
    fn get_comments(&self) -> impl Future<Output = Result<Vec<Comment>, SourceError>> + Send;

    /// Fetch a single post. Fails with [`SourceError::NotFound`] if it does not exist.
    fn get_post(&self, id: i64) -> impl Future<Output = Result<Post, SourceError>> + Send;
}
