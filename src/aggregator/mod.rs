//! Concurrent fetch-and-join.
//!
//! Each call fans out two independent fetches, waits for both, then joins the
//! results in memory. The fetches are driven by a single `try_join` inside the
//! caller's future: the first failure drops the sibling fetch, and dropping
//! the caller drops both. Nothing is spawned, so no fetch outlives its call.

pub mod detail;
pub mod overview;

pub use detail::join_detail;
pub use overview::join_overviews;

use crate::avatar::AvatarUrlGenerator;
use crate::error::Result;
use crate::models::{PostDetail, PostOverview};
use crate::source::DataSource;
use futures::future::try_join;
use tracing::{debug, info};

/// Builds overview and detail records from a [`DataSource`].
pub struct PostAggregator<S, A> {
    source: S,
    avatars: A,
}

impl<S, A> PostAggregator<S, A>
where
    S: DataSource,
    A: AvatarUrlGenerator,
{
    pub fn new(source: S, avatars: A) -> Self {
        Self { source, avatars }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// One overview per post, in source post order.
    pub async fn get_overviews(&self) -> Result<Vec<PostOverview>> {
        info!("Fetching posts and users");

        let (posts, users) = try_join(self.source.get_posts(), self.source.get_users()).await?;
        debug!("Joining {} posts with {} users", posts.len(), users.len());

        let overviews = join_overviews(posts, &users, &self.avatars)?;
        info!("Built {} post overviews", overviews.len());

        Ok(overviews)
    }

    /// The post with the given id and all of its comments.
    pub async fn get_detail(&self, id: i64) -> Result<PostDetail> {
        info!("Fetching post {} and comments", id);

        let (post, comments) =
            try_join(self.source.get_post(id), self.source.get_comments()).await?;
        debug!("Filtering {} comments for post {}", comments.len(), post.id);

        let detail = join_detail(post, comments);
        info!(
            "Built detail for post {} with {} comments",
            detail.id,
            detail.comment_count()
        );

        Ok(detail)
    }
}
