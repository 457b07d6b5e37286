//! Post → comments join for detail views.

use crate::models::{Comment, Post, PostComment, PostDetail};

/// Attach to `post` every comment whose `post_id` matches, in source order.
pub fn join_detail(post: Post, comments: Vec<Comment>) -> PostDetail {
    let comments = comments
        .into_iter()
        .filter(|comment| comment.post_id == post.id)
        .map(PostComment::from)
        .collect();

    PostDetail {
        id: post.id,
        body: post.body,
        comments,
    }
}
