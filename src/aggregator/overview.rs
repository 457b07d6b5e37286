//! Post → user join for list views.

use crate::avatar::AvatarUrlGenerator;
use crate::error::{AggregateError, Result};
use crate::models::{Post, PostOverview, User};
use std::collections::HashMap;

/// Index users by id, keeping the first occurrence of a duplicated id.
pub fn index_users(users: &[User]) -> HashMap<i64, &User> {
    let mut by_id: HashMap<i64, &User> = HashMap::with_capacity(users.len());

    for user in users {
        by_id.entry(user.id).or_insert(user);
    }

    by_id
}

/// Join every post with its author, preserving post order.
///
/// Fails with [`AggregateError::LookupMiss`] on the first post whose author
/// is absent from `users`; nothing is returned for the other posts.
pub fn join_overviews<A>(
    posts: Vec<Post>,
    users: &[User],
    avatars: &A,
) -> Result<Vec<PostOverview>>
where
    A: AvatarUrlGenerator + ?Sized,
{
    let by_id = index_users(users);

    posts
        .into_iter()
        .map(|post| -> Result<PostOverview> {
            let user = by_id.get(&post.user_id).ok_or(AggregateError::LookupMiss {
                post_id: post.id,
                user_id: post.user_id,
            })?;

            Ok(PostOverview {
                id: post.id,
                avatar_url: avatars.generate_url(&user.email),
                title: post.title,
                author_name: user.name.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoAvatars;

    impl AvatarUrlGenerator for EchoAvatars {
        fn generate_url(&self, email: &str) -> String {
            format!("avatar:{}", email)
        }
    }

    fn post(id: i64, user_id: i64, title: &str) -> Post {
        Post {
            id,
            user_id,
            title: title.to_string(),
            body: format!("body {}", id),
        }
    }

    fn user(id: i64, name: &str, email: &str) -> User {
        User {
            id,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_single_post_joined() {
        let overviews = join_overviews(
            vec![post(1, 10, "T1")],
            &[user(10, "A", "a@x.com")],
            &EchoAvatars,
        )
        .unwrap();

        assert_eq!(
            overviews,
            vec![PostOverview {
                id: 1,
                avatar_url: "avatar:a@x.com".to_string(),
                title: "T1".to_string(),
                author_name: "A".to_string(),
            }]
        );
    }

    #[test]
    fn test_post_order_preserved() {
        let posts = vec![post(3, 2, "c"), post(1, 1, "a"), post(2, 2, "b")];
        let users = vec![user(1, "One", "one@x.com"), user(2, "Two", "two@x.com")];

        let overviews = join_overviews(posts, &users, &EchoAvatars).unwrap();

        let ids: Vec<i64> = overviews.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(overviews[0].author_name, "Two");
        assert_eq!(overviews[1].author_name, "One");
        assert_eq!(overviews[2].avatar_url, "avatar:two@x.com");
    }

    #[test]
    fn test_missing_user_is_lookup_miss() {
        let posts = vec![post(1, 1, "a"), post(2, 99, "b")];
        let users = vec![user(1, "One", "one@x.com")];

        let err = join_overviews(posts, &users, &EchoAvatars).unwrap_err();
        assert_eq!(
            err,
            AggregateError::LookupMiss {
                post_id: 2,
                user_id: 99
            }
        );
    }

    #[test]
    fn test_duplicate_user_first_wins() {
        let users = vec![
            user(5, "First", "first@x.com"),
            user(5, "Second", "second@x.com"),
        ];

        let indexed = index_users(&users);
        assert_eq!(indexed.len(), 1);
        assert_eq!(indexed[&5].name, "First");

        let overviews = join_overviews(vec![post(1, 5, "a")], &users, &EchoAvatars).unwrap();
        assert_eq!(overviews[0].author_name, "First");
        assert_eq!(overviews[0].avatar_url, "avatar:first@x.com");
    }

    #[test]
    fn test_empty_posts() {
        let overviews = join_overviews(Vec::new(), &[], &EchoAvatars).unwrap();
        assert!(overviews.is_empty());
    }
}
