//! Creator content types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::interactions::types::Comment;
use crate::shared::MediaType;

/// Largest accepted post media file
pub const MAX_MEDIA_BYTES: usize = 100 * 1024 * 1024;

/// Content shown in place of a private post the viewer cannot see
pub const PRIVATE_PLACEHOLDER: &str = "This is private content";

/// Default and maximum page size of post lists
pub const DEFAULT_POST_PAGE: i64 = 10;
pub const MAX_POST_PAGE: i64 = 50;

/// A media file attached to a post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaItem {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

/// Stored `post_media` row
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostMediaRow {
    pub post_id: Uuid,
    pub url: String,
    #[sqlx(try_from = "String")]
    pub media_type: MediaType,
}

/// Public fields of a post's author
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct PostAuthor {
    #[sqlx(rename = "author_username")]
    pub username: Option<String>,
    #[sqlx(rename = "author_display_name")]
    pub display_name: Option<String>,
    #[sqlx(rename = "author_avatar_url")]
    pub avatar_url: Option<String>,
}

/// A post as seen by one viewer
///
/// `liked` and `purchased` are relative to the viewer the post was loaded
/// for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    #[sqlx(flatten)]
    pub author: PostAuthor,
    pub title: String,
    pub content: String,
    #[sqlx(skip)]
    pub media: Vec<MediaItem>,
    pub is_private: bool,
    pub price: f64,
    pub tags: Vec<String>,
    pub views: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub purchase_count: i64,
    pub liked: bool,
    pub purchased: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether `viewer` may see the full post
    pub fn can_view(&self, viewer: Option<Uuid>) -> bool {
        !self.is_private || viewer == Some(self.author_id) || self.purchased
    }

    /// Replace content and media of a post `viewer` may not see
    pub fn redact_for(mut self, viewer: Option<Uuid>) -> Self {
        if !self.can_view(viewer) {
            self.content = PRIVATE_PLACEHOLDER.to_string();
            self.media.clear();
        }
        self
    }
}

/// A post with its comments
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
}

/// One page of posts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PostsPage {
    pub posts: Vec<Post>,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Number of pages needed for `total` items
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

/// Which posts of a creator to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    All,
    Public,
    Private,
}

impl Visibility {
    /// `is_private` filter for SQL, `None` for all
    pub fn is_private(&self) -> Option<bool> {
        match self {
            Visibility::All => None,
            Visibility::Public => Some(false),
            Visibility::Private => Some(true),
        }
    }
}

/// Query string of post lists
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPostsParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// `all`, `public` or `private`; anything else lists all
    #[serde(rename = "type")]
    pub visibility: Option<String>,
}

impl ListPostsParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_POST_PAGE).clamp(1, MAX_POST_PAGE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    pub fn visibility(&self) -> Visibility {
        match self.visibility.as_deref().map(str::trim) {
            Some("public") => Visibility::Public,
            Some("private") => Visibility::Private,
            _ => Visibility::All,
        }
    }
}

/// Aggregates over a creator's posts
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct CreatorStats {
    pub total_posts: i64,
    pub total_views: i64,
    pub total_purchases: i64,
    /// Sum over posts of purchases times price
    pub total_earnings: f64,
}

/// Validated fields of a new post
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub is_private: bool,
    pub price: f64,
    pub tags: Vec<String>,
}

/// Validated post update; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_private: bool,
    pub price: f64,
    pub tags: Option<Vec<String>>,
}

/// `{success, message, data}` envelope returned on post creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostResponse {
    pub success: bool,
    pub message: String,
    pub data: Post,
}

/// `{post}` envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse<T> {
    pub post: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(is_private: bool, purchased: bool) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            author: PostAuthor::default(),
            title: "t".into(),
            content: "secret".into(),
            media: vec![MediaItem {
                url: "/uploads/content/a.mp4".into(),
                media_type: MediaType::Video,
            }],
            is_private,
            price: if is_private { 5.0 } else { 0.0 },
            tags: vec![],
            views: 0,
            like_count: 0,
            comment_count: 0,
            purchase_count: 0,
            liked: false,
            purchased,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_private_post_redacted_for_strangers() {
        let redacted = post(true, false).redact_for(Some(Uuid::new_v4()));
        assert_eq!(redacted.content, PRIVATE_PLACEHOLDER);
        assert!(redacted.media.is_empty());

        let anonymous = post(true, false).redact_for(None);
        assert_eq!(anonymous.content, PRIVATE_PLACEHOLDER);
    }

    #[test]
    fn test_private_post_visible_to_author_and_buyers() {
        let p = post(true, false);
        let author = p.author_id;
        assert_eq!(p.redact_for(Some(author)).content, "secret");

        let bought = post(true, true).redact_for(Some(Uuid::new_v4()));
        assert_eq!(bought.content, "secret");
        assert_eq!(bought.media.len(), 1);
    }

    #[test]
    fn test_public_post_never_redacted() {
        assert_eq!(post(false, false).redact_for(None).content, "secret");
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    #[test]
    fn test_list_params() {
        let params = ListPostsParams {
            page: Some(3),
            limit: Some(5),
            visibility: Some("private".into()),
        };
        assert_eq!(params.offset(), 10);
        assert_eq!(params.visibility(), Visibility::Private);
        assert_eq!(params.visibility().is_private(), Some(true));

        let params = ListPostsParams {
            page: Some(0),
            limit: Some(500),
            visibility: Some("weird".into()),
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), MAX_POST_PAGE);
        assert_eq!(params.visibility(), Visibility::All);
    }

    #[test]
    fn test_offset_saturates_for_huge_pages() {
        let params = ListPostsParams {
            page: Some(i64::MAX),
            limit: Some(10),
            visibility: None,
        };
        assert_eq!(params.page(), i64::MAX);
        assert_eq!(params.offset(), i64::MAX);
    }
}
