//! Content Module
//!
//! Creator posts: upload, edit, paginated listing with private-post
//! redaction, stats, subscriber feed and purchases.

/// Post types and pagination
pub mod types;

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    create_post, delete_post, get_creator_posts, get_creator_stats, get_own_posts, get_post,
    get_subscriber_feed, purchase_post, update_post,
};
