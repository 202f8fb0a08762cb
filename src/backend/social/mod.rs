//! Social Module
//!
//! Follow graph between users. Followers feed the subscriber content feed.

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{follow_user, get_followers, get_following, unfollow_user};
