//! Interactions Module
//!
//! Comments on posts and like toggles for posts and comments. Comments are
//! addressed by id.

pub mod types;
pub mod db;
pub mod handlers;

pub use handlers::{add_comment, delete_comment, toggle_comment_like, toggle_post_like};
