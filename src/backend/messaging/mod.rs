//! Messaging Module
//!
//! Direct messages between two users with per-participant unread counters.

pub mod handlers;
pub mod db;

pub use handlers::{
    create_conversation, get_conversations, get_messages, get_unread_count, send_message,
};
