//! Jobs Module
//!
//! Job postings. Listing and detail are public; employers create, update
//! and (softly) delete their own jobs.

/// Job types and request bodies
pub mod types;

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{create_job, delete_job, get_job, list_jobs, update_job};
