//! Applications Module
//!
//! Job applications. Job seekers apply with their account; anyone can apply
//! through the public endpoint with a name, email and optional résumé.
//! Employers set the status of applications to their own jobs.

/// Application types and request bodies
pub mod types;

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{submit_application, submit_public_application, update_application_status};
