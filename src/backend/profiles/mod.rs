//! Profiles Module
//!
//! Employer and job seeker profiles, one row per recruiting account,
//! created at registration.

/// Profile types and request bodies
pub mod types;

/// Database operations
pub mod db;

/// HTTP handlers
pub mod handlers;

pub use handlers::{
    get_employer_jobs, get_employer_profile, get_job_applications, get_job_seeker_applications,
    get_job_seeker_profile, update_employer_profile, update_job_seeker_profile,
};
