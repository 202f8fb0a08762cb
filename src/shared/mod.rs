//! Shared Module
//!
//! Types and helpers used by every backend module: the domain enums stored
//! in text columns, public user shapes, messaging wire types, request
//! validation and the shared error type.

/// Shared error types
pub mod error;

/// Domain enums (roles, job types, statuses)
pub mod types;

/// Public user representations
pub mod profile;

/// Request field validation
pub mod validation;

/// Direct messaging types
pub mod messaging;

pub use error::SharedError;
pub use profile::{FollowCounts, PublicUser, UserSummary};
pub use types::{ApplicationStatus, JobType, MediaType, Role, VerificationStatus};
