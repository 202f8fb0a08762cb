//! Middleware Module
//!
//! Request processing middleware: bearer-token authentication and the
//! extractors and role guards built on it.

/// Authentication middleware, extractors and role guards
pub mod auth;

pub use auth::{auth_middleware, authenticate, AuthUser, AuthenticatedUser, MaybeAuthUser};
