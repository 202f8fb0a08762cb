//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation, uploads, fallback, layers
//! └── api_routes.rs   - `/api/*` endpoints
//! ```
//!
//! # Authentication
//!
//! Routers whose every endpoint needs a user (profiles, content management,
//! interactions, messages, users) sit behind `auth_middleware` as a route
//! layer. Paths mixing public and authenticated methods (`/api/jobs`) leave
//! it to the `AuthUser` extractor in the protected handlers.

/// Main router creation
pub mod router;

/// API endpoints
pub mod api_routes;

pub use router::create_router;
