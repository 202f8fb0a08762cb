//! Backend Module
//!
//! This module contains all server-side code for PathMatch: an Axum HTTP
//! server backed by a single PostgreSQL database.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, JWT sessions, creator profiles
//! - **`middleware`** - Bearer authentication and role guards
//! - **`extract`** - JSON, path and query extractors with JSON rejections
//! - **`jobs`** - Job postings
//! - **`applications`** - Job applications (authenticated and public)
//! - **`profiles`** - Employer and job seeker profiles
//! - **`content`** - Creator posts, purchases and the subscriber feed
//! - **`interactions`** - Likes and comments on posts
//! - **`social`** - Follow graph
//! - **`messaging`** - Two-party conversations and unread counts
//! - **`storage`** - Blob store for uploaded files
//! - **`error`** - Backend-specific error types
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── extract.rs      - Request extractors
//! ├── jobs/           - Job postings
//! ├── applications/   - Job applications
//! ├── profiles/       - Employer and job seeker profiles
//! ├── content/        - Creator content
//! ├── interactions/   - Likes and comments
//! ├── social/         - Follows
//! ├── messaging/      - Direct messages
//! ├── storage/        - Uploaded blobs
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! Handlers share an `AppState` holding the optional database pool and the
//! blob store. When `DATABASE_URL` is not set the server still starts and
//! every data route answers 503.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`. The error converts itself into
//! a JSON response `{"error": ..., "status": ...}`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Request extractors with `BackendError` rejections
pub mod extract;

/// Job postings
pub mod jobs;

/// Job applications
pub mod applications;

/// Employer and job seeker profiles
pub mod profiles;

/// Creator content
pub mod content;

/// Likes and comments
pub mod interactions;

/// Follow graph
pub mod social;

/// Direct messaging
pub mod messaging;

/// Uploaded file storage
pub mod storage;

/// Re-export commonly used types
pub use error::BackendError;
pub use middleware::{AuthUser, AuthenticatedUser};
pub use server::{create_app, AppState};
