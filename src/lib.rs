//! PathMatch - Main Library
//!
//! PathMatch is the backend of a two-sided platform: a job marketplace where
//! employers post jobs and job seekers apply, and a creator platform where
//! verified creators publish (optionally paid) video posts that subscribers
//! follow, like, comment on and discuss over direct messages.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependencies
//!   - Domain enums (roles, job types, statuses)
//!   - Public user shapes and messaging types
//!   - Field validation and the shared error type
//!
//! - **`backend`** - Axum HTTP server
//!   - Authentication, JWT sessions, role guards
//!   - Jobs, applications and profiles
//!   - Creator content, interactions, social graph and messaging
//!   - PostgreSQL persistence through sqlx
//!
//! # Usage
//!
//! ```rust,no_run
//! use pathmatch::backend::server::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await.unwrap();
//! axum::serve(listener, app).await.unwrap();
//! # }
//! ```

/// Types shared across the backend
pub mod shared;

/// Server-side code
pub mod backend;
