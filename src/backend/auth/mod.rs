//! Authentication Module
//!
//! This module handles user authentication, registration, and session management.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User model and database operations
//! ├── sessions.rs     - JWT token management
//! └── handlers/       - HTTP handlers
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - Account creation
//!     ├── login.rs    - Password login
//!     ├── refresh.rs  - Token refresh
//!     ├── me.rs       - Current user
//!     └── creator.rs  - Creator profile and verification
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: role-specific fields validated → user created → token pair returned
//! 2. **Login**: email and password verified → token pair returned
//! 3. **Refresh**: refresh token → new token pair
//! 4. **Me**: access token verified → public user returned
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Access tokens expire after 24 hours, refresh tokens after 30 days
//! - Invalid credentials return 401 (no information leakage)

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
pub use handlers::{get_creator_profile, get_me, login, refresh, register, update_profile, verify_profile};
