//! Authentication Handlers
//!
//! HTTP handlers for the `/api/auth` endpoints.

/// Request/response types
pub mod types;

/// POST /api/auth/register
pub mod register;

/// POST /api/auth/login
pub mod login;

/// POST /api/auth/refresh
pub mod refresh;

/// GET /api/auth/me
pub mod me;

/// Creator profile and verification
pub mod creator;

pub use creator::{get_creator_profile, update_profile, verify_profile};
pub use login::login;
pub use me::get_me;
pub use refresh::refresh;
pub use register::register;
