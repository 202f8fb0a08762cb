//! Common test utilities and helpers
//!
//! - Database test fixture (skips when `DATABASE_URL` is unset)
//! - Test server construction and authentication helpers
//! - Assertions on JSON error bodies

#![allow(dead_code)]

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
