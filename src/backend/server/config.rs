/**
 * Server Configuration
 *
 * This module handles loading of server configuration from the environment,
 * including the optional PostgreSQL database connection.
 *
 * # Configuration Sources
 *
 * | Variable          | Default     | Purpose                                |
 * |-------------------|-------------|----------------------------------------|
 * | `DATABASE_URL`    | unset       | PostgreSQL connection string           |
 * | `SERVER_PORT`     | `5000`      | Listening port                         |
 * | `UPLOAD_DIR`      | `uploads`   | Root directory for uploaded blobs      |
 * | `PUBLIC_BASE_URL` | empty       | Prefix for stored blob URLs            |
 *
 * `JWT_SECRET` is read by `auth::sessions`.
 *
 * # Error Handling
 *
 * Configuration errors are logged but do not prevent server startup.
 * A database that fails to connect is set to `None` and the server
 * continues without it.
 */

use std::path::PathBuf;

use sqlx::PgPool;

/// Default listening port
pub const DEFAULT_PORT: u16 = 5000;

/// Default upload directory
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Non-database server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Port the HTTP server binds to
    pub port: u16,
    /// Root directory for stored blobs
    pub upload_dir: PathBuf,
    /// Prefix prepended to `/uploads/...` in stored URLs
    pub public_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            public_base_url: String::new(),
        }
    }
}

impl ServerConfig {
    /// Read settings from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("SERVER_PORT") {
            Some(raw) => raw.parse::<u16>().unwrap_or_else(|_| {
                tracing::warn!("Invalid SERVER_PORT '{}', using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let upload_dir = lookup("UPLOAD_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.public_base_url);

        Self {
            port,
            upload_dir,
            public_base_url,
        }
    }
}

/// Load and initialize database connection pool
///
/// This function:
/// 1. Reads `DATABASE_URL` from environment
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if `DATABASE_URL` is not set or connection fails
pub async fn load_database() -> DatabaseConfig {
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            tracing::warn!("DATABASE_URL not set. Data routes will answer 503.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Data routes will answer 503.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => {
            tracing::info!("Database migrations completed successfully");
        }
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
