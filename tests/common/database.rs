//! Database test fixtures
//!
//! Tests that need PostgreSQL call [`TestDatabase::try_new`] and return early
//! when it yields `None`, so the suite still passes without a database.

use sqlx::PgPool;

/// Test database fixture
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect, migrate and empty the database named by `DATABASE_URL`
    pub async fn try_new() -> Option<Self> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping database test");
            return None;
        };

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to create test database pool");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let db = Self { pool };
        db.cleanup().await.expect("Failed to clean test database");
        Some(db)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Remove all rows; every other table cascades from `users`
    pub async fn cleanup(&self) -> Result<(), sqlx::Error> {
        sqlx::query("TRUNCATE TABLE users CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
