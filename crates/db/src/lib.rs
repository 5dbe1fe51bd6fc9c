//! Storage layer for the marquee catalog.
//!
//! Higher layers depend only on the [`MovieStore`] and [`CategoryStore`]
//! traits. Two implementations are provided: [`PgStore`] over a PostgreSQL
//! pool and [`InMemoryStore`] for local development and tests.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod repositories;
pub mod store;

pub use memory::InMemoryStore;
pub use repositories::PgStore;
pub use store::{CategoryStore, MovieStore, StoreError};

#[cfg(any(test, feature = "mock"))]
pub use store::{MockCategoryStore, MockMovieStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
