//! Document storage and the data-access layer.
//!
//! - [`store`] -- the [`DocumentStore`](store::DocumentStore) seam and its
//!   PostgreSQL and in-memory backends.
//! - [`models`] -- typed documents and expanded read views.
//! - [`repositories`] -- one zero-sized repo per entity, each operation
//!   taking `&dyn DocumentStore` first.

pub mod error;
pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};

pub use error::{RepoError, RepoResult, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from explicit connect options.
pub async fn create_pool(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
