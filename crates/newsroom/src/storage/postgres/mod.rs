//! PostgreSQL storage backend implementation.
//!
//! Built on `sqlx` with a shared `PgPool`. Writes run inside transactions
//! opened by [`PgTransactionManager`] and reach the repository through an
//! explicit `PgSession`. Reads made inside a unit of work use the
//! session's connection; all other reads go to the pool.

mod conversions;
mod error;
mod repository;
mod schema;
mod session;

pub use repository::PgNewsRepository;
pub use schema::bootstrap;
pub use session::PgTransactionManager;

use newsroom_core::storage::Result;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Opens the pool and makes sure the tables exist.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| error::map_sqlx_error(e, "PgPool.connect"))?;

    bootstrap(&pool).await?;

    tracing::info!(max_connections, "Connected to PostgreSQL");
    Ok(pool)
}
