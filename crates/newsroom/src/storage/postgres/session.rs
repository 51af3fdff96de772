//! Transaction coordination for the PostgreSQL backend.

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use newsroom_core::storage::{RepositoryError, Result, TransactionManager};

use super::error::map_sqlx_error;
use super::schema::SET_READ_COMMITTED;

/// Session handle carrying the live transaction of one unit of work.
pub struct PgSession {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgSession {
    /// A session with no transaction. Writes through it fail with
    /// `RepositoryError::NoTransaction`.
    #[cfg(test)]
    pub fn detached() -> Self {
        Self { tx: None }
    }

    /// Borrows the connection of the live transaction.
    pub fn connection(&mut self) -> Result<&mut PgConnection> {
        self.tx.as_deref_mut().ok_or(RepositoryError::NoTransaction)
    }
}

/// Opens Read Committed transactions on a shared pool.
#[derive(Debug, Clone)]
pub struct PgTransactionManager {
    pool: PgPool,
}

impl PgTransactionManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionManager for PgTransactionManager {
    type Tx = PgSession;

    async fn run_read_committed<T, F>(&self, work: F) -> Result<T>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Self::Tx) -> BoxFuture<'t, Result<T>> + Send,
    {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error(e, "TransactionManager.begin"))?;

        sqlx::query(SET_READ_COMMITTED)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "TransactionManager.begin"))?;

        let mut session = PgSession { tx: Some(tx) };
        let result = work(&mut session).await;

        match (result, session.tx.take()) {
            (Ok(value), Some(tx)) => {
                tx.commit()
                    .await
                    .map_err(|e| map_sqlx_error(e, "TransactionManager.commit"))?;
                Ok(value)
            }
            (Ok(_), None) => Err(RepositoryError::NoTransaction),
            (Err(err), Some(tx)) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::error!(
                        error = %rollback_err,
                        original = %err,
                        "Transaction rollback failed"
                    );
                }
                Err(err)
            }
            (Err(err), None) => Err(err),
        }
    }
}
