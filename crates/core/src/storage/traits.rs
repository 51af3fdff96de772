use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::news::News;

use super::{ListQuery, NewsPage, Result};

/// Runs units of work inside a database transaction.
///
/// Every call opens a fresh transaction at Read Committed isolation and hands
/// the unit of work an explicit session. `Ok` commits, `Err` rolls back and
/// the error is returned unchanged.
#[async_trait]
pub trait TransactionManager: Send + Sync {
    /// Session handle passed to repository writes.
    type Tx: Send;

    async fn run_read_committed<T, F>(&self, work: F) -> Result<T>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Self::Tx) -> BoxFuture<'t, Result<T>> + Send;
}

/// Repository for the news aggregate.
///
/// Writes take the session opened by a [`TransactionManager`] and fail with
/// `RepositoryError::NoTransaction` when it carries no live transaction.
/// Plain reads go to the pool; `get_by_id_in` reads through the session.
#[async_trait]
pub trait NewsRepository: Send + Sync {
    type Tx: Send;

    /// Inserts the news row and its blocks, writing back store-assigned ids
    /// and timestamps.
    async fn create(&self, tx: &mut Self::Tx, news: &mut News) -> Result<()>;

    /// Loads an aggregate with its blocks ordered by position.
    async fn get_by_id(&self, id: i64) -> Result<News>;

    /// Same as [`get_by_id`](Self::get_by_id) but reads through the session,
    /// so a unit of work holds a single connection and sees its own writes.
    async fn get_by_id_in(&self, tx: &mut Self::Tx, id: i64) -> Result<News>;

    /// Overwrites the scalar fields and replaces the whole block set.
    async fn update(&self, tx: &mut Self::Tx, news: &mut News) -> Result<()>;

    /// Removes the aggregate. Blocks go with it.
    async fn delete(&self, tx: &mut Self::Tx, id: i64) -> Result<()>;

    /// Returns one page plus the count of all rows matching the filters.
    async fn list(&self, query: &ListQuery) -> Result<NewsPage>;
}
