//! In-memory repository and transaction manager.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering as AtomicOrdering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use futures_util::future::BoxFuture;
use tokio::sync::RwLock;

use newsroom_core::news::News;
use newsroom_core::storage::{
    ListQuery, NewsPage, NewsRepository, RepositoryError, Result, SortDirection, SortField,
    TransactionManager,
};

/// A pending write of one unit of work.
#[derive(Debug, Clone)]
enum StagedWrite {
    /// Row created by this unit of work.
    Insert(News),
    /// Row that existed when the unit of work touched it.
    Update(News),
    Delete,
}

type Staged = HashMap<i64, StagedWrite>;

/// Session handle for the in-memory backend.
///
/// Sessions opened by [`InMemoryRepository::run_read_committed`] carry a
/// staging area. A detached session has none and every write through it fails
/// with `RepositoryError::NoTransaction`.
#[derive(Debug, Default)]
pub struct MemorySession {
    staged: Option<Staged>,
}

impl MemorySession {
    /// A session that is not bound to any transaction.
    #[cfg(test)]
    pub fn detached() -> Self {
        Self { staged: None }
    }

    fn begin() -> Self {
        Self {
            staged: Some(HashMap::new()),
        }
    }

    fn staged_mut(&mut self) -> Result<&mut Staged> {
        self.staged.as_mut().ok_or(RepositoryError::NoTransaction)
    }
}

/// In-memory storage backend for testing.
///
/// Data is not persisted and will be lost when the repository is dropped.
/// Clones share the same store.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    news: Arc<RwLock<HashMap<i64, News>>>,
    next_news_id: Arc<AtomicI64>,
    next_block_id: Arc<AtomicI64>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            news: Arc::new(RwLock::new(HashMap::new())),
            next_news_id: Arc::new(AtomicI64::new(1)),
            next_block_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Number of committed aggregates.
    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.news.read().await.len()
    }

    /// Returns the committed row as seen by the session: staged changes
    /// first, then the store.
    async fn current(&self, staged: &Staged, id: i64) -> Option<News> {
        match staged.get(&id) {
            Some(StagedWrite::Insert(news)) | Some(StagedWrite::Update(news)) => Some(news.clone()),
            Some(StagedWrite::Delete) => None,
            None => self.news.read().await.get(&id).cloned(),
        }
    }

    /// Assigns fresh ids to every block and orders them for rendering.
    fn assign_blocks(&self, news: &mut News) {
        let now = Utc::now();
        news.content.sort_by_key(|block| block.position);
        for block in &mut news.content {
            block.id = self.next_block_id.fetch_add(1, AtomicOrdering::SeqCst);
            block.news_id = news.id;
            block.created_at = now;
        }
    }

    /// Applies the staged writes in one step. Updates and deletes of rows
    /// that another unit of work removed in the meantime fail the whole
    /// commit with `NotFound` and nothing is applied.
    async fn commit(&self, staged: Staged) -> Result<()> {
        let mut store = self.news.write().await;

        for (id, write) in &staged {
            let needs_row = matches!(write, StagedWrite::Update(_) | StagedWrite::Delete);
            if needs_row && !store.contains_key(id) {
                tracing::warn!(news_id = *id, "Row removed before commit");
                return Err(RepositoryError::news_not_found(*id));
            }
        }

        for (id, write) in staged {
            match write {
                StagedWrite::Insert(news) | StagedWrite::Update(news) => {
                    store.insert(id, news);
                }
                StagedWrite::Delete => {
                    store.remove(&id);
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl TransactionManager for InMemoryRepository {
    type Tx = MemorySession;

    async fn run_read_committed<T, F>(&self, work: F) -> Result<T>
    where
        T: Send,
        F: for<'t> FnOnce(&'t mut Self::Tx) -> BoxFuture<'t, Result<T>> + Send,
    {
        let mut session = MemorySession::begin();
        let result = work(&mut session).await;

        match (result, session.staged.take()) {
            (Ok(value), Some(staged)) => {
                self.commit(staged).await?;
                Ok(value)
            }
            (Ok(_), None) => Err(RepositoryError::NoTransaction),
            (Err(err), _) => {
                tracing::debug!(error = %err, "Discarding staged changes");
                Err(err)
            }
        }
    }
}

#[async_trait]
impl NewsRepository for InMemoryRepository {
    type Tx = MemorySession;

    async fn create(&self, tx: &mut Self::Tx, news: &mut News) -> Result<()> {
        let staged = tx.staged_mut()?;

        news.id = self.next_news_id.fetch_add(1, AtomicOrdering::SeqCst);
        news.created_at = Utc::now();
        self.assign_blocks(news);

        staged.insert(news.id, StagedWrite::Insert(news.clone()));
        Ok(())
    }

    async fn get_by_id_in(&self, tx: &mut Self::Tx, id: i64) -> Result<News> {
        let staged = tx.staged_mut()?;
        self.current(staged, id)
            .await
            .ok_or_else(|| RepositoryError::news_not_found(id))
    }

    async fn get_by_id(&self, id: i64) -> Result<News> {
        let store = self.news.read().await;
        store
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::news_not_found(id))
    }

    async fn update(&self, tx: &mut Self::Tx, news: &mut News) -> Result<()> {
        let staged = tx.staged_mut()?;

        let existing = self
            .current(staged, news.id)
            .await
            .ok_or_else(|| RepositoryError::news_not_found(news.id))?;

        news.created_at = existing.created_at;
        self.assign_blocks(news);

        let write = match staged.get(&news.id) {
            Some(StagedWrite::Insert(_)) => StagedWrite::Insert(news.clone()),
            _ => StagedWrite::Update(news.clone()),
        };
        staged.insert(news.id, write);
        Ok(())
    }

    async fn delete(&self, tx: &mut Self::Tx, id: i64) -> Result<()> {
        let staged = tx.staged_mut()?;

        if self.current(staged, id).await.is_none() {
            return Err(RepositoryError::news_not_found(id));
        }

        match staged.get(&id) {
            Some(StagedWrite::Insert(_)) => {
                staged.remove(&id);
            }
            _ => {
                staged.insert(id, StagedWrite::Delete);
            }
        }
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> Result<NewsPage> {
        let store = self.news.read().await;

        let needle = query.search.as_deref().map(str::to_lowercase);
        let mut matching: Vec<&News> = store
            .values()
            .filter(|news| {
                needle
                    .as_deref()
                    .is_none_or(|s| news.title.to_lowercase().contains(s))
            })
            .filter(|news| {
                query
                    .category
                    .as_deref()
                    .is_none_or(|c| news.category == c)
            })
            .collect();

        let total_count = matching.len() as i64;

        matching.sort_by(|a, b| compare(a, b, query.sort_field, query.sort_direction));

        let items = matching
            .into_iter()
            .skip(usize::try_from(query.offset).unwrap_or(0))
            .take(usize::try_from(query.limit).unwrap_or(0))
            .cloned()
            .collect();

        Ok(NewsPage { items, total_count })
    }
}

/// Orders two aggregates the way the SQL listing does: by the sort column,
/// then by id, both in the requested direction. Missing timestamps sort as
/// larger than any value.
fn compare(a: &News, b: &News, field: SortField, direction: SortDirection) -> Ordering {
    let primary = match field {
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Category => a.category.cmp(&b.category),
        SortField::StartTime => cmp_nullable(a.start_time, b.start_time),
        SortField::EndTime => cmp_nullable(a.end_time, b.end_time),
    };
    let ordering = primary.then_with(|| a.id.cmp(&b.id));

    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

fn cmp_nullable<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
