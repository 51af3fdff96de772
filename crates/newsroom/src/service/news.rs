//! News service: transactional writes with a cache-aside read path.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use newsroom_core::cache::{deserialize_news, news_key, serialize_news, Cache};
use newsroom_core::news::{
    to_views, CreateNewsRequest, DeleteAck, DeleteNewsRequest, GetNewsRequest, ListNewsRequest,
    ListView, NewsView, UpdateAck, UpdateNewsRequest,
};
use newsroom_core::storage::{
    ListQuery, NewsRepository, RepositoryError, Result, TransactionManager,
};

use super::NewsApi;

/// Composes the repository, the transaction manager and the cache per use
/// case.
///
/// - **Writes** run in one Read Committed transaction each. Updates and
///   deletes invalidate the cached view after commit; creates leave the cache
///   alone.
/// - **Point reads** check the cache first, fall back to the repository on a
///   miss and populate the cache afterwards.
/// - **Listings** always hit the repository.
///
/// Cache failures never fail a request: reads degrade to a miss, writes to
/// the cache are logged and skipped.
///
/// # Type Parameters
///
/// * `R` - The repository implementation
/// * `M` - The transaction manager, sharing the repository's session type
/// * `C` - The cache implementation
pub struct NewsService<R, M, C>
where
    R: NewsRepository,
    M: TransactionManager<Tx = R::Tx>,
    C: Cache,
{
    repository: Arc<R>,
    transactions: Arc<M>,
    cache: Arc<C>,
    ttl: Duration,
}

impl<R, M, C> NewsService<R, M, C>
where
    R: NewsRepository + 'static,
    M: TransactionManager<Tx = R::Tx> + 'static,
    C: Cache + 'static,
{
    /// Creates a new news service.
    ///
    /// # Arguments
    ///
    /// * `repository` - The aggregate repository
    /// * `transactions` - Opens the transactions writes run in
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for cached views
    pub fn new(repository: Arc<R>, transactions: Arc<M>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            transactions,
            cache,
            ttl,
        }
    }

    /// Looks the view up in the cache. Errors and undecodable values count
    /// as a miss.
    async fn cached_view(&self, key: &str, id: i64) -> Option<NewsView> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match deserialize_news(&bytes) {
                Ok(view) => {
                    tracing::trace!(news_id = id, "Cache hit for news");
                    Some(view)
                }
                Err(err) => {
                    tracing::warn!(news_id = id, error = %err, "Cached news deserialization failed");
                    None
                }
            },
            Ok(None) => {
                tracing::trace!(news_id = id, "Cache miss for news");
                None
            }
            Err(err) => {
                tracing::warn!(news_id = id, error = %err, "Cache read failed");
                None
            }
        }
    }

    async fn populate(&self, key: &str, view: &NewsView) {
        match serialize_news(view) {
            Ok(bytes) => {
                if let Err(err) = self.cache.set(key, &bytes, Some(self.ttl)).await {
                    tracing::warn!(news_id = view.id, error = %err, "Failed to cache news");
                }
            }
            Err(err) => {
                tracing::warn!(news_id = view.id, error = %err, "Failed to serialize news for cache");
            }
        }
    }

    async fn invalidate(&self, id: i64) {
        if let Err(err) = self.cache.delete(&news_key(id)).await {
            tracing::warn!(news_id = id, error = %err, "Failed to invalidate cached news");
        }
    }
}

#[async_trait]
impl<R, M, C> NewsApi for NewsService<R, M, C>
where
    R: NewsRepository + 'static,
    M: TransactionManager<Tx = R::Tx> + 'static,
    C: Cache + 'static,
{
    async fn create(&self, req: CreateNewsRequest) -> Result<NewsView> {
        let repository = Arc::clone(&self.repository);
        let news = req.into_news();

        let created = self
            .transactions
            .run_read_committed(move |tx| {
                Box::pin(async move {
                    let mut news = news;
                    repository.create(tx, &mut news).await?;
                    Ok(news)
                })
            })
            .await?;

        tracing::info!(news_id = created.id, blocks = created.content.len(), "Created news");
        Ok(NewsView::from(&created))
    }

    async fn get(&self, req: GetNewsRequest) -> Result<NewsView> {
        let key = news_key(req.id);

        if let Some(view) = self.cached_view(&key, req.id).await {
            if req.check_visibility && !view.is_visible_at(Utc::now()) {
                return Err(RepositoryError::news_not_found(req.id));
            }
            return Ok(view);
        }

        let repository = Arc::clone(&self.repository);
        let id = req.id;
        let news = self
            .transactions
            .run_read_committed(move |tx| {
                Box::pin(async move { repository.get_by_id_in(tx, id).await })
            })
            .await?;

        if req.check_visibility && !news.is_visible_at(Utc::now()) {
            tracing::debug!(news_id = id, "News exists but is outside its visibility window");
            return Err(RepositoryError::news_not_found(id));
        }

        let view = NewsView::from(&news);
        self.populate(&key, &view).await;
        Ok(view)
    }

    async fn update(&self, req: UpdateNewsRequest) -> Result<UpdateAck> {
        let repository = Arc::clone(&self.repository);
        let id = req.id;

        self.transactions
            .run_read_committed(move |tx| {
                Box::pin(async move {
                    let mut news = repository.get_by_id_in(tx, id).await?;
                    req.apply_to(&mut news);
                    repository.update(tx, &mut news).await
                })
            })
            .await?;

        self.invalidate(id).await;

        tracing::info!(news_id = id, "Updated news");
        Ok(UpdateAck::new(id, Utc::now()))
    }

    async fn delete(&self, req: DeleteNewsRequest) -> Result<DeleteAck> {
        let repository = Arc::clone(&self.repository);
        let id = req.id;

        self.transactions
            .run_read_committed(move |tx| Box::pin(async move { repository.delete(tx, id).await }))
            .await?;

        self.invalidate(id).await;

        tracing::info!(news_id = id, "Deleted news");
        Ok(DeleteAck::new(id))
    }

    async fn list(&self, req: ListNewsRequest) -> Result<ListView> {
        let query = ListQuery::from(&req);
        let page = self.repository.list(&query).await?;

        let fetched = page.items.len();
        let items = to_views(page.items, req.check_visibility, Utc::now());
        tracing::debug!(
            fetched,
            visible = items.len(),
            total = page.total_count,
            "Listed news"
        );

        Ok(ListView {
            items,
            total_count: page.total_count,
            page: req.page,
            limit: req.limit,
        })
    }
}
