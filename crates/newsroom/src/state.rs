//! Application state.
//!
//! Handlers reach the news use cases through a trait object, so the router
//! does not depend on which storage and cache backends were compiled in.
//! Each backend combination gets its own `AppState::new`.

use std::sync::Arc;

use crate::config::Config;
use crate::service::NewsApi;

/// Shared application state, cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// News use cases (transactions plus cache-aside reads).
    pub news: Arc<dyn NewsApi>,
}

impl AppState {
    fn build(news: Arc<dyn NewsApi>) -> Self {
        Self { news }
    }
}

// ============================================================================
// Factory functions for different backend combinations
// ============================================================================

#[cfg(all(feature = "inmemory", feature = "memory"))]
mod inmemory_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::service::NewsService;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and cache.
        /// Useful for running without any external dependencies.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            let service = NewsService::new(
                repository.clone(),
                repository,
                cache,
                config.cache_ttl(),
            );

            Ok(Self::build(Arc::new(service)))
        }
    }
}

#[cfg(all(feature = "inmemory", feature = "redis"))]
mod inmemory_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::service::NewsService;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let repository = Arc::new(InMemoryRepository::new());
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            let service = NewsService::new(
                repository.clone(),
                repository,
                cache,
                config.cache_ttl(),
            );

            Ok(Self::build(Arc::new(service)))
        }
    }
}

#[cfg(all(feature = "postgres", feature = "memory"))]
mod postgres_memory {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::service::NewsService;
    use crate::storage::postgres::connect;
    use crate::storage::{PgNewsRepository, PgTransactionManager};

    impl AppState {
        /// Creates AppState with PostgreSQL storage and in-memory cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let pool = connect(&config.database_url, config.database_max_connections).await?;
            let repository = Arc::new(PgNewsRepository::new(pool.clone()));
            let transactions = Arc::new(PgTransactionManager::new(pool));
            let cache = Arc::new(MemoryCache::new(config.cache_max_entries));

            let service = NewsService::new(repository, transactions, cache, config.cache_ttl());

            Ok(Self::build(Arc::new(service)))
        }
    }
}

#[cfg(all(feature = "postgres", feature = "redis"))]
mod postgres_redis {
    use super::*;
    use crate::cache::RedisCache;
    use crate::service::NewsService;
    use crate::storage::postgres::connect;
    use crate::storage::{PgNewsRepository, PgTransactionManager};

    impl AppState {
        /// Creates AppState with PostgreSQL storage and Redis cache.
        pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
            let pool = connect(&config.database_url, config.database_max_connections).await?;
            let repository = Arc::new(PgNewsRepository::new(pool.clone()));
            let transactions = Arc::new(PgTransactionManager::new(pool));
            let cache = Arc::new(RedisCache::new(&config.redis_url).await?);

            let service = NewsService::new(repository, transactions, cache, config.cache_ttl());

            Ok(Self::build(Arc::new(service)))
        }
    }
}

// ============================================================================
// Test support - provides Default implementation for unit tests
// ============================================================================
