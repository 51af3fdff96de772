//! Redis cache implementation.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;

use newsroom_core::cache::{Cache, CacheError, Result};

use super::error::map_redis_error;

/// Upper bound for connecting and for every single command. A stalled server
/// turns into `CacheError::ConnectionFailed`, which callers treat as a miss.
const OPERATION_TIMEOUT: Duration = Duration::from_millis(500);

/// Redis cache backend using connection manager for pooling.
///
/// The manager is cheap to clone and reconnects on its own, so every call
/// works on a clone instead of holding a lock.
pub struct RedisCache {
    conn: ConnectionManager,
    timeout: Duration,
}

impl RedisCache {
    /// Creates a new Redis cache connection.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::ConnectionFailed` if the connection cannot be
    /// established within the operation timeout.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let config = ConnectionManagerConfig::new()
            .set_connection_timeout(OPERATION_TIMEOUT)
            .set_response_timeout(OPERATION_TIMEOUT);
        let conn = bounded(
            OPERATION_TIMEOUT,
            ConnectionManager::new_with_config(client, config),
        )
        .await?;

        Ok(Self {
            conn,
            timeout: OPERATION_TIMEOUT,
        })
    }
}

/// Runs one Redis call with a deadline.
async fn bounded<T, F>(limit: Duration, call: F) -> Result<T>
where
    F: Future<Output = redis::RedisResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(map_redis_error),
        Err(_) => Err(CacheError::ConnectionFailed(format!(
            "Redis did not answer within {}ms",
            limit.as_millis()
        ))),
    }
}

#[async_trait]
impl Cache for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, conn.get::<_, Option<Vec<u8>>>(key)).await
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.conn.clone();

        match ttl {
            Some(duration) => {
                // SET EX rejects 0, round sub-second TTLs up.
                let seconds = duration.as_secs().max(1);
                bounded(self.timeout, conn.set_ex::<_, _, ()>(key, value, seconds)).await
            }
            None => bounded(self.timeout, conn.set::<_, _, ()>(key, value)).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        bounded(self.timeout, conn.del::<_, ()>(key)).await
    }
}
