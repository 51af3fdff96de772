//! Redis cache backend implementation.
//!
//! Provides a shared cache using Redis for multi-instance deployments.
//! Cross-instance coherence beyond key expiry and explicit deletes is not
//! attempted.

mod cache;
mod error;

pub use cache::RedisCache;
