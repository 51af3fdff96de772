//! In-memory storage backend for testing.
//!
//! Committed aggregates live in a `HashMap` behind `Arc<RwLock<_>>`. Writes
//! are staged on a [`MemorySession`] and applied in one step on commit, so a
//! failed unit of work leaves nothing behind.
//!
//! # Example
//!
//! ```rust,ignore
//! use newsroom::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! // Use repo for testing...
//! ```

mod repository;

pub use repository::{InMemoryRepository, MemorySession};
