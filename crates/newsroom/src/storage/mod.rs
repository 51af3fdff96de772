//! Storage backend implementations.
//!
//! This module provides concrete implementations of the repository and
//! transaction traits defined in `newsroom_core::storage`. The implementation
//! is selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): In-process store with staged transactions
//! - `postgres`: PostgreSQL backend using `sqlx`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! # Examples
//!
//! Build with PostgreSQL:
//! ```bash
//! cargo build -p newsroom --no-default-features --features postgres,memory
//! ```

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "postgres", feature = "inmemory"))]
compile_error!(
    "Features 'postgres' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "postgres", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'postgres' feature. \
    Example: cargo build -p newsroom --features postgres"
);

#[cfg(any(test, feature = "inmemory"))]
pub mod inmemory;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "postgres")]
pub use postgres::{PgNewsRepository, PgTransactionManager};
