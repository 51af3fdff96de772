mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{CacheError, Result};
pub use keys::news_key;
pub use serialization::{deserialize_news, serialize_news, SerializationError};
pub use traits::Cache;
