//! Pure functions for serializing/deserializing news views to/from cache bytes.
//!
//! Cache values are JSON so they stay readable with `redis-cli GET`.

use crate::news::NewsView;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a news view to JSON bytes.
pub fn serialize_news(view: &NewsView) -> Result<Vec<u8>> {
    serde_json::to_vec(view).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a news view.
pub fn deserialize_news(bytes: &[u8]) -> Result<NewsView> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news::{ContentBlock, News};
    use chrono::{TimeZone, Utc};

    fn sample_view() -> NewsView {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        let mut text = ContentBlock::text("Lead paragraph", 0);
        text.id = 1;
        let mut link = ContentBlock::link("https://example.com", 1);
        link.id = 2;
        let news = News::new("Election results", "politics")
            .with_id(9)
            .with_created_at(ts)
            .with_window(Some(ts), None)
            .with_blocks(vec![text, link]);
        NewsView::from(&news)
    }

    #[test]
    fn test_roundtrip_news() {
        let view = sample_view();
        let bytes = serialize_news(&view).expect("serialize should succeed");
        let deserialized = deserialize_news(&bytes).expect("deserialize should succeed");
        assert_eq!(view, deserialized);
    }

    #[test]
    fn test_deserialize_news_malformed_bytes() {
        let result = deserialize_news(b"not valid json");
        assert!(matches!(
            result,
            Err(SerializationError::DeserializeFailed(_))
        ));
    }

    #[test]
    fn test_deserialize_news_wrong_shape() {
        let result = deserialize_news(b"[1, 2, 3]");
        assert!(result.is_err());
    }
}
