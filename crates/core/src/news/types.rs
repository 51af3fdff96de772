use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// The closed set of content block kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockType {
    Text,
    Link,
}

impl BlockType {
    /// Returns the tag stored in the `content_blocks.type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Text => "text",
            BlockType::Link => "link",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(BlockType::Text),
            "link" => Ok(BlockType::Link),
            other => Err(ValidationError::UnknownBlockType(other.to_string())),
        }
    }
}

/// A single typed piece of a news item's body.
///
/// `id`, `news_id` and `created_at` are assigned by the store; before the block
/// is persisted they hold zero values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub id: i64,
    pub news_id: i64,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl ContentBlock {
    /// Creates an unsaved block.
    pub fn new(block_type: BlockType, content: impl Into<String>, position: i32) -> Self {
        Self {
            id: 0,
            news_id: 0,
            block_type,
            content: content.into(),
            position,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    pub fn text(content: impl Into<String>, position: i32) -> Self {
        Self::new(BlockType::Text, content, position)
    }

    pub fn link(content: impl Into<String>, position: i32) -> Self {
        Self::new(BlockType::Link, content, position)
    }

    /// Clears the store-assigned fields so the block can be inserted again.
    pub fn detached(mut self) -> Self {
        self.id = 0;
        self.news_id = 0;
        self
    }
}

/// The news aggregate: a headline, a category, a visibility window and the
/// ordered content blocks it owns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub content: Vec<ContentBlock>,
    pub created_at: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl News {
    /// Creates an unsaved news item with no blocks and an unbounded window.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            category: category.into(),
            content: Vec::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = id;
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<ContentBlock>) -> Self {
        self.content = blocks;
        self
    }

    pub fn with_window(
        mut self,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_time = start_time;
        self.end_time = end_time;
        self
    }

    #[cfg(test)]
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Whether the item is visible at `now`.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        is_visible_at(self.start_time, self.end_time, now)
    }
}

/// Visibility window check. Both bounds are inclusive and a missing bound is
/// unbounded on that side.
pub fn is_visible_at(
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> bool {
    start_time.is_none_or(|start| now >= start) && end_time.is_none_or(|end| now <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_block_type_round_trips_through_str() {
        assert_eq!("text".parse::<BlockType>().unwrap(), BlockType::Text);
        assert_eq!("link".parse::<BlockType>().unwrap(), BlockType::Link);
        assert_eq!(BlockType::Link.as_str(), "link");
        assert_eq!(BlockType::Text.to_string(), "text");
    }

    #[test]
    fn test_block_type_rejects_unknown_tag() {
        let err = "image".parse::<BlockType>().unwrap_err();
        assert_eq!(err, ValidationError::UnknownBlockType("image".to_string()));
    }

    #[test]
    fn test_block_serializes_type_field() {
        let block = ContentBlock::link("https://example.com", 2);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "link");
        assert_eq!(json["position"], 2);
    }

    #[test]
    fn test_unbounded_window_is_always_visible() {
        assert!(is_visible_at(None, None, now()));
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let t = now();
        assert!(is_visible_at(Some(t), Some(t), t));
        assert!(!is_visible_at(Some(t + Duration::seconds(1)), None, t));
        assert!(!is_visible_at(None, Some(t - Duration::seconds(1)), t));
    }

    #[test]
    fn test_future_start_hides_news() {
        let news = News::new("Launch", "tech").with_window(Some(now() + Duration::hours(1)), None);
        assert!(!news.is_visible_at(now()));
        assert!(news.is_visible_at(now() + Duration::hours(2)));
    }

    #[test]
    fn test_detached_block_clears_store_ids() {
        let mut block = ContentBlock::text("body", 0);
        block.id = 7;
        block.news_id = 3;
        let detached = block.detached();
        assert_eq!(detached.id, 0);
        assert_eq!(detached.news_id, 0);
        assert_eq!(detached.content, "body");
    }

    #[test]
    fn test_new_news_has_no_store_id() {
        let news = News::new("Title", "cat");
        assert_eq!(news.id, 0);
        assert_eq!(news.clone().with_id(1).id, 1);
    }
}
