//! Outbound read-models. `NewsView` is also the value stored in the cache.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{is_visible_at, BlockType, ContentBlock, News};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlockView {
    pub id: i64,
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    pub position: i32,
}

impl From<&ContentBlock> for ContentBlockView {
    fn from(block: &ContentBlock) -> Self {
        Self {
            id: block.id,
            block_type: block.block_type,
            content: block.content.clone(),
            position: block.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsView {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub content_blocks: Vec<ContentBlockView>,
    pub created_at: DateTime<Utc>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

impl NewsView {
    /// Re-derives visibility from the window carried by the view.
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        is_visible_at(self.start_time, self.end_time, now)
    }
}

impl From<&News> for NewsView {
    fn from(news: &News) -> Self {
        Self {
            id: news.id,
            title: news.title.clone(),
            category: news.category.clone(),
            content_blocks: news.content.iter().map(ContentBlockView::from).collect(),
            created_at: news.created_at,
            start_time: news.start_time,
            end_time: news.end_time,
        }
    }
}

/// One page of the listing. `total_count` counts every row matching the
/// filters, including items hidden by the visibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListView {
    pub items: Vec<NewsView>,
    pub total_count: i64,
    pub page: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAck {
    pub id: i64,
    pub updated_at: DateTime<Utc>,
    pub message: String,
}

impl UpdateAck {
    pub fn new(id: i64, updated_at: DateTime<Utc>) -> Self {
        Self {
            id,
            updated_at,
            message: "News updated successfully".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    pub id: i64,
    pub message: String,
}

impl DeleteAck {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            message: "News deleted successfully".to_string(),
        }
    }
}
