//! Inbound request types for news operations.
//!
//! Pure data with no I/O. The HTTP layer deserializes these, validates them
//! with [`super::validation`] and hands them to the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{BlockType, ContentBlock, News};
use crate::serde::{deserialize_flag, deserialize_optional_string};

/// One block in a create or update payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlockInput {
    #[serde(rename = "type")]
    pub block_type: BlockType,
    pub content: String,
    #[serde(default)]
    pub position: i32,
}

impl ContentBlockInput {
    pub fn new(block_type: BlockType, content: impl Into<String>, position: i32) -> Self {
        Self {
            block_type,
            content: content.into(),
            position,
        }
    }

    pub fn into_block(self) -> ContentBlock {
        ContentBlock::new(self.block_type, self.content, self.position)
    }
}

/// Request payload for creating a news item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateNewsRequest {
    pub title: String,
    pub category: String,
    #[serde(default, alias = "content")]
    pub content_blocks: Vec<ContentBlockInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl CreateNewsRequest {
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            content_blocks: Vec::new(),
            start_time: None,
            end_time: None,
        }
    }

    pub fn with_block(mut self, block: ContentBlockInput) -> Self {
        self.content_blocks.push(block);
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

    /// Builds the unsaved aggregate described by this request.
    pub fn into_news(self) -> News {
        let blocks = self
            .content_blocks
            .into_iter()
            .map(ContentBlockInput::into_block)
            .collect();

        News::new(self.title, self.category)
            .with_blocks(blocks)
            .with_window(self.start_time, self.end_time)
    }
}

/// Request payload for updating a news item. Absent fields keep their stored
/// values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateNewsRequest {
    /// Taken from the path, never from the body.
    #[serde(default, skip)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, alias = "content", skip_serializing_if = "Option::is_none")]
    pub content_blocks: Option<Vec<ContentBlockInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl UpdateNewsRequest {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_blocks(mut self, blocks: Vec<ContentBlockInput>) -> Self {
        self.content_blocks = Some(blocks);
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

    /// Merges the present fields into `news`.
    ///
    /// The block set is replaced only when a non-empty list is supplied.
    /// Otherwise the loaded blocks are kept and detached, since the store
    /// rewrites the whole set on every update.
    pub fn apply_to(self, news: &mut News) {
        if let Some(title) = self.title {
            news.title = title;
        }
        if let Some(category) = self.category {
            news.category = category;
        }
        if let Some(start_time) = self.start_time {
            news.start_time = Some(start_time);
        }
        if let Some(end_time) = self.end_time {
            news.end_time = Some(end_time);
        }

        match self.content_blocks {
            Some(blocks) if !blocks.is_empty() => {
                news.content = blocks
                    .into_iter()
                    .map(ContentBlockInput::into_block)
                    .collect();
            }
            _ => {
                news.content = std::mem::take(&mut news.content)
                    .into_iter()
                    .map(ContentBlock::detached)
                    .collect();
            }
        }
    }
}

/// Request for a single news item. Deserializes from the query string; the
/// id comes from the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetNewsRequest {
    #[serde(default, skip)]
    pub id: i64,
    #[serde(
        default = "default_check_visibility",
        deserialize_with = "deserialize_flag"
    )]
    pub check_visibility: bool,
}

impl GetNewsRequest {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            check_visibility: true,
        }
    }

    pub fn unchecked(id: i64) -> Self {
        Self {
            id,
            check_visibility: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteNewsRequest {
    pub id: i64,
}

/// Query parameters for the paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListNewsRequest {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort_by: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub sort_dir: Option<String>,
    #[serde(
        default = "default_check_visibility",
        deserialize_with = "deserialize_flag"
    )]
    pub check_visibility: bool,
}

impl Default for ListNewsRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
            search: None,
            category: None,
            sort_by: None,
            sort_dir: None,
            check_visibility: default_check_visibility(),
        }
    }
}

impl ListNewsRequest {
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_dir: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_dir = Some(sort_dir.into());
        self
    }

    pub fn with_check_visibility(mut self, check_visibility: bool) -> Self {
        self.check_visibility = check_visibility;
        self
    }
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    10
}

fn default_check_visibility() -> bool {
    true
}
