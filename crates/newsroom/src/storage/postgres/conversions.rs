//! Row types and their conversion into domain aggregates.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use newsroom_core::news::{BlockType, ContentBlock, News};
use newsroom_core::storage::{ListQuery, RepositoryError, Result};

/// Row of the `news` table.
#[derive(Debug, sqlx::FromRow)]
pub struct NewsRow {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl NewsRow {
    pub fn into_news(self, content: Vec<ContentBlock>) -> News {
        News {
            id: self.id,
            title: self.title,
            category: self.category,
            content,
            created_at: self.created_at,
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

/// Row of the `content_blocks` table.
#[derive(Debug, sqlx::FromRow)]
pub struct BlockRow {
    pub id: i64,
    pub news_id: i64,
    #[sqlx(rename = "type")]
    pub block_type: String,
    pub content: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<BlockRow> for ContentBlock {
    type Error = RepositoryError;

    fn try_from(row: BlockRow) -> Result<Self> {
        let block_type: BlockType = row.block_type.parse().map_err(|_| {
            RepositoryError::InvalidData(format!(
                "content block {} has unknown type '{}'",
                row.id, row.block_type
            ))
        })?;

        Ok(ContentBlock {
            id: row.id,
            news_id: row.news_id,
            block_type,
            content: row.content,
            position: row.position,
            created_at: row.created_at,
        })
    }
}

/// Converts block rows, preserving their order.
pub fn rows_to_blocks(rows: Vec<BlockRow>) -> Result<Vec<ContentBlock>> {
    rows.into_iter().map(ContentBlock::try_from).collect()
}

/// Attaches batch-loaded blocks to their news rows. Blocks keep the order in
/// which they were read; rows without blocks get an empty list.
pub fn assemble_page(rows: Vec<NewsRow>, blocks: Vec<BlockRow>) -> Result<Vec<News>> {
    let mut by_news: HashMap<i64, Vec<ContentBlock>> = HashMap::new();
    for row in blocks {
        let block = ContentBlock::try_from(row)?;
        by_news.entry(block.news_id).or_default().push(block);
    }

    Ok(rows
        .into_iter()
        .map(|row| {
            let content = by_news.remove(&row.id).unwrap_or_default();
            row.into_news(content)
        })
        .collect())
}

/// Escapes `LIKE` wildcards so the search term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Builds the `WHERE` clause of the listing from the filters that are set.
///
/// Returns the clause (empty when no filter applies), the values to bind in
/// order and the next free placeholder index.
pub fn build_list_filter(query: &ListQuery) -> (String, Vec<String>, u32) {
    let mut conditions = Vec::new();
    let mut binds: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;

    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        conditions.push(format!("n.title ILIKE ${bind_idx} ESCAPE '\\'"));
        binds.push(format!("%{}%", escape_like(search)));
        bind_idx += 1;
    }

    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        conditions.push(format!("n.category = ${bind_idx}"));
        binds.push(category.to_string());
        bind_idx += 1;
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, binds, bind_idx)
}
