//! PostgreSQL schema definitions and SQL query constants.
//!
//! Pure data, no I/O, except for [`bootstrap`] which applies the schema.

use newsroom_core::storage::Result;
use sqlx::PgPool;

use super::error::map_sqlx_error;

/// Idempotent schema statements, applied in order at startup.
pub const CREATE_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS news (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        category TEXT NOT NULL,
        start_time TIMESTAMPTZ NULL,
        end_time TIMESTAMPTZ NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS content_blocks (
        id BIGSERIAL PRIMARY KEY,
        news_id BIGINT NOT NULL REFERENCES news(id) ON DELETE CASCADE,
        type TEXT NOT NULL CHECK (type IN ('text', 'link')),
        content TEXT NOT NULL,
        position INTEGER NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_content_blocks_news_position ON content_blocks(news_id, position)",
    "CREATE INDEX IF NOT EXISTS idx_news_category ON news(category)",
    "CREATE INDEX IF NOT EXISTS idx_news_created_at ON news(created_at)",
];

pub const INSERT_NEWS: &str = r#"
INSERT INTO news (title, category, start_time, end_time)
VALUES ($1, $2, $3, $4)
RETURNING id, created_at
"#;

pub const INSERT_BLOCK: &str = r#"
INSERT INTO content_blocks (news_id, type, content, position)
VALUES ($1, $2, $3, $4)
RETURNING id, created_at
"#;

pub const SELECT_NEWS_BY_ID: &str = r#"
SELECT n.id, n.title, n.category, n.start_time, n.end_time, n.created_at
FROM news n
WHERE n.id = $1
"#;

pub const SELECT_BLOCKS_BY_NEWS: &str = r#"
SELECT id, news_id, type, content, position, created_at
FROM content_blocks
WHERE news_id = $1
ORDER BY position, id
"#;

pub const SELECT_BLOCKS_BY_NEWS_IDS: &str = r#"
SELECT id, news_id, type, content, position, created_at
FROM content_blocks
WHERE news_id = ANY($1)
ORDER BY news_id, position, id
"#;

pub const UPDATE_NEWS: &str = r#"
UPDATE news
SET title = $1, category = $2, start_time = $3, end_time = $4
WHERE id = $5
"#;

pub const DELETE_BLOCKS_BY_NEWS: &str = "DELETE FROM content_blocks WHERE news_id = $1";

pub const DELETE_NEWS: &str = "DELETE FROM news WHERE id = $1";

pub const SET_READ_COMMITTED: &str = "SET TRANSACTION ISOLATION LEVEL READ COMMITTED";

/// Column list shared by the listing queries.
pub const NEWS_COLUMNS: &str = "n.id, n.title, n.category, n.start_time, n.end_time, n.created_at";

/// Creates the tables and indexes if they do not exist yet.
pub async fn bootstrap(pool: &PgPool) -> Result<()> {
    for statement in CREATE_STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error(e, "schema.bootstrap"))?;
    }
    tracing::debug!("Schema bootstrap complete");
    Ok(())
}
