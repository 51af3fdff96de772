//! PostgreSQL repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use newsroom_core::news::News;
use newsroom_core::storage::{ListQuery, NewsPage, NewsRepository, RepositoryError, Result};

use super::conversions::{assemble_page, build_list_filter, rows_to_blocks, BlockRow, NewsRow};
use super::error::map_sqlx_error;
use super::schema::{
    DELETE_BLOCKS_BY_NEWS, DELETE_NEWS, INSERT_BLOCK, INSERT_NEWS, NEWS_COLUMNS,
    SELECT_BLOCKS_BY_NEWS, SELECT_BLOCKS_BY_NEWS_IDS, SELECT_NEWS_BY_ID, UPDATE_NEWS,
};
use super::session::PgSession;

/// News repository backed by PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgNewsRepository {
    pool: PgPool,
}

impl PgNewsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Inserts every block of `news` in position order, writing back the store
/// assigned fields.
async fn insert_blocks(
    conn: &mut PgConnection,
    news: &mut News,
    operation: &'static str,
) -> Result<()> {
    let news_id = news.id;
    news.content.sort_by_key(|block| block.position);

    for block in &mut news.content {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(INSERT_BLOCK)
            .bind(news_id)
            .bind(block.block_type.as_str())
            .bind(&block.content)
            .bind(block.position)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, operation))?;

        block.id = id;
        block.news_id = news_id;
        block.created_at = created_at;
    }

    Ok(())
}

/// Loads the row and its blocks over one connection.
async fn load_news(conn: &mut PgConnection, id: i64, operation: &'static str) -> Result<News> {
    let row = sqlx::query_as::<_, NewsRow>(SELECT_NEWS_BY_ID)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, operation))?
        .ok_or_else(|| RepositoryError::news_not_found(id))?;

    let blocks = sqlx::query_as::<_, BlockRow>(SELECT_BLOCKS_BY_NEWS)
        .bind(id)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| map_sqlx_error(e, operation))?;

    Ok(row.into_news(rows_to_blocks(blocks)?))
}

#[async_trait]
impl NewsRepository for PgNewsRepository {
    type Tx = PgSession;

    async fn create(&self, tx: &mut Self::Tx, news: &mut News) -> Result<()> {
        const OP: &str = "NewsRepository.create";
        let conn = tx.connection()?;

        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(INSERT_NEWS)
            .bind(&news.title)
            .bind(&news.category)
            .bind(news.start_time)
            .bind(news.end_time)
            .fetch_one(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, OP))?;

        news.id = id;
        news.created_at = created_at;

        insert_blocks(conn, news, OP).await?;

        tracing::debug!(news_id = id, blocks = news.content.len(), "Inserted news");
        Ok(())
    }

    async fn get_by_id(&self, id: i64) -> Result<News> {
        const OP: &str = "NewsRepository.get_by_id";

        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error(e, OP))?;

        load_news(&mut conn, id, OP).await
    }

    async fn get_by_id_in(&self, tx: &mut Self::Tx, id: i64) -> Result<News> {
        load_news(tx.connection()?, id, "NewsRepository.get_by_id_in").await
    }

    async fn update(&self, tx: &mut Self::Tx, news: &mut News) -> Result<()> {
        const OP: &str = "NewsRepository.update";
        let conn = tx.connection()?;

        let result = sqlx::query(UPDATE_NEWS)
            .bind(&news.title)
            .bind(&news.category)
            .bind(news.start_time)
            .bind(news.end_time)
            .bind(news.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, OP))?;

        if result.rows_affected() == 0 {
            tracing::warn!(news_id = news.id, "Update matched no rows");
            return Err(RepositoryError::news_not_found(news.id));
        }

        sqlx::query(DELETE_BLOCKS_BY_NEWS)
            .bind(news.id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, OP))?;

        insert_blocks(conn, news, OP).await?;

        tracing::debug!(news_id = news.id, blocks = news.content.len(), "Updated news");
        Ok(())
    }

    async fn delete(&self, tx: &mut Self::Tx, id: i64) -> Result<()> {
        const OP: &str = "NewsRepository.delete";
        let conn = tx.connection()?;

        let result = sqlx::query(DELETE_NEWS)
            .bind(id)
            .execute(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error(e, OP))?;

        if result.rows_affected() == 0 {
            tracing::warn!(news_id = id, "Delete matched no rows");
            return Err(RepositoryError::news_not_found(id));
        }

        tracing::debug!(news_id = id, "Deleted news");
        Ok(())
    }

    async fn list(&self, query: &ListQuery) -> Result<NewsPage> {
        const OP: &str = "NewsRepository.list";
        let (where_clause, binds, next_idx) = build_list_filter(query);

        let count_sql = format!("SELECT COUNT(*) FROM news n {where_clause}");
        let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
        for value in &binds {
            count_q = count_q.bind(value);
        }
        let total_count = count_q
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, OP))?;

        let direction = query.sort_direction.as_sql();
        let data_sql = format!(
            "SELECT {NEWS_COLUMNS} FROM news n {where_clause} \
             ORDER BY {column} {direction}, n.id {direction} \
             LIMIT ${limit_idx} OFFSET ${offset_idx}",
            column = query.sort_field.column(),
            limit_idx = next_idx,
            offset_idx = next_idx + 1,
        );
        let mut data_q = sqlx::query_as::<_, NewsRow>(&data_sql);
        for value in &binds {
            data_q = data_q.bind(value);
        }
        let rows = data_q
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, OP))?;

        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let blocks = if ids.is_empty() {
            Vec::new()
        } else {
            sqlx::query_as::<_, BlockRow>(SELECT_BLOCKS_BY_NEWS_IDS)
                .bind(&ids)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(e, OP))?
        };

        let items = assemble_page(rows, blocks)?;
        Ok(NewsPage { items, total_count })
    }
}
