//! News CRUD handlers.
//!
//! Payloads are validated here before they reach the service; the service
//! owns transactions and caching.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use newsroom_core::news::{
    parse_news_id, validate_create, validate_list, validate_update, CreateNewsRequest,
    DeleteAck, DeleteNewsRequest, GetNewsRequest, ListNewsRequest, ListView, NewsView,
    UpdateAck, UpdateNewsRequest,
};

use crate::{handlers::AppError, state::AppState};

/// Create a news item (POST /api/news).
pub async fn create_news(
    State(state): State<AppState>,
    payload: Result<Json<CreateNewsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<NewsView>), AppError> {
    let Json(req) = payload?;
    tracing::debug!(title = %req.title, blocks = req.content_blocks.len(), "Received create news request");

    validate_create(&req)?;
    let view = state.news.create(req).await?;

    Ok((StatusCode::CREATED, Json(view)))
}

/// Get a news item by id (GET /api/news/{id}).
pub async fn get_news(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    query: Result<Query<GetNewsRequest>, QueryRejection>,
) -> Result<Json<NewsView>, AppError> {
    let id = parse_news_id(&raw_id)?;
    let Query(mut req) = query?;
    req.id = id;

    let view = state.news.get(req).await?;

    Ok(Json(view))
}

/// Update a news item (PUT /api/news/{id}).
pub async fn update_news(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateNewsRequest>, JsonRejection>,
) -> Result<Json<UpdateAck>, AppError> {
    let id = parse_news_id(&raw_id)?;
    let Json(mut req) = payload?;
    req.id = id;

    validate_update(&req)?;
    let ack = state.news.update(req).await?;

    Ok(Json(ack))
}

/// Delete a news item (DELETE /api/news/{id}).
pub async fn delete_news(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteAck>, AppError> {
    let id = parse_news_id(&raw_id)?;
    let ack = state.news.delete(DeleteNewsRequest { id }).await?;

    Ok(Json(ack))
}

/// List news with filters, sorting and pagination (GET /api/news).
pub async fn list_news(
    State(state): State<AppState>,
    query: Result<Query<ListNewsRequest>, QueryRejection>,
) -> Result<Json<ListView>, AppError> {
    let Query(req) = query?;

    validate_list(&req)?;
    let list = state.news.list(req).await?;

    Ok(Json(list))
}
