use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use newsroom_core::news::ValidationError;
use newsroom_core::storage::{repository_error_to_status_code, RepositoryError};

/// Handler error. Anything convertible into `anyhow::Error` can be returned
/// with `?`; the status code is recovered by downcasting.
pub struct AppError(pub anyhow::Error);

/// JSON body sent for every failed request.
#[derive(Debug, Serialize)]
struct ErrorBody {
    status: u16,
    message: String,
    error: String,
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        if let Some(repo_error) = self.0.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            return StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        }

        if self.0.is::<ValidationError>()
            || self.0.is::<JsonRejection>()
            || self.0.is::<QueryRejection>()
            || self.0.is::<PathRejection>()
        {
            return StatusCode::BAD_REQUEST;
        }

        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %error, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %error, "API error");
        }

        let body = ErrorBody {
            status: status.as_u16(),
            message: status
                .canonical_reason()
                .unwrap_or("Unknown Error")
                .to_string(),
            error,
        };

        (status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = AppError::from(RepositoryError::news_not_found(3)).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["status"], 404);
        assert_eq!(json["message"], "Not Found");
        assert!(json["error"].as_str().unwrap().contains('3'));
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let response = AppError::from(ValidationError::InvalidPage).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["status"], 400);
    }

    #[tokio::test]
    async fn test_connection_failure_maps_to_503() {
        let err = RepositoryError::ConnectionFailed("pool timed out".to_string());
        let response = AppError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_error_maps_to_500() {
        let response = AppError(anyhow::anyhow!("boom")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "boom");
    }
}
