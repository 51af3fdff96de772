//! Pure functions for mapping repository errors to HTTP status codes.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `InvalidData` -> 400 (Bad Request)
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `NoTransaction`, `QueryFailed`, `Serialization` -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use newsroom_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::news_not_found(7);
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::InvalidData(_) => 400,
        RepositoryError::ConnectionFailed(_) => 503,
        RepositoryError::NoTransaction => 500,
        RepositoryError::QueryFailed { .. } => 500,
        RepositoryError::Serialization(_) => 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = RepositoryError::news_not_found(1);
        assert_eq!(repository_error_to_status_code(&error), 404);
    }

    #[test]
    fn test_invalid_data_maps_to_400() {
        let error = RepositoryError::InvalidData("bad block type".to_string());
        assert_eq!(repository_error_to_status_code(&error), 400);
    }

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = RepositoryError::ConnectionFailed("database connection timeout".to_string());
        assert_eq!(repository_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_no_transaction_maps_to_500() {
        assert_eq!(
            repository_error_to_status_code(&RepositoryError::NoTransaction),
            500
        );
    }

    #[test]
    fn test_query_failed_maps_to_500() {
        let error = RepositoryError::query_failed("NewsRepository.list", "syntax");
        assert_eq!(repository_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_serialization_maps_to_500() {
        let error = RepositoryError::Serialization("failed to decode row".to_string());
        assert_eq!(repository_error_to_status_code(&error), 500);
    }
}
