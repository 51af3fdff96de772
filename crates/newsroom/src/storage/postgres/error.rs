//! PostgreSQL error mapping.
//!
//! Maps `sqlx::Error` to `RepositoryError` from `newsroom_core::storage`.

use newsroom_core::storage::RepositoryError;

/// SQLSTATE for a foreign key violation.
const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE for a check constraint violation.
const CHECK_VIOLATION: &str = "23514";
/// SQLSTATE for a not-null violation.
const NOT_NULL_VIOLATION: &str = "23502";

/// Maps a sqlx error to a RepositoryError, tagging it with the operation.
///
/// # Error Mapping
///
/// - Pool and I/O errors → `RepositoryError::ConnectionFailed`
/// - Foreign key / check / not-null violations → `RepositoryError::InvalidData`
/// - Row decode errors → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
pub fn map_sqlx_error(err: sqlx::Error, operation: &'static str) -> RepositoryError {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            RepositoryError::ConnectionFailed(format!("{operation}: {err}"))
        }
        sqlx::Error::Database(db_err)
            if matches!(
                db_err.code().as_deref(),
                Some(FOREIGN_KEY_VIOLATION | CHECK_VIOLATION | NOT_NULL_VIOLATION)
            ) =>
        {
            RepositoryError::InvalidData(format!("{operation}: {}", db_err.message()))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::Serialization(format!("{operation}: {err}"))
        }
        _ => RepositoryError::query_failed(operation, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_connection_failure() {
        let mapped = map_sqlx_error(sqlx::Error::PoolTimedOut, "NewsRepository.list");
        assert!(matches!(mapped, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_row_not_found_is_query_failure() {
        let mapped = map_sqlx_error(sqlx::Error::RowNotFound, "NewsRepository.create");
        assert_eq!(
            mapped,
            RepositoryError::query_failed(
                "NewsRepository.create",
                sqlx::Error::RowNotFound.to_string()
            )
        );
    }

    #[test]
    fn test_decode_error_is_serialization() {
        let err = sqlx::Error::Decode("bad timestamp".into());
        let mapped = map_sqlx_error(err, "NewsRepository.get_by_id");
        assert!(matches!(mapped, RepositoryError::Serialization(_)));
    }
}
