use axum::http::StatusCode;
use sea_orm::SqlErr;

use crate::db::dao::DaoLayerError;

/// Failures surfaced to HTTP clients. The payload is the client-facing
/// message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Picks the variant matching an HTTP error status.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::not_found(message),
            StatusCode::CONFLICT => Self::conflict(message),
            _ if status.is_client_error() => Self::bad_request(message),
            _ => Self::internal(message),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest(message)
            | Self::NotFound(message)
            | Self::Conflict(message)
            | Self::Internal(message) => message,
        }
    }
}

impl From<DaoLayerError> for AppError {
    fn from(err: DaoLayerError) -> Self {
        match &err {
            DaoLayerError::NotFound { .. } => AppError::not_found(err.to_string()),
            DaoLayerError::InvalidPosition { .. } => AppError::bad_request(err.to_string()),
            DaoLayerError::Db(db_err) => match db_err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict(err.to_string()),
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    AppError::bad_request(err.to_string())
                }
                _ => AppError::internal(err.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use sea_orm::DbErr;
    use uuid::Uuid;

    use super::AppError;
    use crate::db::dao::DaoLayerError;

    #[test]
    fn maps_dao_errors_to_app_errors() {
        let not_found = AppError::from(DaoLayerError::NotFound {
            entity: "Task",
            id: Uuid::nil(),
        });
        assert!(matches!(not_found, AppError::NotFound(_)));
        assert_eq!(
            not_found.message(),
            "Task not found (id=00000000-0000-0000-0000-000000000000)"
        );

        let invalid = AppError::from(DaoLayerError::InvalidPosition {
            position: 9,
            max: 6,
        });
        assert!(matches!(invalid, AppError::BadRequest(_)));

        let db = AppError::from(DaoLayerError::Db(DbErr::Custom("boom".to_string())));
        assert!(matches!(db, AppError::Internal(_)));
        assert!(db.message().contains("boom"));
    }

    #[test]
    fn status_round_trips_through_variants() {
        for status in [
            StatusCode::BAD_REQUEST,
            StatusCode::NOT_FOUND,
            StatusCode::CONFLICT,
            StatusCode::INTERNAL_SERVER_ERROR,
        ] {
            assert_eq!(AppError::from_status(status, "x").status(), status);
        }
        assert_eq!(
            AppError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from_status(StatusCode::BAD_GATEWAY, "x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
