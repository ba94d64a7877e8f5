use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Show {show_id} references missing {entity} {id}")]
    DanglingReference {
        show_id: i32,
        entity: &'static str,
        id: i32,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => {
                Self::StoreUnavailable(err.to_string())
            }
            DbErr::RecordNotFound(msg) => Self::NotFound(msg),
            other => Self::Database(other),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Database(_)
            | Self::DanglingReference { .. }
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to end users. Server-side failures are logged and
    /// replaced with a generic message.
    pub fn public_message(&self) -> String {
        match self {
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Database error occurred".to_string()
            }
            Self::StoreUnavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                "The database is currently unavailable".to_string()
            }
            Self::DanglingReference { .. } => {
                tracing::error!("Data integrity violation: {}", self);
                "Data integrity error".to_string()
            }
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                msg.clone()
            }
            Self::NotFound(msg) | Self::Validation(msg) | Self::InvalidArgument(msg) => {
                msg.clone()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.public_message();

        let body = Json(json!({
            "error": error_message,
            "details": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_map_to_store_unavailable() {
        let err: AppError = DbErr::Conn(sea_orm::RuntimeErr::Internal("refused".into())).into();
        assert!(matches!(err, AppError::StoreUnavailable(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let err: AppError = DbErr::RecordNotFound("venue 9".to_string()).into();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_dangling_reference_is_server_error() {
        let err = AppError::DanglingReference {
            show_id: 3,
            entity: "artist",
            id: 7,
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Show 3 references missing artist 7");
    }

    #[test]
    fn test_validation_message_is_public() {
        let err = AppError::Validation("Name is required".to_string());
        assert_eq!(err.public_message(), "Name is required");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
