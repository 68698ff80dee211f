use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

use crate::store::StoreError;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Invalid id: {:?}", _0)]
    InvalidId(String),

    #[display(fmt = "Invalid request body: {}", _0)]
    InvalidBody(String),

    #[display(fmt = "Employee {} not found", _0)]
    NotFound(i64),

    #[display(fmt = "Method {} not allowed", _0)]
    MethodNotAllowed(String),

    #[display(fmt = "Something went wrong, Contact with system admin")]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Store(other),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidId(_) | ApiError::InvalidBody(_) | ApiError::MethodNotAllowed(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Store(e) = self {
            error!(error = %e, "Employee store operation failed");
        }

        HttpResponse::build(self.status_code()).json(json!({
            "message": self.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_errors_to_status_codes() {
        assert_eq!(
            ApiError::InvalidId("abc".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::MethodNotAllowed("PATCH".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(StoreError::NotFound(3)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(StoreError::Database(sqlx::Error::PoolTimedOut)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_failures_do_not_leak_details() {
        let err = ApiError::from(StoreError::Database(sqlx::Error::PoolClosed));
        assert_eq!(
            err.to_string(),
            "Something went wrong, Contact with system admin"
        );
    }
}
