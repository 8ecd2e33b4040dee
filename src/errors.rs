use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::{DomainError, ErrorKind};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(e) => match e.kind() {
                kind if kind.is_validation() => StatusCode::BAD_REQUEST,
                ErrorKind::BookLookupFailed => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Domain(e) if e.kind().is_validation() => {
                HttpResponse::build(status).json(serde_json::json!({
                    "error": self.to_string(),
                    "kind": e.kind().as_str(),
                }))
            }
            AppError::Domain(e) => {
                log::error!("{}", e);
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "Internal server error",
                    "kind": e.kind().as_str(),
                }))
            }
            AppError::Internal(msg) => {
                log::error!("{}", msg);
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "Internal server error"
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{BookLookupError, RepositoryError};
    use actix_web::ResponseError;

    #[test]
    fn validation_errors_return_400() {
        for err in [
            DomainError::EmptyOrder,
            DomainError::InvalidBookId(0),
            DomainError::InvalidQuantity {
                book_id: 1,
                quantity: 0,
            },
            DomainError::DuplicateBookInOrder(1),
        ] {
            let resp = AppError::from(err).error_response();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn book_lookup_failure_returns_502() {
        let err: AppError = DomainError::BookLookupFailed(BookLookupError::NotFound(9)).into();
        assert_eq!(err.error_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn persistence_failures_return_500() {
        let save: AppError =
            DomainError::OrderPersistenceFailed(RepositoryError::Storage("x".into())).into();
        let read: AppError =
            DomainError::OrderHistoryUnavailable(RepositoryError::Storage("x".into())).into();
        assert_eq!(
            save.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            read.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_error_returns_500() {
        let err = AppError::Internal("something went wrong".to_string());
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn domain_display_is_passed_through() {
        let err: AppError = DomainError::EmptyOrder.into();
        assert_eq!(err.to_string(), "invalid empty books");
    }

    #[test]
    fn internal_error_display() {
        assert_eq!(
            AppError::Internal("msg".to_string()).to_string(),
            "Internal error: msg"
        );
    }
}
