//! HTTP mapping for request failures.
//!
//! Every failure that reaches a handler is turned into a JSON `{"error": ...}`
//! body with one of three statuses.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::error::AdapterError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is missing a required parameter or could not be parsed.
    #[error("{0}")]
    BadRequest(String),
    /// The providers were reachable but had nothing to return.
    #[error("{0}")]
    NotFound(String),
    /// An upstream provider failed.
    #[error(transparent)]
    Upstream(#[from] AdapterError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

fn status_for(error: &ApiError) -> StatusCode {
    match error {
        ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        if let Self::Upstream(e) = self {
            error!("Upstream failure: {}", e);
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    #[case(ApiError::bad_request("Query parameter required"), StatusCode::BAD_REQUEST)]
    #[case(ApiError::not_found("Lyrics not found"), StatusCode::NOT_FOUND)]
    #[case(
        ApiError::from(AdapterError::not_found("no such album")),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    #[case(
        ApiError::from(AdapterError::network("timed out")),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn test_status_mapping(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let response = ApiError::not_found("No cover found").error_response();
        let body = to_bytes(response.into_body()).await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "error": "No cover found" }));
    }
}
