use action_utils::MessageResponse;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::store::StoreError;

/// Every failure is answered with a `{ "message": ... }` body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request was rejected, answered with 400.
    #[error("{0}")]
    Validation(String),
    /// The store failed, answered with 500.
    #[error("{0}")]
    Persistence(#[from] StoreError),
}

impl ApiError {
    /// Create and update report every failure as a bad request, store
    /// failures included.
    pub fn as_bad_request(self) -> Self {
        match self {
            ApiError::Persistence(e) => ApiError::Validation(e.to_string()),
            other => other,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
