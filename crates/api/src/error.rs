//! HTTP error mapping.
//!
//! Every failure a handler can produce funnels into [`ApiError`], which
//! renders as `{"error": {"message": ..., "status": ...}}` with a fixed
//! status per kind.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use auth::AuthError;
use db::DbError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The request could not be parsed into the expected shape.
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Db(DbError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Db(DbError::BadRequest(_)) | Self::Db(DbError::Query(_)) => StatusCode::BAD_REQUEST,
            Self::Db(DbError::Sqlx(_)) | Self::Db(DbError::Migration(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Auth(AuthError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            error!("request failed: {self}");
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        };

        let body = json!({
            "error": {
                "message": message,
                "status": status.as_u16(),
            }
        });
        (status, Json(body)).into_response()
    }
}
