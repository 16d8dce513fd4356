use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failure kinds a handler can surface. The upstream API contract collapses
/// everything into status 400 with an `{"error": ...}` body, so the mapping
/// below does the same; the variants still keep the kinds distinct in code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("email already exists")]
    EmailExists,

    #[error("user not found")]
    UserNotFound,

    #[error("{0}")]
    Db(#[from] sea_orm::DbErr),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Db(ref err) = self {
            tracing::error!("Database error: {:?}", err);
        }

        (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
