use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::{domain_error, ErrorCode};

pub struct ApiError(pub anyhow::Error);
pub type AppResult<T> = Result<T, ApiError>;

fn status_for(error_code: ErrorCode) -> StatusCode {
    match error_code {
        ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::DependencyFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match domain_error(&self.0) {
            Some(error) => {
                let body = match &error.detail {
                    Some(detail) => json!({ "message": error.user_feedback, "error": detail }),
                    None => json!({ "message": error.user_feedback }),
                };
                (status_for(error.error_code), Json(body)).into_response()
            }
            None => {
                let error = format!("{:#}", self.0);
                log::error!(error = error.as_str(); "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "Internal server error", "error": error })),
                )
                    .into_response()
            }
        }
    }
}

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
