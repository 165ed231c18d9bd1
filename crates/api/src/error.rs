//! HTTP error type and its JSON rendering.
//!
//! Every failure leaves the server as
//! `{"error": "...", "code": "...", "field": "..."}`, with `field` present
//! only for validation failures that name an input.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pawlink_core::error::CoreError;
use serde::Serialize;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed input that never reached domain validation (bad multipart,
    /// unknown action segment).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Logged in full, rendered as a generic 500.
    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Wire form of an error.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorBody {
    fn new(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            field: None,
        }
    }

    fn internal() -> Self {
        Self::new("INTERNAL_ERROR", INTERNAL_MESSAGE)
    }
}

impl AppError {
    fn render(&self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Core(core) => render_core(core),
            AppError::Database(err) => render_sqlx(err),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("BAD_REQUEST", msg.as_str()))
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.render();
        (status, Json(body)).into_response()
    }
}

fn render_core(err: &CoreError) -> (StatusCode, ErrorBody) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", format!("{entity} with id {id} not found")),
        ),
        CoreError::Validation { field, message } => (
            StatusCode::BAD_REQUEST,
            ErrorBody {
                field: Some(field.clone()),
                ..ErrorBody::new("VALIDATION_ERROR", message.as_str())
            },
        ),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::new("CONFLICT", msg.as_str())),
        CoreError::InvalidTransition { .. } => (
            StatusCode::CONFLICT,
            ErrorBody::new("INVALID_TRANSITION", err.to_string()),
        ),
        CoreError::Unauthorized(msg) => (
            StatusCode::UNAUTHORIZED,
            ErrorBody::new("UNAUTHORIZED", msg.as_str()),
        ),
        CoreError::Forbidden(msg) => {
            (StatusCode::FORBIDDEN, ErrorBody::new("FORBIDDEN", msg.as_str()))
        }
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal domain error");
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
        }
    }
}

/// Postgres SQLSTATE codes the API turns into client errors.
const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const NUMERIC_VALUE_OUT_OF_RANGE: &str = "22003";

/// Map a sqlx error to a response. Constraint violations that slip past
/// handler checks become 4xx; anything else is logged and hidden.
fn render_sqlx(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    if let sqlx::Error::RowNotFound = err {
        return (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Resource not found"),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        let constraint = db_err.constraint().unwrap_or("unknown");
        let rendered = match db_err.code().as_deref() {
            Some(UNIQUE_VIOLATION) if constraint.starts_with("uq_") => Some((
                StatusCode::CONFLICT,
                ErrorBody::new("CONFLICT", format!("Duplicate value for {constraint}")),
            )),
            Some(CHECK_VIOLATION) => Some((
                StatusCode::BAD_REQUEST,
                ErrorBody::new("VALIDATION_ERROR", format!("Value rejected by {constraint}")),
            )),
            Some(NUMERIC_VALUE_OUT_OF_RANGE) => Some((
                StatusCode::BAD_REQUEST,
                ErrorBody::new("VALIDATION_ERROR", "Numeric value out of range"),
            )),
            Some(FOREIGN_KEY_VIOLATION) => Some((
                StatusCode::BAD_REQUEST,
                ErrorBody::new("BAD_REQUEST", format!("Referenced record is missing ({constraint})")),
            )),
            _ => None,
        };
        if let Some(rendered) = rendered {
            return rendered;
        }
    }

    tracing::error!(error = %err, "Database error");
    (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::internal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_carries_field() {
        let (status, body) = render(CoreError::validation("price", "Price is required").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["field"], "price");
    }

    #[tokio::test]
    async fn invalid_transition_is_conflict() {
        let err = CoreError::InvalidTransition {
            from: "pending",
            action: "complete",
        };
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["code"], "INVALID_TRANSITION");
        assert_eq!(body["error"], "Cannot complete a request that is pending");
    }

    #[tokio::test]
    async fn internal_message_is_sanitized() {
        let (status, body) = render(AppError::InternalError("disk on fire".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], INTERNAL_MESSAGE);
        assert!(body.get("field").is_none());
    }

    #[tokio::test]
    async fn missing_row_is_not_found() {
        let (status, body) = render(sqlx::Error::RowNotFound.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
    }
}
