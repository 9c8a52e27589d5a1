use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Maps a storage error at the service boundary. Unique-constraint
    /// violations (SQLSTATE 23505) become `DuplicateKey` with the engine's
    /// detail so the caller can correct the request; everything else is
    /// logged and answered as an opaque internal failure.
    pub fn from_db(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23505") {
                // The DETAIL line names the colliding value, e.g.
                // `Key (title)=(Blue Hat) already exists.`; the message
                // itself only names the constraint.
                let detail = db_err
                    .try_downcast_ref::<sqlx::postgres::PgDatabaseError>()
                    .and_then(|pg_err| pg_err.detail())
                    .unwrap_or_else(|| db_err.message());
                return AppError::DuplicateKey(detail.to_string());
            }
        }
        tracing::error!(error = %err, "unexpected database error");
        AppError::Internal("Unexpected error, check server logs".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Auth(_) => (StatusCode::UNAUTHORIZED, "Authentication error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "Resource not found"),
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation error"),
            AppError::DuplicateKey(_) => (StatusCode::BAD_REQUEST, "Duplicate key"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            AppError::Config(_) | AppError::Io(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        // Internal failures never expose their cause to the caller
        let details = match &self {
            AppError::Config(_) | AppError::Io(_) | AppError::Internal(_) => {
                "Unexpected error, check server logs".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "details": details
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn status_codes_follow_error_kind() {
        let cases = [
            (AppError::Auth("bad token".into()), StatusCode::UNAUTHORIZED),
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::DuplicateKey("x".into()), StatusCode::BAD_REQUEST),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                AppError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn internal_failure_body_hides_the_cause() {
        let response = AppError::Internal("connection pool exhausted".into()).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let details = body["error"]["details"].as_str().unwrap();
        assert!(!details.contains("connection pool exhausted"));
    }

    #[tokio::test]
    async fn duplicate_key_body_carries_the_detail() {
        let response =
            AppError::DuplicateKey("Key (title)=(Blue Hat) already exists.".into()).into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let details = body["error"]["details"].as_str().unwrap();
        assert!(details.contains("Blue Hat"));
    }
}
