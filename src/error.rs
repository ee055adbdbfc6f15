use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("could not encode document: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error("could not decode document: {0}")]
    Decode(#[from] bson::de::Error),

    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("improperly configured: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "ERR-AUTH-001",
            AppError::Forbidden => "ERR-AUTH-002",
            AppError::Conflict(_) => "ERR-APPLY-001",
            AppError::BadRequest(_) => "ERR-REQ-001",
            AppError::Internal(_) => "ERR-INT-001",
            AppError::Database(_) => "ERR-DB-000",
            AppError::Encode(_) | AppError::Decode(_) => "ERR-DB-001",
            AppError::Token(_) => "ERR-AUTH-003",
            AppError::Config(_) => "ERR-CONF-000",
            AppError::Io(_) => "ERR-IO-000",
        }
    }

    /// Text sent to clients. Driver and library failures stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_)
            | AppError::Encode(_)
            | AppError::Decode(_)
            | AppError::Token(_)
            | AppError::Config(_)
            | AppError::Io(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", &self);
        }
        let body = json!({
            "success": false,
            "code": self.code(),
            "message": self.public_message(),
        });
        (status, Json(body)).into_response()
    }
}
