use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::GamesError;

/// Errors returned to HTTP clients as `{"detail": "..."}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing API key")]
    MissingApiKey,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error(transparent)]
    Games(#[from] GamesError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingApiKey => StatusCode::UNAUTHORIZED,
            ApiError::InvalidApiKey => StatusCode::FORBIDDEN,
            ApiError::Games(GamesError::MissingApiKey) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Games(GamesError::Upstream(_)) => StatusCode::BAD_GATEWAY,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Games(GamesError::Upstream(e)) => {
                format!("Failed to fetch games from NBA API: {}", e)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "detail": self.detail() }));

        match self {
            ApiError::MissingApiKey => {
                (status, [(header::WWW_AUTHENTICATE, "ApiKey")], body).into_response()
            }
            _ => (status, body).into_response(),
        }
    }
}
