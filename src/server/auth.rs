use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::security::{hash_api_key, verify_api_key};
use crate::server::error::ApiError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Configured key hash for the API key middleware
#[derive(Debug, Clone, Default)]
pub struct ApiKeyGuard {
    hash: Option<Arc<str>>,
}

impl ApiKeyGuard {
    /// `None` disables verification (local development)
    pub fn new(hash: Option<&str>) -> Self {
        Self {
            hash: hash.map(Arc::from),
        }
    }
}

/// Require a valid `X-API-Key` header on protected routes
pub async fn require_api_key(
    State(guard): State<ApiKeyGuard>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = guard.hash.as_deref() else {
        debug!(reason = "no_hash_configured", "api key verification skipped");
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty());

    let Some(provided) = provided else {
        warn!(path = %req.uri().path(), "api key missing");
        return Err(ApiError::MissingApiKey);
    };

    if !verify_api_key(provided, expected) {
        let hash = hash_api_key(provided);
        warn!(provided_hash_prefix = &hash[..8], "api key invalid");
        return Err(ApiError::InvalidApiKey);
    }

    debug!("api key verified");
    Ok(next.run(req).await)
}
