use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderValue,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::api::GameProvider;
use crate::error::GamesError;
use crate::models::SharedGameList;
use crate::server::auth::{require_api_key, ApiKeyGuard};
use crate::server::error::ApiError;
use crate::service::GameService;

/// State shared by all handlers
pub struct AppState<P> {
    /// None when no upstream credential is configured
    pub games: Option<Arc<GameService<P>>>,
    pub api_env: Arc<str>,
}

impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            games: self.games.clone(),
            api_env: Arc::clone(&self.api_env),
        }
    }
}

/// Build the HTTP router: public health check plus key-protected game routes
pub fn router<P: GameProvider + 'static>(
    state: AppState<P>,
    guard: ApiKeyGuard,
    cors_origins: &[String],
) -> Router {
    let games = Router::new()
        .route("/api/games/today", get(todays_games::<P>))
        .route_layer(middleware::from_fn_with_state(guard, require_api_key));

    Router::new()
        .route("/health", get(health::<P>))
        .merge(games)
        .with_state(state)
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

/// Today's games, live first, then scheduled, then final
async fn todays_games<P: GameProvider + 'static>(
    State(state): State<AppState<P>>,
) -> Result<Json<SharedGameList>, ApiError> {
    let service = state.games.as_ref().ok_or(GamesError::MissingApiKey)?;
    let response = service.get_todays_games().await?;
    Ok(Json(response))
}

async fn health<P>(State(state): State<AppState<P>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "environment": &*state.api_env,
    }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
