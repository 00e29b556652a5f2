use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nba_oracle::api::balldontlie::{max_requests_per_minute, RATE_LIMIT_PER_MINUTE};
use nba_oracle::api::BalldontlieClient;
use nba_oracle::cache::GamesCache;
use nba_oracle::config::Config;
use nba_oracle::server::{self, ApiKeyGuard, AppState};
use nba_oracle::service::GameService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration before logging so DEBUG picks the log format
    let config = Config::from_env()?;

    init_logging(config.debug);

    info!(
        environment = %config.api_env,
        debug = config.debug,
        "Starting nba-oracle"
    );

    // Upstream client and cache
    let games = match config.balldontlie_api_key.as_deref() {
        Some(api_key) => {
            let client = BalldontlieClient::new(
                &config.balldontlie_api_url,
                api_key,
                config.upstream_timeout(),
            )
            .context("failed to build balldontlie client")?;

            let cache = GamesCache::new(config.cache_ttl());
            Some(Arc::new(GameService::new(client, cache)))
        }
        None => {
            warn!("BALLDONTLIE_API_KEY not set, /api/games/today will return 503");
            None
        }
    };

    log_rate_budget(config.cache_ttl_secs);

    if config.api_key_hash.is_none() {
        warn!("API_KEY_HASH not set, API key verification is disabled");
    }

    let state = AppState {
        games,
        api_env: Arc::from(config.api_env.as_str()),
    };
    let guard = ApiKeyGuard::new(config.api_key_hash.as_deref());
    let app = server::router(state, guard, &config.cors_origins);

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(
        addr = %config.bind_addr,
        cors_origins = ?config.cors_origins,
        "Server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down nba-oracle");
    Ok(())
}

fn init_logging(debug: bool) {
    let default_filter = if debug {
        "nba_oracle=debug,tower_http=info,warn"
    } else {
        "nba_oracle=info,warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);

    if debug {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    }
}

/// One upstream fetch per TTL window at most, whatever the client traffic
fn log_rate_budget(cache_ttl_secs: u64) {
    match max_requests_per_minute(cache_ttl_secs) {
        None => warn!(
            cache_ttl_seconds = cache_ttl_secs,
            rate_limit_per_minute = RATE_LIMIT_PER_MINUTE,
            "cache disabled, every request goes upstream"
        ),
        Some(max_per_minute) => info!(
            cache_ttl_seconds = cache_ttl_secs,
            max_upstream_requests_per_minute = max_per_minute,
            rate_limit_per_minute = RATE_LIMIT_PER_MINUTE,
            "upstream rate budget"
        ),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
