use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};

use crate::api::provider::GameProvider;
use crate::api::records::{DataResponse, RawBoxScore, RawGame};
use crate::error::UpstreamError;

pub const DEFAULT_BASE_URL: &str = "https://api.balldontlie.io/v1";

/// Free tier request budget (observational only, nothing enforces it)
pub const RATE_LIMIT_PER_MINUTE: u64 = 60;

/// Most upstream requests per minute a cache TTL allows; `None` when the TTL
/// is zero and every client request goes upstream.
pub fn max_requests_per_minute(cache_ttl_secs: u64) -> Option<u64> {
    match cache_ttl_secs {
        0 => None,
        ttl => Some(60u64.div_ceil(ttl)),
    }
}

const GAMES_ENDPOINT: &str = "games.list";
const BOX_SCORES_ENDPOINT: &str = "box_scores.get_by_date";
const LIVE_BOX_SCORES_ENDPOINT: &str = "box_scores.get_live";

/// Client for the balldontlie.io NBA API.
///
/// Handles raw API communication only. Every call logs its endpoint, date,
/// duration and either the record count or the failure.
pub struct BalldontlieClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BalldontlieClient {
    /// Create a new client. The connection pool is reused across requests.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Issue a GET and decode the `data` array, with timing instrumentation
    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
        date: Option<NaiveDate>,
    ) -> Result<Vec<T>, UpstreamError> {
        let date_label = date.map_or_else(|| "live".to_string(), |d| d.to_string());

        debug!(endpoint, date = %date_label, "api request started");

        let started = Instant::now();
        let result = self.request(endpoint, path, query).await;
        let duration_ms = elapsed_ms(started);

        match &result {
            Ok(records) => info!(
                endpoint,
                date = %date_label,
                duration_ms,
                game_count = records.len(),
                "api request succeeded"
            ),
            Err(e) => error!(
                endpoint,
                date = %date_label,
                duration_ms,
                error_type = e.error_type(),
                error_message = %e,
                "api request failed"
            ),
        }

        result
    }

    async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, UpstreamError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.api_key)
            .header("Accept", "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport {
                endpoint,
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                endpoint,
                status,
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport {
                endpoint,
                message: e.to_string(),
            })?;

        let parsed: DataResponse<T> =
            serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode {
                endpoint,
                message: e.to_string(),
            })?;

        Ok(parsed.data)
    }
}

#[async_trait]
impl GameProvider for BalldontlieClient {
    async fn fetch_games_by_date(&self, date: NaiveDate) -> Result<Vec<RawGame>, UpstreamError> {
        self.fetch(
            GAMES_ENDPOINT,
            "/games",
            &[("dates[]", date.to_string())],
            Some(date),
        )
        .await
    }

    async fn fetch_box_scores_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<RawBoxScore>, UpstreamError> {
        self.fetch(
            BOX_SCORES_ENDPOINT,
            "/box_scores",
            &[("date", date.to_string())],
            Some(date),
        )
        .await
    }

    async fn fetch_live_box_scores(&self) -> Result<Vec<RawBoxScore>, UpstreamError> {
        self.fetch(LIVE_BOX_SCORES_ENDPOINT, "/box_scores/live", &[], None)
            .await
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    (started.elapsed().as_secs_f64() * 100_000.0).round() / 100.0
}
