use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::New_York;
use tracing::{debug, error, info, warn};

use crate::api::GameProvider;
use crate::cache::GamesCache;
use crate::error::{GamesError, UpstreamError};
use crate::models::{sort_games, Game, GameListResponse, GameStatus, SharedGameList};
use crate::transform::{from_box_score, from_game};

/// Which upstream endpoint produced a game list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    BoxScores,
    Games,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::BoxScores => "box_scores",
            DataSource::Games => "games",
        }
    }
}

/// Today's games: box scores first, games as fallback, cached for a short TTL.
///
/// On total upstream failure the last good list is served regardless of age;
/// its `last_updated` tells the client how stale it is.
pub struct GameService<P> {
    provider: P,
    cache: GamesCache,
}

impl<P: GameProvider> GameService<P> {
    pub fn new(provider: P, cache: GamesCache) -> Self {
        Self { provider, cache }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn cache(&self) -> &GamesCache {
        &self.cache
    }

    /// Get all games for today (US Eastern date) with current scores
    pub async fn get_todays_games(&self) -> Result<SharedGameList, GamesError> {
        if let Some(cached) = self.cache.fresh().await {
            debug!(
                cache_age_ms = cached.age.as_millis() as u64,
                game_count = cached.response.games.len(),
                "cache hit"
            );
            return Ok(cached.response);
        }

        let now = Utc::now();
        let eastern_now = now.with_timezone(&New_York);
        let today = eastern_date(now);

        info!(
            date = %today,
            eastern_time = %eastern_now.format("%H:%M:%S"),
            "fetching games"
        );

        match self.fetch_games(today).await {
            Ok((mut games, source)) => {
                sort_games(&mut games);

                let response = Arc::new(GameListResponse::new(games, now));
                self.cache.store(Arc::clone(&response)).await;

                info!(
                    data_source = source.as_str(),
                    total_games = response.games.len(),
                    live_games = response.count(GameStatus::InProgress),
                    scheduled_games = response.count(GameStatus::Scheduled),
                    final_games = response.count(GameStatus::Final),
                    "games fetched"
                );

                Ok(response)
            }
            Err(e) => {
                let stale = self.cache.read().await;

                error!(
                    error_type = e.error_type(),
                    error_message = %e,
                    has_cache = stale.is_some(),
                    "fetch games failed"
                );

                match stale {
                    Some(cached) => {
                        warn!(
                            cache_age_seconds = cached.age.as_secs_f64(),
                            game_count = cached.response.games.len(),
                            "returning stale cache"
                        );
                        Ok(cached.response)
                    }
                    None => Err(e.into()),
                }
            }
        }
    }

    /// Fetch and canonicalize one date, trying box scores before plain games
    pub async fn fetch_games(
        &self,
        date: NaiveDate,
    ) -> Result<(Vec<Game>, DataSource), UpstreamError> {
        match self.provider.fetch_box_scores_by_date(date).await {
            Ok(records) => Ok((
                records.iter().map(from_box_score).collect(),
                DataSource::BoxScores,
            )),
            Err(box_err) => {
                warn!(
                    error_type = box_err.error_type(),
                    error_message = %box_err,
                    "box scores unavailable, falling back to games"
                );

                let records = self.provider.fetch_games_by_date(date).await?;
                Ok((records.iter().map(from_game).collect(), DataSource::Games))
            }
        }
    }

    /// Games currently in progress, straight from the live endpoint (uncached)
    pub async fn get_live_games(&self) -> Result<Vec<Game>, GamesError> {
        let records = self.provider.fetch_live_box_scores().await?;

        let mut games: Vec<Game> = records.iter().map(from_box_score).collect();
        sort_games(&mut games);

        Ok(games)
    }
}

/// NBA schedules follow the US Eastern calendar, whatever the server's zone
pub fn eastern_date(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&New_York).date_naive()
}
