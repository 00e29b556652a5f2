use async_trait::async_trait;
use chrono::NaiveDate;

use crate::api::records::{RawBoxScore, RawGame};
use crate::error::UpstreamError;

/// Read-only source of raw NBA game records.
///
/// Implementations do no retries; fallback policy belongs to the caller.
#[async_trait]
pub trait GameProvider: Send + Sync {
    /// Scheduled and played games for a date
    async fn fetch_games_by_date(&self, date: NaiveDate) -> Result<Vec<RawGame>, UpstreamError>;

    /// Box scores (live score and clock) for a date
    async fn fetch_box_scores_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<RawBoxScore>, UpstreamError>;

    /// Box scores for games currently in progress
    async fn fetch_live_box_scores(&self) -> Result<Vec<RawBoxScore>, UpstreamError>;
}
