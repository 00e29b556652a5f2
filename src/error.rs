use thiserror::Error;

/// Failure talking to the upstream data provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Request never produced a response (DNS, connect, timeout)
    #[error("{endpoint}: request failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },

    /// Upstream answered with a non-success status
    #[error("{endpoint}: upstream returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    /// Response body could not be decoded into records
    #[error("{endpoint}: malformed response: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
}

impl UpstreamError {
    /// Short classifier used in log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            UpstreamError::Transport { .. } => "transport",
            UpstreamError::Status { .. } => "status",
            UpstreamError::Decode { .. } => "decode",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            UpstreamError::Transport { endpoint, .. }
            | UpstreamError::Status { endpoint, .. }
            | UpstreamError::Decode { endpoint, .. } => endpoint,
        }
    }
}

/// Errors surfaced by the games service
#[derive(Debug, Error)]
pub enum GamesError {
    /// No upstream credential, so no client could be built
    #[error("BALLDONTLIE_API_KEY not set. Add it to .env.local or the environment")]
    MissingApiKey,

    /// Upstream failed and there was no cached data to fall back to
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_fields() {
        let err = UpstreamError::Status {
            endpoint: "games.list",
            status: 429,
            body: "Too Many Requests".to_string(),
        };

        assert_eq!(err.error_type(), "status");
        assert_eq!(err.endpoint(), "games.list");
        assert_eq!(
            err.to_string(),
            "games.list: upstream returned 429: Too Many Requests"
        );
    }

    #[test]
    fn test_games_error_is_transparent_over_upstream() {
        let err: GamesError = UpstreamError::Transport {
            endpoint: "box_scores.get_by_date",
            message: "connection refused".to_string(),
        }
        .into();

        assert_eq!(
            err.to_string(),
            "box_scores.get_by_date: request failed: connection refused"
        );
    }
}
