use std::time::Duration;

use reqwest::header::CACHE_CONTROL;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::stats::snapshot::SystemSnapshot;

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Network failure, non-2xx status, or an unparseable body on the stats
    /// fetch. The dashboard degrades to Disconnected and keeps the stale view.
    #[error("stats server unreachable: {0}")]
    Unreachable(String),

    /// The server refused a kill request. Carries the response body so the
    /// reason can be shown to the user.
    #[error("kill rejected (HTTP {status}): {body}")]
    KillRejected { status: u16, body: String },
}

/// HTTP client for the stats server. Cheap to clone; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct StatsClient {
    base_url: String,
    http: reqwest::Client,
}

impl StatsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET {base}/stats`. Every failure mode collapses to `Unreachable`;
    /// field-level tolerance for partial payloads lives in the snapshot
    /// deserializers, not here.
    pub async fn fetch_snapshot(&self) -> Result<SystemSnapshot, ClientError> {
        let url = format!("{}/stats", self.base_url);
        let response = self
            .http
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Unreachable(format!(
                "HTTP {}",
                status.as_u16()
            )));
        }

        let snapshot = response
            .json::<SystemSnapshot>()
            .await
            .map_err(|e| ClientError::Unreachable(format!("bad stats body: {e}")))?;
        debug!(processes = snapshot.processes.len(), "stats fetch ok");
        Ok(snapshot)
    }

    /// `POST {base}/kill/{pid}`. On success the caller is expected to trigger
    /// an immediate re-fetch; the cached process list is never edited locally.
    pub async fn kill(&self, pid: u32) -> Result<(), ClientError> {
        let url = format!("{}/kill/{pid}", self.base_url);
        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| ClientError::Unreachable(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            info!(pid, "kill accepted");
            return Ok(());
        }

        // Best effort: an unreadable body still yields a useful status code.
        let body = response.text().await.unwrap_or_default();
        warn!(pid, status = status.as_u16(), "kill rejected");
        Err(ClientError::KillRejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = StatsClient::new("http://127.0.0.1:5000/", Duration::from_secs(5));
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
    }

    #[test]
    fn error_messages_carry_context() {
        let err = ClientError::KillRejected {
            status: 404,
            body: "Process not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404"));
        assert!(msg.contains("Process not found"));
    }
}
