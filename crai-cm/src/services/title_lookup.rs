//! OMDb title lookup client
//!
//! Best-effort enrichment: the public `lookup` never fails. Without a
//! configured API key, or for an empty/`"N/A"` title, it returns `None`
//! before any network I/O; every transport, API, or no-match outcome is
//! logged and collapsed to `None` as well.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::models::{TitleInfo, NO_TITLE};

const USER_AGENT: &str = concat!("CRAI/", env!("CARGO_PKG_VERSION"));

/// Title lookup errors; internal only, callers see `Option`
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No match for title: {0}")]
    NoMatch(String),
}

/// OMDb title lookup response
///
/// `response` is OMDb's match indicator: the literal string `"True"` on a
/// positive match.
#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

/// OMDb API client
pub struct TitleLookupClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl TitleLookupClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LookupError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: base_url.to_string(),
            api_key,
        })
    }

    /// Fetch metadata for a title; `None` when lookup is disabled, the
    /// title is the sentinel, or the call fails in any way
    pub async fn lookup(&self, title: &str) -> Option<TitleInfo> {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => {
                tracing::warn!("OMDb API key not configured; skipping title lookup");
                return None;
            }
        };

        if title.is_empty() || title == NO_TITLE {
            return None;
        }

        match self.fetch(api_key, title).await {
            Ok(info) => {
                tracing::info!(title = %info.title, year = %info.year, "Retrieved title info from OMDb");
                Some(info)
            }
            Err(LookupError::NoMatch(_)) => {
                tracing::debug!(title = %title, "OMDb reported no match");
                None
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "Title lookup failed");
                None
            }
        }
    }

    async fn fetch(&self, api_key: &str, title: &str) -> Result<TitleInfo, LookupError> {
        tracing::debug!(title = %title, "Querying OMDb API");

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[("t", title), ("apikey", api_key)])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(LookupError::Api(status.as_u16(), error_text));
        }

        let payload: OmdbResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        if payload.response != "True" {
            return Err(LookupError::NoMatch(title.to_string()));
        }

        Ok(TitleInfo {
            title: payload.title.unwrap_or_else(|| NO_TITLE.to_string()),
            year: payload.year.unwrap_or_else(|| NO_TITLE.to_string()),
            // OMDb encodes a missing poster as the string "N/A"
            poster_url: payload
                .poster
                .filter(|p| !p.is_empty() && p.as_str() != NO_TITLE),
        })
    }
}
