//! GNews search API client.
//!
//! # Architecture
//!
//! - [`SearchQuery`]: one time-bounded query for a single keyword
//! - [`SearchApi`]: trait for anything that can answer a [`SearchQuery`]
//! - [`GNewsClient`]: the `reqwest`-backed implementation used in production
//!
//! The trait exists so the fetch loop can be driven by an in-memory fake in
//! tests.

use crate::error::FetchError;
use crate::models::{ApiArticle, SearchResponse};
use crate::utils::truncate_for_log;
use chrono::{DateTime, Duration, Utc};
use std::fmt;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use url::Url;

/// GNews search endpoint.
pub const GNEWS_SEARCH_URL: &str = "https://gnews.io/api/v4/search";

/// Articles requested per keyword.
pub const MAX_RESULTS: u32 = 10;

/// How far back each query reaches.
pub const LOOKBACK_HOURS: i64 = 24;

/// A single keyword search, bounded to the last [`LOOKBACK_HOURS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub keyword: String,
    /// Lower bound on publication time.
    pub from: DateTime<Utc>,
}

impl SearchQuery {
    pub fn new(keyword: &str, now: DateTime<Utc>) -> Self {
        SearchQuery {
            keyword: keyword.to_string(),
            from: now - Duration::hours(LOOKBACK_HOURS),
        }
    }

    /// Query-string parameters, minus the access token.
    ///
    /// The keyword is quoted so multi-word names match as a phrase.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("q", format!("\"{}\"", self.keyword)),
            ("lang", "en".to_string()),
            ("max", MAX_RESULTS.to_string()),
            ("from", self.from.format("%Y-%m-%dT%H:%M:%SZ").to_string()),
            ("sortby", "publishedAt".to_string()),
        ]
    }
}

/// Trait for running one search against a news service.
///
/// Implementors return the raw article list; an absent result array is an
/// empty `Vec`, not an error.
pub trait SearchApi {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ApiArticle>, FetchError>;
}

/// [`SearchApi`] implementation backed by the GNews REST endpoint.
pub struct GNewsClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
}

impl GNewsClient {
    /// Build a client for the public GNews endpoint.
    pub fn new(token: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        let endpoint = Url::parse(GNEWS_SEARCH_URL).expect("GNEWS_SEARCH_URL is a valid URL");
        Ok(GNewsClient {
            http,
            endpoint,
            token: token.to_string(),
        })
    }

    fn request_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query.params() {
                pairs.append_pair(k, &v);
            }
            pairs.append_pair("token", &self.token);
        }
        url
    }
}

impl fmt::Debug for GNewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GNewsClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

impl SearchApi for GNewsClient {
    #[instrument(level = "info", skip_all, fields(keyword = %query.keyword))]
    async fn search(&self, query: &SearchQuery) -> Result<Vec<ApiArticle>, FetchError> {
        let t0 = Instant::now();
        let resp = self
            .http
            .get(self.request_url(query))
            .send()
            .await
            // the URL carries the token
            .map_err(|e| e.without_url())?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.without_url())?;
        debug!(
            %status,
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis(),
            "GNews responded"
        );

        if !status.is_success() {
            warn!(%status, "GNews returned a non-success status");
            return Err(FetchError::Status {
                status,
                body: truncate_for_log(&body, 300),
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&body)?;
        Ok(parsed.articles.unwrap_or_default())
    }
}
