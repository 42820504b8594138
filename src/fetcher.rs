//! Keyword fetch loop.
//!
//! Runs one [`SearchQuery`] per keyword, in order, through any [`SearchApi`]
//! and flattens the hits into [`ArticleRecord`] rows. A failing keyword is
//! logged and contributes nothing; the loop always returns a table.

use crate::api::{SearchApi, SearchQuery};
use crate::models::ArticleRecord;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument};

/// Pause between consecutive keyword requests, for the API's rate limit.
pub const KEYWORD_PAUSE: Duration = Duration::from_secs(1);

/// Fetch the last day's articles for every keyword.
///
/// # Arguments
///
/// * `api` - Search backend
/// * `keywords` - Search terms, in fetch order
/// * `now` - Reference time; queries cover the 24 hours before it
/// * `pause` - Delay inserted between consecutive requests
///
/// # Returns
///
/// Records grouped by keyword in input order, each group in API order.
#[instrument(level = "info", skip_all, fields(keywords = keywords.len()))]
pub async fn fetch_articles<A: SearchApi>(
    api: &A,
    keywords: &[String],
    now: DateTime<Utc>,
    pause: Duration,
) -> Vec<ArticleRecord> {
    let mut table = Vec::new();

    for (i, keyword) in keywords.iter().enumerate() {
        if i > 0 {
            sleep(pause).await;
        }

        let query = SearchQuery::new(keyword, now);
        info!(%keyword, from = %query.from, "Searching");

        match api.search(&query).await {
            Ok(articles) if articles.is_empty() => {
                info!(%keyword, "No articles found");
            }
            Ok(articles) => {
                info!(%keyword, count = articles.len(), "Found articles");
                table.extend(
                    articles
                        .into_iter()
                        .map(|article| ArticleRecord::from_api(keyword, article)),
                );
            }
            Err(e) => {
                error!(%keyword, error = %e, "Search failed; skipping keyword");
            }
        }
    }

    info!(total = table.len(), "Finished fetching");
    table
}
