//! Data models for search results and the tabulated report rows.
//!
//! - [`SearchResponse`], [`ApiArticle`], [`ApiSource`]: the GNews search payload
//! - [`ArticleRecord`]: one flattened row of the report
//!
//! The payload models keep the API's camelCase names, hence the
//! `#[allow(non_snake_case)]` attributes.

use serde::Deserialize;

/// Body of a GNews `/search` response.
///
/// Only the `articles` array is read. A missing or `null` array means the
/// keyword had no hits.
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub articles: Option<Vec<ApiArticle>>,
}

/// A single article as returned by the search API.
///
/// Every field is optional; the service omits or nulls fields freely.
#[allow(non_snake_case)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiArticle {
    /// ISO-8601 timestamp, e.g. `2024-05-01T10:00:00Z`.
    #[serde(default)]
    pub publishedAt: Option<String>,
    #[serde(default)]
    pub source: Option<ApiSource>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSource {
    #[serde(default)]
    pub name: Option<String>,
}

/// One row of the report, in column order.
///
/// Absent source data is stored as an empty string. No field is unique on
/// its own; `(title, link)` is the dedup key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleRecord {
    /// The monitored keyword that matched this article.
    pub keyword: String,
    /// Publication date, `YYYY-MM-DD`, cut from the API timestamp.
    pub published: String,
    /// Publisher name.
    pub source: String,
    pub title: String,
    pub summary: String,
    /// Canonical article URL.
    pub link: String,
}

impl ArticleRecord {
    /// Column headers for the spreadsheet, matching field order.
    pub const COLUMNS: [&'static str; 6] =
        ["Keyword", "Published", "Source", "Title", "Summary", "URL"];

    /// Flatten an API article into a report row for `keyword`.
    pub fn from_api(keyword: &str, article: ApiArticle) -> Self {
        let published = article
            .publishedAt
            .as_deref()
            .and_then(|ts| ts.split('T').next())
            .unwrap_or_default()
            .to_string();

        ArticleRecord {
            keyword: keyword.to_string(),
            published,
            source: article.source.and_then(|s| s.name).unwrap_or_default(),
            title: article.title.unwrap_or_default(),
            summary: article.description.unwrap_or_default(),
            link: article.url.unwrap_or_default(),
        }
    }

    /// Row values in column order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.keyword.as_str(),
            self.published.as_str(),
            self.source.as_str(),
            self.title.as_str(),
            self.summary.as_str(),
            self.link.as_str(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_response_deserialization() {
        let json = r#"{
            "totalArticles": 1,
            "articles": [{
                "title": "Acme wins award",
                "description": "Acme Corp took home the prize.",
                "url": "http://x/1",
                "publishedAt": "2024-05-01T10:00:00Z",
                "source": { "name": "Wire", "url": "http://x" }
            }]
        }"#;

        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let articles = resp.articles.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title.as_deref(), Some("Acme wins award"));
        assert_eq!(
            articles[0].source.as_ref().and_then(|s| s.name.as_deref()),
            Some("Wire")
        );
    }

    #[test]
    fn test_search_response_without_articles() {
        let resp: SearchResponse = serde_json::from_str(r#"{"totalArticles": 0}"#).unwrap();
        assert!(resp.articles.is_none());

        let resp: SearchResponse = serde_json::from_str(r#"{"articles": null}"#).unwrap();
        assert!(resp.articles.is_none());
    }

    #[test]
    fn test_from_api_cuts_date() {
        let article = ApiArticle {
            publishedAt: Some("2024-05-01T10:00:00Z".to_string()),
            source: Some(ApiSource {
                name: Some("Wire".to_string()),
            }),
            title: Some("Acme wins award".to_string()),
            description: Some("Summary".to_string()),
            url: Some("http://x/1".to_string()),
        };

        let record = ArticleRecord::from_api("Acme Corp", article);
        assert_eq!(record.keyword, "Acme Corp");
        assert_eq!(record.published, "2024-05-01");
        assert_eq!(record.source, "Wire");
        assert_eq!(record.title, "Acme wins award");
        assert_eq!(record.summary, "Summary");
        assert_eq!(record.link, "http://x/1");
    }

    #[test]
    fn test_from_api_defaults_missing_fields() {
        let record = ArticleRecord::from_api("Lotte", ApiArticle::default());
        assert_eq!(record.keyword, "Lotte");
        assert_eq!(record.published, "");
        assert_eq!(record.source, "");
        assert_eq!(record.title, "");
        assert_eq!(record.summary, "");
        assert_eq!(record.link, "");
    }

    #[test]
    fn test_from_api_null_fields() {
        let json = r#"{"title": null, "source": {"name": null}, "publishedAt": null}"#;
        let article: ApiArticle = serde_json::from_str(json).unwrap();
        let record = ArticleRecord::from_api("LG Corp", article);
        assert_eq!(record.title, "");
        assert_eq!(record.source, "");
        assert_eq!(record.published, "");
    }

    #[test]
    fn test_cells_follow_column_order() {
        let record = ArticleRecord {
            keyword: "k".to_string(),
            published: "d".to_string(),
            source: "s".to_string(),
            title: "t".to_string(),
            summary: "m".to_string(),
            link: "l".to_string(),
        };
        assert_eq!(record.cells(), ["k", "d", "s", "t", "m", "l"]);
        assert_eq!(ArticleRecord::COLUMNS.len(), record.cells().len());
    }
}
