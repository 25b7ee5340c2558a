//! Semantic Scholar record fetcher
//!
//! Issues one bounded query against the paper-search API and parses the JSON
//! body into flat [`PaperRecord`]s. Transport and parsing are split so the
//! response shape is unit-testable without a live server. A non-200 status is
//! surfaced as [`AppError::Upstream`] carrying the status code and body, which
//! keeps it distinguishable from a successful empty result.

use crate::config::ScholarConfig;
use crate::errors::AppError;
use crate::normalize::normalize_author_name;
use async_trait::async_trait;
use serde::Deserialize;

/// Fields requested for the co-authorship view.
pub const COAUTHORSHIP_FIELDS: &[&str] = &["title", "authors", "citationCount", "url", "year"];

/// Fields requested for the paper-similarity view (adds the abstract).
pub const SIMILARITY_FIELDS: &[&str] =
    &["title", "authors", "citationCount", "url", "year", "abstract"];

/// One paper from a search result, with authors already normalized.
///
/// Optional fields stay `None` here; presentation fallbacks ("Unknown Year",
/// "N/A", "No abstract available.") are applied by the display helpers.
#[derive(Debug, Clone)]
pub struct PaperRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub year: Option<i32>,
    pub citation_count: Option<i64>,
    pub url: String,
    pub abstract_text: Option<String>,
}

impl PaperRecord {
    pub fn year_display(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "Unknown Year".to_string())
    }

    pub fn citation_display(&self) -> String {
        self.citation_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    pub fn abstract_or_default(&self) -> &str {
        self.abstract_text
            .as_deref()
            .unwrap_or("No abstract available.")
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<RawPaper>,
}

#[derive(Debug, Deserialize)]
struct RawPaper {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Vec<RawAuthor>,
    #[serde(default)]
    year: Option<i32>,
    #[serde(rename = "citationCount", default)]
    citation_count: Option<i64>,
    #[serde(default)]
    url: Option<String>,
    #[serde(rename = "abstract", default)]
    abstract_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAuthor {
    #[serde(default)]
    name: Option<String>,
}

/// Parse a search response body into records, applying field fallbacks.
pub fn parse_search_response(body: &str) -> Result<Vec<PaperRecord>, AppError> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| anyhow::anyhow!("malformed search response: {e}"))?;

    let records = response
        .data
        .into_iter()
        .map(|raw| PaperRecord {
            title: raw.title.unwrap_or_else(|| "Unknown Title".to_string()),
            authors: raw
                .authors
                .into_iter()
                .map(|a| normalize_author_name(&a.name.unwrap_or_else(|| "Unknown".to_string())))
                .collect(),
            year: raw.year,
            citation_count: raw.citation_count,
            url: raw.url.unwrap_or_else(|| "#".to_string()),
            abstract_text: raw.abstract_text,
        })
        .collect();

    Ok(records)
}

/// A source of paper records; the seam that lets tests run the pipeline
/// without a live search API.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Run one bounded search for `query`, requesting the given fields.
    async fn search(
        &self,
        query: &str,
        limit: u32,
        fields: &[&str],
    ) -> Result<Vec<PaperRecord>, AppError>;
}

/// HTTP client for the Semantic Scholar paper-search endpoint.
pub struct SemanticScholarClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SemanticScholarClient {
    /// Build a client from explicit configuration. The API key is constructor
    /// state, not a process-global.
    pub fn new(config: &ScholarConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PaperSource for SemanticScholarClient {
    /// One synchronous-in-spirit HTTP GET per query; no retries, no
    /// pagination. `limit` is passed through as-is; the route layer has
    /// already validated the 0..=100 bound.
    async fn search(
        &self,
        query: &str,
        limit: u32,
        fields: &[&str],
    ) -> Result<Vec<PaperRecord>, AppError> {
        let url = format!("{}/paper/search", self.base_url);
        let fields = fields.join(",");
        let limit = limit.to_string();

        tracing::debug!(%query, %limit, %fields, "Querying search API");

        let response = self
            .client
            .get(&url)
            .header("x-api-key", &self.api_key)
            .query(&[
                ("query", query),
                ("limit", limit.as_str()),
                ("fields", fields.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        parse_search_response(&body)
    }
}
