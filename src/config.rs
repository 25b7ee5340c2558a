use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub scholar: ScholarConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Semantic Scholar search API settings.
///
/// The API key is required and flows into the fetcher at construction;
/// there is no ambient global key.
#[derive(Debug, Deserialize, Clone)]
pub struct ScholarConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Upper bound on the `limit` query parameter (and on user input).
    pub max_results: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NetworkConfig {
    /// Minimum cosine similarity for an edge in the paper-similarity view.
    pub similarity_threshold: f64,
    /// How many top collaborators to report in the co-authorship view.
    pub top_authors: usize,
}

impl ScholarConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    pub fn build() -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Start with defaults
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.rust_log", "info,scholarnet=debug")?
            .set_default(
                "scholar.base_url",
                "https://api.semanticscholar.org/graph/v1",
            )?
            .set_default("scholar.timeout_secs", 30)?
            .set_default("scholar.max_results", 100)?
            .set_default("network.similarity_threshold", 0.1)?
            .set_default("network.top_authors", 10)?
            // Settings from environment variables (with a prefix of APP)
            // E.g. `APP_SCHOLAR__API_KEY=...` sets `ScholarConfig.api_key`
            .add_source(Environment::default().separator("__").prefix("APP"));

        builder.build()?.try_deserialize()
    }
}
