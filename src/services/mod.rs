pub mod network;

pub use network::{NetworkService, NetworkView, PaperRow};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which relationship graph to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMode {
    /// Authors as nodes, shared-paper counts as weights.
    Coauthorship,
    /// Papers as nodes, abstract TF-IDF cosine similarity as weights.
    Similarity,
}

impl NetworkMode {
    pub fn title(&self) -> &'static str {
        match self {
            NetworkMode::Coauthorship => "Co-authorship Network",
            NetworkMode::Similarity => "Paper Similarity Network",
        }
    }
}

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub network_service: Arc<NetworkService>,
    /// Bound on the user-supplied result count.
    pub max_results: u32,
}

impl AppState {
    pub fn new(network_service: NetworkService, max_results: u32) -> Self {
        Self {
            network_service: Arc::new(network_service),
            max_results,
        }
    }
}
