use crate::config::NetworkConfig;
use crate::errors::AppError;
use crate::fetcher::{PaperRecord, PaperSource, COAUTHORSHIP_FIELDS, SIMILARITY_FIELDS};
use crate::graph::NetworkGraph;
use crate::layout::{spring_layout, LAYOUT_SEED};
use crate::matrix::{coauthorship_matrix, top_collaborators, AuthorRank};
use crate::render::{scale_edges, scale_nodes, VisEdge, VisNode};
use crate::services::NetworkMode;
use crate::similarity::similarity_graph;
use serde::Serialize;
use std::sync::Arc;

/// One row of the fetched-papers table, with documented display fallbacks
/// already applied.
#[derive(Debug, Clone, Serialize)]
pub struct PaperRow {
    pub title: String,
    pub year: String,
    pub citation_count: String,
    pub url: String,
    pub abstract_text: String,
}

impl PaperRow {
    fn from_record(record: &PaperRecord) -> Self {
        Self {
            title: record.title.clone(),
            year: record.year_display(),
            citation_count: record.citation_display(),
            url: record.url.clone(),
            abstract_text: record.abstract_or_default().to_string(),
        }
    }
}

/// Fully prepared view of one network build: scaled nodes and edges of the
/// giant component, plus the side tables.
#[derive(Debug, Serialize)]
pub struct NetworkView {
    pub mode: NetworkMode,
    pub query: String,
    pub nodes: Vec<VisNode>,
    pub edges: Vec<VisEdge>,
    /// Top collaborators; present in co-authorship mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_authors: Option<Vec<AuthorRank>>,
    pub papers: Vec<PaperRow>,
}

/// Orchestrates the pipeline: fetch -> normalize -> matrix -> graph ->
/// giant component -> layout -> scaled records. Each query rebuilds
/// everything from scratch; nothing is cached or persisted.
pub struct NetworkService {
    client: Arc<dyn PaperSource>,
    similarity_threshold: f64,
    top_authors: usize,
}

impl NetworkService {
    pub fn new(client: Arc<dyn PaperSource>, config: &NetworkConfig) -> Self {
        Self {
            client,
            similarity_threshold: config.similarity_threshold,
            top_authors: config.top_authors,
        }
    }

    pub async fn build(
        &self,
        query: &str,
        limit: u32,
        mode: NetworkMode,
    ) -> Result<NetworkView, AppError> {
        let fields = match mode {
            NetworkMode::Coauthorship => COAUTHORSHIP_FIELDS,
            NetworkMode::Similarity => SIMILARITY_FIELDS,
        };

        let records = self.client.search(query, limit, fields).await?;
        if records.is_empty() {
            return Err(AppError::NoResults {
                query: query.to_string(),
            });
        }

        tracing::info!(%query, papers = records.len(), ?mode, "Building network");

        let (graph, top_authors) = match mode {
            NetworkMode::Coauthorship => {
                let matrix = coauthorship_matrix(&records);
                let top = top_collaborators(&matrix, self.top_authors);
                // Any shared paper makes an edge.
                (NetworkGraph::from_matrix(&matrix, 0.0), Some(top))
            }
            NetworkMode::Similarity => (
                similarity_graph(&records, Some(self.similarity_threshold))?,
                None,
            ),
        };

        let giant = graph.giant_component()?;

        let positions = spring_layout(&giant, LAYOUT_SEED);
        let nodes = scale_nodes(&giant, &positions);
        let edges = scale_edges(&giant);

        tracing::debug!(
            component_nodes = giant.node_count(),
            component_edges = giant.edge_count(),
            "Extracted giant component"
        );
        metrics::counter!("scholarnet_network_builds_total").increment(1);

        Ok(NetworkView {
            mode,
            query: query.to_string(),
            nodes,
            edges,
            top_authors,
            papers: records.iter().map(PaperRow::from_record).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use async_trait::async_trait;

    /// In-memory source so the pipeline runs without a live search API.
    struct StaticSource {
        records: Vec<PaperRecord>,
    }

    #[async_trait]
    impl PaperSource for StaticSource {
        async fn search(
            &self,
            _query: &str,
            _limit: u32,
            _fields: &[&str],
        ) -> Result<Vec<PaperRecord>, AppError> {
            Ok(self.records.clone())
        }
    }

    fn record(title: &str, authors: &[&str], abstract_text: Option<&str>) -> PaperRecord {
        PaperRecord {
            title: title.to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            year: Some(2020),
            citation_count: Some(1),
            url: "#".to_string(),
            abstract_text: abstract_text.map(|s| s.to_string()),
        }
    }

    fn service(records: Vec<PaperRecord>) -> NetworkService {
        NetworkService::new(
            Arc::new(StaticSource { records }),
            &NetworkConfig {
                similarity_threshold: 0.1,
                top_authors: 10,
            },
        )
    }

    #[tokio::test]
    async fn test_coauthorship_view_end_to_end() {
        // Papers A and B share J. Smith, B and C share J. Smith.
        let svc = service(vec![
            record("A", &["J. Smith", "A. Adams"], None),
            record("B", &["J. Smith", "B. Brown"], None),
            record("C", &["J. Smith", "C. Clark"], None),
        ]);

        let view = svc
            .build("machine learning", 5, NetworkMode::Coauthorship)
            .await
            .unwrap();

        // All four authors connect through Smith, who tops the ranking.
        assert_eq!(view.nodes.len(), 4);
        assert_eq!(view.edges.len(), 3);
        let top = view.top_authors.as_ref().unwrap();
        assert_eq!(top[0].name, "J. Smith");
        assert_eq!(view.papers.len(), 3);
    }

    #[tokio::test]
    async fn test_similarity_view_end_to_end() {
        let svc = service(vec![
            record("A", &[], Some("graph neural networks for citations")),
            record("B", &[], Some("graph neural networks for citations")),
            record("C", &[], Some("marine biology of deep sea sponges")),
        ]);

        let view = svc.build("q", 3, NetworkMode::Similarity).await.unwrap();

        // The identical pair forms the giant component; C is isolated.
        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.edges.len(), 1);
        assert!(view.top_authors.is_none());
        assert_eq!(view.edges[0].value, 1.0);
    }

    #[tokio::test]
    async fn test_empty_result_set_is_no_results() {
        let svc = service(vec![]);
        match svc.build("nothing", 5, NetworkMode::Coauthorship).await {
            Err(AppError::NoResults { query }) => assert_eq!(query, "nothing"),
            other => panic!("expected NoResults, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_single_author_is_no_connected_structure() {
        // One paper with one author: a lone node, nothing to draw.
        let svc = service(vec![record("A", &["J. Smith"], None)]);
        assert!(matches!(
            svc.build("q", 1, NetworkMode::Coauthorship).await,
            Err(AppError::NoConnectedStructure(_))
        ));
    }

    #[tokio::test]
    async fn test_similarity_without_abstracts_fails() {
        let svc = service(vec![record("A", &[], None), record("B", &[], None)]);
        assert!(matches!(
            svc.build("q", 2, NetworkMode::Similarity).await,
            Err(AppError::MissingAbstracts)
        ));
    }

    #[test]
    fn test_paper_row_fallbacks() {
        let record = PaperRecord {
            title: "Unknown Title".into(),
            authors: vec![],
            year: None,
            citation_count: None,
            url: "#".into(),
            abstract_text: None,
        };
        let row = PaperRow::from_record(&record);
        assert_eq!(row.year, "Unknown Year");
        assert_eq!(row.citation_count, "N/A");
        assert_eq!(row.url, "#");
        assert_eq!(row.abstract_text, "No abstract available.");
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(
            serde_json::to_string(&NetworkMode::Coauthorship).unwrap(),
            "\"coauthorship\""
        );
        let mode: NetworkMode = serde_json::from_str("\"similarity\"").unwrap();
        assert_eq!(mode, NetworkMode::Similarity);
    }
}
