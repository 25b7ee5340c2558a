//! Abstract-text similarity
//!
//! Vectorizes each abstract with TF-IDF over the result-set corpus (standard
//! English stop words excluded) and fills a dense pairwise cosine-similarity
//! matrix over papers. Missing abstracts become empty documents rather than
//! being dropped, so matrix indices stay aligned with the paper list.

use crate::errors::AppError;
use crate::fetcher::PaperRecord;
use crate::graph::NetworkGraph;
use crate::matrix::AdjacencyMatrix;
use std::collections::HashMap;

/// General-purpose edge threshold when a caller supplies none. The paper
/// network view uses the configured value (0.1 by default) instead.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.3;

/// Standard English stop words, excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here",
    "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it",
    "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
    "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with", "would",
    "you", "your", "yours", "yourself", "yourselves",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.binary_search(&token).is_ok()
}

/// Lowercase alphanumeric tokens of at least two characters, stop words
/// removed. The length check counts characters, not bytes, so a lone
/// multibyte letter is dropped like any other single-letter token.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().nth(1).is_some() && !is_stop_word(t))
        .map(|t| t.to_string())
        .collect()
}

/// L2-normalized TF-IDF vectors, one per document.
///
/// Uses smoothed IDF (`ln((1 + n) / (1 + df)) + 1`), so a term present in
/// every document still carries weight and two identical documents come out
/// with cosine similarity exactly 1.0.
fn tfidf_vectors(documents: &[String]) -> Vec<HashMap<String, f64>> {
    let n = documents.len();

    let term_counts: Vec<HashMap<String, usize>> = documents
        .iter()
        .map(|doc| {
            let mut counts = HashMap::new();
            for token in tokenize(doc) {
                *counts.entry(token).or_insert(0) += 1;
            }
            counts
        })
        .collect();

    // Document frequency per term
    let mut df: HashMap<&str, usize> = HashMap::new();
    for counts in &term_counts {
        for term in counts.keys() {
            *df.entry(term.as_str()).or_insert(0) += 1;
        }
    }

    term_counts
        .iter()
        .map(|counts| {
            let mut vector: HashMap<String, f64> = counts
                .iter()
                .map(|(term, &tf)| {
                    let df = df[term.as_str()] as f64;
                    let idf = ((1.0 + n as f64) / (1.0 + df)).ln() + 1.0;
                    (term.clone(), tf as f64 * idf)
                })
                .collect();

            let norm = vector.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for w in vector.values_mut() {
                    *w /= norm;
                }
            }
            vector
        })
        .collect()
}

/// Cosine similarity of two L2-normalized sparse vectors (their dot product).
fn cosine(a: &HashMap<String, f64>, b: &HashMap<String, f64>) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .iter()
        .filter_map(|(term, wa)| large.get(term).map(|wb| wa * wb))
        .sum()
}

/// Build the dense pairwise similarity matrix over papers, labeled by title.
///
/// Fails with [`AppError::MissingAbstracts`] when no record in the set has an
/// abstract at all; records that individually lack one are kept as empty
/// documents to preserve index alignment.
pub fn similarity_matrix(records: &[PaperRecord]) -> Result<AdjacencyMatrix, AppError> {
    if records.iter().all(|r| r.abstract_text.is_none()) {
        return Err(AppError::MissingAbstracts);
    }

    let documents: Vec<String> = records
        .iter()
        .map(|r| r.abstract_text.clone().unwrap_or_default())
        .collect();

    let labels: Vec<String> = records.iter().map(|r| r.title.clone()).collect();
    let vectors = tfidf_vectors(&documents);

    let mut matrix = AdjacencyMatrix::zeros(labels);
    for i in 0..vectors.len() {
        for j in (i + 1)..vectors.len() {
            // Clamp guards against float drift pushing cosine past 1.0.
            let sim = cosine(&vectors[i], &vectors[j]).clamp(0.0, 1.0);
            matrix.set_symmetric(i, j, sim);
        }
    }

    // Self-similarity is 1.0 by definition but self-loops never become edges,
    // so the diagonal stays zero at the matrix level.
    matrix.zero_diagonal();
    Ok(matrix)
}

/// Build the thresholded similarity graph directly. `None` falls back to the
/// general-purpose [`DEFAULT_EDGE_THRESHOLD`]; the paper-network view passes
/// its configured, looser threshold instead.
pub fn similarity_graph(
    records: &[PaperRecord],
    threshold: Option<f64>,
) -> Result<NetworkGraph, AppError> {
    let matrix = similarity_matrix(records)?;
    Ok(NetworkGraph::from_matrix(
        &matrix,
        threshold.unwrap_or(DEFAULT_EDGE_THRESHOLD),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, abstract_text: Option<&str>) -> PaperRecord {
        PaperRecord {
            title: title.to_string(),
            authors: vec![],
            year: None,
            citation_count: None,
            url: "#".to_string(),
            abstract_text: abstract_text.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_stop_word_list_is_sorted() {
        // binary_search above requires it.
        let mut sorted = STOP_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(STOP_WORDS, sorted.as_slice());
    }

    #[test]
    fn test_tokenize_filters_stop_words() {
        let tokens = tokenize("The quick brown fox is in the graph");
        assert_eq!(tokens, vec!["quick", "brown", "fox", "graph"]);
    }

    #[test]
    fn test_tokenize_minimum_length_counts_characters() {
        // "é" is two bytes but one character and must be dropped like "x";
        // two-character non-ASCII tokens survive.
        let tokens = tokenize("é x où élan");
        assert_eq!(tokens, vec!["où", "élan"]);
    }

    #[test]
    fn test_identical_abstracts_have_similarity_one() {
        let records = vec![
            record("A", Some("graph neural networks for citation analysis")),
            record("B", Some("graph neural networks for citation analysis")),
        ];
        let m = similarity_matrix(&records).unwrap();
        assert!((m.get(0, 1) - 1.0).abs() < 1e-9);

        // An edge appears at any threshold below 1.0.
        let graph = NetworkGraph::from_matrix(&m, 0.99);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_disjoint_abstracts_have_similarity_zero() {
        let records = vec![
            record("A", Some("protein folding dynamics")),
            record("B", Some("quantum error correction")),
        ];
        let m = similarity_matrix(&records).unwrap();
        assert_eq!(m.get(0, 1), 0.0);
    }

    #[test]
    fn test_similarity_bounds_and_symmetry() {
        let records = vec![
            record("A", Some("deep learning for graphs and networks")),
            record("B", Some("networks and graphs in deep models")),
            record("C", Some("unrelated agricultural soil study")),
        ];
        let m = similarity_matrix(&records).unwrap();

        for i in 0..m.len() {
            assert_eq!(m.get(i, i), 0.0);
            for j in 0..m.len() {
                let w = m.get(i, j);
                assert!((0.0..=1.0).contains(&w));
                assert_eq!(w, m.get(j, i));
            }
        }
        assert!(m.get(0, 1) > m.get(0, 2));
    }

    #[test]
    fn test_missing_abstract_kept_as_empty_document() {
        // Index alignment: the record without an abstract still occupies row 1.
        let records = vec![
            record("A", Some("graph topology")),
            record("B", None),
            record("C", Some("graph topology")),
        ];
        let m = similarity_matrix(&records).unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 2), 0.0);
        assert!(m.get(0, 2) > 0.9);
    }

    #[test]
    fn test_all_abstracts_missing_is_an_error() {
        let records = vec![record("A", None), record("B", None)];
        match similarity_matrix(&records) {
            Err(AppError::MissingAbstracts) => {}
            other => panic!("expected MissingAbstracts, got {other:?}"),
        }
    }

    #[test]
    fn test_similarity_graph_default_threshold() {
        let records = vec![
            record("A", Some("graph neural networks")),
            record("B", Some("graph neural networks")),
        ];
        // Identical abstracts clear the 0.3 general-purpose default easily.
        let g = similarity_graph(&records, None).unwrap();
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let records = vec![
            record("A", Some("graph learning on citation networks")),
            record("B", Some("graph learning methods survey")),
            record("C", Some("citation networks of papers")),
            record("D", Some("soil chemistry field experiments")),
        ];
        let m = similarity_matrix(&records).unwrap();

        let edges_at = |t: f64| {
            let g = NetworkGraph::from_matrix(&m, t);
            g.edge_pairs()
        };

        let loose = edges_at(0.05);
        let tight = edges_at(0.3);
        for pair in &tight {
            assert!(loose.contains(pair), "edge set must shrink as the threshold grows");
        }
        assert!(tight.len() <= loose.len());
    }
}
