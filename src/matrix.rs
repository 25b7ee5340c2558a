//! Dense symmetric adjacency matrices
//!
//! Both network views reduce to a square, symmetric, non-negative matrix
//! indexed by a fixed ordered label list (author names or paper titles) with
//! a zero diagonal. Storage is dense on purpose: the result set is bounded to
//! 100 papers, so O(n^2) memory is trivial and keeps the index arithmetic
//! simple.

use crate::fetcher::PaperRecord;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

/// Square symmetric weight matrix over an ordered list of entity labels.
#[derive(Debug, Clone)]
pub struct AdjacencyMatrix {
    labels: Vec<String>,
    data: Vec<f64>,
}

impl AdjacencyMatrix {
    /// Zero matrix over the given labels.
    pub fn zeros(labels: Vec<String>) -> Self {
        let n = labels.len();
        Self {
            labels,
            data: vec![0.0; n * n],
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.len() + j]
    }

    /// Set both (i, j) and (j, i), preserving symmetry.
    pub fn set_symmetric(&mut self, i: usize, j: usize, weight: f64) {
        let n = self.len();
        self.data[i * n + j] = weight;
        self.data[j * n + i] = weight;
    }

    /// Add 1 to a single entry (not its mirror); used by the pair loop below,
    /// which visits every ordered pair itself.
    fn increment(&mut self, i: usize, j: usize) {
        let n = self.len();
        self.data[i * n + j] += 1.0;
    }

    /// Clear the diagonal; the matrices here never carry self-loops.
    pub fn zero_diagonal(&mut self) {
        let n = self.len();
        for i in 0..n {
            self.data[i * n + i] = 0.0;
        }
    }

    /// Total edge weight attached to row `i`.
    pub fn row_sum(&self, i: usize) -> f64 {
        let n = self.len();
        self.data[i * n..(i + 1) * n].iter().sum()
    }
}

/// One row of the "most collaborative authors" ranking.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorRank {
    pub name: String,
    /// Summed co-authorship weight across all collaborators.
    pub weight: f64,
}

/// Build the co-authorship co-occurrence matrix over unique normalized
/// author names, sorted lexically for a deterministic index order.
///
/// Every ordered pair of authors on a paper (including the diagonal) is
/// incremented, then the diagonal is zeroed, so `matrix[i][j]` counts the
/// distinct papers authors i and j share.
pub fn coauthorship_matrix(records: &[PaperRecord]) -> AdjacencyMatrix {
    let unique: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.authors.iter().map(String::as_str))
        .collect();

    let labels: Vec<String> = unique.iter().map(|s| s.to_string()).collect();
    let index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut matrix = AdjacencyMatrix::zeros(labels.clone());

    for record in records {
        // Deduplicated per paper: a name appearing twice on one author list
        // (normalization collision or a duplicate upstream entry) still counts
        // that paper once toward each pair.
        let indices: BTreeSet<usize> = record
            .authors
            .iter()
            .filter_map(|a| index.get(a.as_str()).copied())
            .collect();

        for &i in &indices {
            for &j in &indices {
                matrix.increment(i, j);
            }
        }
    }

    matrix.zero_diagonal();
    matrix
}

/// Rank authors by total collaboration weight (row sum), descending.
/// Ties fall back to label order so the ranking is deterministic.
pub fn top_collaborators(matrix: &AdjacencyMatrix, k: usize) -> Vec<AuthorRank> {
    let mut ranks: Vec<AuthorRank> = (0..matrix.len())
        .map(|i| AuthorRank {
            name: matrix.labels()[i].clone(),
            weight: matrix.row_sum(i),
        })
        .collect();

    ranks.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    ranks.truncate(k);
    ranks
}
