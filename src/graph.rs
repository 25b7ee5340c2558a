//! Weighted graph construction and giant-component extraction
//!
//! Turns an adjacency matrix into an undirected weighted graph, enumerates
//! connected components, and returns the induced subgraph on the largest one
//! with human-readable node labels. An empty graph or a largest component
//! without edges is a typed failure, never a silent no-op, for both network
//! views.

use crate::errors::AppError;
use crate::matrix::AdjacencyMatrix;

/// Graph node carrying its display label (author name or paper title).
#[derive(Debug, Clone)]
pub struct Node {
    pub id: usize,
    pub label: String,
}

/// Undirected weighted edge between node ids.
#[derive(Debug, Clone)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub weight: f64,
}

/// Undirected weighted graph over labeled nodes.
#[derive(Debug, Clone)]
pub struct NetworkGraph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Neighbor lists indexed by node id.
    adjacency: Vec<Vec<usize>>,
}

impl NetworkGraph {
    /// Build a graph from a symmetric matrix: one node per label, one edge per
    /// unordered pair with weight strictly above `threshold`.
    pub fn from_matrix(matrix: &AdjacencyMatrix, threshold: f64) -> Self {
        let nodes: Vec<Node> = matrix
            .labels()
            .iter()
            .enumerate()
            .map(|(id, label)| Node {
                id,
                label: label.clone(),
            })
            .collect();

        let mut edges = Vec::new();
        let mut adjacency = vec![Vec::new(); nodes.len()];

        for i in 0..matrix.len() {
            for j in (i + 1)..matrix.len() {
                let weight = matrix.get(i, j);
                if weight > threshold {
                    edges.push(Edge {
                        source: i,
                        target: j,
                        weight,
                    });
                    adjacency[i].push(j);
                    adjacency[j].push(i);
                }
            }
        }

        Self {
            nodes,
            edges,
            adjacency,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges incident to a node.
    pub fn degree(&self, id: usize) -> usize {
        self.adjacency[id].len()
    }

    /// Edge weight between two nodes, 0.0 when not adjacent.
    pub fn weight_between(&self, a: usize, b: usize) -> f64 {
        self.edges
            .iter()
            .find(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
            .map(|e| e.weight)
            .unwrap_or(0.0)
    }

    /// Unordered endpoint pairs of all edges, normalized as (min, max).
    pub fn edge_pairs(&self) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .map(|e| (e.source.min(e.target), e.source.max(e.target)))
            .collect()
    }

    /// Connected components as sorted node-id lists, enumerated in ascending
    /// order of their lowest node id.
    fn connected_components(&self) -> Vec<Vec<usize>> {
        let n = self.nodes.len();
        let mut visited = vec![false; n];
        let mut components = Vec::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = std::collections::VecDeque::from([start]);
            visited[start] = true;

            while let Some(current) = queue.pop_front() {
                component.push(current);
                for &neighbor in &self.adjacency[current] {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Induced subgraph on the connected component with the most nodes,
    /// relabeled to contiguous ids (labels are preserved).
    ///
    /// Ties on component size break toward the component containing the
    /// lowest node index, which is deterministic for a fixed label order.
    /// Fails when the graph is empty or the winner has no edges to draw.
    pub fn giant_component(&self) -> Result<NetworkGraph, AppError> {
        if self.nodes.is_empty() {
            return Err(AppError::NoConnectedStructure(
                "graph has no nodes".to_string(),
            ));
        }

        let components = self.connected_components();
        // Enumeration starts from node 0, so keeping the first maximum picks
        // the tied component with the lowest minimum node index.
        let mut giant = &components[0];
        for component in &components[1..] {
            if component.len() > giant.len() {
                giant = component;
            }
        }

        if giant.len() < 2 {
            return Err(AppError::NoConnectedStructure(format!(
                "largest component has {} node(s) and no edges",
                giant.len()
            )));
        }

        let mut remap = vec![usize::MAX; self.nodes.len()];
        let nodes: Vec<Node> = giant
            .iter()
            .enumerate()
            .map(|(new_id, &old_id)| {
                remap[old_id] = new_id;
                Node {
                    id: new_id,
                    label: self.nodes[old_id].label.clone(),
                }
            })
            .collect();

        let mut edges = Vec::new();
        let mut adjacency = vec![Vec::new(); nodes.len()];
        for edge in &self.edges {
            let (s, t) = (remap[edge.source], remap[edge.target]);
            if s != usize::MAX && t != usize::MAX {
                edges.push(Edge {
                    source: s,
                    target: t,
                    weight: edge.weight,
                });
                adjacency[s].push(t);
                adjacency[t].push(s);
            }
        }

        Ok(NetworkGraph {
            nodes,
            edges,
            adjacency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(labels: &[&str], entries: &[(usize, usize, f64)]) -> AdjacencyMatrix {
        let mut m = AdjacencyMatrix::zeros(labels.iter().map(|l| l.to_string()).collect());
        for &(i, j, w) in entries {
            m.set_symmetric(i, j, w);
        }
        m
    }

    #[test]
    fn test_matrix_graph_round_trip() {
        let m = matrix(
            &["a", "b", "c", "d"],
            &[(0, 1, 2.0), (1, 2, 1.0), (2, 3, 0.75)],
        );
        let g = NetworkGraph::from_matrix(&m, 0.0);

        // Every edge weight reads back as the matrix entry for that pair.
        for e in g.edges() {
            assert!((e.weight - m.get(e.source, e.target)).abs() < 1e-12);
        }
        assert_eq!(g.weight_between(0, 1), 2.0);
        assert_eq!(g.weight_between(0, 3), 0.0);
    }

    #[test]
    fn test_threshold_excludes_weak_edges() {
        let m = matrix(&["a", "b", "c"], &[(0, 1, 0.5), (1, 2, 0.05)]);
        let g = NetworkGraph::from_matrix(&m, 0.1);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edge_pairs(), vec![(0, 1)]);
    }

    #[test]
    fn test_giant_component_extraction() {
        // Two components: {a, b, c} and {d, e}. The larger one wins.
        let m = matrix(
            &["a", "b", "c", "d", "e"],
            &[(0, 1, 1.0), (1, 2, 1.0), (3, 4, 1.0)],
        );
        let g = NetworkGraph::from_matrix(&m, 0.0);
        let giant = g.giant_component().unwrap();

        assert_eq!(giant.node_count(), 3);
        let labels: Vec<&str> = giant.nodes().iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b", "c"]);
        assert_eq!(giant.edge_count(), 2);
    }

    #[test]
    fn test_tie_breaks_toward_lowest_node_index() {
        // Two components of size 2: {a, b} and {c, d}. The one containing
        // node 0 must win.
        let m = matrix(&["a", "b", "c", "d"], &[(0, 1, 1.0), (2, 3, 1.0)]);
        let g = NetworkGraph::from_matrix(&m, 0.0);
        let giant = g.giant_component().unwrap();

        let labels: Vec<&str> = giant.nodes().iter().map(|n| n.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
    }

    #[test]
    fn test_single_node_fails_explicitly() {
        let m = matrix(&["only"], &[]);
        let g = NetworkGraph::from_matrix(&m, 0.0);
        match g.giant_component() {
            Err(AppError::NoConnectedStructure(_)) => {}
            other => panic!("expected NoConnectedStructure, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_graph_fails_explicitly() {
        let m = AdjacencyMatrix::zeros(vec![]);
        let g = NetworkGraph::from_matrix(&m, 0.0);
        assert!(matches!(
            g.giant_component(),
            Err(AppError::NoConnectedStructure(_))
        ));
    }

    #[test]
    fn test_all_isolated_nodes_fail_explicitly() {
        // Nodes exist but no similarity exceeded the threshold anywhere.
        let m = matrix(&["a", "b", "c"], &[(0, 1, 0.05)]);
        let g = NetworkGraph::from_matrix(&m, 0.1);
        assert!(matches!(
            g.giant_component(),
            Err(AppError::NoConnectedStructure(_))
        ));
    }

    #[test]
    fn test_degrees_in_component() {
        let m = matrix(
            &["hub", "x", "y", "z"],
            &[(0, 1, 1.0), (0, 2, 1.0), (0, 3, 1.0)],
        );
        let g = NetworkGraph::from_matrix(&m, 0.0);
        let giant = g.giant_component().unwrap();
        assert_eq!(giant.degree(0), 3);
        assert_eq!(giant.degree(1), 1);
    }
}
