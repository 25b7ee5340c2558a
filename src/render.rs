//! Visual scaling and vis-network HTML emission
//!
//! Maps the extracted component onto renderable records: node size tracks
//! degree (linearly rescaled into [10, 50]), edge width tracks weight
//! relative to the maximum present (into [0, 8]). The page embeds the records
//! into a vis-network canvas with dragging, panning and zooming enabled and
//! the physics simulation disabled, so the fixed-seed layout is displayed
//! as computed.

use crate::graph::NetworkGraph;
use crate::services::{NetworkMode, NetworkView};
use serde::Serialize;

const MIN_NODE_SIZE: f64 = 10.0;
const MAX_NODE_SIZE: f64 = 50.0;
const MAX_EDGE_WIDTH: f64 = 8.0;
/// Layout coordinates are in [-1, 1]; the canvas wants pixels.
const CANVAS_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, Serialize)]
pub struct VisNode {
    pub id: usize,
    pub label: String,
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct VisEdge {
    #[serde(rename = "from")]
    pub source: usize,
    #[serde(rename = "to")]
    pub target: usize,
    /// Raw weight rounded to 2 decimals, shown on hover.
    pub value: f64,
    pub width: f64,
}

/// Scale node degrees into display sizes and attach layout positions.
///
/// When every degree is equal the range collapses; the divisor is clamped to
/// 1 so all nodes render at the minimum size instead of dividing by zero.
pub fn scale_nodes(graph: &NetworkGraph, positions: &[(f64, f64)]) -> Vec<VisNode> {
    let degrees: Vec<usize> = (0..graph.node_count()).map(|i| graph.degree(i)).collect();
    let min_degree = degrees.iter().copied().min().unwrap_or(0);
    let max_degree = degrees.iter().copied().max().unwrap_or(0);
    let range = if max_degree == min_degree {
        1.0
    } else {
        (max_degree - min_degree) as f64
    };

    graph
        .nodes()
        .iter()
        .map(|node| {
            let degree = degrees[node.id] as f64;
            let size =
                (degree - min_degree as f64) / range * (MAX_NODE_SIZE - MIN_NODE_SIZE) + MIN_NODE_SIZE;
            let (x, y) = positions.get(node.id).copied().unwrap_or((0.0, 0.0));
            VisNode {
                id: node.id,
                label: node.label.clone(),
                size,
                x: x * CANVAS_SCALE,
                y: y * CANVAS_SCALE,
            }
        })
        .collect()
}

/// Scale edge weights by the maximum weight present. A zero maximum would
/// make the rescale undefined, so it is guarded and yields zero widths.
pub fn scale_edges(graph: &NetworkGraph) -> Vec<VisEdge> {
    let max_weight = graph
        .edges()
        .iter()
        .map(|e| e.weight)
        .fold(0.0f64, f64::max);

    graph
        .edges()
        .iter()
        .map(|edge| {
            let width = if max_weight > 0.0 {
                edge.weight / max_weight * MAX_EDGE_WIDTH
            } else {
                0.0
            };
            VisEdge {
                source: edge.source,
                target: edge.target,
                value: (edge.weight * 100.0).round() / 100.0,
                width,
            }
        })
        .collect()
}

/// vis-network options: static display of the precomputed layout.
const VIS_OPTIONS: &str = r#"{
  "layout": { "improvedLayout": true },
  "physics": { "enabled": false },
  "interaction": { "dragNodes": true, "dragView": true, "zoomView": true },
  "nodes": { "scaling": { "min": 10, "max": 50 } }
}"#;

/// Render the full interactive page for a built network view.
pub fn render_page(view: &NetworkView) -> String {
    let nodes_json = serde_json::to_string(&view.nodes).unwrap_or_else(|_| "[]".to_string());
    let edges_json = serde_json::to_string(&view.edges).unwrap_or_else(|_| "[]".to_string());

    let top_authors = match &view.top_authors {
        Some(ranks) => {
            let rows: String = ranks
                .iter()
                .enumerate()
                .map(|(i, r)| {
                    format!(
                        "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                        i + 1,
                        escape_html(&r.name),
                        r.weight
                    )
                })
                .collect();
            format!(
                "<h2>Most collaborative authors</h2>\
                 <table><thead><tr><th>#</th><th>Author</th><th>Collaborations</th></tr></thead>\
                 <tbody>{rows}</tbody></table>"
            )
        }
        None => String::new(),
    };

    let paper_rows: String = view
        .papers
        .iter()
        .map(|p| {
            format!(
                "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>",
                escape_html(&p.url),
                escape_html(&p.title),
                escape_html(&p.year),
                escape_html(&p.citation_count)
            )
        })
        .collect();

    let legend = match view.mode {
        NetworkMode::Coauthorship => {
            "Node size reflects a researcher's number of collaborations; \
             link thickness counts papers shared by two researchers."
        }
        NetworkMode::Similarity => {
            "Node size reflects how many related papers a paper connects to; \
             link thickness reflects abstract similarity."
        }
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title} — {query}</title>
<script src="https://unpkg.com/vis-network/standalone/umd/vis-network.min.js"></script>
<style>
  body {{ font-family: sans-serif; margin: 1.5rem; background: #f9f9f9; }}
  #network {{ height: 750px; border: 1px solid #ddd; background: #ffffff; }}
  table {{ border-collapse: collapse; margin: 1rem 0; }}
  td, th {{ border: 1px solid #ccc; padding: 0.3rem 0.7rem; text-align: left; }}
  .legend {{ color: #555; font-size: 0.9rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
<p>Query: <strong>{query}</strong></p>
<p class="legend">{legend} Drag nodes to rearrange the layout.</p>
<div id="network"></div>
{top_authors}
<h2>Papers</h2>
<table><thead><tr><th>Title</th><th>Year</th><th>Citations</th></tr></thead>
<tbody>{paper_rows}</tbody></table>
<p><a href="/">New query</a></p>
<script>
  const nodes = new vis.DataSet({nodes_json});
  const edges = new vis.DataSet({edges_json});
  const container = document.getElementById("network");
  new vis.Network(container, {{ nodes, edges }}, {options});
</script>
</body>
</html>
"#,
        title = view.mode.title(),
        query = escape_html(&view.query),
        legend = legend,
        top_authors = top_authors,
        paper_rows = paper_rows,
        nodes_json = nodes_json,
        edges_json = edges_json,
        options = VIS_OPTIONS,
    )
}

/// The landing page: query input, bounded result count, mode selector.
pub fn render_index(max_results: u32) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Explore the World of Scientific Networks</title>
<style>
  body {{ font-family: sans-serif; max-width: 40rem; margin: 3rem auto; }}
  label {{ display: block; margin-top: 1rem; }}
  input, select {{ padding: 0.3rem; margin-top: 0.2rem; width: 100%; }}
  button {{ margin-top: 1.5rem; padding: 0.5rem 1.5rem; }}
</style>
</head>
<body>
<h1>Explore the World of Scientific Networks</h1>
<form action="/network" method="get">
  <label>Search by keyword, research topic, field name, or researcher
    <input type="text" name="query" required>
  </label>
  <label>How many results to include (0&ndash;{max_results})
    <input type="number" name="limit" min="0" max="{max_results}" value="10" required>
  </label>
  <label>Network type
    <select name="mode">
      <option value="coauthorship">Co-authorship</option>
      <option value="similarity">Paper similarity</option>
    </select>
  </label>
  <button type="submit">Show giant component</button>
</form>
</body>
</html>
"#
    )
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
