//! Fixed-seed force-directed layout
//!
//! Fruchterman-Reingold spring layout over the extracted component. The RNG
//! is seeded, so the same graph always lands in the same arrangement; the
//! client renders the result statically with physics disabled.

use crate::graph::NetworkGraph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Layout seed. Fixed so repeated queries draw identically.
pub const LAYOUT_SEED: u64 = 42;

const ITERATIONS: usize = 50;

/// 2-D position per node id, rescaled so the layout is centered on the origin
/// with a maximum coordinate magnitude of 1.0.
pub fn spring_layout(graph: &NetworkGraph, seed: u64) -> Vec<(f64, f64)> {
    let n = graph.node_count();
    match n {
        0 => return Vec::new(),
        1 => return vec![(0.0, 0.0)],
        _ => {}
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pos: Vec<(f64, f64)> = (0..n)
        .map(|_| (rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)))
        .collect();

    // Optimal pairwise distance for a unit-area canvas.
    let k = (1.0 / n as f64).sqrt();
    let mut temperature = 0.1;
    let cooling = temperature / (ITERATIONS as f64 + 1.0);

    for _ in 0..ITERATIONS {
        let mut disp = vec![(0.0f64, 0.0f64); n];

        // Repulsion between every pair
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = pos[i].0 - pos[j].0;
                let dy = pos[i].1 - pos[j].1;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
                let force = k * k / dist;
                let (fx, fy) = (dx / dist * force, dy / dist * force);
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }
        }

        // Attraction along edges
        for edge in graph.edges() {
            let (i, j) = (edge.source, edge.target);
            let dx = pos[i].0 - pos[j].0;
            let dy = pos[i].1 - pos[j].1;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-9);
            let force = dist * dist / k;
            let (fx, fy) = (dx / dist * force, dy / dist * force);
            disp[i].0 -= fx;
            disp[i].1 -= fy;
            disp[j].0 += fx;
            disp[j].1 += fy;
        }

        // Displace, capped by the current temperature
        for i in 0..n {
            let (dx, dy) = disp[i];
            let len = (dx * dx + dy * dy).sqrt().max(1e-9);
            let step = len.min(temperature);
            pos[i].0 += dx / len * step;
            pos[i].1 += dy / len * step;
        }

        temperature -= cooling;
    }

    rescale(pos)
}

/// Center on the origin and scale the largest coordinate magnitude to 1.0.
fn rescale(mut pos: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let n = pos.len() as f64;
    let cx = pos.iter().map(|p| p.0).sum::<f64>() / n;
    let cy = pos.iter().map(|p| p.1).sum::<f64>() / n;
    for p in &mut pos {
        p.0 -= cx;
        p.1 -= cy;
    }

    let max_extent = pos
        .iter()
        .map(|p| p.0.abs().max(p.1.abs()))
        .fold(0.0f64, f64::max);
    if max_extent > 0.0 {
        for p in &mut pos {
            p.0 /= max_extent;
            p.1 /= max_extent;
        }
    }
    pos
}
