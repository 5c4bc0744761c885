use crate::config::SpringConfig;
use crate::core::graph::ProjectGraph;
use crate::ingest::synthetic::{RandomSource, RngSource};

const MIN_DISTANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// Fruchterman-Reingold force-directed placement.
///
/// Starts from uniform positions in the unit square, cools linearly over
/// `cfg.iterations` steps and returns coordinates rescaled to `[-1, 1]`
/// around the centroid. Every edge attracts with unit strength.
pub fn spring_layout(graph: &ProjectGraph, cfg: &SpringConfig) -> Vec<Position> {
    let n = graph.node_count();
    let mut source = RngSource::seeded(cfg.seed);
    let mut pos = (0..n)
        .map(|_| Position {
            x: source.uniform(0.0, 1.0),
            y: source.uniform(0.0, 1.0),
        })
        .collect::<Vec<_>>();
    if n <= 1 {
        return rescale(pos);
    }

    let mut adjacent = vec![false; n * n];
    for (i, _) in graph.projects() {
        for neighbor in graph.neighbors(i) {
            adjacent[i as usize * n + neighbor.node as usize] = true;
        }
    }

    let span = |pos: &[Position]| {
        let (mut min_x, mut max_x) = (f64::MAX, f64::MIN);
        let (mut min_y, mut max_y) = (f64::MAX, f64::MIN);
        for p in pos {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        (max_x - min_x).max(max_y - min_y)
    };
    let mut temperature = span(&pos) * 0.1;
    let cooling = temperature / (cfg.iterations as f64 + 1.0);
    let k2 = cfg.k * cfg.k;

    let mut displacement = vec![Position { x: 0.0, y: 0.0 }; n];
    for _ in 0..cfg.iterations {
        for i in 0..n {
            let mut d = Position { x: 0.0, y: 0.0 };
            for j in 0..n {
                if i == j {
                    continue;
                }
                let dx = pos[i].x - pos[j].x;
                let dy = pos[i].y - pos[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(MIN_DISTANCE);
                let attraction = if adjacent[i * n + j] { dist / cfg.k } else { 0.0 };
                let force = k2 / (dist * dist) - attraction;
                d.x += dx * force;
                d.y += dy * force;
            }
            displacement[i] = d;
        }
        for (p, d) in pos.iter_mut().zip(&displacement) {
            let length = (d.x * d.x + d.y * d.y).sqrt().max(MIN_DISTANCE);
            p.x += d.x * temperature / length;
            p.y += d.y * temperature / length;
        }
        temperature -= cooling;
    }

    rescale(pos)
}

fn rescale(mut pos: Vec<Position>) -> Vec<Position> {
    if pos.is_empty() {
        return pos;
    }
    let count = pos.len() as f64;
    let cx = pos.iter().map(|p| p.x).sum::<f64>() / count;
    let cy = pos.iter().map(|p| p.y).sum::<f64>() / count;
    let mut extent: f64 = 0.0;
    for p in pos.iter_mut() {
        p.x -= cx;
        p.y -= cy;
        extent = extent.max(p.x.abs()).max(p.y.abs());
    }
    if extent > 0.0 {
        for p in pos.iter_mut() {
            p.x /= extent;
            p.y /= extent;
        }
    }
    pos
}
