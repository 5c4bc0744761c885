use crate::core::project::{Category, Project, Relation};
use crate::ingest::synthetic::LinkProbabilities;

#[derive(Debug, PartialEq)]
pub struct WorkStats {
    pub nodes: usize,
    pub pair_evaluations: u64,
    pub expected_edges: f64,
    pub bytes: usize,
}

/// Edge generation visits every unordered pair once, so the cost is
/// quadratic in the node count.
pub fn estimate_generation_work(nodes: usize, probabilities: &LinkProbabilities) -> WorkStats {
    let n = nodes as u64;
    let pair_evaluations = n * n.saturating_sub(1) / 2;

    // categories are drawn uniformly, so a pair shares one with probability 1/|categories|
    let same_category = 1.0 / Category::ALL.len() as f64;
    let edge_rate = probabilities.random_link
        + (1.0 - probabilities.random_link) * same_category * probabilities.category_bonus;
    let expected_edges = pair_evaluations as f64 * edge_rate;

    WorkStats {
        nodes,
        pair_evaluations,
        expected_edges,
        bytes: nodes * size_of::<Project>() + expected_edges as usize * size_of::<Relation>(),
    }
}
