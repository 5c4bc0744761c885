use crate::core::graph::ProjectGraph;
use crate::core::project::Project;
use serde::Serialize;

/// Colour used for any category without a palette entry.
pub const DEFAULT_COLOR: &str = "gray";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualNode {
    pub id: String,
    pub label: String,
    pub size: f64,
    pub color: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualEdge {
    pub from: String,
    pub to: String,
    pub width: f64,
}

pub fn node_size(market_cap: f64) -> f64 {
    market_cap / 1e7 + 5.0
}

pub fn edge_width(weight: f64) -> f64 {
    weight / 1e9
}

pub fn node_color(category: &str) -> &'static str {
    match category {
        "AI" => "red",
        "Gaming" => "blue",
        "RWA" => "green",
        "Memes" => "purple",
        _ => DEFAULT_COLOR,
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

pub fn tooltip(project: &Project) -> String {
    [
        project.id.clone(),
        format!("Category: {}", project.category),
        format!("Market Cap: ${:.2}", project.market_cap),
        format!("Volume 24h: ${:.2}", project.volume_24h),
        format!("Price: ${:.4}", project.price),
        format!("Ranking: {}", project.ranking),
        format!("Prior Halving: {}", yes_no(project.prior_halving)),
        format!("Multichain: {}", yes_no(project.multichain)),
        format!("Listed CEX: {}", yes_no(project.listed_cex)),
        format!("Diffusion: {:.2}", project.diffusion_factor),
        format!("Rating: {:.2}", project.rating),
    ]
    .join("\n")
}

pub fn visual_node(project: &Project) -> VisualNode {
    VisualNode {
        id: project.id.clone(),
        label: project.id.clone(),
        size: node_size(project.market_cap),
        color: node_color(project.category.label()).to_string(),
        title: tooltip(project),
    }
}

pub fn visual_nodes(graph: &ProjectGraph) -> Vec<VisualNode> {
    graph.projects().map(|(_, p)| visual_node(p)).collect()
}

pub fn visual_edges(graph: &ProjectGraph) -> Vec<VisualEdge> {
    graph
        .edges()
        .map(|e| VisualEdge {
            from: graph.project(e.src).id.clone(),
            to: graph.project(e.dst).id.clone(),
            width: edge_width(e.weight),
        })
        .collect()
}
