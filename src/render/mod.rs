use crate::config::LayoutConfig;
use crate::core::graph::ProjectGraph;
use crate::render::visual::{VisualEdge, VisualNode, visual_edges, visual_nodes};
use std::path::PathBuf;

pub mod html;
pub mod layout;
pub mod svg;
pub mod visual;

/// Everything a renderer needs; built once from the assembled graph.
pub struct Scene {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    pub layout: LayoutConfig,
}

impl Scene {
    pub fn from_graph(graph: &ProjectGraph, layout: LayoutConfig) -> Self {
        Self {
            nodes: visual_nodes(graph),
            edges: visual_edges(graph),
            layout,
        }
    }
}

/// Side-effecting boundary: turns a scene into an output artifact.
pub trait Renderer {
    fn render(&self, scene: &Scene) -> anyhow::Result<PathBuf>;
}
