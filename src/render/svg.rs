use crate::render::layout::Position;
use crate::render::{Renderer, Scene};
use anyhow::{Context, bail};
use std::collections::HashMap;
use std::fmt::Write;
use std::path::PathBuf;
use tracing::info;

pub const PLOT_SIZE: f64 = 1200.0;
const MARGIN: f64 = 60.0;
const TITLE: &str = "Crypto Market Graph Model (Simulated)";

/// Static force-directed drawing written as an SVG image.
///
/// `positions` follow the order of `Scene::nodes`.
pub struct StaticPlot {
    pub path: PathBuf,
    pub positions: Vec<Position>,
}

impl StaticPlot {
    pub fn new(path: impl Into<PathBuf>, positions: Vec<Position>) -> Self {
        Self {
            path: path.into(),
            positions,
        }
    }
}

impl Renderer for StaticPlot {
    fn render(&self, scene: &Scene) -> anyhow::Result<PathBuf> {
        let image = render_svg(scene, &self.positions)?;
        std::fs::write(&self.path, image)
            .with_context(|| format!("writing {}", self.path.display()))?;
        info!(path = %self.path.display(), "static plot written");
        Ok(self.path.clone())
    }
}

fn to_canvas(p: &Position) -> (f64, f64) {
    let half = (PLOT_SIZE - 2.0 * MARGIN) / 2.0;
    (MARGIN + half + p.x * half, MARGIN + half - p.y * half)
}

pub fn render_svg(scene: &Scene, positions: &[Position]) -> anyhow::Result<String> {
    if positions.len() != scene.nodes.len() {
        bail!(
            "{} positions for {} nodes",
            positions.len(),
            scene.nodes.len()
        );
    }
    let index = scene
        .nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.as_str(), i))
        .collect::<HashMap<_, _>>();

    let mut out = String::with_capacity(1024 + scene.nodes.len() * 128 + scene.edges.len() * 96);
    writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{PLOT_SIZE}\" height=\"{PLOT_SIZE}\" viewBox=\"0 0 {PLOT_SIZE} {PLOT_SIZE}\">"
    )?;
    writeln!(out, "<rect width=\"100%\" height=\"100%\" fill=\"white\"/>")?;
    writeln!(
        out,
        "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"20\">{TITLE}</text>",
        PLOT_SIZE / 2.0,
        MARGIN / 2.0
    )?;

    out.push_str("<g stroke=\"gray\" stroke-opacity=\"0.6\">\n");
    for edge in &scene.edges {
        let (Some(&a), Some(&b)) = (index.get(edge.from.as_str()), index.get(edge.to.as_str()))
        else {
            bail!("edge {} -> {} has no positioned endpoint", edge.from, edge.to);
        };
        let (x1, y1) = to_canvas(&positions[a]);
        let (x2, y2) = to_canvas(&positions[b]);
        writeln!(out, "<line x1=\"{x1:.2}\" y1=\"{y1:.2}\" x2=\"{x2:.2}\" y2=\"{y2:.2}\"/>")?;
    }
    out.push_str("</g>\n");

    out.push_str("<g fill-opacity=\"0.6\">\n");
    for (node, p) in scene.nodes.iter().zip(positions) {
        let (cx, cy) = to_canvas(p);
        writeln!(
            out,
            "<circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{:.2}\" fill=\"{}\"><title>{}</title></circle>",
            node.size.sqrt(),
            node.color,
            escape(&node.id)
        )?;
    }
    out.push_str("</g>\n</svg>\n");
    Ok(out)
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::render::visual::{VisualEdge, VisualNode};

    fn node(id: &str, color: &str) -> VisualNode {
        VisualNode {
            id: id.to_string(),
            label: id.to_string(),
            size: 9.0,
            color: color.to_string(),
            title: String::new(),
        }
    }

    fn scene() -> Scene {
        Scene {
            nodes: vec![node("PROYECTO_1", "red"), node("PROYECTO_2", "gray")],
            edges: vec![VisualEdge {
                from: "PROYECTO_1".to_string(),
                to: "PROYECTO_2".to_string(),
                width: 1.0,
            }],
            layout: LayoutConfig::default(),
        }
    }

    #[test]
    fn test_svg_contents() {
        let positions = vec![Position { x: -1.0, y: 1.0 }, Position { x: 1.0, y: -1.0 }];
        let svg = render_svg(&scene(), &positions).unwrap();

        assert_eq!(2, svg.matches("<circle").count());
        assert_eq!(1, svg.matches("<line").count());
        assert!(svg.contains("fill=\"red\""));
        assert!(svg.contains("r=\"3.00\""));
        assert!(svg.contains(TITLE));
        assert!(svg.contains("<line x1=\"60.00\" y1=\"60.00\" x2=\"1140.00\" y2=\"1140.00\"/>"));
    }

    #[test]
    fn test_position_count_mismatch() {
        assert!(render_svg(&scene(), &[Position { x: 0.0, y: 0.0 }]).is_err());
    }

    #[test]
    fn test_render_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let positions = vec![Position { x: 0.0, y: 0.0 }, Position { x: 0.5, y: 0.5 }];

        StaticPlot::new(&path, positions).render(&scene()).unwrap();
        assert!(std::fs::read_to_string(path).unwrap().starts_with("<svg"));
    }
}
