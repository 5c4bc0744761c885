use crate::render::{Renderer, Scene};
use anyhow::Context;
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;
use tracing::info;

const VIS_NETWORK_JS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/vis-network.min.js";
const VIS_NETWORK_CSS: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/vis-network/9.1.2/dist/dist/vis-network.min.css";

/// Interactive vis-network page written to a single HTML file.
pub struct InteractiveHtml {
    pub path: PathBuf,
}

impl InteractiveHtml {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Renderer for InteractiveHtml {
    fn render(&self, scene: &Scene) -> anyhow::Result<PathBuf> {
        let page = render_page(scene)?;
        std::fs::write(&self.path, page)
            .with_context(|| format!("writing {}", self.path.display()))?;
        info!(
            path = %self.path.display(),
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            "interactive page written"
        );
        Ok(self.path.clone())
    }
}

/// JSON that can sit inside a `<script>` element.
fn script_json(value: &impl serde::Serialize) -> anyhow::Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

pub fn render_page(scene: &Scene) -> anyhow::Result<String> {
    let canvas = &scene.layout.canvas;
    let nodes = scene
        .nodes
        .iter()
        .map(|n| {
            json!({
                "id": n.id,
                "label": n.label,
                "size": n.size,
                "color": n.color,
                "title": n.title,
                "shape": "dot",
                "font": { "color": canvas.font_color },
            })
        })
        .collect::<Vec<_>>();
    let options = json!({
        "physics": {
            "enabled": true,
            "solver": "repulsion",
            "repulsion": scene.layout.physics,
        },
        "edges": { "color": { "inherit": true }, "smooth": false },
        "interaction": { "hover": true },
    });

    let mut out = String::with_capacity(4096 + scene.nodes.len() * 512);
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    writeln!(out, "<script src=\"{VIS_NETWORK_JS}\"></script>")?;
    writeln!(out, "<link rel=\"stylesheet\" href=\"{VIS_NETWORK_CSS}\">")?;
    out.push_str("<style>\n");
    writeln!(
        out,
        "#network {{ width: {}; height: {}; background-color: {}; position: relative; float: left; }}",
        canvas.width, canvas.height, canvas.background
    )?;
    out.push_str("body { margin: 0; }\n</style>\n</head>\n<body>\n");
    out.push_str("<div id=\"network\"></div>\n<script>\n");
    writeln!(out, "var nodeData = {};", script_json(&nodes)?)?;
    writeln!(out, "var edgeData = {};", script_json(&scene.edges)?)?;
    writeln!(out, "var options = {};", script_json(&options)?)?;
    // plain-text tooltips keep their line breaks when wrapped in an element
    out.push_str(
        "nodeData.forEach(function (n) {\n  \
           var el = document.createElement(\"div\");\n  \
           el.style.whiteSpace = \"pre-line\";\n  \
           el.innerText = n.title;\n  \
           n.title = el;\n\
         });\n",
    );
    out.push_str(
        "var network = new vis.Network(\n  \
           document.getElementById(\"network\"),\n  \
           { nodes: new vis.DataSet(nodeData), edges: new vis.DataSet(edgeData) },\n  \
           options\n\
         );\n",
    );
    out.push_str("</script>\n</body>\n</html>\n");
    Ok(out)
}
