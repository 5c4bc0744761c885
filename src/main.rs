use crate::config::{
    DEFAULT_NODE_COUNT, DEFAULT_OUTPUT, LayoutConfig, PAIR_EVALUATION_WARN, SpringConfig,
};
use crate::core::graph::assemble;
use crate::core::memory::estimate_generation_work;
use crate::ingest::csv::{export_dataset, import_dataset};
use crate::ingest::synthetic::{Dataset, LinkProbabilities, RngSource, SyntheticConfig, generate};
use crate::render::html::InteractiveHtml;
use crate::render::layout::spring_layout;
use crate::render::svg::StaticPlot;
use crate::render::{Renderer, Scene};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod core;
pub mod ingest;
pub mod render;

/// Simulates a crypto project network and renders it as an interactive page.
#[derive(Parser, Debug)]
#[command(name = "cryptograph", version)]
struct Cli {
    /// Number of simulated projects
    #[arg(long, default_value_t = DEFAULT_NODE_COUNT, value_parser = clap::value_parser!(u32).range(1..))]
    nodes: u32,

    /// Seed for reproducible tables; OS entropy when absent
    #[arg(long)]
    seed: Option<u64>,

    /// Interactive HTML output, overwritten on every run
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also draw a static force-directed plot as SVG
    #[arg(long)]
    static_plot: Option<PathBuf>,

    /// Write projects.csv and relations.csv into this directory
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Load previously exported tables instead of simulating
    #[arg(long, conflicts_with_all = ["nodes", "seed", "random_link", "category_bonus"])]
    from_dir: Option<PathBuf>,

    /// Probability of a link between any two projects
    #[arg(long, default_value_t = LinkProbabilities::default().random_link, value_parser = probability)]
    random_link: f64,

    /// Extra link probability for projects sharing a category
    #[arg(long, default_value_t = LinkProbabilities::default().category_bonus, value_parser = probability)]
    category_bonus: f64,
}

fn probability(s: &str) -> Result<f64, String> {
    let p = s.parse::<f64>().map_err(|e| e.to_string())?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{p} is not in [0, 1]"))
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = run(&cli)?;
    println!("Interactive visualization saved to {}", path.display());
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    let data = load_or_generate(cli)?;

    if let Some(dir) = &cli.export_dir {
        export_dataset(dir, &data)?;
        debug!(dir = %dir.display(), "tables exported");
    }

    let graph = assemble(&data.projects, &data.relations)?;
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        isolated = graph.projects().filter(|(id, _)| graph.degree(*id) == 0).count(),
        "graph assembled"
    );

    let scene = Scene::from_graph(&graph, LayoutConfig::default());
    let path = InteractiveHtml::new(&cli.output).render(&scene)?;

    if let Some(plot) = &cli.static_plot {
        let spring = SpringConfig {
            seed: cli.seed.unwrap_or_default(),
            ..SpringConfig::default()
        };
        StaticPlot::new(plot, spring_layout(&graph, &spring)).render(&scene)?;
    }

    Ok(path)
}

fn load_or_generate(cli: &Cli) -> anyhow::Result<Dataset> {
    if let Some(dir) = &cli.from_dir {
        let (data, stats) = import_dataset(dir)?;
        debug!(parsed = stats.parsed, skipped = stats.skipped, "tables imported");
        if stats.skipped > 0 {
            warn!(skipped = stats.skipped, "some rows could not be imported");
        }
        return Ok(data);
    }

    let cfg = SyntheticConfig {
        node_count: cli.nodes,
        links: LinkProbabilities {
            random_link: cli.random_link,
            category_bonus: cli.category_bonus,
        },
    };
    let work = estimate_generation_work(cfg.node_count as usize, &cfg.links);
    debug!(
        nodes = work.nodes,
        pairs = work.pair_evaluations,
        expected_edges = work.expected_edges,
        approx_mb = work.bytes / (1024 * 1024),
        "generation cost"
    );
    if work.pair_evaluations > PAIR_EVALUATION_WARN {
        warn!(
            pairs = work.pair_evaluations,
            "edge generation is quadratic in the node count"
        );
    }

    let data = match cli.seed {
        Some(seed) => generate(&cfg, &mut RngSource::seeded(seed)),
        None => generate(&cfg, &mut RngSource::from_entropy()),
    };
    debug!(
        projects = data.projects.len(),
        relations = data.relations.len(),
        "tables generated"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("cryptograph").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let c = cli(&[]);
        assert_eq!(100, c.nodes);
        assert_eq!(None, c.seed);
        assert_eq!(PathBuf::from("crypto_network_interactive.html"), c.output);
        assert_eq!(0.05, c.random_link);
        assert_eq!(0.2, c.category_bonus);
        assert!(c.static_plot.is_none());
    }

    #[test]
    fn test_rejects_bad_arguments() {
        let parse = |args: &[&str]| {
            Cli::try_parse_from(std::iter::once("cryptograph").chain(args.iter().copied()))
        };
        assert!(parse(&["--nodes", "0"]).is_err());
        assert!(parse(&["--random-link", "1.5"]).is_err());
        assert!(parse(&["--from-dir", "x", "--seed", "1"]).is_err());
        assert!(parse(&["--from-dir", "x", "--random-link", "0.5"]).is_err());
        assert!(parse(&["--from-dir", "x", "--category-bonus", "0.5"]).is_err());
        assert!(parse(&["--from-dir", "x"]).is_ok());
    }

    #[test]
    fn test_seeded_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("net.html");
        let plot = dir.path().join("net.svg");
        let tables = dir.path().join("tables");
        let c = cli(&[
            "--nodes",
            "20",
            "--seed",
            "5",
            "--output",
            out.to_str().unwrap(),
            "--static-plot",
            plot.to_str().unwrap(),
            "--export-dir",
            tables.to_str().unwrap(),
        ]);

        assert_eq!(out, run(&c).unwrap());
        let page = std::fs::read_to_string(&out).unwrap();
        assert!(page.contains("PROYECTO_20"));
        assert!(std::fs::read_to_string(&plot).unwrap().contains("<circle"));

        // re-rendering from the exported tables reproduces the same page
        let again = dir.path().join("again.html");
        let c = cli(&[
            "--from-dir",
            tables.to_str().unwrap(),
            "--output",
            again.to_str().unwrap(),
        ]);
        run(&c).unwrap();
        assert_eq!(page, std::fs::read_to_string(&again).unwrap());
    }
}
