use crate::core::project::{Project, Relation};
use crate::ingest::synthetic::Dataset;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

pub const PROJECTS_FILE: &str = "projects.csv";
pub const RELATIONS_FILE: &str = "relations.csv";

const WALLET_SEPARATOR: &str = ";";

#[derive(Debug, Default, PartialEq)]
pub struct IngestStats {
    pub parsed: u64,
    pub skipped: u64,
}

/// Flat CSV row; the category stays a string so unknown labels can be skipped.
#[derive(Debug, Serialize, Deserialize)]
struct ProjectRow {
    id: String,
    category: String,
    market_cap: f64,
    volume_24h: f64,
    price: f64,
    circulating_supply: f64,
    total_supply: f64,
    max_supply: Option<f64>,
    ranking: u32,
    prior_halving: bool,
    multichain: bool,
    listed_cex: bool,
    contract_address: String,
    supported_wallets: String,
    explorer_url: String,
    website_url: String,
    twitter_url: String,
    diffusion_factor: f64,
    rating: f64,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            category: p.category.label().to_string(),
            market_cap: p.market_cap,
            volume_24h: p.volume_24h,
            price: p.price,
            circulating_supply: p.circulating_supply,
            total_supply: p.total_supply,
            max_supply: p.max_supply,
            ranking: p.ranking,
            prior_halving: p.prior_halving,
            multichain: p.multichain,
            listed_cex: p.listed_cex,
            contract_address: p.contract_address.clone(),
            supported_wallets: p.supported_wallets.join(WALLET_SEPARATOR),
            explorer_url: p.explorer_url.clone(),
            website_url: p.website_url.clone(),
            twitter_url: p.twitter_url.clone(),
            diffusion_factor: p.diffusion_factor,
            rating: p.rating,
        }
    }
}

impl TryFrom<ProjectRow> for Project {
    type Error = anyhow::Error;

    fn try_from(row: ProjectRow) -> anyhow::Result<Self> {
        Ok(Project {
            category: row.category.parse()?,
            market_cap: row.market_cap,
            volume_24h: row.volume_24h,
            price: row.price,
            circulating_supply: row.circulating_supply,
            total_supply: row.total_supply,
            max_supply: row.max_supply,
            ranking: row.ranking,
            prior_halving: row.prior_halving,
            multichain: row.multichain,
            listed_cex: row.listed_cex,
            contract_address: row.contract_address,
            supported_wallets: row
                .supported_wallets
                .split(WALLET_SEPARATOR)
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect(),
            explorer_url: row.explorer_url,
            website_url: row.website_url,
            twitter_url: row.twitter_url,
            diffusion_factor: row.diffusion_factor,
            rating: row.rating,
            id: row.id,
        })
    }
}

pub fn write_projects<W: std::io::Write>(writer: W, projects: &[Project]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for project in projects {
        csv_writer.serialize(ProjectRow::from(project))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_relations<W: std::io::Write>(writer: W, relations: &[Relation]) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for relation in relations {
        csv_writer.serialize(relation)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn read_projects<R: std::io::Read>(
    reader: R,
    projects: &mut Vec<Project>,
) -> anyhow::Result<IngestStats> {
    let mut csv_reader = csv::Reader::from_reader(BufReader::new(reader));
    let mut stats = IngestStats::default();

    for maybe_row in csv_reader.deserialize::<ProjectRow>() {
        match maybe_row.map_err(anyhow::Error::from).and_then(Project::try_from) {
            Ok(project) => {
                projects.push(project);
                stats.parsed += 1;
            }
            Err(err) => {
                warn!(error = %err, "skipping project row");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

pub fn read_relations<R: std::io::Read>(
    reader: R,
    relations: &mut Vec<Relation>,
) -> anyhow::Result<IngestStats> {
    let mut csv_reader = csv::Reader::from_reader(BufReader::new(reader));
    let mut stats = IngestStats::default();

    for maybe_row in csv_reader.deserialize::<Relation>() {
        match maybe_row {
            Ok(relation) if relation.weight > 0.0 => {
                relations.push(relation);
                stats.parsed += 1;
            }
            Ok(relation) => {
                warn!(
                    source = %relation.source,
                    target = %relation.target,
                    "skipping non-positive weight"
                );
                stats.skipped += 1;
            }
            Err(err) => {
                warn!(error = %err, "skipping relation row");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}

/// Writes both tables into `dir`, replacing earlier exports.
pub fn export_dataset(dir: &Path, data: &Dataset) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(PROJECTS_FILE);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_projects(file, &data.projects).with_context(|| format!("writing {}", path.display()))?;

    let path = dir.join(RELATIONS_FILE);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    write_relations(file, &data.relations)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn import_dataset(dir: &Path) -> anyhow::Result<(Dataset, IngestStats)> {
    let mut projects = vec![];
    let mut relations = vec![];

    let path = dir.join(PROJECTS_FILE);
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let project_stats = read_projects(file, &mut projects)?;

    let path = dir.join(RELATIONS_FILE);
    let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let relation_stats = read_relations(file, &mut relations)?;

    let stats = IngestStats {
        parsed: project_stats.parsed + relation_stats.parsed,
        skipped: project_stats.skipped + relation_stats.skipped,
    };
    Ok((
        Dataset {
            projects,
            relations,
        },
        stats,
    ))
}
