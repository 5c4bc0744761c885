use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write;
use std::str::FromStr;

pub const WALLET_CATALOG: [&str; 5] = ["MetaMask", "Trust Wallet", "Ledger", "Trezor", "Phantom"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ai,
    Gaming,
    Rwa,
    Memes,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Ai, Category::Gaming, Category::Rwa, Category::Memes];

    pub fn label(self) -> &'static str {
        match self {
            Category::Ai => "AI",
            Category::Gaming => "Gaming",
            Category::Rwa => "RWA",
            Category::Memes => "Memes",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| anyhow::anyhow!("unknown category {s:?}"))
    }
}

/// A simulated market entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub category: Category,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub price: f64,
    pub circulating_supply: f64,
    pub total_supply: f64,
    pub max_supply: Option<f64>,
    pub ranking: u32,
    pub prior_halving: bool,
    pub multichain: bool,
    pub listed_cex: bool,
    pub contract_address: String,
    pub supported_wallets: Vec<String>,
    pub explorer_url: String,
    pub website_url: String,
    pub twitter_url: String,
    pub diffusion_factor: f64,
    pub rating: f64,
}

/// Identifier of the `n`-th project, 1-indexed.
pub fn project_id(n: u32) -> String {
    format!("PROYECTO_{n}")
}

pub fn explorer_url(id: &str) -> String {
    format!("https://explorer.example.com/{id}")
}

pub fn website_url(id: &str) -> String {
    format!("https://{}.com", id.to_lowercase())
}

pub fn twitter_url(id: &str) -> String {
    format!("https://twitter.com/{}", id.to_lowercase())
}

pub fn contract_address(bytes: &[u8; 20]) -> String {
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for b in bytes {
        let _ = write!(out, "{b:02x}");
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkRule {
    Random,
    SameCategory,
}

impl LinkRule {
    pub fn weight(self, cap_a: f64, cap_b: f64) -> f64 {
        match self {
            LinkRule::Random => cap_a + cap_b,
            LinkRule::SameCategory => 2.0 * (cap_a + cap_b),
        }
    }
}

/// An undirected weighted association between two projects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub rule: LinkRule,
}
