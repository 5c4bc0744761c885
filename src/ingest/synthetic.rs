use crate::config::{CATEGORY_BONUS_PROBABILITY, DEFAULT_NODE_COUNT, RANDOM_LINK_PROBABILITY};
use crate::core::project::{
    Category, LinkRule, Project, Relation, WALLET_CATALOG, contract_address, explorer_url,
    project_id, twitter_url, website_url,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of every draw the generator makes.
///
/// Implemented over `rand` generators by [`RngSource`]; tests substitute
/// scripted sources to force particular outcomes.
pub trait RandomSource {
    /// `true` with the given probability.
    fn chance(&mut self, probability: f64) -> bool;
    /// Uniform float in `[low, high]`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
    /// Uniform integer in `[low, high]`.
    fn integer(&mut self, low: u32, high: u32) -> u32;
    /// Uniform index in `0..len`.
    fn index(&mut self, len: usize) -> usize;
    /// `amount` distinct indices from `0..len`.
    fn subset(&mut self, len: usize, amount: usize) -> Vec<usize>;
    fn fill_bytes(&mut self, buf: &mut [u8]);

    fn coin(&mut self) -> bool {
        self.chance(0.5)
    }
}

pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn chance(&mut self, probability: f64) -> bool {
        self.0.random::<f64>() < probability
    }

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.0.random_range(low..=high)
    }

    fn integer(&mut self, low: u32, high: u32) -> u32 {
        self.0.random_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.0.random_range(0..len)
    }

    fn subset(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.0, len, amount).into_vec()
    }

    fn fill_bytes(&mut self, buf: &mut [u8]) {
        self.0.fill(buf);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkProbabilities {
    pub random_link: f64,
    pub category_bonus: f64,
}

impl Default for LinkProbabilities {
    fn default() -> Self {
        Self {
            random_link: RANDOM_LINK_PROBABILITY,
            category_bonus: CATEGORY_BONUS_PROBABILITY,
        }
    }
}

pub struct SyntheticConfig {
    pub node_count: u32,
    pub links: LinkProbabilities,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            node_count: DEFAULT_NODE_COUNT,
            links: LinkProbabilities::default(),
        }
    }
}

/// Node and edge tables of one simulated market.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub projects: Vec<Project>,
    pub relations: Vec<Relation>,
}

pub fn generate<S: RandomSource>(cfg: &SyntheticConfig, source: &mut S) -> Dataset {
    let projects = (1..=cfg.node_count)
        .map(|n| generate_project(n, source))
        .collect::<Vec<_>>();
    let relations = generate_relations(&projects, &cfg.links, source);
    Dataset {
        projects,
        relations,
    }
}

pub fn generate_project<S: RandomSource>(n: u32, source: &mut S) -> Project {
    let id = project_id(n);
    let category = Category::ALL[source.index(Category::ALL.len())];
    let market_cap = source.uniform(1e6, 1e9);
    let volume_24h = source.uniform(market_cap * 0.01, market_cap * 0.1);
    let price = source.uniform(0.01, 100.0);
    let circulating_supply = source.uniform(1e6, 1e10);
    let total_supply = circulating_supply * source.uniform(1.0, 5.0);
    let max_supply = if source.chance(0.8) {
        Some(total_supply * source.uniform(1.0, 10.0))
    } else {
        None
    };
    let ranking = source.integer(1, 2000);
    let prior_halving = source.coin();
    let multichain = source.coin();
    let listed_cex = source.coin();

    let mut address = [0u8; 20];
    source.fill_bytes(&mut address);

    let wallet_count = source.integer(1, 4) as usize;
    let supported_wallets = source
        .subset(WALLET_CATALOG.len(), wallet_count)
        .into_iter()
        .map(|i| WALLET_CATALOG[i].to_string())
        .collect();

    Project {
        category,
        market_cap,
        volume_24h,
        price,
        circulating_supply,
        total_supply,
        max_supply,
        ranking,
        prior_halving,
        multichain,
        listed_cex,
        contract_address: contract_address(&address),
        supported_wallets,
        explorer_url: explorer_url(&id),
        website_url: website_url(&id),
        twitter_url: twitter_url(&id),
        diffusion_factor: source.uniform(0.1, 10.0),
        rating: source.uniform(1.0, 5.0),
        id,
    }
}

/// Evaluates every unordered pair `(i, j)` with `i < j` once.
pub fn generate_relations<S: RandomSource>(
    projects: &[Project],
    links: &LinkProbabilities,
    source: &mut S,
) -> Vec<Relation> {
    let mut relations = vec![];
    for (i, a) in projects.iter().enumerate() {
        for b in &projects[i + 1..] {
            let rule = if source.chance(links.random_link) {
                LinkRule::Random
            } else if a.category == b.category && source.chance(links.category_bonus) {
                LinkRule::SameCategory
            } else {
                continue;
            };
            relations.push(Relation {
                source: a.id.clone(),
                target: b.id.clone(),
                weight: rule.weight(a.market_cap, b.market_cap),
                rule,
            });
        }
    }
    relations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::graph::assemble;
    use std::collections::HashSet;

    /// Passes every chance draw whose probability is at least `threshold`,
    /// returns the low end of every range and cycles through categories.
    struct Rigged {
        threshold: f64,
        category: usize,
    }

    impl Rigged {
        fn always() -> Self {
            Self {
                threshold: 0.0,
                category: 0,
            }
        }
    }

    impl RandomSource for Rigged {
        fn chance(&mut self, probability: f64) -> bool {
            probability >= self.threshold
        }

        fn uniform(&mut self, low: f64, _high: f64) -> f64 {
            low
        }

        fn integer(&mut self, low: u32, _high: u32) -> u32 {
            low
        }

        fn index(&mut self, len: usize) -> usize {
            let idx = self.category % len;
            self.category += 1;
            idx
        }

        fn subset(&mut self, _len: usize, amount: usize) -> Vec<usize> {
            (0..amount).collect()
        }

        fn fill_bytes(&mut self, buf: &mut [u8]) {
            buf.fill(0xab);
        }
    }

    fn seeded(node_count: u32, seed: u64) -> Dataset {
        let cfg = SyntheticConfig {
            node_count,
            ..SyntheticConfig::default()
        };
        generate(&cfg, &mut RngSource::seeded(seed))
    }

    #[test]
    fn test_field_ranges() {
        let data = seeded(300, 7);
        assert_eq!(300, data.projects.len());
        for p in &data.projects {
            assert!((1e6..=1e9).contains(&p.market_cap));
            assert!(p.volume_24h >= p.market_cap * 0.01);
            assert!(p.volume_24h <= p.market_cap * 0.1);
            assert!((0.01..=100.0).contains(&p.price));
            assert!(p.total_supply >= p.circulating_supply);
            assert!(p.total_supply <= p.circulating_supply * 5.0);
            if let Some(max) = p.max_supply {
                assert!(max >= p.total_supply);
            }
            assert!((1..=2000).contains(&p.ranking));
            assert!((0.1..=10.0).contains(&p.diffusion_factor));
            assert!((1.0..=5.0).contains(&p.rating));
            assert_eq!(42, p.contract_address.len());
            assert!(p.contract_address.starts_with("0x"));
        }
    }

    #[test]
    fn test_wallets_distinct_from_catalog() {
        let data = seeded(200, 11);
        for p in &data.projects {
            assert!((1..=4).contains(&p.supported_wallets.len()));
            let unique = p.supported_wallets.iter().collect::<HashSet<_>>();
            assert_eq!(p.supported_wallets.len(), unique.len());
            assert!(
                p.supported_wallets
                    .iter()
                    .all(|w| WALLET_CATALOG.contains(&w.as_str()))
            );
        }
    }

    #[test]
    fn test_max_supply_sometimes_absent() {
        let data = seeded(500, 3);
        let absent = data.projects.iter().filter(|p| p.max_supply.is_none()).count();
        assert!(absent > 0);
        assert!(absent < 250);
    }

    #[test]
    fn test_identifiers_unique_and_one_indexed() {
        let data = seeded(100, 1);
        let ids = data.projects.iter().map(|p| p.id.as_str()).collect::<HashSet<_>>();
        assert_eq!(100, ids.len());
        assert_eq!("PROYECTO_1", data.projects[0].id);
        assert_eq!("PROYECTO_100", data.projects[99].id);
    }

    #[test]
    fn test_edges_have_no_loops_or_duplicates() {
        let data = seeded(150, 5);
        let mut pairs = HashSet::new();
        for r in &data.relations {
            assert_ne!(r.source, r.target);
            let key = if r.source < r.target {
                (r.source.clone(), r.target.clone())
            } else {
                (r.target.clone(), r.source.clone())
            };
            assert!(pairs.insert(key));
        }
    }

    #[test]
    fn test_edge_weight_follows_rule() {
        let data = seeded(150, 9);
        assert!(!data.relations.is_empty());
        for r in &data.relations {
            let a = data.projects.iter().find(|p| p.id == r.source).unwrap();
            let b = data.projects.iter().find(|p| p.id == r.target).unwrap();
            let sum = a.market_cap + b.market_cap;
            match r.rule {
                LinkRule::Random => assert_eq!(sum, r.weight),
                LinkRule::SameCategory => {
                    assert_eq!(a.category, b.category);
                    assert_eq!(2.0 * sum, r.weight);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_tables() {
        assert_eq!(seeded(60, 42), seeded(60, 42));
        assert_ne!(seeded(60, 42), seeded(60, 43));
    }

    #[test]
    fn test_forced_draws_make_triangle() {
        let cfg = SyntheticConfig {
            node_count: 3,
            ..SyntheticConfig::default()
        };
        let data = generate(&cfg, &mut Rigged::always());
        let g = assemble(&data.projects, &data.relations).unwrap();

        assert_eq!(3, g.node_count());
        assert_eq!(3, g.edge_count());
        for r in &data.relations {
            assert_eq!(LinkRule::Random, r.rule);
            assert_eq!(2e6, r.weight);
        }
        assert!(data.projects.iter().all(|p| p.max_supply.is_some()));
    }

    #[test]
    fn test_category_bonus_only_for_shared_category() {
        // random links never fire, the bonus always does
        let mut source = Rigged {
            threshold: 0.1,
            category: 0,
        };
        let cfg = SyntheticConfig {
            node_count: 8,
            ..SyntheticConfig::default()
        };
        let data = generate(&cfg, &mut source);

        // categories cycle AI, Gaming, RWA, Memes, so each one is held by two projects
        assert_eq!(4, data.relations.len());
        for r in &data.relations {
            assert_eq!(LinkRule::SameCategory, r.rule);
            assert_eq!(4e6, r.weight);
        }
    }

    #[test]
    fn test_random_rule_checked_before_category_bonus() {
        let mut a = generate_project(1, &mut Rigged::always());
        let mut b = generate_project(2, &mut Rigged::always());
        a.category = Category::Memes;
        b.category = Category::Memes;
        a.market_cap = 3e6;
        b.market_cap = 5e6;

        let relations = generate_relations(
            &[a, b],
            &LinkProbabilities::default(),
            &mut Rigged::always(),
        );
        assert_eq!(1, relations.len());
        assert_eq!(LinkRule::Random, relations[0].rule);
        assert_eq!(8e6, relations[0].weight);
    }
}
