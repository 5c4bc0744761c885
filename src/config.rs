use serde::Serialize;

pub const DEFAULT_NODE_COUNT: u32 = 100;
pub const RANDOM_LINK_PROBABILITY: f64 = 0.05;
pub const CATEGORY_BONUS_PROBABILITY: f64 = 0.20;
pub const DEFAULT_OUTPUT: &str = "crypto_network_interactive.html";

pub const SPRING_K: f64 = 0.5;
pub const SPRING_ITERATIONS: usize = 50;

/// Pair evaluations above which the generator logs a warning.
pub const PAIR_EVALUATION_WARN: u64 = 10_000_000;

/// Repulsion solver parameters handed to the interactive renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhysicsConfig {
    pub node_distance: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_constant: f64,
    pub damping: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            node_distance: 100.0,
            central_gravity: 0.2,
            spring_length: 200.0,
            spring_constant: 0.05,
            damping: 0.09,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub height: String,
    pub width: String,
    pub background: String,
    pub font_color: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            height: "750px".to_string(),
            width: "100%".to_string(),
            background: "#222222".to_string(),
            font_color: "white".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutConfig {
    pub physics: PhysicsConfig,
    pub canvas: CanvasConfig,
}

/// Parameters of the force-directed layout used by the static plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub k: f64,
    pub iterations: usize,
    pub seed: u64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            k: SPRING_K,
            iterations: SPRING_ITERATIONS,
            seed: 0,
        }
    }
}
