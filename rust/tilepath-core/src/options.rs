use std::env;

use serde::{Deserialize, Serialize};

use crate::engine::Heuristic;

pub const DEFAULT_MAX_EXPANSIONS: u64 = 250_000;
pub const DEFAULT_MIN_STEP_COST: f64 = 1.0;
pub const DEFAULT_SEARCHER_CAPACITY: usize = 32;

/// Tile adjacency used when generating edges.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    FourWay,
    EightWay,
}

impl Movement {
    /// Heuristic that stays admissible for this adjacency with unit step costs.
    pub fn default_heuristic(self) -> Heuristic {
        match self {
            Movement::FourWay => Heuristic::Manhattan,
            Movement::EightWay => Heuristic::Euclidean,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Node-expansion budget. Exhausting it ends the search as not found.
    pub max_expansions: u64,
    pub movement: Movement,
    /// Overrides the movement-derived heuristic when set.
    pub heuristic: Option<Heuristic>,
    /// Let a diagonal step slip past an impassable orthogonal neighbour.
    pub allow_corner_cutting: bool,
    /// Lower bound on tile entry costs; the heuristic is scaled by it. A
    /// handler reporting a cheaper minimum lowers it for that search, and
    /// cheaper undeclared costs are raised to it.
    pub min_step_cost: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            movement: Movement::EightWay,
            heuristic: None,
            allow_corner_cutting: false,
            min_step_cost: DEFAULT_MIN_STEP_COST,
        }
    }
}

impl SearchOptions {
    pub fn four_way() -> Self {
        Self { movement: Movement::FourWay, ..Self::default() }
    }

    pub fn effective_heuristic(&self) -> Heuristic {
        self.heuristic.unwrap_or_else(|| self.movement.default_heuristic())
    }

    /// Defaults overridden by `TILEPATH_MAX_EXPANSIONS`, `TILEPATH_MOVEMENT`
    /// (`four_way` | `eight_way`) and `TILEPATH_CORNER_CUTTING`.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut opts = Self::default();
        if let Ok(s) = env::var("TILEPATH_MAX_EXPANSIONS") {
            opts.max_expansions = s
                .trim()
                .parse::<u64>()
                .map_err(|e| anyhow::anyhow!("TILEPATH_MAX_EXPANSIONS={s:?}: {e}"))?;
        }
        if let Ok(s) = env::var("TILEPATH_MOVEMENT") {
            opts.movement = parse_movement(&s)?;
        }
        if let Ok(s) = env::var("TILEPATH_CORNER_CUTTING") {
            opts.allow_corner_cutting = parse_flag("TILEPATH_CORNER_CUTTING", &s)?;
        }
        Ok(opts)
    }
}

fn parse_movement(value: &str) -> anyhow::Result<Movement> {
    match value.trim().to_ascii_lowercase().as_str() {
        "four_way" | "4" => Ok(Movement::FourWay),
        "eight_way" | "8" => Ok(Movement::EightWay),
        other => anyhow::bail!("TILEPATH_MOVEMENT: unknown movement {other:?}"),
    }
}

fn parse_flag(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{name}: expected a boolean, got {other:?}"),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Maximum number of floor searchers kept alive. Least recently used is dropped.
    pub searcher_capacity: usize,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self { searcher_capacity: DEFAULT_SEARCHER_CAPACITY }
    }
}

impl ProviderConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let searcher_capacity = match env::var("TILEPATH_SEARCHER_CAPACITY") {
            Ok(s) => s
                .trim()
                .parse::<usize>()
                .map_err(|e| anyhow::anyhow!("TILEPATH_SEARCHER_CAPACITY={s:?}: {e}"))?,
            Err(_) => DEFAULT_SEARCHER_CAPACITY,
        };
        Ok(Self { searcher_capacity })
    }
}
