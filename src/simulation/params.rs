//! Simulation parameters and world bounds.

use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Size of the rectangular world, origin at (0, 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldBounds {
    /// Extent along x.
    pub width: f32,
    /// Extent along y.
    pub height: f32,
}

impl WorldBounds {
    /// Creates bounds of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Length of the world diagonal, used to normalize distances.
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }

    /// A random point with integer coordinates in `[0, width) × [0, height)`.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (f32, f32) {
        (
            (rng.random::<f32>() * self.width).floor(),
            (rng.random::<f32>() * self.height).floor(),
        )
    }
}

/// Simulation parameters that control ecosystem behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Simulation area width.
    pub box_width: f32,
    /// Simulation area height.
    pub box_height: f32,
    /// Bacteria created at genesis.
    pub n_bacteria: usize,
    /// Food items created at genesis.
    pub n_food: usize,
    /// A food item is respawned each tick while fewer than this many remain.
    pub min_food: usize,
    /// Lowest energy a food item can carry (inclusive).
    pub food_energy_min: u32,
    /// Highest energy a food item can carry (exclusive).
    pub food_energy_max: u32,
    /// Size of a newly created bacterium.
    pub initial_size: f32,
    /// Energy of a newly created bacterium.
    pub initial_energy: f32,
    /// Hidden layer width of every brain.
    pub hidden_nodes: usize,
    /// Heading change per turn action, in radians.
    pub turn_rate: f32,
    /// Energy spent by one forward move.
    pub move_energy_cost: f32,
    /// Energy spent by one grow action.
    pub grow_energy_cost: f32,
    /// Size gained by one grow action.
    pub grow_amount: f32,
    /// Probability per tick that a bacterium reproduces.
    pub reproduction_chance: f32,
    /// Per-weight mutation probability applied to offspring brains.
    pub mutation_rate: f32,
    /// Wrap positions around the world edges after every tick.
    pub wrap_around: bool,
    /// Seed for the simulation RNG; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            box_width: 800.0,
            box_height: 600.0,
            n_bacteria: 50,
            n_food: 100,
            min_food: 10,
            food_energy_min: 10,
            food_energy_max: 50,
            initial_size: 10.0,
            initial_energy: 100.0,
            hidden_nodes: 8,
            turn_rate: 0.1,
            move_energy_cost: 0.1,
            grow_energy_cost: 0.5,
            grow_amount: 0.1,
            reproduction_chance: 0.001,
            mutation_rate: 0.1,
            wrap_around: false,
            seed: None,
        }
    }
}

impl Params {
    /// World bounds described by `box_width` and `box_height`.
    pub fn bounds(&self) -> WorldBounds {
        WorldBounds::new(self.box_width, self.box_height)
    }

    /// Checks that the parameters describe a runnable simulation.
    pub fn validate(&self) -> Result<()> {
        if !(self.box_width > 0.0 && self.box_height > 0.0) {
            return Err(Error::InvalidParams(format!(
                "world bounds must be positive, got {}x{}",
                self.box_width, self.box_height
            )));
        }
        if self.hidden_nodes == 0 {
            return Err(Error::InvalidParams("hidden_nodes must be positive".into()));
        }
        if self.food_energy_min >= self.food_energy_max {
            return Err(Error::InvalidParams(format!(
                "food energy range [{}, {}) is empty",
                self.food_energy_min, self.food_energy_max
            )));
        }
        for (name, value) in [
            ("reproduction_chance", self.reproduction_chance),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidParams(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Parses parameters from JSON. Missing fields take their default value.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Loads parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}
