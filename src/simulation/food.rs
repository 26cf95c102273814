//! Food items that bacteria can consume for energy.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::locatable::Locatable;
use super::params::Params;

/// A food item that bacteria can consume for energy.
///
/// Food is removed from the ecosystem as soon as it is eaten; there is no
/// partial consumption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    /// Identifier, unique within one ecosystem.
    pub id: usize,
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Energy granted to whoever eats this item.
    pub energy: f32,
}

impl Food {
    /// Creates a food item at an explicit position.
    pub fn new(id: usize, x: f32, y: f32, energy: f32) -> Self {
        Self {
            id,
            pos: Array1::from_vec(vec![x, y]),
            energy,
        }
    }

    /// Creates a food item at a random integer position inside the world bounds.
    ///
    /// Energy is a random integer in `[food_energy_min, food_energy_max)`,
    /// or `food_energy_min` when that range is empty.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier of the new item
    /// * `params` - Simulation parameters
    /// * `rng` - Random source
    ///
    /// # Returns
    ///
    /// A new food item.
    pub fn new_random<R: Rng + ?Sized>(id: usize, params: &Params, rng: &mut R) -> Self {
        let (x, y) = params.bounds().random_point(rng);
        let energy = if params.food_energy_min < params.food_energy_max {
            rng.random_range(params.food_energy_min..params.food_energy_max)
        } else {
            params.food_energy_min
        };
        Self::new(id, x, y, energy as f32)
    }
}

impl Locatable for Food {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }
}
