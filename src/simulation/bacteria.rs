//! Bacteria behavior, state, and lifecycle.
//!
//! A bacterium senses the closest food, feeds a three-value input vector
//! through its brain and performs exactly one [`Action`] per tick. Eating,
//! predation and reproduction never touch the shared collections directly:
//! they return [`SimulationEvent`]s that the ecosystem applies afterwards.

use std::f32::consts::TAU;

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::brain::NeuralNetwork;
use super::error::{Error, Result};
use super::events::SimulationEvent;
use super::food::Food;
use super::geometric_utils::{bearing, normalize_angle};
use super::locatable::Locatable;
use super::params::{Params, WorldBounds};

/// Number of sensory inputs fed to the brain.
pub const SENSE_INPUTS: usize = 3;

/// Discrete actions, indexed by brain output position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Output 0: decrease the heading by the turn rate.
    TurnLeft,
    /// Output 1: increase the heading by the turn rate.
    TurnRight,
    /// Output 2: move one unit along the heading.
    MoveForward,
    /// Output 3: spend energy to grow.
    Grow,
}

impl Action {
    /// All actions in output order.
    pub const ALL: [Action; 4] = [
        Action::TurnLeft,
        Action::TurnRight,
        Action::MoveForward,
        Action::Grow,
    ];

    /// Number of brain outputs a bacterium needs.
    pub const COUNT: usize = Self::ALL.len();

    /// Maps a brain output index to its action.
    pub fn from_index(index: usize) -> Option<Action> {
        Self::ALL.get(index).copied()
    }
}

/// Index of the largest value. On ties the first occurrence wins.
pub fn argmax(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, &value) in values.iter().enumerate() {
        if best.is_none_or(|(_, max)| value > max) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

/// What a bacterium knows about the closest food item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoodSense {
    /// Id of the closest food item.
    pub food_id: usize,
    /// Euclidean distance to it.
    pub distance: f32,
    /// Angle from the current heading to the food, in `[0, 2π)`.
    pub angle: f32,
}

/// A simulated bacterium with a neural network brain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bacteria {
    /// Identifier, unique within one ecosystem.
    pub id: usize,
    /// Position in 2D space.
    pub pos: Array1<f32>,
    /// Heading in radians. Not wrapped; turns accumulate.
    pub heading: f32,
    /// Body size. Eating and predation reach `size / 2`.
    pub size: f32,
    /// Current energy (dead when <= 0).
    pub energy: f32,
    /// Lineage depth, 1 for bacteria created at genesis.
    pub generation: u32,
    /// Neural network that controls behavior.
    pub brain: NeuralNetwork,
}

impl Bacteria {
    /// Creates a bacterium at (`x`, `y`) with a random heading.
    ///
    /// Without an inherited `brain` a fresh random network is built. The brain
    /// must take [`SENSE_INPUTS`] inputs and produce [`Action::COUNT`] outputs.
    ///
    /// # Arguments
    ///
    /// * `id` - Identifier of the new bacterium
    /// * `x` - X coordinate
    /// * `y` - Y coordinate
    /// * `brain` - Inherited network, or `None` for a random one
    /// * `params` - Simulation parameters
    /// * `rng` - Random source
    ///
    /// # Returns
    ///
    /// The new bacterium, or [`Error::InvalidTopology`] for a brain of the
    /// wrong shape.
    pub fn new<R: Rng + ?Sized>(
        id: usize,
        x: f32,
        y: f32,
        brain: Option<NeuralNetwork>,
        params: &Params,
        rng: &mut R,
    ) -> Result<Self> {
        let brain = match brain {
            Some(brain) => brain,
            None => NeuralNetwork::new(SENSE_INPUTS, params.hidden_nodes, Action::COUNT, rng)?,
        };
        if brain.input_nodes() != SENSE_INPUTS || brain.output_nodes() != Action::COUNT {
            return Err(Error::InvalidTopology {
                input: brain.input_nodes(),
                hidden: brain.hidden_nodes(),
                output: brain.output_nodes(),
            });
        }

        Ok(Self {
            id,
            pos: Array1::from_vec(vec![x, y]),
            heading: rng.random::<f32>() * TAU,
            size: params.initial_size,
            energy: params.initial_energy,
            generation: 1,
            brain,
        })
    }

    /// Creates a bacterium with a fresh brain at a random point inside the world.
    pub fn new_random<R: Rng + ?Sized>(id: usize, params: &Params, rng: &mut R) -> Result<Self> {
        let (x, y) = params.bounds().random_point(rng);
        Self::new(id, x, y, None, params, rng)
    }

    /// Finds the nearest food item. The first of several equally close items wins.
    pub fn find_closest_food(&self, food: &[Food]) -> Option<FoodSense> {
        let mut closest: Option<FoodSense> = None;
        for item in food {
            let distance = self.distance_to(item);
            if closest.is_none_or(|c| distance < c.distance) {
                closest = Some(FoodSense {
                    food_id: item.id,
                    distance,
                    angle: normalize_angle(bearing(&self.pos, &item.pos) - self.heading),
                });
            }
        }
        closest
    }

    /// Builds the brain input vector.
    ///
    /// Inputs are the heading over 2π, the closest-food distance over the world
    /// diagonal, and the closest-food angle over 2π. Without any food the
    /// distance input is 1 and the angle input 0.
    pub fn perceive(&self, food: &[Food], bounds: &WorldBounds) -> [f32; SENSE_INPUTS] {
        let (distance, angle) = match self.find_closest_food(food) {
            Some(sense) => (sense.distance / bounds.diagonal(), sense.angle / TAU),
            None => (1.0, 0.0),
        };
        [self.heading / TAU, distance, angle]
    }

    /// Runs the brain on `inputs` and picks the action with the highest output.
    pub fn decide(&self, inputs: &[f32]) -> Result<Action> {
        let outputs = self.brain.feed_forward(inputs)?;
        argmax(&outputs)
            .and_then(Action::from_index)
            .ok_or(Error::InvalidTopology {
                input: self.brain.input_nodes(),
                hidden: self.brain.hidden_nodes(),
                output: outputs.len(),
            })
    }

    /// Applies one action to this bacterium's state.
    pub fn act(&mut self, action: Action, params: &Params) {
        match action {
            Action::TurnLeft => self.heading -= params.turn_rate,
            Action::TurnRight => self.heading += params.turn_rate,
            Action::MoveForward => self.move_forward(params),
            Action::Grow => {
                self.energy -= params.grow_energy_cost;
                self.size += params.grow_amount;
            }
        }
    }

    /// Senses, decides and acts. Returns the action taken.
    pub fn think(&mut self, food: &[Food], params: &Params) -> Result<Action> {
        let inputs = self.perceive(food, &params.bounds());
        let action = self.decide(&inputs)?;
        self.act(action, params);
        trace!(id = self.id, ?action, energy = self.energy, "bacteria acted");
        Ok(action)
    }

    /// Moves one unit along the heading, paying the move cost.
    pub fn move_forward(&mut self, params: &Params) {
        self.pos[0] += self.heading.cos();
        self.pos[1] += self.heading.sin();
        self.energy -= params.move_energy_cost;
    }

    /// Eats every food item strictly within `size / 2`.
    ///
    /// Energy is gained immediately; removal of the eaten items is left to the
    /// caller through the returned events.
    pub fn eat(&mut self, food: &[Food]) -> Vec<SimulationEvent> {
        let reach = self.size / 2.0;
        let mut events = Vec::new();
        for item in food {
            if self.is_within(item, reach) {
                self.energy += item.energy;
                events.push(SimulationEvent::FoodConsumed {
                    bacteria_id: self.id,
                    food_id: item.id,
                });
            }
        }
        events
    }

    /// Resolves predation against the other live bacteria.
    ///
    /// `others` is scanned from the back. Each bacterium within `size / 2` is
    /// eaten if this one is strictly larger, gaining half its energy, and the
    /// scan continues. Otherwise the other gains half of this bacterium's
    /// energy, this one drops to zero energy, and the scan stops. Entries with
    /// this bacterium's id or without energy are skipped.
    pub fn interact_with(&mut self, others: &[Bacteria]) -> Vec<SimulationEvent> {
        let reach = self.size / 2.0;
        let mut events = Vec::new();
        for other in others.iter().rev() {
            if other.id == self.id || other.is_dead() || !self.is_within(other, reach) {
                continue;
            }

            if self.size > other.size {
                self.energy += other.energy * 0.5;
                events.push(SimulationEvent::BacteriaConsumed {
                    predator_id: self.id,
                    prey_id: other.id,
                });
            } else {
                events.push(SimulationEvent::EnergyTransferred {
                    from_id: self.id,
                    to_id: other.id,
                    amount: self.energy * 0.5,
                });
                self.energy = 0.0;
                break;
            }
        }
        events
    }

    /// With probability `reproduction_chance`, produces a child at the same
    /// position with a cloned, mutated brain and the next generation number.
    pub fn reproduce<R: Rng + ?Sized>(
        &self,
        child_id: usize,
        params: &Params,
        rng: &mut R,
    ) -> Result<Option<Bacteria>> {
        if rng.random::<f32>() >= params.reproduction_chance {
            return Ok(None);
        }

        let mut brain = self.brain.clone();
        brain.mutate(params.mutation_rate, rng);

        let mut child = Bacteria::new(child_id, self.pos[0], self.pos[1], Some(brain), params, rng)?;
        child.generation = self.generation + 1;
        Ok(Some(child))
    }

    /// Checks if the bacterium is dead.
    ///
    /// # Returns
    ///
    /// `true` if energy <= 0, `false` otherwise.
    pub fn is_dead(&self) -> bool {
        self.energy <= 0.0
    }
}

impl Locatable for Bacteria {
    fn pos(&self) -> &Array1<f32> {
        &self.pos
    }

    fn pos_mut(&mut self) -> &mut Array1<f32> {
        &mut self.pos
    }
}
