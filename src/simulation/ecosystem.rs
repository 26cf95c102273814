//! Tick driver owning every bacterium and food item.
//!
//! The ecosystem advances the simulation one tick at a time:
//! - each bacterium alive at the start of the tick thinks, eats, interacts
//!   and may reproduce, in collection order
//! - the events it produced are applied before the next bacterium runs
//! - dead bacteria are removed and food is respawned at the end of the tick

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::bacteria::Bacteria;
use super::error::Result;
use super::events::{self, EventQueue, SimulationEvent};
use super::food::Food;
use super::geometric_utils::wrap_around_mut;
use super::locatable::Locatable;
use super::params::Params;

/// The main ecosystem containing all simulation state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecosystem {
    /// Live bacteria, in update order.
    pub bacteria: Vec<Bacteria>,
    /// Food items not yet eaten.
    pub food: Vec<Food>,
    /// Completed ticks.
    pub tick: u64,
    next_bacteria_id: usize,
    next_food_id: usize,
}

/// Population summary of an ecosystem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Completed ticks.
    pub tick: u64,
    /// Number of live bacteria.
    pub population: usize,
    /// Number of food items.
    pub food: usize,
    /// Oldest lineage depth still alive.
    pub min_generation: Option<u32>,
    /// Newest lineage depth alive.
    pub max_generation: Option<u32>,
    /// Average energy over live bacteria, 0 when extinct.
    pub mean_energy: f32,
}

impl Ecosystem {
    /// Creates a new ecosystem with randomly placed bacteria and food.
    ///
    /// # Arguments
    ///
    /// * `params` - Simulation parameters, validated first
    /// * `rng` - Random source for placement and brains
    ///
    /// # Returns
    ///
    /// The new ecosystem, or [`Error::InvalidParams`](super::error::Error::InvalidParams).
    pub fn new<R: Rng + ?Sized>(params: &Params, rng: &mut R) -> Result<Self> {
        params.validate()?;

        let bacteria = (0..params.n_bacteria)
            .map(|id| Bacteria::new_random(id, params, rng))
            .collect::<Result<Vec<_>>>()?;
        let food = (0..params.n_food)
            .map(|id| Food::new_random(id, params, rng))
            .collect();

        Ok(Self::from_parts(bacteria, food))
    }

    /// Builds an ecosystem from existing bacteria and food.
    ///
    /// New ids continue after the largest id present.
    ///
    /// # Arguments
    ///
    /// * `bacteria` - Initial population, in update order
    /// * `food` - Initial food items
    ///
    /// # Returns
    ///
    /// An ecosystem at tick 0.
    pub fn from_parts(bacteria: Vec<Bacteria>, food: Vec<Food>) -> Self {
        let next_bacteria_id = bacteria.iter().map(|b| b.id + 1).max().unwrap_or(0);
        let next_food_id = food.iter().map(|f| f.id + 1).max().unwrap_or(0);

        Self {
            bacteria,
            food,
            tick: 0,
            next_bacteria_id,
            next_food_id,
        }
    }

    /// Advances the simulation by one tick.
    ///
    /// Bacteria born during the tick first act on the next one. An error from
    /// a bacterium's brain aborts the tick; bacteria already processed keep
    /// their updates.
    pub fn step<R: Rng + ?Sized>(&mut self, params: &Params, rng: &mut R) -> Result<()> {
        let ids: Vec<usize> = self.bacteria.iter().map(|b| b.id).collect();

        for id in ids {
            let Some(index) = self.bacteria.iter().position(|b| b.id == id) else {
                // eaten earlier in this tick
                continue;
            };
            if self.bacteria[index].is_dead() {
                continue;
            }

            let mut agent = self.bacteria.remove(index);
            let mut queue = EventQueue::new();
            let outcome = self.update_bacteria(&mut agent, params, rng, &mut queue);
            self.bacteria.insert(index, agent);
            outcome?;

            if !queue.is_empty() {
                events::apply_events(self, queue);
            }
        }

        if params.wrap_around {
            for agent in &mut self.bacteria {
                wrap_around_mut(agent.pos_mut(), params.box_width, params.box_height);
            }
        }

        let before = self.bacteria.len();
        self.bacteria.retain(|b| !b.is_dead());
        let died = before - self.bacteria.len();
        if died > 0 {
            debug!(tick = self.tick, died, "removed dead bacteria");
        }

        self.spawn_food(params, rng);
        self.tick += 1;
        Ok(())
    }

    /// Adds one random food item while fewer than `min_food` remain.
    pub fn spawn_food<R: Rng + ?Sized>(&mut self, params: &Params, rng: &mut R) {
        if self.food.len() < params.min_food {
            let item = Food::new_random(self.next_food_id, params, rng);
            self.next_food_id += 1;
            self.food.push(item);
        }
    }

    /// Summarizes the current population.
    pub fn stats(&self) -> Stats {
        let population = self.bacteria.len();
        let mean_energy = if population == 0 {
            0.0
        } else {
            self.bacteria.iter().map(|b| b.energy).sum::<f32>() / population as f32
        };

        Stats {
            tick: self.tick,
            population,
            food: self.food.len(),
            min_generation: self.bacteria.iter().map(|b| b.generation).min(),
            max_generation: self.bacteria.iter().map(|b| b.generation).max(),
            mean_energy,
        }
    }

    /// Whether no bacteria are left.
    pub fn is_extinct(&self) -> bool {
        self.bacteria.is_empty()
    }

    fn update_bacteria<R: Rng + ?Sized>(
        &mut self,
        agent: &mut Bacteria,
        params: &Params,
        rng: &mut R,
        queue: &mut EventQueue,
    ) -> Result<()> {
        agent.think(&self.food, params)?;
        queue.extend(agent.eat(&self.food));
        queue.extend(agent.interact_with(&self.bacteria));

        if agent.is_dead() {
            return Ok(());
        }
        if let Some(child) = agent.reproduce(self.next_bacteria_id, params, rng)? {
            self.next_bacteria_id += 1;
            queue.push(SimulationEvent::Offspring {
                parent_id: agent.id,
                child: Box::new(child),
            });
        }
        Ok(())
    }
}
