//! Event system for ordered simulation state updates.
//!
//! Bacteria never remove entries from the shared collections while the tick
//! driver iterates them. They report what happened as events, and
//! [`apply_events`] commits those changes to the [`Ecosystem`].

use tracing::debug;

use super::bacteria::Bacteria;
use super::ecosystem::Ecosystem;

/// Events that modify simulation state.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationEvent {
    /// A bacterium ate a food item. Its energy gain is already applied.
    FoodConsumed {
        /// ID of the bacterium that ate.
        bacteria_id: usize,
        /// ID of the food item to remove.
        food_id: usize,
    },
    /// A bacterium ate a smaller one. Its energy gain is already applied.
    BacteriaConsumed {
        /// ID of the larger bacterium.
        predator_id: usize,
        /// ID of the bacterium to remove.
        prey_id: usize,
    },
    /// A bacterium lost an encounter and hands energy to the winner.
    EnergyTransferred {
        /// ID of the losing bacterium.
        from_id: usize,
        /// ID of the bacterium receiving the energy.
        to_id: usize,
        /// Amount of energy to add to the receiver.
        amount: f32,
    },
    /// A bacterium produced a child to be added to the population.
    Offspring {
        /// ID of the parent.
        parent_id: usize,
        /// The new bacterium.
        child: Box<Bacteria>,
    },
}

/// Queue for collecting simulation events during a bacterium's tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<SimulationEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: SimulationEvent) {
        self.events.push(event);
    }

    /// Whether the queue holds no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Drains all events from the queue.
    pub fn drain(&mut self) -> std::vec::Drain<'_, SimulationEvent> {
        self.events.drain(..)
    }
}

impl Extend<SimulationEvent> for EventQueue {
    fn extend<T: IntoIterator<Item = SimulationEvent>>(&mut self, iter: T) {
        self.events.extend(iter);
    }
}

/// Applies all queued events to the ecosystem in the order they were pushed.
///
/// Events that refer to an entity which is already gone are ignored.
pub fn apply_events(state: &mut Ecosystem, mut queue: EventQueue) {
    for event in queue.drain() {
        match event {
            SimulationEvent::FoodConsumed {
                bacteria_id,
                food_id,
            } => {
                state.food.retain(|item| item.id != food_id);
                debug!(bacteria_id, food_id, "food consumed");
            }
            SimulationEvent::BacteriaConsumed {
                predator_id,
                prey_id,
            } => {
                state.bacteria.retain(|b| b.id != prey_id);
                debug!(predator_id, prey_id, "bacteria consumed");
            }
            SimulationEvent::EnergyTransferred {
                from_id,
                to_id,
                amount,
            } => {
                if let Some(winner) = state.bacteria.iter_mut().find(|b| b.id == to_id) {
                    winner.energy += amount;
                }
                debug!(from_id, to_id, amount, "bacteria lost an encounter");
            }
            SimulationEvent::Offspring { parent_id, child } => {
                debug!(
                    parent_id,
                    child_id = child.id,
                    generation = child.generation,
                    "bacteria reproduced"
                );
                state.bacteria.push(*child);
            }
        }
    }
}
