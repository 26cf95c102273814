//! # Bacteria - Evolutionary Agent Simulation
//!
//! Bacteria with tiny neural network brains roam a 2D plane, sense the
//! closest food, eat food or each other, reproduce with mutation and die when
//! their energy runs out.
//!
//! ## Features
//!
//! - Two-layer perceptron brains (sigmoid activation, 3 inputs, 4 outputs)
//! - Shape-checked matrix algebra on top of `ndarray`
//! - Four discrete actions chosen by arg-max over the brain outputs
//! - Predation between bacteria of different sizes
//! - Asexual reproduction with per-weight mutation
//! - Seedable randomness for reproducible runs
//!
//! ## Core Modules
//!
//! - [`simulation::matrix`] - Matrix primitive
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::bacteria`] - Bacteria decision and update loop
//! - [`simulation::ecosystem`] - Tick driver owning all live entities
//! - [`simulation::events`] - Event system for ordered state updates

/// Core simulation logic and data structures.
pub mod simulation {
    /// Bacteria behavior, state, and lifecycle.
    pub mod bacteria;
    /// Neural network implementation for bacteria brains.
    pub mod brain;
    /// Main ecosystem simulation and tick driver.
    pub mod ecosystem;
    /// Error types.
    pub mod error;
    /// Event system for ordered state updates.
    pub mod events;
    /// Food items that bacteria can consume.
    pub mod food;
    /// Geometric utility functions for distance calculations.
    pub mod geometric_utils;
    /// Trait for entities with a position on the plane.
    ///
    /// The [`locatable::Locatable`] trait is implemented by [`food::Food`] and
    /// [`bacteria::Bacteria`].
    pub mod locatable;
    /// Small dense matrix type used by the brains.
    pub mod matrix;
    /// Simulation parameters.
    pub mod params;
    /// Seeded random number generation.
    pub mod rng;
}
