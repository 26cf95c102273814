//! Trait for entities that have a position on the plane.
//!
//! Food and bacteria both implement it, which lets range checks and
//! nearest-neighbour scans share one code path.

use ndarray::Array1;

use super::geometric_utils;

/// Trait for entities with a position in 2D space.
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Returns a mutable reference to the entity's position.
    fn pos_mut(&mut self) -> &mut Array1<f32>;

    /// Euclidean distance to another entity.
    fn distance_to<L: Locatable + ?Sized>(&self, other: &L) -> f32 {
        geometric_utils::distance(self.pos(), other.pos())
    }

    /// Whether `other` lies strictly closer than `radius`.
    fn is_within<L: Locatable + ?Sized>(&self, other: &L, radius: f32) -> bool {
        self.distance_to(other) < radius
    }
}
