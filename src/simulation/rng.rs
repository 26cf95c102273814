//! Seeded random number generation.
//!
//! All randomness in the simulation flows through a caller-supplied
//! [`rand::Rng`]; this module builds the generator the binary and tests use.

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Create an RNG from `seed`, or from the thread-local generator when no seed is given.
pub fn rng_from_seed(seed: Option<u64>) -> ChaCha12Rng {
    match seed {
        Some(seed) => create_rng(seed),
        None => ChaCha12Rng::from_rng(&mut rand::rng()),
    }
}
