//! Random number generation, on top of the "rand" crate and a xoshiro engine

use event_shapes::Float;
use rand::{Rng, SeedableRng};

// Select random number generation engine in use
#[cfg(feature = "f32")]
type Engine = rand_xoshiro::Xoshiro128Plus;
#[cfg(not(feature = "f32"))]
type Engine = rand_xoshiro::Xoshiro256Plus;

/// Seeded random number generator
#[derive(Clone)]
pub struct RandomGenerator {
    rng: Engine,
}
//
impl RandomGenerator {
    /// Spawn the random number generator of the n-th independent stream
    ///
    /// Streams are separated by xoshiro jumps, so they do not overlap in
    /// practice, and a given (seed, stream) pair always yields the same
    /// sequence whichever thread consumes it.
    ///
    pub fn for_stream(seed: u64, stream: usize) -> Self {
        let mut rng = Engine::seed_from_u64(seed);
        for _ in 0..stream {
            rng.jump();
        }
        Self { rng }
    }

    /// Generate a random floating-point number between 0 and 1
    pub fn random(&mut self) -> Float {
        self.rng.gen()
    }
}
