//! This module takes care of scheduling the event processing work,
//! encapsulating use of multiple threads

use crate::run::{random::RandomGenerator, stats::ShapeStatistics};

/// Size of the processed event batches
///
/// Events are grouped in batches of a certain size in order to reduce
/// accumulation error and achieve perfect reproducibility between sequential
/// and parallel runs. Each batch draws its random numbers from its own stream.
///
const EVENT_BATCH_SIZE: usize = 10_000;

/// Run the simulation in the manner that was configured at build time.
///
/// Takes as parameters the total number of events to be processed, the seed
/// of the random number generator, and a kernel that processes a certain
/// number of events given a random number generator.
///
/// Returns the accumulated statistics, merged in batch order
///
pub fn run_simulation(
    num_events: usize,
    seed: u64,
    process_events: impl Send + Sync + Fn(usize, &mut RandomGenerator) -> ShapeStatistics,
) -> ShapeStatistics {
    // Check that the user is being reasonable (should have already been checked
    // at configuration time, but bugs can happen...)
    assert!(num_events > 0, "Must process at least one event");

    // Describe the batches of events to be processed
    let num_batches = (num_events + EVENT_BATCH_SIZE - 1) / EVENT_BATCH_SIZE;
    let batch_size = |batch_id: usize| {
        std::cmp::min(EVENT_BATCH_SIZE, num_events - batch_id * EVENT_BATCH_SIZE)
    };
    let run_batch = |batch_id: usize| {
        let mut rng = RandomGenerator::for_stream(seed, batch_id);
        process_events(batch_size(batch_id), &mut rng)
    };

    // Process the batches...
    let batch_results = {
        // ...in sequential mode
        #[cfg(not(feature = "multi-threading"))]
        {
            (0..num_batches).map(run_batch).collect::<Vec<_>>()
        }

        // ...in multi-threaded mode
        #[cfg(feature = "multi-threading")]
        {
            use rayon::prelude::*;
            (0..num_batches)
                .into_par_iter()
                .map(run_batch)
                .collect::<Vec<_>>()
        }
    };

    // Merge the batch results in a reproducible order
    batch_results
        .into_iter()
        .fold(ShapeStatistics::new(), |mut acc, batch| {
            acc.merge(batch);
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_events_are_processed() {
        let num_events = 2 * EVENT_BATCH_SIZE + 17;
        let stats = run_simulation(num_events, 7, |batch_size, _rng| {
            let mut stats = ShapeStatistics::new();
            for _ in 0..batch_size {
                stats.integrate(1., &Err(event_shapes::ShapeError::VanishingTransverseMomentum));
            }
            stats
        });
        let result = stats.finalize();
        assert_eq!(result.processed_events, num_events);
        assert_eq!(result.failed_events, num_events);
    }
}
