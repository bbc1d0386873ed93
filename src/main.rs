//! Event shapes: a simple Monte Carlo driver
//!
//!
//! # Introduction (for the physicist)
//!
//! This small program generates massless multi-particle final states,
//! uniformly distributed in phase space, and computes the central event shapes
//! of each generated event: transverse thrust, jet broadening, jet masses and
//! three-jet resolution threshold. It then reports their average logarithmic
//! value, the way histograms of those variables would be filled.
//!
//! Uniform phase space is a convenient reference, since it is as far as it
//! gets from the pencil-like two-jet events where these variables vanish.
//!
//!
//! # Introduction (for the computer guy)
//!
//! The program runs in a purely functional pipeline:
//!
//! * read in parameters from a configuration file
//! * loop over (random) events, in batches,
//!     * generating their 4-momenta,
//!     * computing their event shapes,
//!     * accumulating summary statistics
//! * then display / store the result.
//!
//! Batches are independent, which allows processing them in parallel.

#![warn(missing_docs)]

mod run;

use crate::run::{
    config::Configuration, evgen::EventGenerator, random::RandomGenerator,
    stats::ShapeStatistics,
};

use event_shapes::ShapeAnalyzer;
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

use std::time::Instant;

/// Default location of the configuration file
const DEFAULT_CONFIG_FILE: &str = "shapes.cfg";

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    // ### LOGGING SETUP ###

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ### CONFIGURATION READOUT ###

    let config_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_owned());
    let cfg = Configuration::load(&config_file).wrap_err("Failed to load the configuration")?;

    // ### SIMULATION INITIALIZATION ###

    // Start the clock after configuration I/O, to avoid IO-induced timing
    // fluctuations
    let saved_time = Instant::now();

    // Initialize the event generator and the event shape analyzer
    let evgen = EventGenerator::new(cfg.e_total, cfg.num_outgoing)
        .wrap_err("Failed to set up the event generator")?;
    let analyzer = ShapeAnalyzer::new(&cfg.shapes);

    // ### SIMULATION EXECUTION ###

    // This kernel processes a number of events, given an initial random number
    // generator state, and returns the accumulated statistics
    let process_events = |num_events: usize, rng: &mut RandomGenerator| -> ShapeStatistics {
        let mut stats = ShapeStatistics::new();
        for _ in 0..num_events {
            let event = evgen.generate(rng);
            let shapes = analyzer.analyze(&event[..]);
            stats.integrate(evgen.event_weight(), &shapes);
        }
        stats
    };

    // Run the simulation
    let stats = run::scheduling::run_simulation(cfg.num_events, cfg.seed, process_events);
    let result = stats.finalize();

    // ### RESULTS DISPLAY AND STORAGE ###

    // Measure how much time has elapsed
    let elapsed_time = saved_time.elapsed();
    tracing::info!(?elapsed_time, "simulation complete");

    // Send the results to the standard output and to disk and we're done
    run::output::dump_results(&cfg, &result, elapsed_time)
        .wrap_err("Failed to output the results")?;

    Ok(())
}
