//! Monte Carlo driver which exercises the event shape kernel on uniformly
//! distributed phase space events

pub mod config;
pub mod evgen;
pub mod output;
pub mod random;
pub mod scheduling;
pub mod stats;
