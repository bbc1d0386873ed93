//! Central event shapes of hadronic collisions
//!
//!
//! # Introduction (for the physicist)
//!
//! Event shapes characterize the global momentum flow of a collision event.
//! This crate computes five of them from the final-state objects (typically
//! jets) found within a central region |η| < ηc around the beam:
//!
//! * the central transverse thrust, through τ = 1 - T
//! * the central total jet broadening
//! * the central total jet mass
//! * the central total transverse jet mass
//! * the central three-jet resolution threshold y23
//!
//! Jet masses and broadenings are defined with respect to the two hemispheres
//! separated by the plane orthogonal to the thrust axis. The y23 threshold
//! comes from a kt-like clustering of the central objects.
//!
//!
//! # Introduction (for the computer guy)
//!
//! Each event is processed independently, by a pure function of its
//! final-state 4-momenta and of an immutable configuration:
//!
//! * collider coordinates are computed for every particle
//! * particles are split into a central and a forward region
//! * the thrust axis is searched among the central particles
//! * hemisphere observables are accumulated around this axis
//! * the central particles are clustered into the y23 threshold
//!
//! The output is a `ShapeResult`, which can be emitted in the logarithmic
//! form used by histograms.

#![warn(missing_docs)]

pub mod acceptance;
pub mod config;
pub mod error;
pub mod hemisphere;
pub mod kinematics;
pub mod momentum;
pub mod numeric;
pub mod resolution;
pub mod shapes;
pub mod thrust;

pub use crate::{
    config::ShapeConfig,
    error::{Result, ShapeError},
    kinematics::RapidityConvention,
    momentum::Momentum,
    numeric::Float,
    shapes::{ShapeAnalyzer, ShapeResult, ShapeValues},
    thrust::{AxisSearch, ExhaustiveSearch, Thrust},
};
