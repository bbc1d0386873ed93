//! Central transverse thrust
//!
//! The transverse thrust of a set of particles is
//!
//! ```text
//! T = max_n Σ|pT_i·n| / Σ|pT_i|
//! ```
//!
//! where n spans the unit vectors orthogonal to the beam. It is 1 for a
//! perfectly back-to-back event and decreases as the event gets more
//! isotropic in the transverse plane.
//!
//! The optimal axis is always the sum of the transverse momenta of one side
//! of some plane containing the beam, so it can be found by testing a finite
//! number of candidates. How these candidates are enumerated is abstracted
//! behind the `AxisSearch` trait, so that the exhaustive O(n²) search can be
//! swapped for a faster algorithm without affecting callers.

use crate::{
    error::{Result, ShapeError},
    kinematics::Particle,
    momentum::beam_axis,
    numeric::Float,
};
use nalgebra::Vector3;

/// Outcome of a thrust axis search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Thrust {
    /// Unit thrust axis, orthogonal to the beam
    pub axis: Vector3<Float>,

    /// Thrust value, in [0, 1]
    pub thrust: Float,
}
//
impl Thrust {
    /// τ = 1 - T, the quantity which gets resummed in theory predictions
    pub fn tau(&self) -> Float {
        1. - self.thrust
    }
}

/// Strategy for locating the transverse thrust axis of a set of particles
pub trait AxisSearch {
    /// Find the transverse thrust axis of a set of particles
    ///
    /// Callers must provide at least one particle with nonzero transverse
    /// momentum, otherwise no axis can be defined and the search fails with
    /// `ShapeError::VanishingTransverseMomentum`. This is the only way a search
    /// can fail: the sum would otherwise be divided by zero, yielding NaN
    /// shapes instead of an error.
    ///
    fn search(&self, particles: &[Particle]) -> Result<Thrust>;
}

/// Exhaustive thrust axis search
///
/// For each particle k, the plane containing the beam and p_k splits the
/// other particles in two sides. Summing their transverse momenta with a sign
/// that depends on the side, then adding or subtracting p_k, yields two
/// candidate axes. The longest of the 2n candidates is the thrust axis. If
/// several candidates are equally long, the first one wins.
///
#[derive(Clone, Copy, Debug, Default)]
pub struct ExhaustiveSearch;
//
impl AxisSearch for ExhaustiveSearch {
    fn search(&self, particles: &[Particle]) -> Result<Thrust> {
        // Only the transverse part of the momenta matters
        let transverse = particles
            .iter()
            .map(|particle| {
                let p = particle.momentum;
                Vector3::new(p.x, p.y, 0.)
            })
            .collect::<Vec<_>>();
        let pt_sum: Float = particles.iter().map(|p| p.kinematics.pt).sum();
        if !(pt_sum > 0.) {
            return Err(ShapeError::VanishingTransverseMomentum);
        }

        // Go through the candidate axes, keeping the longest one
        let beam = beam_axis();
        let mut best_axis = Vector3::zeros();
        let mut best_norm2: Float = 0.;
        for (k, p_k) in transverse.iter().enumerate() {
            // Vector orthogonal to the beam and to particle k
            let normal = p_k.cross(&beam);

            // Sum the other momenta, oriented towards the side of the normal
            let side_sum = transverse
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != k)
                .fold(Vector3::zeros(), |acc, (_, p_i)| {
                    if p_i.dot(&normal) >= 0. {
                        acc + p_i
                    } else {
                        acc - p_i
                    }
                });

            // Particle k lies in the plane, so it may go on either side
            for candidate in [side_sum + p_k, side_sum - p_k] {
                let norm2 = candidate.norm_squared();
                if norm2 > best_norm2 {
                    best_norm2 = norm2;
                    best_axis = candidate;
                }
            }
        }
        if !(best_norm2 > 0.) {
            return Err(ShapeError::VanishingTransverseMomentum);
        }

        // Normalize the results
        let best_norm = best_norm2.sqrt();
        let thrust = Thrust {
            axis: best_axis / best_norm,
            thrust: (best_norm / pt_sum).min(1.),
        };
        tracing::trace!(thrust = thrust.thrust, axis = ?thrust.axis, "found thrust axis");
        Ok(thrust)
    }
}
