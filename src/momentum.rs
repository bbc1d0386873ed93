//! This module implements some domain-specific 4-momentum handling logic.

use crate::numeric::Float;
use nalgebra::{SVector, Vector3};

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum, laid out as (Px, Py, Pz, E)
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Direction of the colliding beams
pub fn beam_axis() -> Vector3<Float> {
    Vector3::z()
}

/// Transverse momentum, i.e. norm of the momentum projection orthogonal to
/// the beam
pub fn transverse_momentum(p: &Momentum) -> Float {
    (p[X].powi(2) + p[Y].powi(2)).sqrt()
}

/// Norm of the space part of a 4-momentum
pub fn momentum_norm(p: &Momentum) -> Float {
    (p[X].powi(2) + p[Y].powi(2) + p[Z].powi(2)).sqrt()
}

/// Azimuthal angle around the beam, in [-pi, pi]
pub fn azimuth(p: &Momentum) -> Float {
    p[Y].atan2(p[X])
}

/// Transverse energy E·pT/|p|
///
/// A particle at rest has no direction. We give it no transverse energy.
///
pub fn transverse_energy(p: &Momentum) -> Float {
    let p_norm = momentum_norm(p);
    if p_norm > 0. {
        p[E] * transverse_momentum(p) / p_norm
    } else {
        0.
    }
}

/// Square of the Minkowski norm (invariant mass squared) of a 4-momentum
pub fn invariant_mass2(p: &Momentum) -> Float {
    p[E].powi(2) - p.xyz().norm_squared()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_quantities() {
        let p = Momentum::new(3., 4., 12., 13.);
        assert_eq!(transverse_momentum(&p), 5.);
        assert_eq!(momentum_norm(&p), 13.);
        assert!((transverse_energy(&p) - 5.).abs() < 1e-12);
        assert!(invariant_mass2(&p).abs() < 1e-12);
        assert!((azimuth(&p) - (4. as Float).atan2(3.)).abs() < 1e-15);
    }

    #[test]
    fn particle_at_rest() {
        let p = Momentum::new(0., 0., 0., 1.);
        assert_eq!(transverse_energy(&p), 0.);
        assert_eq!(invariant_mass2(&p), 1.);
    }
}
