//! Conversion of 4-momenta into collider coordinates (pT, η or y, φ)

use crate::{
    error::{Result, ShapeError},
    momentum::{azimuth, transverse_momentum, Momentum, E, Z},
    numeric::{
        floats::consts::{FRAC_PI_2, PI},
        Float,
    },
};

/// Below this |pz|, a particle is considered to be exactly transverse
const TRANSVERSE_PZ: Float = 1e-5;

/// Longitudinal coordinate used to measure the angular position of particles
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RapidityConvention {
    /// Pseudorapidity η = -ln(tan(θ/2)), which only depends on direction
    #[default]
    Pseudorapidity,

    /// Rapidity y = ½ln((E+pz)/(E-pz)), which also depends on mass
    Rapidity,
}

/// Collider coordinates of an object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    /// Transverse momentum
    pub pt: Float,

    /// Pseudorapidity or rapidity, depending on the convention in use
    pub eta: Float,

    /// Azimuthal angle
    pub phi: Float,
}
//
impl Kinematics {
    /// Compute the collider coordinates of a 4-momentum
    pub fn new(p: &Momentum, convention: RapidityConvention) -> Result<Self> {
        let eta = match convention {
            RapidityConvention::Pseudorapidity => pseudorapidity(p),
            RapidityConvention::Rapidity => rapidity(p)?,
        };
        Ok(Self {
            pt: transverse_momentum(p),
            eta,
            phi: azimuth(p),
        })
    }
}

/// A 4-momentum together with its collider coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// 4-momentum (Px, Py, Pz, E)
    pub momentum: Momentum,

    /// Collider coordinates derived from the momentum
    pub kinematics: Kinematics,
}
//
impl Particle {
    /// Attach collider coordinates to a 4-momentum
    pub fn new(momentum: Momentum, convention: RapidityConvention) -> Result<Self> {
        Ok(Self {
            momentum,
            kinematics: Kinematics::new(&momentum, convention)?,
        })
    }
}

/// Pseudorapidity, treating nearly transverse particles as exactly transverse
pub fn pseudorapidity(p: &Momentum) -> Float {
    let mut theta = if p[Z].abs() > TRANSVERSE_PZ {
        (transverse_momentum(p) / p[Z]).atan()
    } else {
        FRAC_PI_2
    };
    if theta < 0. {
        theta += PI;
    }
    -(0.5 * theta).tan().ln()
}

/// Rapidity, which is undefined for objects moving along the beam at the
/// speed of light
pub fn rapidity(p: &Momentum) -> Result<Float> {
    if p[Z] == p[E] {
        return Err(ShapeError::DegenerateRapidity { energy: p[E] });
    }
    Ok(0.5 * ((p[E] + p[Z]) / (p[E] - p[Z])).ln())
}

/// Absolute azimuthal distance between two angles, in [0, pi]
pub fn delta_phi(phi1: Float, phi2: Float) -> Float {
    let dphi = (phi2 - phi1).abs();
    if dphi > PI {
        2. * PI - dphi
    } else {
        dphi
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transverse_particle_is_central() {
        let p = Momentum::new(1., 1., 0., 2f64.sqrt() as Float);
        assert_eq!(pseudorapidity(&p), -(0.5 * FRAC_PI_2).tan().ln());
        assert!(pseudorapidity(&p).abs() < 1e-12);
        assert!(rapidity(&p).unwrap().abs() < 1e-12);
    }

    #[test]
    fn pseudorapidity_is_odd_in_pz() {
        let forward = Momentum::new(3., 0., 4., 5.);
        let backward = Momentum::new(3., 0., -4., 5.);
        let eta = pseudorapidity(&forward);
        // θ = atan(3/4), so η = ln(3)
        assert!((eta - (3. as Float).ln()).abs() < 1e-12);
        assert!((pseudorapidity(&backward) + eta).abs() < 1e-12);
    }

    #[test]
    fn massless_rapidity_matches_pseudorapidity() {
        let p = Momentum::new(3., 0., 4., 5.);
        let eta = pseudorapidity(&p);
        let y = rapidity(&p).unwrap();
        assert!((eta - y).abs() < 1e-12);
    }

    #[test]
    fn longitudinal_rapidity_fails() {
        let p = Momentum::new(0., 0., 7., 7.);
        assert_eq!(
            rapidity(&p),
            Err(ShapeError::DegenerateRapidity { energy: 7. })
        );
        assert!(Kinematics::new(&p, RapidityConvention::Rapidity).is_err());
        assert!(Kinematics::new(&p, RapidityConvention::Pseudorapidity).is_ok());
    }

    #[test]
    fn delta_phi_wraps_around() {
        assert!((delta_phi(0.1, -0.1) - 0.2).abs() < 1e-12);
        assert!((delta_phi(PI - 0.1, -PI + 0.1) - 0.2).abs() < 1e-12);
        assert!((delta_phi(0., PI) - PI).abs() < 1e-12);
    }
}
