//! Hemisphere observables: jet masses and jet broadening
//!
//! The plane orthogonal to the thrust axis splits the central particles into
//! an "up" hemisphere (p·n >= 0) and a "down" hemisphere (p·n < 0). Jet masses
//! and broadenings are computed for each hemisphere, then summed.

use crate::{
    kinematics::{delta_phi, Particle},
    momentum::{invariant_mass2, momentum_norm, transverse_energy, Momentum},
    numeric::{
        floats::consts::{FRAC_PI_2, PI},
        Float,
    },
};
use nalgebra::{Rotation2, Vector3};
use num_traits::Zero;

/// Total hemisphere observables of an event
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HemisphereShapes {
    /// Sum of the hemisphere masses², normalized by (Σ|p|)²
    pub jet_mass: Float,

    /// Sum of the hemisphere transverse masses², normalized by (ΣpT)²
    pub transverse_jet_mass: Float,

    /// Sum of the hemisphere broadenings
    pub broadening: Float,

    /// Truth that neither hemisphere is empty
    pub both_non_empty: bool,
}

/// Side of the thrust plane
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Up = 0,
    Down = 1,
}

/// Running sums over the particles of one hemisphere
#[derive(Clone, Debug)]
struct Hemisphere {
    /// Summed 4-momentum
    momentum: Momentum,

    /// Summed (Px, Py, Et)
    transverse: Vector3<Float>,

    /// Summed transverse momentum
    pt_sum: Float,

    /// pT-weighted sum of η
    eta_sum: Float,

    /// pT-weighted sum of the azimuth relative to the thrust axis
    phi_sum: Float,

    /// Number of particles
    count: usize,
}
//
impl Default for Hemisphere {
    fn default() -> Self {
        Self {
            momentum: Momentum::zero(),
            transverse: Vector3::zero(),
            pt_sum: 0.,
            eta_sum: 0.,
            phi_sum: 0.,
            count: 0,
        }
    }
}
//
impl Hemisphere {
    /// Record a particle, given its azimuth relative to the thrust axis
    fn add(&mut self, particle: &Particle, axis_phi: Float) {
        let p = &particle.momentum;
        let kin = &particle.kinematics;
        self.momentum += p;
        self.transverse += Vector3::new(p.x, p.y, transverse_energy(p));
        self.pt_sum += kin.pt;
        self.eta_sum += kin.pt * kin.eta;
        self.phi_sum += kin.pt * axis_phi;
        self.count += 1;
    }

    /// Hemisphere mass², normalized by a squared momentum scale
    fn jet_mass(&self, p_sum: Float) -> Float {
        invariant_mass2(&self.momentum) / p_sum.powi(2)
    }

    /// Hemisphere transverse mass², normalized by a squared momentum scale
    fn transverse_jet_mass(&self, pt_sum: Float) -> Float {
        let t = &self.transverse;
        (t.z.powi(2) - t.x.powi(2) - t.y.powi(2)) / pt_sum.powi(2)
    }

    /// pT-weighted mean (η, φ) of the hemisphere
    fn centroid(&self) -> (Float, Float) {
        if self.pt_sum > 0. {
            (self.eta_sum / self.pt_sum, self.phi_sum / self.pt_sum)
        } else {
            (0., 0.)
        }
    }
}

/// Compute the hemisphere observables of the central particles, given the
/// transverse thrust axis
pub fn accumulate(central: &[Particle], axis: &Vector3<Float>) -> HemisphereShapes {
    // Global normalizations
    let p_sum: Float = central.iter().map(|p| momentum_norm(&p.momentum)).sum();
    let pt_sum: Float = central.iter().map(|p| p.kinematics.pt).sum();

    // Rotate the transverse plane so that the thrust axis is the x axis
    let to_axis_frame = Rotation2::new(-axis.y.atan2(axis.x));

    // Assign each particle to a hemisphere and fill the running sums
    let mut hemispheres = [Hemisphere::default(), Hemisphere::default()];
    let assignments = central
        .iter()
        .map(|particle| {
            let p_xy = particle.momentum.xy();
            let side = if p_xy.dot(&axis.xy()) >= 0. {
                Side::Up
            } else {
                Side::Down
            };
            let rotated = to_axis_frame * p_xy;
            let axis_phi = fold_azimuth(rotated.y.atan2(rotated.x), side);
            hemispheres[side as usize].add(particle, axis_phi);
            (side, axis_phi)
        })
        .collect::<Vec<_>>();

    // Broadening needs the hemisphere centroids, hence a second pass
    let centroids = [hemispheres[0].centroid(), hemispheres[1].centroid()];
    let broadening = central
        .iter()
        .zip(&assignments)
        .map(|(particle, &(side, axis_phi))| {
            let (eta_mean, phi_mean) = centroids[side as usize];
            let kin = &particle.kinematics;
            let distance2 =
                (kin.eta - eta_mean).powi(2) + delta_phi(axis_phi, phi_mean).powi(2);
            kin.pt * distance2.sqrt()
        })
        .sum::<Float>()
        / (2. * pt_sum);

    let [up, down] = &hemispheres;
    let shapes = HemisphereShapes {
        jet_mass: up.jet_mass(p_sum) + down.jet_mass(p_sum),
        transverse_jet_mass: up.transverse_jet_mass(pt_sum) + down.transverse_jet_mass(pt_sum),
        broadening,
        both_non_empty: up.count > 0 && down.count > 0,
    };
    if !shapes.both_non_empty {
        tracing::debug!(up = up.count, down = down.count, "a hemisphere is empty");
    }
    shapes
}

/// Express the azimuth relative to the thrust axis as an angle to the axis
/// direction pointing into the particle's hemisphere
///
/// Up particles have |φ| <= π/2 already. Down particles are reflected so that
/// they are measured from the -n direction.
///
fn fold_azimuth(phi: Float, side: Side) -> Float {
    match side {
        Side::Up => phi,
        Side::Down if phi > FRAC_PI_2 => PI - phi,
        Side::Down if phi < -FRAC_PI_2 => -PI - phi,
        Side::Down => phi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::RapidityConvention;

    fn particle(px: Float, py: Float, pz: Float) -> Particle {
        let e = (px * px + py * py + pz * pz).sqrt();
        Particle::new(Momentum::new(px, py, pz, e), RapidityConvention::Pseudorapidity).unwrap()
    }

    #[test]
    fn back_to_back_pencil() {
        let central = [particle(10., 0., 0.), particle(-10., 0., 0.)];
        let shapes = accumulate(&central, &Vector3::new(-1., 0., 0.));
        assert!(shapes.both_non_empty);
        assert!(shapes.jet_mass.abs() < 1e-12);
        assert!(shapes.transverse_jet_mass.abs() < 1e-12);
        assert!(shapes.broadening.abs() < 1e-12);
    }

    #[test]
    fn two_collinear_pairs() {
        // Two particles per hemisphere, each pair opening an angle 2δ
        let delta: Float = 0.1;
        let (c, s) = (delta.cos(), delta.sin());
        let central = [
            particle(c, s, 0.),
            particle(c, -s, 0.),
            particle(-c, s, 0.),
            particle(-c, -s, 0.),
        ];
        let shapes = accumulate(&central, &Vector3::new(1., 0., 0.));
        assert!(shapes.both_non_empty);

        // Each hemisphere has E = 2, p = (±2c, 0, 0), so m² = 4s²
        let expected_mass = 2. * 4. * s * s / 16.;
        assert!((shapes.jet_mass - expected_mass).abs() < 1e-12);
        assert!((shapes.transverse_jet_mass - expected_mass).abs() < 1e-12);

        // Every particle is δ away from its hemisphere centroid
        let expected_broadening = 4. * delta / 8.;
        assert!((shapes.broadening - expected_broadening).abs() < 1e-12);
    }

    #[test]
    fn empty_hemisphere() {
        let central = [particle(1., 0.2, 0.), particle(1., -0.2, 0.5)];
        let shapes = accumulate(&central, &Vector3::new(1., 0., 0.));
        assert!(!shapes.both_non_empty);
        assert!(shapes.jet_mass >= 0.);
    }

    #[test]
    fn folding() {
        assert_eq!(fold_azimuth(0.3, Side::Up), 0.3);
        assert!((fold_azimuth(PI - 0.3, Side::Down) - 0.3).abs() < 1e-12);
        assert!((fold_azimuth(-PI + 0.3, Side::Down) + 0.3).abs() < 1e-12);
    }
}
