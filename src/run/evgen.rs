//! This module provides event generation facilities

use crate::run::random::RandomGenerator;

use event_shapes::{
    momentum::{Momentum, E},
    numeric::floats::{
        consts::{FRAC_PI_2, PI},
        MIN_POSITIVE,
    },
    Float,
};
use eyre::{ensure, Result};
use prefix_num_ops::real::*;

/// Generator of massless N-body events, uniformly distributed in phase space
pub struct EventGenerator {
    /// Total center-of-mass energy of the collision
    e_total: Float,

    /// Number of outgoing particles
    num_outgoing: usize,

    /// Weight of generated events
    ev_weight: Float,
}
//
impl EventGenerator {
    // ### CONSTRUCTION ###

    /// Initialize event generation for a center-of-mass energy of e_total,
    /// with num_outgoing massless particles in the final state.
    pub fn new(e_total: Float, num_outgoing: usize) -> Result<Self> {
        ensure!(num_outgoing > 1, "Need at least two outgoing particles");

        // Factorials for the phase space weight
        let n = num_outgoing as Float;
        let mut z_n = (n - 1.) * ln(FRAC_PI_2);
        for k in 2..num_outgoing {
            z_n -= 2. * ln((k - 1) as Float);
        }
        let z_n = z_n - ln(n - 1.);

        // All generated events will have the same weight: pre-compute it
        let ln_weight = (2. * n - 4.) * ln(e_total) + z_n;
        ensure!(
            (-180. ..=174.).contains(&ln_weight),
            "Phase space weight would overflow: ln(weight) = {}",
            ln_weight
        );
        let ev_weight = exp(ln_weight);

        Ok(EventGenerator {
            e_total,
            num_outgoing,
            ev_weight,
        })
    }

    // ### EVENT GENERATION ###

    /// Use the RAMBO (RAndom Momenta Beautifully Organized) algorithm from
    /// S.D. Ellis, R. Kleiss and W.J. Stirling to generate the 4-momenta of
    /// the outgoing particles, in the center-of-mass frame with the beams
    /// along the z axis.
    ///
    /// All events have the same weight, it can be queried via event_weight().
    ///
    pub fn generate(&self, rng: &mut RandomGenerator) -> Vec<Momentum> {
        // Generate massless outgoing 4-momenta in infinite phase space
        let q = self.generate_raw(rng);

        // Calculate the parameters of the conformal transformation
        let r = q.iter().fold(Momentum::zeros(), |acc, q_i| acc + q_i);
        let r_xyz = r.xyz();
        let r_norm_2 = r[E] * r[E] - r_xyz.norm_squared();
        let alpha = self.e_total / r_norm_2;
        let r_norm = sqrt(r_norm_2);
        let beta = 1. / (r_norm + r[E]);

        // Perform the conformal transformation from Q's to output 4-momenta
        q.iter()
            .map(|q_i| {
                let q_xyz = q_i.xyz();
                let rq = q_xyz.dot(&r_xyz);
                let p_e = alpha * (r[E] * q_i[E] - rq);
                let p_xyz = alpha * (r_norm * q_xyz + (beta * rq - q_i[E]) * r_xyz);
                Momentum::new(p_xyz.x, p_xyz.y, p_xyz.z, p_e)
            })
            .collect()
    }

    /// Generate massless outgoing 4-momenta in infinite phase space
    fn generate_raw(&self, rng: &mut RandomGenerator) -> Vec<Momentum> {
        (0..self.num_outgoing)
            .map(|_| {
                let cos_theta = 2. * rng.random() - 1.;
                let phi = 2. * PI * rng.random();
                let exp_min_e = rng.random() * rng.random();
                let sin_theta = sqrt(1. - cos_theta.powi(2));
                let energy = -ln(exp_min_e + MIN_POSITIVE);
                energy * Momentum::new(sin_theta * sin(phi), sin_theta * cos(phi), cos_theta, 1.)
            })
            .collect()
    }

    // ### EVENT PROPERTIES ###

    /// Access the event weight (identical for all generated events)
    pub fn event_weight(&self) -> Float {
        self.ev_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_shapes::momentum::invariant_mass2;

    #[test]
    fn events_are_massless_and_balanced() {
        let evgen = EventGenerator::new(91.188, 5).unwrap();
        let mut rng = RandomGenerator::for_stream(1, 0);
        for _ in 0..100 {
            let event = evgen.generate(&mut rng);
            assert_eq!(event.len(), 5);
            for p in &event {
                assert!(p[E] > 0.);
                assert!(invariant_mass2(p).abs() < 1e-9 * p[E].powi(2));
            }
            let total = event.iter().fold(Momentum::zeros(), |acc, p| acc + p);
            assert!(total.xyz().norm() < 1e-9);
            assert!((total[E] - 91.188).abs() < 1e-9);
        }
    }

    #[test]
    fn two_body_weight() {
        // Massless two-body phase space volume is π/2 (before 2π factors)
        let evgen = EventGenerator::new(10., 2).unwrap();
        assert!((evgen.event_weight() - FRAC_PI_2).abs() < 1e-12);
        assert!(EventGenerator::new(10., 1).is_err());
    }
}
