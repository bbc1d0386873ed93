//! Split of the event into a central region and a forward region

use crate::{kinematics::Particle, numeric::Float};

/// Particles of an event, sorted by angular acceptance
///
/// Both regions keep the relative ordering of the input particles, which the
/// tie-breaking rules of the shape algorithms depend on.
///
pub struct Acceptance {
    /// Particles with |η| < ηc
    central: Vec<Particle>,

    /// Other particles
    forward: Vec<Particle>,
}
//
impl Acceptance {
    /// Partition particles according to the central region cut
    pub fn partition(particles: impl IntoIterator<Item = Particle>, eta_central: Float) -> Self {
        let (central, forward) = particles
            .into_iter()
            .partition(|particle| particle.kinematics.eta.abs() < eta_central);
        Self { central, forward }
    }

    /// Particles of the central region
    pub fn central(&self) -> &[Particle] {
        &self.central[..]
    }

    /// Particles outside of the central region
    pub fn forward(&self) -> &[Particle] {
        &self.forward[..]
    }

    /// Number of central particles
    pub fn num_central(&self) -> usize {
        self.central.len()
    }

    /// Exponentially suppressed forward term
    ///
    /// Transverse momentum of forward particles weighted by exp(-|η - η̄c|),
    /// where η̄c is the pT-weighted mean η of the central region, relative to
    /// the total central transverse momentum. This measures how much the
    /// central shapes are sensitive to activity outside the acceptance.
    ///
    pub fn forward_term(&self) -> Float {
        let pt_sum: Float = self.central.iter().map(|p| p.kinematics.pt).sum();
        if self.forward.is_empty() || pt_sum <= 0. {
            return 0.;
        }
        let eta_mean = self
            .central
            .iter()
            .map(|p| p.kinematics.pt * p.kinematics.eta)
            .sum::<Float>()
            / pt_sum;
        self.forward
            .iter()
            .map(|p| p.kinematics.pt * (-(p.kinematics.eta - eta_mean).abs()).exp())
            .sum::<Float>()
            / pt_sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kinematics::RapidityConvention, momentum::Momentum};

    fn particle(px: Float, py: Float, pz: Float) -> Particle {
        let e = (px * px + py * py + pz * pz).sqrt();
        Particle::new(Momentum::new(px, py, pz, e), RapidityConvention::Pseudorapidity).unwrap()
    }

    #[test]
    fn partition_keeps_order() {
        let particles = vec![
            particle(1., 0., 0.),
            particle(1., 0., 100.),
            particle(0., 2., 0.5),
            particle(0., 1., -100.),
            particle(-3., 0., 0.),
        ];
        let acceptance = Acceptance::partition(particles.clone(), 2.4);
        assert_eq!(acceptance.num_central(), 3);
        assert_eq!(
            acceptance.central(),
            &[particles[0], particles[2], particles[4]][..]
        );
        assert_eq!(acceptance.forward(), &[particles[1], particles[3]][..]);
    }

    #[test]
    fn forward_term() {
        let central = particle(2., 0., 0.);
        let forward = particle(1., 0., 10.);
        let no_forward = Acceptance::partition(vec![central], 2.4);
        assert_eq!(no_forward.forward_term(), 0.);

        let acceptance = Acceptance::partition(vec![central, forward], 2.4);
        let expected = (-forward.kinematics.eta.abs()).exp() / 2.;
        assert!((acceptance.forward_term() - expected).abs() < 1e-12);
    }
}
