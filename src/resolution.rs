//! Central three-jet resolution threshold y23
//!
//! The central particles are iteratively clustered with a kt-like procedure
//! until only two objects remain. At each step, the smallest of all
//!
//! - beam distances d_jB = k·pT_j²
//! - pair distances d_jl = min(pT_j², pT_l²)·(Δη² + Δφ²)
//!
//! is selected. A beam distance removes the object, a pair distance merges
//! both objects. y23 is the largest selected distance up to the step which
//! went from three objects to two, normalized by the scalar pT sum of the two
//! final objects.

use crate::{
    config::ShapeConfig,
    error::Result,
    kinematics::{delta_phi, Particle},
    numeric::Float,
};

/// Value of y23 for events with less than three central particles
pub const Y23_UNDEFINED: Float = -1.;

/// Clustering step with the smallest distance
#[derive(Clone, Copy, Debug, PartialEq)]
enum Step {
    /// Drop object j into the beam
    Beam(usize),

    /// Merge object `absorbed` into object `kept` (kept < absorbed)
    Pair { kept: usize, absorbed: usize },
}

/// Compute the three-jet resolution threshold of the central particles
///
/// The working list keeps the input order. Merged objects replace the lower
/// indexed object of the pair, and ties are resolved in favor of the first
/// distance encountered, with beam distances winning ties against pair
/// distances.
///
pub fn three_jet_resolution(central: &[Particle], cfg: &ShapeConfig) -> Result<Float> {
    if central.len() < 3 {
        return Ok(Y23_UNDEFINED);
    }

    let mut objects = central.to_vec();
    let mut running_max: Float = 0.;
    let mut max_d_min: Float = 0.;
    while objects.len() > 2 {
        let (step, d_min) = closest_step(&objects, cfg.beam_distance_factor());
        running_max = running_max.max(d_min);
        if objects.len() == 3 {
            max_d_min = running_max;
        }
        tracing::trace!(num_objects = objects.len(), ?step, d_min, "clustering step");
        match step {
            Step::Beam(j) => {
                objects.remove(j);
            }
            Step::Pair { kept, absorbed } => {
                let merged = objects[kept].momentum + objects[absorbed].momentum;
                objects[kept] = Particle::new(merged, cfg.convention())?;
                objects.remove(absorbed);
            }
        }
    }

    let pt_sum = objects[0].kinematics.pt + objects[1].kinematics.pt;
    Ok(max_d_min / pt_sum.powi(2))
}

/// Find the clustering step with the smallest distance
fn closest_step(objects: &[Particle], beam_factor: Float) -> (Step, Float) {
    let mut beam = (Float::INFINITY, 0);
    let mut pair = (Float::INFINITY, 0, 0);
    for (j, obj_j) in objects.iter().enumerate() {
        let kin_j = &obj_j.kinematics;
        let pt2_j = kin_j.pt.powi(2);
        let d_jb = beam_factor * pt2_j;
        if d_jb < beam.0 {
            beam = (d_jb, j);
        }
        for (l, obj_l) in objects[..j].iter().enumerate() {
            let kin_l = &obj_l.kinematics;
            let d_jl = pt2_j.min(kin_l.pt.powi(2))
                * ((kin_j.eta - kin_l.eta).powi(2) + delta_phi(kin_j.phi, kin_l.phi).powi(2));
            if d_jl < pair.0 {
                pair = (d_jl, l, j);
            }
        }
    }
    if pair.0 < beam.0 {
        let (d_jl, l, j) = pair;
        (
            Step::Pair {
                kept: l,
                absorbed: j,
            },
            d_jl,
        )
    } else {
        (Step::Beam(beam.1), beam.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        kinematics::RapidityConvention,
        momentum::Momentum,
        numeric::floats::consts::PI,
    };

    fn particle(px: Float, py: Float, pz: Float) -> Particle {
        let e = (px * px + py * py + pz * pz).sqrt();
        Particle::new(Momentum::new(px, py, pz, e), RapidityConvention::Pseudorapidity).unwrap()
    }

    fn polar(pt: Float, phi: Float) -> Particle {
        particle(pt * phi.cos(), pt * phi.sin(), 0.)
    }

    #[test]
    fn too_few_objects() {
        let cfg = ShapeConfig::default();
        let objects = [polar(1., 0.), polar(1., PI)];
        assert_eq!(three_jet_resolution(&objects, &cfg), Ok(Y23_UNDEFINED));
        assert_eq!(three_jet_resolution(&[], &cfg), Ok(Y23_UNDEFINED));
    }

    #[test]
    fn mercedes_drops_an_object_into_beam() {
        let cfg = ShapeConfig::default();
        let objects = (0..3)
            .map(|i| polar(10., 2. * PI * (i as Float) / 3.))
            .collect::<Vec<_>>();
        let (step, d_min) = closest_step(&objects, cfg.beam_distance_factor());
        assert!(matches!(step, Step::Beam(_)));
        assert!((d_min - 36.).abs() < 1e-9);

        let y23 = three_jet_resolution(&objects, &cfg).unwrap();
        assert!((y23 - 36. / 400.).abs() < 1e-12);
    }

    #[test]
    fn collinear_pair_gets_merged() {
        let cfg = ShapeConfig::default();
        let objects = [polar(10., 0.), polar(10., 0.05), polar(20., PI)];
        let (step, d_min) = closest_step(&objects, cfg.beam_distance_factor());
        assert_eq!(
            step,
            Step::Pair {
                kept: 0,
                absorbed: 1
            }
        );
        let expected = 100. * (0.05 as Float).powi(2);
        assert!((d_min - expected).abs() < 1e-9);

        // The merged object is ~20 GeV, back to back with the third one
        let y23 = three_jet_resolution(&objects, &cfg).unwrap();
        let merged_pt = 20. * (0.025 as Float).cos();
        assert!((y23 - expected / (merged_pt + 20.).powi(2)).abs() < 1e-9);
    }

    #[test]
    fn soft_object_goes_to_beam() {
        let cfg = ShapeConfig::default();
        let objects = [polar(50., 0.), polar(1., PI / 2.), polar(50., PI), polar(0.5, -1.)];
        // First step drops the 0.5 GeV object, second step the 1 GeV one
        let y23 = three_jet_resolution(&objects, &cfg).unwrap();
        let expected = 0.36 * 1. / (100. as Float).powi(2);
        assert!((y23 - expected).abs() < 1e-12);
    }

    #[test]
    fn softest_objects_are_removed_first() {
        let cfg = ShapeConfig::default();
        // Removes pT = 1, then pT = 2, and finally pT = 2.5
        let objects = [
            polar(50., 0.),
            polar(2., 1.),
            polar(50., PI),
            polar(2.5, -1.),
            polar(1., 2.),
        ];
        let y23 = three_jet_resolution(&objects, &cfg).unwrap();
        let expected = 0.36 * (2.5 as Float).powi(2) / (100. as Float).powi(2);
        assert!((y23 - expected).abs() < 1e-12);
    }
}
