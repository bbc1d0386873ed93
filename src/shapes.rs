//! Per-event computation of the central event shapes
//!
//! This is where the kinematics, acceptance, thrust, hemisphere and
//! resolution stages get chained together into one result per event.

use crate::{
    acceptance::Acceptance,
    config::ShapeConfig,
    error::{Result, ShapeError},
    hemisphere,
    kinematics::Particle,
    momentum::{momentum_norm, Momentum, E},
    numeric::Float,
    resolution,
    thrust::{AxisSearch, ExhaustiveSearch},
};
use nalgebra::Vector3;

/// Number of event shape variables
pub const NUM_SHAPES: usize = 5;

/// Value of all shape variables when an event has too few central particles
pub const SENTINEL: Float = -50.;

/// Shape variables are floored to this value before taking their logarithm
pub const LOG_FLOOR: Float = 1e-20;

/// Tolerance on |p| > E before a particle is considered unphysical
const MOMENTUM_TOLERANCE: Float = 1e-4;

/// The five central event shape variables
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeValues {
    /// τ = 1 - T of the central transverse thrust
    pub central_thrust_tau: Float,

    /// Central total jet broadening
    pub total_broadening: Float,

    /// Central total jet mass
    pub total_jet_mass: Float,

    /// Central total transverse jet mass
    pub total_transverse_jet_mass: Float,

    /// Central three-jet resolution threshold y23
    pub three_jet_resolution: Float,
}
//
impl ShapeValues {
    /// Shape values with the same value everywhere
    pub fn splat(value: Float) -> Self {
        Self::from_array([value; NUM_SHAPES])
    }

    /// Build shape values from an array, in the order of `to_array()`
    pub fn from_array(values: [Float; NUM_SHAPES]) -> Self {
        let [
            central_thrust_tau,
            total_broadening,
            total_jet_mass,
            total_transverse_jet_mass,
            three_jet_resolution,
        ] = values;
        Self {
            central_thrust_tau,
            total_broadening,
            total_jet_mass,
            total_transverse_jet_mass,
            three_jet_resolution,
        }
    }

    /// Shape values in a fixed order (thrust, broadening, jet mass,
    /// transverse jet mass, y23)
    pub fn to_array(&self) -> [Float; NUM_SHAPES] {
        [
            self.central_thrust_tau,
            self.total_broadening,
            self.total_jet_mass,
            self.total_transverse_jet_mass,
            self.three_jet_resolution,
        ]
    }

    /// Natural logarithm of every value, floored at ln(LOG_FLOOR)
    pub fn logged(&self) -> Self {
        Self::from_array(self.to_array().map(|x| x.max(LOG_FLOOR).ln()))
    }
}

/// Event shapes of one event
///
/// Shape values are kept in linear scale here. Use `emit()` to get them in
/// the logarithmic form that gets histogrammed.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeResult {
    /// Linear shape values, or None if the event has too few central particles
    pub values: Option<ShapeValues>,

    /// Number of central particles, negated if a hemisphere is empty
    pub central_multiplicity_signed: isize,

    /// Central transverse thrust axis
    pub thrust_axis: Option<Vector3<Float>>,

    /// Exponentially suppressed contribution of the forward particles
    pub forward_term: Float,
}
//
impl ShapeResult {
    /// Result of an event with too few central particles
    fn insufficient(num_central: usize) -> Self {
        Self {
            values: None,
            central_multiplicity_signed: num_central as isize,
            thrust_axis: None,
            forward_term: 0.,
        }
    }

    /// Logarithm of the shape values (or SENTINEL everywhere if there were
    /// too few central particles)
    pub fn emit(&self) -> ShapeValues {
        self.values
            .map_or_else(|| ShapeValues::splat(SENTINEL), |values| values.logged())
    }

    /// Number of central particles
    pub fn central_multiplicity(&self) -> usize {
        self.central_multiplicity_signed.unsigned_abs()
    }

    /// Truth that an event must be vetoed because a hemisphere is empty
    pub fn is_vetoed(&self) -> bool {
        self.central_multiplicity_signed < 0
    }
}

/// Event shape calculator
///
/// Holds no per-event state, so a single analyzer can process any number of
/// events, from any number of threads.
///
pub struct ShapeAnalyzer<'cfg, S: AxisSearch = ExhaustiveSearch> {
    /// Analysis parameters
    cfg: &'cfg ShapeConfig,

    /// Thrust axis search algorithm
    search: S,
}
//
impl<'cfg> ShapeAnalyzer<'cfg> {
    /// Set up an analyzer with the default thrust axis search
    pub fn new(cfg: &'cfg ShapeConfig) -> Self {
        Self::with_search(cfg, ExhaustiveSearch)
    }
}
//
impl<'cfg, S: AxisSearch> ShapeAnalyzer<'cfg, S> {
    /// Set up an analyzer with a custom thrust axis search
    pub fn with_search(cfg: &'cfg ShapeConfig, search: S) -> Self {
        Self { cfg, search }
    }

    /// Compute the event shapes from separate momentum component arrays
    pub fn analyze_components(
        &self,
        px: &[Float],
        py: &[Float],
        pz: &[Float],
        e: &[Float],
    ) -> Result<ShapeResult> {
        let len = px.len();
        if py.len() != len || pz.len() != len || e.len() != len {
            return Err(ShapeError::InputSizeMismatch {
                px: len,
                py: py.len(),
                pz: pz.len(),
                e: e.len(),
            });
        }
        let momenta = (0..len)
            .map(|i| Momentum::new(px[i], py[i], pz[i], e[i]))
            .collect::<Vec<_>>();
        self.analyze(&momenta[..])
    }

    /// Compute the event shapes of the final-state particles of an event
    pub fn analyze(&self, momenta: &[Momentum]) -> Result<ShapeResult> {
        // Compute the collider coordinates of every particle
        let particles = momenta
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let momentum = momentum_norm(p);
                if momentum > p[E] + MOMENTUM_TOLERANCE {
                    return Err(ShapeError::UnphysicalMomentum {
                        index,
                        momentum,
                        energy: p[E],
                    });
                }
                Particle::new(*p, self.cfg.convention())
            })
            .collect::<Result<Vec<_>>>()?;

        // Select central particles, and give up if there are not enough
        let acceptance = Acceptance::partition(particles, self.cfg.eta_central());
        let num_central = acceptance.num_central();
        if num_central < self.cfg.min_multiplicity() {
            tracing::debug!(
                num_central,
                min_multiplicity = self.cfg.min_multiplicity(),
                "too few central particles"
            );
            return Ok(ShapeResult::insufficient(num_central));
        }
        let central = acceptance.central();

        // Compute the event shapes
        let thrust = self.search.search(central)?;
        let hemispheres = hemisphere::accumulate(central, &thrust.axis);
        let y23 = resolution::three_jet_resolution(central, self.cfg)?;
        let values = ShapeValues {
            central_thrust_tau: thrust.tau(),
            total_broadening: hemispheres.broadening,
            total_jet_mass: hemispheres.jet_mass,
            total_transverse_jet_mass: hemispheres.transverse_jet_mass,
            three_jet_resolution: y23,
        };
        tracing::trace!(?values, "computed event shapes");

        // An empty hemisphere is flagged via the multiplicity sign
        let central_multiplicity_signed = if hemispheres.both_non_empty {
            num_central as isize
        } else {
            -(num_central as isize)
        };
        Ok(ShapeResult {
            values: Some(values),
            central_multiplicity_signed,
            thrust_axis: Some(thrust.axis),
            forward_term: acceptance.forward_term(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::RapidityConvention;

    #[test]
    fn logged_values_are_floored() {
        let values = ShapeValues::from_array([0., 1., -1., 1e-30, Float::exp(2.)]);
        let logged = values.logged().to_array();
        let floor = LOG_FLOOR.ln();
        assert_eq!(logged[0], floor);
        assert_eq!(logged[1], 0.);
        assert_eq!(logged[2], floor);
        assert_eq!(logged[3], floor);
        assert!((logged[4] - 2.).abs() < 1e-12);
        assert!((floor + 46.0517).abs() < 1e-4);
    }

    #[test]
    fn sentinel_is_not_logged() {
        let result = ShapeResult::insufficient(1);
        assert_eq!(result.emit(), ShapeValues::splat(SENTINEL));
        assert_eq!(result.central_multiplicity(), 1);
        assert!(!result.is_vetoed());
    }

    #[test]
    fn component_arrays_must_match() {
        let cfg = ShapeConfig::default();
        let analyzer = ShapeAnalyzer::new(&cfg);
        let result = analyzer.analyze_components(&[1., -1.], &[0., 0.], &[0.], &[1., 1.]);
        assert_eq!(
            result,
            Err(ShapeError::InputSizeMismatch {
                px: 2,
                py: 2,
                pz: 1,
                e: 2
            })
        );
    }

    #[test]
    fn unphysical_momentum_is_rejected() {
        let cfg = ShapeConfig::default();
        let analyzer = ShapeAnalyzer::new(&cfg);
        let momenta = [Momentum::new(1., 0., 0., 1.), Momentum::new(0., 2., 0., 1.)];
        assert!(matches!(
            analyzer.analyze(&momenta),
            Err(ShapeError::UnphysicalMomentum { index: 1, .. })
        ));
    }

    #[test]
    fn forward_particles_are_ignored() {
        let cfg = ShapeConfig::new(1., RapidityConvention::Pseudorapidity, 2).unwrap();
        let analyzer = ShapeAnalyzer::new(&cfg);
        let central = [Momentum::new(5., 0., 0., 5.), Momentum::new(-5., 0., 0., 5.)];
        let mut with_forward = central.to_vec();
        with_forward.push(Momentum::new(0., 1., 20., (401 as Float).sqrt()));

        let reference = analyzer.analyze(&central).unwrap();
        let result = analyzer.analyze(&with_forward).unwrap();
        assert_eq!(result.values, reference.values);
        assert_eq!(result.central_multiplicity_signed, 2);
        assert!(result.forward_term > 0.);
        assert_eq!(reference.forward_term, 0.);
    }
}
