//! Parameters of the event shape computation
//!
//! The configuration is fixed before any event is processed, then shared by
//! reference between all analysis calls (including concurrent ones).

use crate::{
    error::{Result, ShapeError},
    kinematics::RapidityConvention,
    numeric::Float,
};

/// Event shape computation parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeConfig {
    /// Central region is |η| < eta_central (or |y| < eta_central)
    eta_central: Float,

    /// Whether angular positions are measured with rapidity or pseudorapidity
    convention: RapidityConvention,

    /// Minimal number of central particles for shapes to be computed
    min_multiplicity: usize,

    /// Beam distance factor of the three-jet resolution clustering
    beam_distance_factor: Float,
}
//
impl ShapeConfig {
    /// Recommended central region cut, which should contain the two hardest
    /// jets of the event
    pub const DEFAULT_ETA_CENTRAL: Float = 2.4;

    /// Thrust and jet masses need at least two central particles
    pub const DEFAULT_MIN_MULTIPLICITY: usize = 2;

    /// Published calibration of the beam distance in the y23 clustering
    pub const DEFAULT_BEAM_DISTANCE_FACTOR: Float = 0.36;

    /// Set up and check an event shape configuration
    pub fn new(
        eta_central: Float,
        convention: RapidityConvention,
        min_multiplicity: usize,
    ) -> Result<Self> {
        Self {
            eta_central,
            convention,
            min_multiplicity,
            beam_distance_factor: Self::DEFAULT_BEAM_DISTANCE_FACTOR,
        }
        .validated()
    }

    /// Use a different beam distance factor in the three-jet clustering
    pub fn with_beam_distance_factor(mut self, factor: Float) -> Result<Self> {
        self.beam_distance_factor = factor;
        self.validated()
    }

    /// Check that the parameters make sense
    fn validated(self) -> Result<Self> {
        let invalid = |reason: String| Err(ShapeError::InvalidConfiguration(reason));
        if !(self.eta_central.is_finite() && self.eta_central > 0.) {
            return invalid(format!(
                "central region cut must be positive and finite, got {}",
                self.eta_central
            ));
        }
        if self.min_multiplicity < 2 {
            return invalid(format!(
                "at least 2 central particles are needed to define a thrust axis, got {}",
                self.min_multiplicity
            ));
        }
        if !(self.beam_distance_factor.is_finite() && self.beam_distance_factor > 0.) {
            return invalid(format!(
                "beam distance factor must be positive and finite, got {}",
                self.beam_distance_factor
            ));
        }
        Ok(self)
    }

    /// Central region cut on |η| (or |y|)
    pub fn eta_central(&self) -> Float {
        self.eta_central
    }

    /// Longitudinal coordinate convention
    pub fn convention(&self) -> RapidityConvention {
        self.convention
    }

    /// Minimal number of central particles
    pub fn min_multiplicity(&self) -> usize {
        self.min_multiplicity
    }

    /// Beam distance factor of the three-jet clustering
    pub fn beam_distance_factor(&self) -> Float {
        self.beam_distance_factor
    }
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            eta_central: Self::DEFAULT_ETA_CENTRAL,
            convention: RapidityConvention::Pseudorapidity,
            min_multiplicity: Self::DEFAULT_MIN_MULTIPLICITY,
            beam_distance_factor: Self::DEFAULT_BEAM_DISTANCE_FACTOR,
        }
    }
}
