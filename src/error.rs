//! Failures of the event shape computation
//!
//! Only conditions which make an event unusable are errors. Events with too
//! few central particles or an empty hemisphere are expected and are reported
//! through the `ShapeResult` instead.

use crate::numeric::Float;

/// Error type of the event shape kernel
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ShapeError {
    /// The px, py, pz and E input arrays do not have the same length
    #[error("input components differ in length (px: {px}, py: {py}, pz: {pz}, E: {e})")]
    InputSizeMismatch {
        /// Number of px components
        px: usize,
        /// Number of py components
        py: usize,
        /// Number of pz components
        pz: usize,
        /// Number of energy components
        e: usize,
    },

    /// Rapidity was requested for an object with E == pz
    #[error("rapidity is undefined for an object with pz = E = {energy}")]
    DegenerateRapidity {
        /// Energy (and longitudinal momentum) of the offending object
        energy: Float,
    },

    /// A particle's 3-momentum is larger than its energy
    #[error("particle {index} has |p| = {momentum}, which is bigger than E = {energy}")]
    UnphysicalMomentum {
        /// Position of the particle in the input
        index: usize,
        /// Norm of the particle's 3-momentum
        momentum: Float,
        /// Energy of the particle
        energy: Float,
    },

    /// The central particles carry no transverse momentum at all
    #[error("central particles carry no transverse momentum, the thrust axis is undefined")]
    VanishingTransverseMomentum,

    /// The kernel was configured with unusable parameters
    #[error("invalid event shape configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type of the event shape kernel
pub type Result<T> = std::result::Result<T, ShapeError>;
