//! This module allows integrating event shape results across generated events

use event_shapes::{shapes::NUM_SHAPES, Float, ShapeError, ShapeResult};
use nalgebra::SVector;
use num_traits::Zero;
use prefix_num_ops::real::*;

/// Vector with one entry per event shape variable
pub type ShapesVector = SVector<Float, NUM_SHAPES>;

/// Index of the broadening in a ShapesVector
const BROADENING: usize = 1;

/// Index of y23 in a ShapesVector
const Y23: usize = 4;

/// Broadening and y23 are only meaningful with this many central particles
const MIN_MULTIPLICITY_3JET: usize = 3;

/// This struct accumulates event shape results, and ultimately computes
/// summary statistics about them (see FinalStatistics below).
#[derive(Clone, Debug)]
pub struct ShapeStatistics {
    /// Number of processed events
    processed_events: usize,

    /// Number of events which the kernel could not process
    failed_events: usize,

    /// Number of events with too few central particles
    sparse_events: usize,

    /// Number of events with an empty hemisphere
    vetoed_events: usize,

    /// Number of events used for each variable
    counts: SVector<usize, NUM_SHAPES>,

    /// Accumulated weight of each variable
    weights: ShapesVector,

    /// Accumulated weighted emitted value of each variable
    sums: ShapesVector,

    /// Accumulated weighted squared emitted value of each variable
    sums2: ShapesVector,
}
//
impl ShapeStatistics {
    /// Prepare for results integration
    pub fn new() -> Self {
        Self {
            processed_events: 0,
            failed_events: 0,
            sparse_events: 0,
            vetoed_events: 0,
            counts: SVector::zeros(),
            weights: ShapesVector::zero(),
            sums: ShapesVector::zero(),
            sums2: ShapesVector::zero(),
        }
    }

    /// Integrate the shapes of one event into the statistics
    pub fn integrate(&mut self, weight: Float, result: &Result<ShapeResult, ShapeError>) {
        self.processed_events += 1;
        let result = match result {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(%error, "event shape computation failed");
                self.failed_events += 1;
                return;
            }
        };
        if result.values.is_none() {
            self.sparse_events += 1;
            return;
        }
        if result.is_vetoed() {
            self.vetoed_events += 1;
            return;
        }

        // Fill in the emitted values, like histograms would be
        let emitted = ShapesVector::from(result.emit().to_array());
        let three_jet = result.central_multiplicity() >= MIN_MULTIPLICITY_3JET;
        for (idx, &value) in emitted.iter().enumerate() {
            if (idx == BROADENING || idx == Y23) && !three_jet {
                continue;
            }
            self.counts[idx] += 1;
            self.weights[idx] += weight;
            self.sums[idx] += weight * value;
            self.sums2[idx] += weight * value.powi(2);
        }
    }

    /// Integrate statistics from another ShapeStatistics
    #[allow(clippy::needless_pass_by_value)]
    pub fn merge(&mut self, other: Self) {
        self.processed_events += other.processed_events;
        self.failed_events += other.failed_events;
        self.sparse_events += other.sparse_events;
        self.vetoed_events += other.vetoed_events;
        self.counts += other.counts;
        self.weights += other.weights;
        self.sums += other.sums;
        self.sums2 += other.sums2;
    }

    /// Turn integrated data into summary statistics
    pub fn finalize(self) -> FinalStatistics {
        let mut means = ShapesVector::zero();
        let mut std_devs = ShapesVector::zero();
        for idx in 0..NUM_SHAPES {
            let weight = self.weights[idx];
            if weight > 0. {
                let mean = self.sums[idx] / weight;
                let variance = self.sums2[idx] / weight - mean.powi(2);
                means[idx] = mean;
                std_devs[idx] = sqrt(abs(variance));
            }
        }
        FinalStatistics {
            processed_events: self.processed_events,
            failed_events: self.failed_events,
            sparse_events: self.sparse_events,
            vetoed_events: self.vetoed_events,
            counts: self.counts,
            means,
            std_devs,
        }
    }
}

impl Default for ShapeStatistics {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics of the emitted (logarithmic) event shapes
#[derive(Clone, Debug)]
pub struct FinalStatistics {
    /// Number of processed events
    pub processed_events: usize,

    /// Number of events which the kernel could not process
    pub failed_events: usize,

    /// Number of events with too few central particles
    pub sparse_events: usize,

    /// Number of events with an empty hemisphere
    pub vetoed_events: usize,

    /// Number of events used for each variable
    pub counts: SVector<usize, NUM_SHAPES>,

    /// Weighted mean of each variable
    pub means: ShapesVector,

    /// Weighted standard deviation of each variable
    pub std_devs: ShapesVector,
}
