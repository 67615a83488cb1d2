//! Placement evaluation: scoring one simulated placement.
//!
//! A placement score is a linear combination of the six board features:
//!
//! ```text
//! score = w_landing·landing_height + w_holes·holes + w_eroded·eroded_cells
//!       + w_rows·row_transitions + w_cols·column_transitions + w_wells·well_sums
//! ```
//!
//! Higher is better. The standard weights penalize holes four times as hard
//! as any other feature and make eroded cells the only reward, which steers
//! play toward flat, hole-free stacks that clear lines with the falling
//! piece's own cells.
//!
//! Weights are configuration, not tuned here: [`FeatureWeights`] is
//! serde-serializable so a driver can load alternatives, but nothing in
//! this crate learns them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::placement_analysis::PlacementAnalysis;

/// Weight per feature in the placement score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    pub landing_height: f64,
    pub holes: f64,
    pub eroded_cells: f64,
    pub row_transitions: f64,
    pub column_transitions: f64,
    pub well_sums: f64,
}

impl FeatureWeights {
    /// The fixed weights of the standard agent.
    pub const STANDARD: Self = Self {
        landing_height: -1.0,
        holes: -4.0,
        eroded_cells: 1.0,
        row_transitions: -1.0,
        column_transitions: -1.0,
        well_sums: -1.0,
    };
}

impl Default for FeatureWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Evaluates piece placements by assigning scores.
///
/// Implementations define how to score a placement given its analysis. The
/// common implementation is [`WeightedPlacementEvaluator`]; the trait is
/// the seam for drivers that want a different scoring rule over the same
/// simulated features.
pub trait PlacementEvaluator: fmt::Debug + Send + Sync {
    /// Evaluates a placement and returns a score (higher is better).
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64;
}

/// Scores placements as a weighted sum of the six features.
#[derive(Debug, Clone)]
pub struct WeightedPlacementEvaluator {
    weights: FeatureWeights,
}

impl WeightedPlacementEvaluator {
    #[must_use]
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }
}

impl Default for WeightedPlacementEvaluator {
    fn default() -> Self {
        Self::new(FeatureWeights::STANDARD)
    }
}

impl PlacementEvaluator for WeightedPlacementEvaluator {
    fn evaluate_placement(&self, analysis: &PlacementAnalysis) -> f64 {
        let w = &self.weights;
        w.landing_height * analysis.landing_height()
            + w.holes * f64::from(analysis.num_holes())
            + w.eroded_cells * f64::from(analysis.eroded_piece_cells())
            + w.row_transitions * f64::from(analysis.row_transitions())
            + w.column_transitions * f64::from(analysis.column_transitions())
            + w.well_sums * f64::from(analysis.well_sums())
    }
}
