//! Move evaluation: picking the best placement from a candidate list.
//!
//! The move evaluator walks the supplied candidates in order, simulates and
//! scores each one, and returns the index of the maximum. The comparison is
//! strict, so equal scores keep the earlier candidate; together with the
//! deterministic simulator this makes the whole decision reproducible.
//!
//! Candidate legality is the move generator's contract. The one failure
//! this module reports is an empty candidate list, which a driver should
//! only see in a terminal position.

use serde::Serialize;
use stackfall_engine::{CandidateMove, GeometryTable, Grid, HeightProfile, PieceKind};

use crate::{
    placement_analysis::PlacementAnalysis,
    placement_evaluator::{PlacementEvaluator, WeightedPlacementEvaluator},
};

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("no candidate moves to evaluate")]
pub struct NoLegalMoves;

/// Evaluation record for one candidate: its index in the supplied list and
/// its placement score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoveScore {
    pub index: usize,
    pub score: f64,
}

/// Scores candidate moves and selects the best one.
///
/// Holds the injected geometry table and a placement evaluator; both are
/// read-only for the lifetime of a decision, so evaluating candidates has
/// no observable effect on the live board.
#[derive(Debug)]
pub struct MoveEvaluator<'a> {
    geometry: &'a GeometryTable,
    placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
}

impl<'a> MoveEvaluator<'a> {
    #[must_use]
    pub fn new(
        geometry: &'a GeometryTable,
        placement_evaluator: Box<dyn PlacementEvaluator + 'a>,
    ) -> Self {
        Self {
            geometry,
            placement_evaluator,
        }
    }

    /// Creates a move evaluator with the standard feature weights.
    #[must_use]
    pub fn with_standard_weights(geometry: &'a GeometryTable) -> Self {
        Self::new(geometry, Box::new(WeightedPlacementEvaluator::default()))
    }

    /// Selects the best candidate for the upcoming piece.
    ///
    /// Returns the index into `candidates` of the highest-scoring
    /// placement; ties keep the lowest index. An empty candidate list is a
    /// precondition violation reported as [`NoLegalMoves`].
    pub fn select_move(
        &self,
        grid: &Grid,
        heights: &HeightProfile,
        kind: PieceKind,
        candidates: &[CandidateMove],
    ) -> Result<usize, NoLegalMoves> {
        let mut best_score = f64::MIN;
        let mut best_index = None;

        for (index, candidate) in candidates.iter().enumerate() {
            let score = self.score_candidate(grid, heights, kind, *candidate);
            if score > best_score {
                best_score = score;
                best_index = Some(index);
            }
        }

        best_index.ok_or(NoLegalMoves)
    }

    /// Scores every candidate in list order.
    #[must_use]
    pub fn score_moves(
        &self,
        grid: &Grid,
        heights: &HeightProfile,
        kind: PieceKind,
        candidates: &[CandidateMove],
    ) -> Vec<MoveScore> {
        candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| MoveScore {
                index,
                score: self.score_candidate(grid, heights, kind, *candidate),
            })
            .collect()
    }

    fn score_candidate(
        &self,
        grid: &Grid,
        heights: &HeightProfile,
        kind: PieceKind,
        candidate: CandidateMove,
    ) -> f64 {
        let piece = self.geometry.geometry(kind, candidate.rotation());
        let analysis = PlacementAnalysis::from_board(grid, heights, piece, candidate.slot());
        self.placement_evaluator.evaluate_placement(&analysis)
    }
}
