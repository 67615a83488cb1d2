//! Analysis of one candidate placement.
//!
//! [`PlacementAnalysis`] runs the placement simulator once and exposes the
//! six feature values over the result, each computed on first use and
//! cached. An evaluator that never reads a feature never pays for it.
//!
//! The analysis owns its simulated grid and profile; nothing here aliases
//! the live board or another candidate's buffers.

use std::cell::OnceCell;

use stackfall_engine::{Grid, HeightProfile, PieceGeometry, resting_row, simulate_drop};

use crate::board_feature;

#[derive(Debug)]
pub struct PlacementAnalysis {
    piece: PieceGeometry,
    resting_row: i32,
    grid: Grid,
    heights: HeightProfile,
    landing_height: OnceCell<f64>,
    num_holes: OnceCell<u32>,
    eroded_piece_cells: OnceCell<u32>,
    row_transitions: OnceCell<u32>,
    column_transitions: OnceCell<u32>,
    well_sums: OnceCell<u32>,
}

impl PlacementAnalysis {
    /// Simulates dropping `piece` into `slot` on the given live board and
    /// wraps the result for feature extraction.
    #[must_use]
    pub fn from_board(
        grid: &Grid,
        heights: &HeightProfile,
        piece: &PieceGeometry,
        slot: usize,
    ) -> Self {
        let resting = resting_row(heights, piece, slot);
        let (sim_grid, sim_heights) = simulate_drop(grid, heights, piece, slot);
        Self {
            piece: *piece,
            resting_row: resting,
            grid: sim_grid,
            heights: sim_heights,
            landing_height: OnceCell::new(),
            num_holes: OnceCell::new(),
            eroded_piece_cells: OnceCell::new(),
            row_transitions: OnceCell::new(),
            column_transitions: OnceCell::new(),
            well_sums: OnceCell::new(),
        }
    }

    /// The simulated grid, with the piece's cells tagged
    /// [`Cell::Simulated`](stackfall_engine::Cell::Simulated).
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The simulated height profile.
    #[must_use]
    pub fn heights(&self) -> &HeightProfile {
        &self.heights
    }

    /// The row the piece's bounding box came to rest in.
    #[must_use]
    pub fn resting_row(&self) -> i32 {
        self.resting_row
    }

    #[must_use]
    pub fn landing_height(&self) -> f64 {
        *self.landing_height.get_or_init(|| {
            f64::from(self.resting_row) + 0.5 * f64::from(self.piece.height())
        })
    }

    #[must_use]
    pub fn num_holes(&self) -> u32 {
        *self
            .num_holes
            .get_or_init(|| board_feature::num_holes(&self.grid, &self.heights))
    }

    #[must_use]
    pub fn eroded_piece_cells(&self) -> u32 {
        *self.eroded_piece_cells.get_or_init(|| {
            board_feature::eroded_cells(&self.grid, self.resting_row, self.piece.height())
        })
    }

    #[must_use]
    pub fn row_transitions(&self) -> u32 {
        *self
            .row_transitions
            .get_or_init(|| board_feature::row_transitions(&self.grid))
    }

    #[must_use]
    pub fn column_transitions(&self) -> u32 {
        *self
            .column_transitions
            .get_or_init(|| board_feature::column_transitions(&self.grid))
    }

    #[must_use]
    pub fn well_sums(&self) -> u32 {
        *self
            .well_sums
            .get_or_init(|| board_feature::well_sums(&self.grid))
    }
}
