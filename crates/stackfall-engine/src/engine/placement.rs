//! Placement simulation: dropping a piece onto a column-height profile
//! without touching the live board.
//!
//! The simulator works on value copies. Each candidate evaluation gets its
//! own grid and profile, so evaluations never observe one another and the
//! live board stays read-only for the whole decision.

use std::iter;

use crate::core::{BOARD_HEIGHT, Cell, Grid, HeightProfile, PieceGeometry};

/// Computes the row the piece's bottom bounding-box row comes to rest in.
///
/// The resting row is the maximum over every occupied column `c` of
/// `heights[slot + c] - bottom_offsets[c]`: the piece rests on whichever
/// column makes contact first. Gravity only; no rotation after the drop.
///
/// The result is non-negative for any standard geometry (every rotation
/// touches its bottom row) dropped inside the board.
#[must_use]
pub fn resting_row(heights: &HeightProfile, piece: &PieceGeometry, slot: usize) -> i32 {
    piece
        .bottom_offsets()
        .iter()
        .enumerate()
        .map(|(c, &offset)| i32::from(heights.top(slot + c)) - i32::from(offset))
        .max()
        .unwrap()
}

/// Simulates dropping `piece` with its leftmost column in `slot`.
///
/// Returns the resulting grid and height profile as fresh values; the
/// inputs are left untouched. The piece's cells are written as
/// [`Cell::Simulated`] so that downstream analysis can tell them apart from
/// the settled stack. No lines are cleared.
///
/// Cells above row 19 are clipped, but the returned profile records the
/// piece's true top, which may exceed 20 — the driver reads that as a
/// lock-out.
///
/// # Preconditions
///
/// `slot + piece.width() <= 10`, and the placement must come from the legal
/// move list; the simulator does not validate it.
#[must_use]
pub fn simulate_drop(
    grid: &Grid,
    heights: &HeightProfile,
    piece: &PieceGeometry,
    slot: usize,
) -> (Grid, HeightProfile) {
    let resting = resting_row(heights, piece, slot);
    let ceiling = i32::try_from(BOARD_HEIGHT).unwrap();

    let mut sim_grid = grid.clone();
    let mut sim_heights = *heights;
    for (c, (&bottom, &top)) in iter::zip(piece.bottom_offsets(), piece.top_offsets()).enumerate() {
        let x = slot + c;
        let y_end = (resting + i32::from(top)).min(ceiling);
        for y in (resting + i32::from(bottom))..y_end {
            sim_grid.set_cell(x, usize::try_from(y).unwrap(), Cell::Simulated);
        }
        sim_heights.set_top(x, u8::try_from(resting + i32::from(top)).unwrap());
    }

    (sim_grid, sim_heights)
}
