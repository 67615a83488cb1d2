//! Board-quality feature extractors.
//!
//! Each extractor is a pure function over the simulated board (and, where
//! the feature concerns the drop itself, the pre-drop profile and piece
//! geometry). Higher scores are produced by the weighted sum in
//! [`placement_evaluator`](crate::placement_evaluator); the raw values here
//! are plain counts and heights.

use stackfall_engine::{
    BOARD_HEIGHT, BOARD_WIDTH, Cell, Grid, HeightProfile, PieceGeometry, resting_row,
    simulate_drop,
};

/// Vertical midpoint of the piece's final bounding box.
///
/// Computes the same resting row as the simulator, then adds half the piece
/// height: the midpoint tracks the piece's center of mass better than its
/// base, so taller pieces landing high cost more.
///
/// # Raw measurement
///
/// - `resting_row + 0.5 × piece_height`
#[must_use]
pub fn landing_height(heights: &HeightProfile, piece: &PieceGeometry, slot: usize) -> f64 {
    f64::from(resting_row(heights, piece, slot)) + 0.5 * f64::from(piece.height())
}

/// Number of holes: empty cells with at least one occupied cell above them
/// in the same column.
///
/// # Raw measurement
///
/// - For each column, count the empty cells strictly below the column's
///   top (clipped to the board); starting the scan at the top makes every
///   counted cell covered by definition.
/// - Monotonic under stacking: new cells always land at or above a
///   column's top, so they can cover empties but never fill them.
#[must_use]
pub fn num_holes(grid: &Grid, heights: &HeightProfile) -> u32 {
    let mut holes = 0;
    for x in 0..BOARD_WIDTH {
        let top = usize::from(heights.top(x)).min(BOARD_HEIGHT);
        for y in 0..top {
            if grid.cell(x, y).is_empty() {
                holes += 1;
            }
        }
    }
    holes
}

/// Eroded piece cells: line-clear credit attributed to the dropped piece.
///
/// Simulates the drop from the live board, then scans the piece's
/// bounding-box rows for full rows. Returns
/// `rows_cleared × eroded_piece_cells` — the product rewards placements
/// that both finish several rows and put many of their own cells into
/// those rows. Zero whenever the drop completes no row.
#[must_use]
pub fn eroded_piece_cells(
    grid: &Grid,
    heights: &HeightProfile,
    piece: &PieceGeometry,
    slot: usize,
) -> u32 {
    let (sim_grid, _sim_heights) = simulate_drop(grid, heights, piece, slot);
    eroded_cells(&sim_grid, resting_row(heights, piece, slot), piece.height())
}

/// Full-row scan over a simulated grid. Only rows inside the piece's
/// bounding box can have been completed by the drop, so only
/// `resting..resting + height` (clipped to the board) is scanned.
pub(crate) fn eroded_cells(sim_grid: &Grid, resting: i32, piece_height: u8) -> u32 {
    let ceiling = i32::try_from(BOARD_HEIGHT).unwrap();
    let top_row = (resting + i32::from(piece_height) - 1).min(ceiling - 1);

    let mut rows_cleared = 0u32;
    let mut eroded = 0u32;
    for y in resting..=top_row {
        let y = usize::try_from(y).unwrap();
        if !sim_grid.is_row_full(y) {
            continue;
        }
        rows_cleared += 1;
        let in_row = sim_grid
            .row(y)
            .iter()
            .filter(|cell| **cell == Cell::Simulated)
            .count();
        eroded += u32::try_from(in_row).unwrap();
    }
    rows_cleared * eroded
}

/// Row transitions: horizontal crossings between empty and occupied cells.
///
/// # Raw measurement
///
/// - For each row, one count per adjacent pair differing in emptiness.
/// - The side walls act as filled cells; a row open at both edges counts a
///   single edge crossing.
#[must_use]
pub fn row_transitions(grid: &Grid) -> u32 {
    let mut transitions = 0;
    for y in 0..BOARD_HEIGHT {
        let row = grid.row(y);
        if row[0].is_empty() {
            transitions += 1;
        } else if row[BOARD_WIDTH - 1].is_empty() {
            transitions += 1;
        }
        for pair in row.windows(2) {
            if pair[0].is_empty() != pair[1].is_empty() {
                transitions += 1;
            }
        }
    }
    transitions
}

/// Column transitions: vertical crossings between empty and occupied cells.
///
/// # Raw measurement
///
/// - For each column, one count per adjacent vertical pair differing in
///   emptiness, moving upward.
/// - The floor acts as a filled cell; the ceiling does not.
#[must_use]
pub fn column_transitions(grid: &Grid) -> u32 {
    let mut transitions = 0;
    for x in 0..BOARD_WIDTH {
        if grid.cell(x, 0).is_empty() {
            transitions += 1;
        }
        for y in 1..BOARD_HEIGHT {
            if grid.cell(x, y).is_empty() != grid.cell(x, y - 1).is_empty() {
                transitions += 1;
            }
        }
    }
    transitions
}

/// Well sums: well cells plus the empty depth hanging under them.
///
/// A well cell is an empty cell whose inward neighbors are all occupied:
/// both side neighbors for interior columns, the single inward neighbor for
/// the two edge columns. Each well cell counts 1 plus the run of contiguous
/// empty cells directly beneath it.
///
/// Edge and interior columns follow different neighbor rules, so the board
/// is scanned in three passes: left edge, right edge, interior.
#[must_use]
pub fn well_sums(grid: &Grid) -> u32 {
    let mut well_cells = 0;
    let mut well_weights = 0;

    for y in 0..BOARD_HEIGHT {
        if grid.cell(0, y).is_empty() && grid.cell(1, y).is_occupied() {
            well_cells += 1;
            well_weights += empty_run_below(grid, 0, y);
        }
    }

    for y in 0..BOARD_HEIGHT {
        if grid.cell(BOARD_WIDTH - 1, y).is_empty() && grid.cell(BOARD_WIDTH - 2, y).is_occupied() {
            well_cells += 1;
            well_weights += empty_run_below(grid, BOARD_WIDTH - 1, y);
        }
    }

    for x in 1..BOARD_WIDTH - 1 {
        for y in 0..BOARD_HEIGHT {
            if grid.cell(x, y).is_empty()
                && grid.cell(x - 1, y).is_occupied()
                && grid.cell(x + 1, y).is_occupied()
            {
                well_cells += 1;
                well_weights += empty_run_below(grid, x, y);
            }
        }
    }

    well_cells + well_weights
}

fn empty_run_below(grid: &Grid, x: usize, y: usize) -> u32 {
    let run = (0..y)
        .rev()
        .take_while(|&below| grid.cell(x, below).is_empty())
        .count();
    u32::try_from(run).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stackfall_engine::{GeometryTable, PieceKind, Rotation};

    fn piece(kind: PieceKind, rotation: u8) -> PieceGeometry {
        *GeometryTable::STANDARD.geometry(kind, Rotation::new(rotation))
    }

    fn mirrored(grid: &Grid) -> Grid {
        let mut out = Grid::EMPTY;
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                out.set_cell(BOARD_WIDTH - 1 - x, y, grid.cell(x, y));
            }
        }
        out
    }

    /// Common board patterns for reuse across tests
    mod test_boards {
        use super::*;

        pub fn empty() -> Grid {
            Grid::EMPTY
        }

        pub fn staircase() -> Grid {
            Grid::from_ascii(
                "
                #.........
                ##........
                ###.......
                ####......
                #####.....
                ",
            )
        }

        pub fn single_hole() -> Grid {
            Grid::from_ascii(
                "
                #.........
                ..........
                #.........
                ",
            )
        }

        pub fn narrow_gap() -> Grid {
            Grid::from_ascii(
                "
                #.#.......
                #.#.......
                ",
            )
        }

        pub fn right_edge_chimney() -> Grid {
            Grid::from_ascii(
                "
                ........#.
                ........#.
                ........#.
                #########.
                ",
            )
        }

        pub fn alternating_bottom_row() -> Grid {
            Grid::from_ascii("#.#.#.#.#.")
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_landing_height() {
        let flat = HeightProfile::EMPTY;
        assert_eq!(landing_height(&flat, &piece(PieceKind::I, 0), 0), 0.5);
        assert_eq!(landing_height(&flat, &piece(PieceKind::I, 1), 9), 2.0);
        assert_eq!(landing_height(&flat, &piece(PieceKind::O, 0), 4), 1.0);

        let staircase = HeightProfile::from_grid(&test_boards::staircase());
        assert_eq!(landing_height(&staircase, &piece(PieceKind::I, 0), 0), 5.5);
    }

    #[test]
    fn test_num_holes() {
        let cases = [
            ("empty", test_boards::empty(), 0),
            ("staircase", test_boards::staircase(), 0),
            ("single_hole", test_boards::single_hole(), 1),
            ("narrow_gap", test_boards::narrow_gap(), 0),
        ];

        for (name, grid, expected) in cases {
            let heights = HeightProfile::from_grid(&grid);
            assert_eq!(num_holes(&grid, &heights), expected, "{name}");
        }
    }

    #[test]
    fn test_num_holes_counts_every_covered_empty() {
        let grid = Grid::from_ascii(
            "
            #..#......
            ...#......
            #..#......
            ..........
            #..#......
            ",
        );
        let heights = HeightProfile::from_grid(&grid);
        // Column 0: two empties below top 5; column 3: one empty below top 5.
        assert_eq!(num_holes(&grid, &heights), 3);
    }

    #[test]
    fn test_num_holes_never_decreases_under_stacking() {
        let grid = test_boards::single_hole();
        let heights = HeightProfile::from_grid(&grid);
        let before = num_holes(&grid, &heights);

        let (sim_grid, sim_heights) = simulate_drop(&grid, &heights, &piece(PieceKind::O, 0), 0);
        let after = num_holes(&sim_grid, &sim_heights);

        assert!(after >= before);
        // The O-piece rests on column 0's top and newly covers column 1.
        assert_eq!(after, 4);
    }

    #[test]
    fn test_eroded_piece_cells_zero_without_clear() {
        let grid = test_boards::empty();
        let heights = HeightProfile::EMPTY;
        let table = GeometryTable::STANDARD;

        for kind in PieceKind::ALL {
            for candidate in table.legal_moves(kind) {
                let geometry = table.geometry(kind, candidate.rotation());
                assert_eq!(
                    eroded_piece_cells(&grid, &heights, geometry, candidate.slot()),
                    0,
                    "{kind:?} {candidate:?}"
                );
            }
        }
    }

    #[test]
    fn test_eroded_piece_cells_single_gap() {
        let grid = Grid::from_ascii("#########.");
        let heights = HeightProfile::from_grid(&grid);

        // A vertical I fills the gap: one cleared row, one contributing cell.
        assert_eq!(eroded_piece_cells(&grid, &heights, &piece(PieceKind::I, 1), 9), 1);
    }

    #[test]
    fn test_eroded_piece_cells_counts_own_cells() {
        let grid = Grid::from_ascii("########..");
        let heights = HeightProfile::from_grid(&grid);

        // An O-piece finishes the bottom row with two of its four cells.
        assert_eq!(eroded_piece_cells(&grid, &heights, &piece(PieceKind::O, 0), 8), 2);
    }

    #[test]
    fn test_eroded_piece_cells_product_of_rows_and_cells() {
        let grid = Grid::from_ascii(
            "
            #########.
            #########.
            ",
        );
        let heights = HeightProfile::from_grid(&grid);

        // A vertical I completes both rows with one cell each: 2 × 2.
        assert_eq!(eroded_piece_cells(&grid, &heights, &piece(PieceKind::I, 1), 9), 4);
    }

    #[test]
    fn test_eroded_piece_cells_ignores_rows_outside_bounding_box() {
        // The bottom row is already full; the piece lands above it and
        // completes nothing, so the pre-existing full row earns no credit.
        let grid = Grid::from_ascii("##########");
        let heights = HeightProfile::from_grid(&grid);

        assert_eq!(eroded_piece_cells(&grid, &heights, &piece(PieceKind::O, 0), 3), 0);
    }

    #[test]
    fn test_row_transitions() {
        let cases = [
            ("empty", test_boards::empty(), 20),
            ("alternating", test_boards::alternating_bottom_row(), 29),
            ("narrow_gap", test_boards::narrow_gap(), 26),
        ];

        for (name, grid, expected) in cases {
            assert_eq!(row_transitions(&grid), expected, "{name}");
        }
    }

    #[test]
    fn test_row_transitions_open_row_counts_once() {
        // Both edges of an all-empty row are open, but the crossing is
        // counted once per row.
        assert_eq!(row_transitions(&Grid::EMPTY), 20);

        let full_bottom = Grid::from_ascii("##########");
        assert_eq!(row_transitions(&full_bottom), 19);
    }

    #[test]
    fn test_column_transitions() {
        let cases = [
            ("empty", test_boards::empty(), 10),
            ("staircase", test_boards::staircase(), 10),
            ("single_hole", test_boards::single_hole(), 12),
            ("full_bottom", Grid::from_ascii("##########"), 10),
        ];

        for (name, grid, expected) in cases {
            assert_eq!(column_transitions(&grid), expected, "{name}");
        }
    }

    #[test]
    fn test_transitions_are_mirror_invariant() {
        let boards = [
            test_boards::empty(),
            test_boards::staircase(),
            test_boards::single_hole(),
            test_boards::narrow_gap(),
            test_boards::right_edge_chimney(),
            test_boards::alternating_bottom_row(),
        ];

        for grid in boards {
            let mirror = mirrored(&grid);
            assert_eq!(row_transitions(&grid), row_transitions(&mirror));
            assert_eq!(column_transitions(&grid), column_transitions(&mirror));
        }
    }

    #[test]
    fn test_well_sums_interior() {
        // Column 1 is flanked on both sides for two rows; the upper well
        // cell carries one empty cell beneath it.
        assert_eq!(well_sums(&test_boards::narrow_gap()), 3);
    }

    #[test]
    fn test_well_sums_edges() {
        let left = Grid::from_ascii(
            "
            .#........
            .#........
            ",
        );
        assert_eq!(well_sums(&left), 3);

        let right = mirrored(&left);
        assert_eq!(well_sums(&right), 3);
    }

    #[test]
    fn test_well_sums_deep_edge_well() {
        // Four well cells in the rightmost column with runs 0+1+2+3 below.
        assert_eq!(well_sums(&test_boards::right_edge_chimney()), 10);
    }

    #[test]
    fn test_well_sums_requires_both_neighbors_inside() {
        // An empty cell with only one occupied side neighbor is not a well.
        let grid = Grid::from_ascii("##.......#");
        assert_eq!(well_sums(&grid), 0);

        assert_eq!(well_sums(&test_boards::empty()), 0);
        assert_eq!(well_sums(&test_boards::staircase()), 0);
    }

    #[test]
    fn test_well_run_stops_at_filled_cell() {
        let grid = Grid::from_ascii(
            "
            #.#.......
            ..........
            #.#.......
            ",
        );
        // Wells at (1, 2) and (1, 0); the run below (1, 2) stops nowhere
        // until the floor, the run below (1, 0) is empty.
        assert_eq!(well_sums(&grid), 2 + 2);
    }
}
