use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::BOARD_WIDTH;

/// Enum representing the type of piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Number of rotations with distinct footprints.
    ///
    /// Every kind has four table entries, but rotating an I-piece twice
    /// reproduces the same column profile, so only the first
    /// `distinct_rotations` entries yield distinct placements.
    #[must_use]
    pub const fn distinct_rotations(self) -> usize {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::S | PieceKind::Z => 2,
            PieceKind::J | PieceKind::L | PieceKind::T => 4,
        }
    }

    /// Returns the single character representation of this piece kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.as_char(), 'I');
    /// assert_eq!(PieceKind::T.as_char(), 'T');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }

    /// Parses a piece kind from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(PieceKind::I),
            'O' => Some(PieceKind::O),
            'S' => Some(PieceKind::S),
            'Z' => Some(PieceKind::Z),
            'J' => Some(PieceKind::J),
            'L' => Some(PieceKind::L),
            'T' => Some(PieceKind::T),
            _ => None,
        }
    }
}

/// Rotation state of a piece: one of four indices into the geometry table.
///
/// - `0`: 0° (spawn orientation)
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Rotation(u8);

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation(0), Rotation(1), Rotation(2), Rotation(3)];

    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < 4);
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One placement option for the upcoming piece: a rotation and the board
/// column its leftmost occupied column lands in.
///
/// Candidate lists are supplied by the move generator; their order is the
/// evaluation order and decides ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct CandidateMove {
    rotation: Rotation,
    slot: u8,
}

impl CandidateMove {
    #[must_use]
    pub const fn new(rotation: Rotation, slot: u8) -> Self {
        assert!((slot as usize) < BOARD_WIDTH);
        Self { rotation, slot }
    }

    #[must_use]
    pub const fn rotation(self) -> Rotation {
        self.rotation
    }

    #[must_use]
    pub const fn slot(self) -> usize {
        self.slot as usize
    }
}

/// Immutable column-profile geometry of one piece kind at one rotation.
///
/// The piece is described by its bounding box: `width` occupied columns and
/// `height` occupied rows. For each occupied column `c` (counted from the
/// piece's left edge), `bottom_offsets()[c]..top_offsets()[c]` is the range
/// of filled local rows, measured upward from the piece's bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceGeometry {
    width: u8,
    height: u8,
    bottom: [u8; 4],
    top: [u8; 4],
}

impl PieceGeometry {
    #[must_use]
    pub const fn new(width: u8, height: u8, bottom: [u8; 4], top: [u8; 4]) -> Self {
        assert!(width >= 1 && width <= 4);
        assert!(height >= 1 && height <= 4);
        let mut c = 0;
        while c < width as usize {
            assert!(bottom[c] < top[c] && top[c] <= height);
            c += 1;
        }
        Self {
            width,
            height,
            bottom,
            top,
        }
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width as usize
    }

    #[must_use]
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Local row of the lowest filled cell per occupied column.
    #[must_use]
    pub fn bottom_offsets(&self) -> &[u8] {
        &self.bottom[..self.width()]
    }

    /// Local row one above the highest filled cell per occupied column.
    #[must_use]
    pub fn top_offsets(&self) -> &[u8] {
        &self.top[..self.width()]
    }
}

/// Upper bound on the number of candidate moves for one piece: four
/// rotations, each with at most one slot per column.
pub const MAX_MOVES: usize = 4 * BOARD_WIDTH;

/// Read-only piece geometry lookup, injected into the simulator and the
/// evaluator rather than accessed as global state.
///
/// [`GeometryTable::STANDARD`] covers the standard seven tetrominoes and is
/// derived at compile time from 4×4 piece masks; a driver with different
/// piece data can construct its own table with [`GeometryTable::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryTable {
    pieces: [[PieceGeometry; 4]; PieceKind::LEN],
}

impl Default for GeometryTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl GeometryTable {
    pub const STANDARD: Self = Self {
        pieces: STANDARD_GEOMETRY,
    };

    #[must_use]
    pub const fn new(pieces: [[PieceGeometry; 4]; PieceKind::LEN]) -> Self {
        Self { pieces }
    }

    /// Returns the geometry of `kind` at `rotation`.
    #[must_use]
    pub fn geometry(&self, kind: PieceKind, rotation: Rotation) -> &PieceGeometry {
        &self.pieces[kind as usize][rotation.index()]
    }

    /// Enumerates every placement of `kind` that fits on the board: each
    /// distinct rotation paired with each slot where the piece's width
    /// stays within the 10 columns.
    #[must_use]
    pub fn legal_moves(&self, kind: PieceKind) -> ArrayVec<CandidateMove, MAX_MOVES> {
        let mut moves = ArrayVec::new();
        for rotation in Rotation::ALL.into_iter().take(kind.distinct_rotations()) {
            let width = self.geometry(kind, rotation).width();
            for slot in 0..=BOARD_WIDTH - width {
                moves.push(CandidateMove::new(rotation, u8::try_from(slot).unwrap()));
            }
        }
        moves
    }
}

/// Bitmask representation of a piece within its 4×4 bounding box.
///
/// Each element is one row of 4 bits; row 0 is the top of the box.
type PieceMask = [u16; 4];

/// Generates all 4 rotation states of a piece mask by rotating 90° clockwise.
///
/// # Arguments
///
/// * `size` - Effective size of the piece (3 for most pieces, 4 for I, 2 for O)
/// * `mask` - Initial piece mask at 0° rotation
const fn mask_rotations(size: usize, mask: PieceMask) -> [PieceMask; 4] {
    let mut rotates = [mask; 4];
    let mut i = 1;
    while i < 4 {
        let mut new_mask = [0; 4];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                if (rotates[i - 1][size - 1 - x] & (1 << y)) != 0 {
                    new_mask[y] |= 1 << x;
                }
                x += 1;
            }
            y += 1;
        }
        rotates[i] = new_mask;
        i += 1;
    }
    rotates
}

/// Derives the column-profile geometry from a piece mask: the mask's
/// bounding box becomes the piece's local coordinates, with offsets
/// measured upward from the bottom row of the box.
#[expect(clippy::cast_possible_truncation)]
const fn geometry_from_mask(mask: PieceMask) -> PieceGeometry {
    let mut min_x = 4;
    let mut max_x = 0;
    let mut min_y = 4;
    let mut max_y = 0;
    let mut y = 0;
    while y < 4 {
        let mut x = 0;
        while x < 4 {
            if (mask[y] & (1 << x)) != 0 {
                if x < min_x {
                    min_x = x;
                }
                if x > max_x {
                    max_x = x;
                }
                if y < min_y {
                    min_y = y;
                }
                if y > max_y {
                    max_y = y;
                }
            }
            x += 1;
        }
        y += 1;
    }
    assert!(min_x <= max_x && min_y <= max_y);

    let width = max_x - min_x + 1;
    let height = max_y - min_y + 1;
    let mut bottom = [0u8; 4];
    let mut top = [0u8; 4];
    let mut c = 0;
    while c < width {
        let x = min_x + c;
        let mut lowest = usize::MAX;
        let mut highest = 0;
        let mut y = min_y;
        while y <= max_y {
            if (mask[y] & (1 << x)) != 0 {
                // Mask rows grow downward; local rows grow upward.
                let local = max_y - y;
                if local < lowest {
                    lowest = local;
                }
                if local > highest {
                    highest = local;
                }
            }
            y += 1;
        }
        // Every column of a tetromino's bounding box holds at least one cell.
        assert!(lowest != usize::MAX);
        bottom[c] = lowest as u8;
        top[c] = highest as u8 + 1;
        c += 1;
    }

    PieceGeometry::new(width as u8, height as u8, bottom, top)
}

const STANDARD_GEOMETRY: [[PieceGeometry; 4]; PieceKind::LEN] = {
    const fn m(bits: [bool; 4]) -> u16 {
        let mut mask = 0;
        let mut i = 0;
        while i < 4 {
            if bits[i] {
                mask |= 1 << i;
            }
            i += 1;
        }
        mask
    }

    const fn geometries(masks: [PieceMask; 4]) -> [PieceGeometry; 4] {
        [
            geometry_from_mask(masks[0]),
            geometry_from_mask(masks[1]),
            geometry_from_mask(masks[2]),
            geometry_from_mask(masks[3]),
        ]
    }

    const C: bool = true;
    const E: bool = false;
    const EEEE: u16 = m([E; 4]);

    [
        // I-piece
        geometries(mask_rotations(4, [EEEE, m([C, C, C, C]), EEEE, EEEE])),
        // O-piece
        geometries(mask_rotations(2, [m([C, C, E, E]), m([C, C, E, E]), EEEE, EEEE])),
        // S-piece
        geometries(mask_rotations(3, [m([E, C, C, E]), m([C, C, E, E]), EEEE, EEEE])),
        // Z-piece
        geometries(mask_rotations(3, [m([C, C, E, E]), m([E, C, C, E]), EEEE, EEEE])),
        // J-piece
        geometries(mask_rotations(3, [m([C, E, E, E]), m([C, C, C, E]), EEEE, EEEE])),
        // L-piece
        geometries(mask_rotations(3, [m([E, E, C, E]), m([C, C, C, E]), EEEE, EEEE])),
        // T-piece
        geometries(mask_rotations(3, [m([E, C, E, E]), m([C, C, C, E]), EEEE, EEEE])),
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    fn standard(kind: PieceKind, rotation: u8) -> PieceGeometry {
        *GeometryTable::STANDARD.geometry(kind, Rotation::new(rotation))
    }

    #[test]
    fn test_standard_geometry_i_piece() {
        let horizontal = standard(PieceKind::I, 0);
        assert_eq!(horizontal.width(), 4);
        assert_eq!(horizontal.height(), 1);
        assert_eq!(horizontal.bottom_offsets(), &[0, 0, 0, 0]);
        assert_eq!(horizontal.top_offsets(), &[1, 1, 1, 1]);

        let vertical = standard(PieceKind::I, 1);
        assert_eq!(vertical.width(), 1);
        assert_eq!(vertical.height(), 4);
        assert_eq!(vertical.bottom_offsets(), &[0]);
        assert_eq!(vertical.top_offsets(), &[4]);
    }

    #[test]
    fn test_standard_geometry_o_piece() {
        let square = standard(PieceKind::O, 0);
        assert_eq!(square.width(), 2);
        assert_eq!(square.height(), 2);
        assert_eq!(square.bottom_offsets(), &[0, 0]);
        assert_eq!(square.top_offsets(), &[2, 2]);
    }

    #[test]
    fn test_standard_geometry_s_and_z() {
        let s = standard(PieceKind::S, 0);
        assert_eq!(s.width(), 3);
        assert_eq!(s.height(), 2);
        assert_eq!(s.bottom_offsets(), &[0, 0, 1]);
        assert_eq!(s.top_offsets(), &[1, 2, 2]);

        let s_vertical = standard(PieceKind::S, 1);
        assert_eq!(s_vertical.width(), 2);
        assert_eq!(s_vertical.height(), 3);
        assert_eq!(s_vertical.bottom_offsets(), &[1, 0]);
        assert_eq!(s_vertical.top_offsets(), &[3, 2]);

        let z = standard(PieceKind::Z, 0);
        assert_eq!(z.bottom_offsets(), &[1, 0, 0]);
        assert_eq!(z.top_offsets(), &[2, 2, 1]);
    }

    #[test]
    fn test_standard_geometry_j_l_t() {
        let j = standard(PieceKind::J, 0);
        assert_eq!(j.bottom_offsets(), &[0, 0, 0]);
        assert_eq!(j.top_offsets(), &[2, 1, 1]);

        let l = standard(PieceKind::L, 0);
        assert_eq!(l.bottom_offsets(), &[0, 0, 0]);
        assert_eq!(l.top_offsets(), &[1, 1, 2]);

        let t = standard(PieceKind::T, 0);
        assert_eq!(t.bottom_offsets(), &[0, 0, 0]);
        assert_eq!(t.top_offsets(), &[1, 2, 1]);

        let t_right = standard(PieceKind::T, 1);
        assert_eq!(t_right.width(), 2);
        assert_eq!(t_right.height(), 3);
        assert_eq!(t_right.bottom_offsets(), &[0, 1]);
        assert_eq!(t_right.top_offsets(), &[3, 2]);
    }

    #[test]
    fn test_half_turn_reproduces_footprint() {
        // Rotating an I, S, Z, or O piece twice yields the same normalized
        // geometry, which is what distinct_rotations encodes.
        for kind in [PieceKind::I, PieceKind::O, PieceKind::S, PieceKind::Z] {
            let step = kind.distinct_rotations();
            for r in 0..4 - step {
                assert_eq!(
                    standard(kind, u8::try_from(r).unwrap()),
                    standard(kind, u8::try_from(r + step).unwrap()),
                    "{kind:?} rotation {r}"
                );
            }
        }
    }

    #[test]
    fn test_every_geometry_touches_its_bottom_row() {
        // The resting-row computation relies on each rotation having at
        // least one column with a zero bottom offset.
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                let piece = GeometryTable::STANDARD.geometry(kind, rotation);
                assert!(
                    piece.bottom_offsets().contains(&0),
                    "{kind:?} rotation {} floats above its bounding box",
                    rotation.index()
                );
                assert_eq!(
                    piece.top_offsets().iter().max(),
                    Some(&piece.height()),
                    "{kind:?} rotation {}",
                    rotation.index()
                );
            }
        }
    }

    #[test]
    fn test_legal_move_counts() {
        let table = GeometryTable::STANDARD;
        assert_eq!(table.legal_moves(PieceKind::I).len(), 17);
        assert_eq!(table.legal_moves(PieceKind::O).len(), 9);
        assert_eq!(table.legal_moves(PieceKind::S).len(), 17);
        assert_eq!(table.legal_moves(PieceKind::Z).len(), 17);
        assert_eq!(table.legal_moves(PieceKind::J).len(), 34);
        assert_eq!(table.legal_moves(PieceKind::L).len(), 34);
        assert_eq!(table.legal_moves(PieceKind::T).len(), 34);
    }

    #[test]
    fn test_legal_moves_stay_in_bounds() {
        let table = GeometryTable::STANDARD;
        for kind in PieceKind::ALL {
            for candidate in table.legal_moves(kind) {
                let width = table.geometry(kind, candidate.rotation()).width();
                assert!(
                    candidate.slot() + width <= BOARD_WIDTH,
                    "{kind:?} {candidate:?}"
                );
            }
        }
    }

    #[test]
    fn test_piece_kind_char_conversion() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_char(kind.as_char()), Some(kind));
        }
        assert_eq!(PieceKind::from_char('X'), None);
        assert_eq!(PieceKind::from_char('i'), None);
    }

    #[test]
    fn test_candidate_move_serialization() {
        let candidate = CandidateMove::new(Rotation::new(2), 7);
        let serialized = serde_json::to_string(&candidate).unwrap();
        let deserialized: CandidateMove = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, candidate);
    }
}
