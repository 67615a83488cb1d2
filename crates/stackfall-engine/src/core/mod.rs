pub use self::{grid::*, piece::*};

pub(crate) mod grid;
pub(crate) mod piece;

/// Number of columns in the playable board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows in the playable board.
pub const BOARD_HEIGHT: usize = 20;
