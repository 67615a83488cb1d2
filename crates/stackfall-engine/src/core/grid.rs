use serde::{Deserialize, Serialize};

use super::{BOARD_HEIGHT, BOARD_WIDTH};

/// State of a single board cell.
///
/// Settled cells come from the live board snapshot; the per-piece ids the
/// driver may track collapse into a single state because evaluation only
/// reads emptiness. Simulated cells are written by the placement simulator
/// and identify which cells belong to the piece being evaluated, which is
/// what line-clear attribution needs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Settled,
    Simulated,
}

impl Cell {
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    #[inline]
    #[must_use]
    pub const fn is_occupied(self) -> bool {
        !self.is_empty()
    }

    /// Returns the single character representation of this cell state.
    ///
    /// # Examples
    ///
    /// ```
    /// use stackfall_engine::Cell;
    ///
    /// assert_eq!(Cell::Empty.as_char(), '.');
    /// assert_eq!(Cell::Settled.as_char(), '#');
    /// assert_eq!(Cell::Simulated.as_char(), '*');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Settled => '#',
            Cell::Simulated => '*',
        }
    }

    /// Parses a cell state from a single character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Settled),
            '*' => Some(Cell::Simulated),
            _ => None,
        }
    }
}

/// The playable board: 20 rows of 10 cells.
///
/// # Coordinate System
///
/// - `x` increases rightward (columns `0..10`)
/// - `y` increases upward (rows `0..20`); **row 0 is the bottom row**
///
/// A `Grid` is a value: the placement simulator works on a private copy per
/// candidate, so no evaluation can observe another's mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Serialize for Grid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: 20 ten-character segments separated by '/', top row first
        // (e.g. "........../........../...").
        let mut text = String::with_capacity(BOARD_HEIGHT * (BOARD_WIDTH + 1));
        for y in (0..BOARD_HEIGHT).rev() {
            if y + 1 < BOARD_HEIGHT {
                text.push('/');
            }
            for cell in &self.rows[y] {
                text.push(cell.as_char());
            }
        }
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Grid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {} '/'-separated rows, got {}",
                BOARD_HEIGHT,
                parts.len()
            )));
        }

        let mut grid = Grid::EMPTY;
        for (i, part) in parts.iter().enumerate() {
            let y = BOARD_HEIGHT - 1 - i;
            if part.chars().count() != BOARD_WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "expected {} cells at row {}, got {}",
                    BOARD_WIDTH,
                    y,
                    part.chars().count()
                )));
            }
            for (x, c) in part.chars().enumerate() {
                grid.rows[y][x] = Cell::from_char(c).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cell at row {y}: {c:?}"))
                })?;
            }
        }

        Ok(grid)
    }
}

impl Grid {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
    };

    /// Returns the cell at column `x`, row `y` (row 0 at the bottom).
    #[inline]
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.rows[y][x]
    }

    /// Sets the cell at column `x`, row `y`.
    #[inline]
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        self.rows[y][x] = cell;
    }

    /// Returns a reference to row `y` (row 0 at the bottom).
    #[inline]
    #[must_use]
    pub fn row(&self, y: usize) -> &[Cell; BOARD_WIDTH] {
        &self.rows[y]
    }

    /// Checks if every cell of row `y` is occupied (settled or simulated).
    #[inline]
    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].iter().all(|cell| cell.is_occupied())
    }

    /// Creates a `Grid` from ASCII art for tests and fixtures.
    ///
    /// `'#'` is a settled cell, `'*'` a simulated cell, `'.'` an empty cell.
    /// Lines are given top to bottom and are anchored at the bottom of the
    /// board: a three-line art describes rows 2, 1, 0 and leaves the rows
    /// above empty. The art may span up to 20 rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let mut grid = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "art must have at most {} rows, got {}",
            BOARD_HEIGHT,
            lines.len()
        );

        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<Cell> = line.chars().filter_map(Cell::from_char).collect();
            assert_eq!(
                cells.len(),
                BOARD_WIDTH,
                "each row must have exactly {} cells, got {} at line {}",
                BOARD_WIDTH,
                cells.len(),
                i
            );

            let y = lines.len() - 1 - i;
            for (x, &cell) in cells.iter().enumerate() {
                grid.rows[y][x] = cell;
            }
        }
        grid
    }
}

/// Per-column stack heights.
///
/// `top(x)` is the row index one above the highest occupied cell of column
/// `x`, or 0 for an empty column. For a profile consistent with its grid,
/// `top(x) == 20 - (leading empty rows from the top)`.
///
/// Values are normally in `0..=20`, but a simulated drop that locks a piece
/// against the ceiling records the piece's true top, which may exceed 20;
/// detecting that as a loss is the driver's job.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeightProfile {
    tops: [u8; BOARD_WIDTH],
}

impl HeightProfile {
    pub const EMPTY: Self = Self {
        tops: [0; BOARD_WIDTH],
    };

    #[must_use]
    pub const fn new(tops: [u8; BOARD_WIDTH]) -> Self {
        Self { tops }
    }

    /// Recomputes the profile from a grid; simulated cells count as occupied.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        let mut tops = [0; BOARD_WIDTH];
        for (x, top) in tops.iter_mut().enumerate() {
            let highest = (0..BOARD_HEIGHT)
                .rev()
                .find(|&y| grid.cell(x, y).is_occupied());
            if let Some(y) = highest {
                *top = u8::try_from(y + 1).unwrap();
            }
        }
        Self { tops }
    }

    #[inline]
    #[must_use]
    pub fn top(&self, x: usize) -> u8 {
        self.tops[x]
    }

    #[inline]
    pub fn set_top(&mut self, x: usize, top: u8) {
        self.tops[x] = top;
    }
}
