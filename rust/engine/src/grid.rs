//! Board geometry and the fixed-size cell buffer.
//!
//! Cells are addressed by a linear row-major index in `0..TOTAL_CELLS`.
//! Movement adjacency is orthogonal only; the four [`Axis`] values are used
//! by line detection, which also looks along both diagonals.
//!
//! A [`Board`] serializes to an 81-character string, one symbol per cell
//! (`-` for empty, a color letter otherwise). This string is the form the
//! persistence collaborator stores and reloads.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::cells::{Cell, Color};
use crate::errors::CodecError;

/// Side length of the square grid.
pub const BOARD_SIZE: usize = 9;
/// Number of cells on the board.
pub const TOTAL_CELLS: usize = BOARD_SIZE * BOARD_SIZE;
/// Minimum run length that gets cleared.
pub const MIN_LINE: usize = 5;
/// Balls placed when a session is created.
pub const INITIAL_BALLS: usize = 5;
/// Balls spawned after every non-clearing move.
pub const SPAWN_COUNT: usize = 3;
/// Window size for the potential-line lookahead.
pub const POTENTIAL_WINDOW: usize = 4;

pub fn to_coord(index: usize) -> (usize, usize) {
    (index / BOARD_SIZE, index % BOARD_SIZE)
}

pub fn to_index(row: usize, col: usize) -> usize {
    row * BOARD_SIZE + col
}

pub fn in_bounds(row: isize, col: isize) -> bool {
    row >= 0 && row < BOARD_SIZE as isize && col >= 0 && col < BOARD_SIZE as isize
}

pub fn is_valid_index(index: usize) -> bool {
    index < TOTAL_CELLS
}

/// Orthogonal neighbors in up, down, left, right order, clipped at the edges.
pub fn neighbors(index: usize) -> impl Iterator<Item = usize> {
    let (row, col) = to_coord(index);
    let up = (row > 0).then(|| index - BOARD_SIZE);
    let down = (row + 1 < BOARD_SIZE).then(|| index + BOARD_SIZE);
    let left = (col > 0).then(|| index - 1);
    let right = (col + 1 < BOARD_SIZE).then(|| index + 1);
    [up, down, left, right].into_iter().flatten()
}

/// A scan direction for line detection.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Top-right to bottom-left.
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// Forward step as `(delta_row, delta_col)`.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// Index reached by taking `steps` forward steps along `axis` (negative
/// steps walk backwards), or `None` once the walk leaves the board.
pub fn step(index: usize, axis: Axis, steps: isize) -> Option<usize> {
    let (row, col) = to_coord(index);
    let (dr, dc) = axis.delta();
    let r = row as isize + dr * steps;
    let c = col as isize + dc * steps;
    in_bounds(r, c).then(|| to_index(r as usize, c as usize))
}

/// Fixed-size N×N cell buffer.
///
/// The length invariant is carried by the array type, so a board can never
/// hold anything other than exactly [`TOTAL_CELLS`] cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; TOTAL_CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; TOTAL_CELLS],
        }
    }

    /// Get the cell at `index`. Panics if `index` is off the board;
    /// callers validate indices at the boundary.
    pub fn get(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn set(&mut self, index: usize, cell: Cell) {
        self.cells[index] = cell;
    }

    pub fn place(&mut self, index: usize, color: Color) {
        self.cells[index] = Cell::Ball(color);
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        self.cells[index].is_empty()
    }

    pub fn color_at(&self, index: usize) -> Option<Color> {
        self.cells[index].color()
    }

    /// Indices of every empty cell in ascending (row-major) order.
    pub fn empty_cells(&self) -> Vec<usize> {
        self.iter()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    pub fn ball_count(&self) -> usize {
        TOTAL_CELLS - self.empty_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Relocate the ball at `from` to `to`, leaving `from` empty.
    pub fn move_ball(&mut self, from: usize, to: usize) {
        self.cells[to] = self.cells[from];
        self.cells[from] = Cell::Empty;
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Cell)> + '_ {
        self.cells.iter().copied().enumerate()
    }

    pub fn cells(&self) -> &[Cell; TOTAL_CELLS] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_SIZE)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Board").field(&self.to_string()).finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.cells {
            write!(f, "{}", cell.symbol())?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let actual = s.chars().count();
        if actual != TOTAL_CELLS {
            return Err(CodecError::Length {
                expected: TOTAL_CELLS,
                actual,
            });
        }
        let mut board = Board::empty();
        for (index, symbol) in s.chars().enumerate() {
            let cell =
                Cell::from_symbol(symbol).ok_or(CodecError::InvalidSymbol { index, symbol })?;
            board.set(index, cell);
        }
        Ok(board)
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_and_coord_are_inverse() {
        for index in 0..TOTAL_CELLS {
            let (row, col) = to_coord(index);
            assert_eq!(to_index(row, col), index);
        }
        assert_eq!(to_coord(10), (1, 1));
        assert_eq!(to_coord(80), (8, 8));
    }

    #[test]
    fn corner_has_two_neighbors() {
        let n: Vec<usize> = neighbors(0).collect();
        assert_eq!(n, vec![9, 1]);
        let n: Vec<usize> = neighbors(80).collect();
        assert_eq!(n, vec![71, 79]);
    }

    #[test]
    fn interior_cell_has_four_neighbors_in_order() {
        let n: Vec<usize> = neighbors(to_index(4, 4)).collect();
        assert_eq!(n, vec![31, 49, 39, 41]);
    }

    #[test]
    fn edge_neighbors_do_not_wrap_rows() {
        let right_edge = to_index(3, 8);
        assert!(!neighbors(right_edge).any(|n| n == right_edge + 1));
        let left_edge = to_index(3, 0);
        assert!(!neighbors(left_edge).any(|n| n + 1 == left_edge));
    }

    #[test]
    fn step_stops_at_edges() {
        assert_eq!(step(0, Axis::Horizontal, 8), Some(8));
        assert_eq!(step(0, Axis::Horizontal, 9), None);
        assert_eq!(step(0, Axis::AntiDiagonal, 1), None);
        assert_eq!(step(8, Axis::AntiDiagonal, 1), Some(16));
        assert_eq!(step(40, Axis::Diagonal, -1), Some(30));
    }

    #[test]
    fn move_ball_vacates_source() {
        let mut board = Board::empty();
        board.place(3, Color::Blue);
        board.move_ball(3, 12);
        assert!(board.is_empty_at(3));
        assert_eq!(board.color_at(12), Some(Color::Blue));
        assert_eq!(board.ball_count(), 1);
    }

    #[test]
    fn empty_board_string_is_all_dashes() {
        let s = Board::empty().to_string();
        assert_eq!(s.len(), TOTAL_CELLS);
        assert!(s.chars().all(|c| c == '-'));
    }
}
