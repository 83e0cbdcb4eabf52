//! Four-in-a-row board state.
//!
//! Pure data structure and algorithm: no I/O, no concurrency. The board
//! is a fixed rectangular grid (default 7 columns × 6 rows) mutated only
//! by [`Board::place`] and [`Board::reset`].
//!
//! Row 0 is the top of the grid; gravity fills columns from the bottom row
//! upward, so a piece occupies a cell only if every cell below it in the
//! same column is occupied.

use serde::{Deserialize, Serialize};

/// Default grid width.
pub const DEFAULT_COLS: usize = 7;
/// Default grid height.
pub const DEFAULT_ROWS: usize = 6;

/// Run length required to win.
const RUN: usize = 4;

/// The four scan axes: (row step, column step) from a run's origin.
/// Down, right, down-right, and up-right cover every line of four exactly
/// once when every cell is tried as an origin.
const AXES: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (-1, 1)];

/// One of the two piece colors. `A` is the first-mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Piece {
    A,
    B,
}

impl Piece {
    /// The other color.
    pub fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }
}

/// Result of scanning a board for a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No run of four and empty cells remain.
    None,
    /// A contiguous run of four of the given color exists.
    Win(Piece),
    /// No run of four and the board is full.
    Draw,
}

/// A rectangular four-in-a-row grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// Row-major cells, row 0 at the top.
    cells: Vec<Option<Piece>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_COLS, DEFAULT_ROWS)
    }
}

impl Board {
    /// Creates an empty grid with the given dimensions.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// The cell at (row, col), or `None` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> Option<Piece> {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    /// Whether the column has at least one empty cell.
    pub fn column_open(&self, col: usize) -> bool {
        col < self.cols && self.cell(0, col).is_none()
    }

    /// Number of pieces currently on the board.
    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Drops `piece` into the lowest empty row of `col`.
    ///
    /// Returns `false`, with no mutation, when the column is full or out
    /// of range.
    pub fn place(&mut self, piece: Piece, col: usize) -> bool {
        if !self.column_open(col) {
            return false;
        }
        // Scan from the bottom row up for the first empty cell.
        for row in (0..self.rows).rev() {
            let idx = row * self.cols + col;
            if self.cells[idx].is_none() {
                self.cells[idx] = Some(piece);
                return true;
            }
        }
        false
    }

    /// True iff no empty cells remain.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    /// Scans for a contiguous run of four along any of the four axes.
    ///
    /// Every cell is tried as a run origin against every axis, with the
    /// run's end cell bounds-checked up front so no axis can read outside
    /// the grid. Draw is only reported on a full board with no run.
    pub fn evaluate(&self) -> Outcome {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let Some(piece) = self.cell(row, col) else {
                    continue;
                };
                for (dr, dc) in AXES {
                    if self.run_from(row, col, dr, dc, piece) {
                        return Outcome::Win(piece);
                    }
                }
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::None
        }
    }

    /// Clears all cells, preserving dimensions.
    pub fn reset(&mut self) {
        self.cells.fill(None);
    }

    /// Whether a run of [`RUN`] `piece`s starts at (row, col) along the axis.
    fn run_from(
        &self,
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        piece: Piece,
    ) -> bool {
        // Reject runs whose far end would leave the grid before reading
        // any cell.
        let end_row = row as isize + dr * (RUN as isize - 1);
        let end_col = col as isize + dc * (RUN as isize - 1);
        if end_row < 0
            || end_row >= self.rows as isize
            || end_col < 0
            || end_col >= self.cols as isize
        {
            return false;
        }
        (0..RUN as isize).all(|step| {
            let r = (row as isize + dr * step) as usize;
            let c = (col as isize + dc * step) as usize;
            self.cell(r, c) == Some(piece)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a board with a run of `len` pieces anchored at (row, col)
    /// along (dr, dc), ignoring gravity. Used only for evaluate() scans.
    fn board_with_run(
        row: usize,
        col: usize,
        dr: isize,
        dc: isize,
        len: usize,
        piece: Piece,
    ) -> Board {
        let mut board = Board::default();
        for step in 0..len as isize {
            let r = (row as isize + dr * step) as usize;
            let c = (col as isize + dc * step) as usize;
            board.cells[r * board.cols + c] = Some(piece);
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.cols(), 7);
        assert_eq!(board.rows(), 6);
        assert_eq!(board.move_count(), 0);
        assert!(!board.is_full());
        assert_eq!(board.evaluate(), Outcome::None);
    }

    #[test]
    fn test_place_obeys_gravity() {
        let mut board = Board::default();
        assert!(board.place(Piece::A, 3));
        // First piece lands in the bottom row.
        assert_eq!(board.cell(5, 3), Some(Piece::A));
        assert!(board.place(Piece::B, 3));
        assert_eq!(board.cell(4, 3), Some(Piece::B));
    }

    #[test]
    fn test_place_out_of_range_is_rejected() {
        let mut board = Board::default();
        assert!(!board.place(Piece::A, 7));
        assert_eq!(board.move_count(), 0);
    }

    // Six placements fill a column; the seventh is rejected and the board
    // is byte-identical to the state after the sixth.
    #[test]
    fn test_full_column_rejects_without_mutation() {
        let mut board = Board::default();
        for _ in 0..6 {
            assert!(board.place(Piece::A, 3));
        }
        assert!(!board.column_open(3));
        let snapshot = board.clone();
        assert!(!board.place(Piece::A, 3));
        assert!(!board.place(Piece::B, 3));
        assert_eq!(board, snapshot);
    }

    // Vertical four in rows 2-5 of column 0.
    #[test]
    fn test_vertical_win_in_column_zero() {
        let mut board = Board::default();
        for _ in 0..4 {
            assert!(board.place(Piece::A, 0));
        }
        assert_eq!(board.cell(2, 0), Some(Piece::A));
        assert_eq!(board.cell(5, 0), Some(Piece::A));
        assert_eq!(board.evaluate(), Outcome::Win(Piece::A));
    }

    // -------------------------------------------------------------------
    // Boundary matrix: a planted run at every boundary-adjacent position
    // on every axis must be detected, and a run of 3 must not be.
    // -------------------------------------------------------------------

    #[test]
    fn test_horizontal_runs_at_grid_edges() {
        // Top row, bottom row, flush left and flush right.
        for (row, col) in [(0, 0), (0, 3), (5, 0), (5, 3)] {
            let board = board_with_run(row, col, 0, 1, 4, Piece::B);
            assert_eq!(
                board.evaluate(),
                Outcome::Win(Piece::B),
                "horizontal at ({row},{col})"
            );
        }
    }

    #[test]
    fn test_vertical_runs_at_grid_edges() {
        // Flush top and flush bottom, leftmost and rightmost columns.
        for (row, col) in [(0, 0), (2, 0), (0, 6), (2, 6)] {
            let board = board_with_run(row, col, 1, 0, 4, Piece::A);
            assert_eq!(
                board.evaluate(),
                Outcome::Win(Piece::A),
                "vertical at ({row},{col})"
            );
        }
    }

    #[test]
    fn test_diagonal_down_right_corner_anchored() {
        // Anchored at all four extremes of the \ axis.
        for (row, col) in [(0, 0), (0, 3), (2, 0), (2, 3)] {
            let board = board_with_run(row, col, 1, 1, 4, Piece::A);
            assert_eq!(
                board.evaluate(),
                Outcome::Win(Piece::A),
                "down-right at ({row},{col})"
            );
        }
    }

    #[test]
    fn test_diagonal_up_right_corner_anchored() {
        // The / axis: origins sit on the lower-left of the run.
        for (row, col) in [(3, 0), (3, 3), (5, 0), (5, 3)] {
            let board = board_with_run(row, col, -1, 1, 4, Piece::B);
            assert_eq!(
                board.evaluate(),
                Outcome::Win(Piece::B),
                "up-right at ({row},{col})"
            );
        }
    }

    #[test]
    fn test_run_of_three_is_not_a_win() {
        for (dr, dc, row, col) in [
            (0isize, 1isize, 0usize, 4usize), // horizontal, ends at right edge
            (1, 0, 3, 0),                     // vertical, ends at bottom
            (1, 1, 0, 0),                     // down-right from corner
            (-1, 1, 5, 4),                    // up-right, ends at right edge
        ] {
            let board = board_with_run(row, col, dr, dc, 3, Piece::A);
            assert_eq!(
                board.evaluate(),
                Outcome::None,
                "axis ({dr},{dc}) at ({row},{col})"
            );
        }
    }

    // A wrap hazard: three pieces ending a row plus one starting the next
    // row are contiguous in row-major memory but not on the board.
    #[test]
    fn test_no_false_positive_across_row_wrap() {
        let mut board = Board::default();
        for col in 4..7 {
            board.cells[5 * board.cols + col] = Some(Piece::A);
        }
        board.cells[4 * board.cols] = Some(Piece::A);
        assert_eq!(board.evaluate(), Outcome::None);
    }

    #[test]
    fn test_draw_requires_full_board() {
        // Checkerboard-ish fill with no four-run: alternate pairs per column.
        let mut board = Board::default();
        for col in 0..7 {
            for row in 0..6 {
                let piece = if (row / 2 + col) % 2 == 0 {
                    Piece::A
                } else {
                    Piece::B
                };
                board.cells[row * board.cols + col] = Some(piece);
            }
        }
        assert!(board.is_full());
        assert_eq!(board.evaluate(), Outcome::Draw);
    }

    #[test]
    fn test_reset_clears_cells_and_keeps_dimensions() {
        let mut board = Board::new(9, 7);
        assert!(board.place(Piece::A, 2));
        assert!(board.place(Piece::B, 2));
        assert_eq!(board.move_count(), 2);
        board.reset();
        assert_eq!(board.cols(), 9);
        assert_eq!(board.rows(), 7);
        assert_eq!(board.move_count(), 0);
        assert_eq!(board.evaluate(), Outcome::None);
    }

    #[test]
    fn test_piece_opponent() {
        assert_eq!(Piece::A.opponent(), Piece::B);
        assert_eq!(Piece::B.opponent(), Piece::A);
    }

    #[test]
    fn test_gravity_built_diagonal_win() {
        // A realistic / diagonal for A, built through place() only:
        // A at (5,0), (4,1), (3,2), (2,3) with B supports underneath.
        let mut board = Board::default();
        let drops = [
            (Piece::A, 0),
            (Piece::B, 1),
            (Piece::A, 1),
            (Piece::B, 2),
            (Piece::B, 2),
            (Piece::A, 2),
            (Piece::B, 3),
            (Piece::A, 3),
            (Piece::B, 3),
        ];
        for (piece, col) in drops {
            assert!(board.place(piece, col));
            assert_eq!(board.evaluate(), Outcome::None);
        }
        assert!(board.place(Piece::A, 3));
        assert_eq!(board.evaluate(), Outcome::Win(Piece::A));
    }
}
