use arrayvec::ArrayVec;
use serde::{Serialize, Serializer};

use crate::LockError;

use super::{BOARD_HEIGHT, BOARD_WIDTH, catalog::ShapeColor, piece::Piece, validator};

/// A single board cell: empty, or holding the color of a locked piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(ShapeColor),
}

impl Cell {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Filled(color) => serializer.serialize_some(color),
        }
    }
}

type Row = [Cell; BOARD_WIDTH];

const EMPTY_ROW: Row = [Cell::Empty; BOARD_WIDTH];

/// Row indices removed by one line-clear pass, top to bottom, as they were before compaction.
pub type ClearedRows = ArrayVec<usize, BOARD_HEIGHT>;

/// The grid of locked cells.
///
/// Always exactly [`BOARD_WIDTH`] × [`BOARD_HEIGHT`]; row 0 is the top.
/// Rows only leave the grid through [`Board::clear_lines`], which inserts one
/// empty row at the top for every row it removes.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, ShapeKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::new(ShapeKind::I, 0, 19);
/// assert!(board.is_lockable(&piece, piece.x(), piece.y()));
///
/// board.lock(&piece).unwrap();
/// assert!(!board.is_lockable(&piece, piece.x(), piece.y()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Board {
    rows: [Row; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const EMPTY: Self = Self {
        rows: [EMPTY_ROW; BOARD_HEIGHT],
    };

    /// Returns the cell at column `x`, row `y`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.rows.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Overwrites a single cell. Out-of-range coordinates are ignored.
    pub fn set_cell(&mut self, x: usize, y: usize, cell: Cell) {
        if let Some(slot) = self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            *slot = cell;
        }
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> + '_ {
        self.rows.iter()
    }

    #[must_use]
    pub fn is_row_complete(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| !cell.is_empty()))
    }

    /// Returns whether `piece`'s shape may occupy the anchor `(x, y)`.
    ///
    /// Same semantics as [`validator::valid_move`].
    #[must_use]
    pub fn is_lockable(&self, piece: &Piece, x: i32, y: i32) -> bool {
        validator::valid_move(piece.shape(), x, y, self)
    }

    /// Writes the piece's color into every cell it covers.
    ///
    /// Cells are written in row-major order. If an occupied cell maps above
    /// row 0 the lock stops there and reports [`LockError`]; cells written
    /// before that point stay written. Cells outside the board's columns are
    /// skipped.
    pub fn lock(&mut self, piece: &Piece) -> Result<(), LockError> {
        let cell = Cell::Filled(piece.color());
        for (x, y) in piece.occupied_positions() {
            let Ok(row) = usize::try_from(y) else {
                return Err(LockError { x, y });
            };
            if let Ok(col) = usize::try_from(x) {
                self.set_cell(col, row, cell);
            }
        }
        Ok(())
    }

    /// Removes every complete row and returns which rows were removed.
    ///
    /// Remaining rows keep their relative order and slide down; one empty row
    /// is inserted at the top per removed row.
    pub fn clear_lines(&mut self) -> ClearedRows {
        let cleared: ClearedRows = (0..BOARD_HEIGHT)
            .filter(|&y| self.is_row_complete(y))
            .collect();

        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_complete(y) {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(EMPTY_ROW);
        cleared
    }

    /// Builds a board from ASCII art: `#` is filled, `.` is empty.
    ///
    /// Rows are given top to bottom and are aligned to the bottom of the
    /// board when fewer than [`BOARD_HEIGHT`] rows are supplied. Filled cells
    /// use `color`.
    ///
    /// # Panics
    ///
    /// Panics if a row is not exactly [`BOARD_WIDTH`] cells wide or if more
    /// than [`BOARD_HEIGHT`] rows are given.
    #[must_use]
    pub fn from_ascii(art: &str, color: ShapeColor) -> Self {
        let mut board = Self::EMPTY;
        let lines: Vec<&str> = art.lines().filter(|line| !line.trim().is_empty()).collect();
        assert!(
            lines.len() <= BOARD_HEIGHT,
            "Board must have at most {BOARD_HEIGHT} rows, got {}",
            lines.len()
        );
        let offset = BOARD_HEIGHT - lines.len();

        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|c| *c == '#' || *c == '.').collect();
            assert_eq!(
                chars.len(),
                BOARD_WIDTH,
                "Each row must have exactly {BOARD_WIDTH} cells, got {} at row {i}",
                chars.len(),
            );
            for (x, &ch) in chars.iter().enumerate() {
                if ch == '#' {
                    board.rows[offset + i][x] = Cell::Filled(color);
                }
            }
        }
        board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeKind;

    const C: Cell = Cell::Filled(ShapeColor::Red);

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set_cell(x, y, C);
        }
    }

    fn filled_count(board: &Board, y: usize) -> usize {
        board.rows[y].iter().filter(|c| !c.is_empty()).count()
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        for row in board.rows() {
            assert_eq!(row.len(), BOARD_WIDTH);
            assert!(row.iter().all(|c| c.is_empty()));
        }
    }

    #[test]
    fn test_cell_out_of_range() {
        let board = Board::EMPTY;
        assert_eq!(board.cell(0, 0), Some(Cell::Empty));
        assert_eq!(board.cell(BOARD_WIDTH, 0), None);
        assert_eq!(board.cell(0, BOARD_HEIGHT), None);
    }

    #[test]
    fn test_lock_writes_piece_color() {
        let mut board = Board::EMPTY;
        let piece = Piece::new(ShapeKind::T, 4, 18);
        board.lock(&piece).unwrap();

        let filled = Cell::Filled(ShapeColor::Magenta);
        assert_eq!(board.cell(4, 18), Some(filled));
        assert_eq!(board.cell(5, 18), Some(filled));
        assert_eq!(board.cell(6, 18), Some(filled));
        assert_eq!(board.cell(5, 19), Some(filled));
        assert_eq!(board.cell(4, 19), Some(Cell::Empty));
        assert_eq!(board.cell(6, 19), Some(Cell::Empty));
    }

    #[test]
    fn test_lock_above_top_reports_error() {
        let mut board = Board::EMPTY;
        let piece = Piece::new(ShapeKind::O, 3, -1);
        let err = board.lock(&piece).unwrap_err();
        assert_eq!(err, LockError { x: 3, y: -1 });
        assert!(board.rows().all(|row| row.iter().all(|c| c.is_empty())));
    }

    #[test]
    fn test_lock_skips_cells_left_of_board() {
        let mut board = Board::EMPTY;
        let piece = Piece::new(ShapeKind::O, -1, 18);
        assert_eq!(board.lock(&piece), Ok(()));
        let yellow = Cell::Filled(ShapeColor::Yellow);
        assert_eq!(board.cell(0, 18), Some(yellow));
        assert_eq!(board.cell(0, 19), Some(yellow));
        assert_eq!(board.cell(1, 19), Some(Cell::Empty));
    }

    #[test]
    fn test_clear_lines_none() {
        let mut board = Board::from_ascii(
            "
            #########.
            ",
            ShapeColor::Red,
        );
        let before = board.clone();
        assert!(board.clear_lines().is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_lines_single_bottom_row() {
        let mut board = Board::from_ascii(
            "
            #.........
            ##########
            ",
            ShapeColor::Red,
        );
        let cleared = board.clear_lines();
        assert_eq!(cleared.as_slice(), &[19]);
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
        assert_eq!(filled_count(&board, 0), 0);
        assert_eq!(board.cell(0, 19), Some(C));
        assert_eq!(filled_count(&board, 19), 1);
    }

    #[test]
    fn test_clear_lines_preserves_order_of_remaining_rows() {
        let mut board = Board::from_ascii(
            "
            #.........
            ##########
            .#........
            ##########
            ..#.......
            ",
            ShapeColor::Red,
        );
        let cleared = board.clear_lines();
        assert_eq!(cleared.as_slice(), &[16, 18]);

        assert_eq!(board.cell(0, 17), Some(C));
        assert_eq!(board.cell(1, 18), Some(C));
        assert_eq!(board.cell(2, 19), Some(C));
        for y in 0..17 {
            assert_eq!(filled_count(&board, y), 0, "row {y} should be empty");
        }
    }

    #[test]
    fn test_clear_lines_top_row() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 0);
        board.set_cell(3, 5, C);

        let cleared = board.clear_lines();
        assert_eq!(cleared.as_slice(), &[0]);
        assert_eq!(filled_count(&board, 0), 0);
        assert_eq!(board.cell(3, 5), Some(C));
    }

    #[test]
    fn test_clear_lines_all_filled() {
        let mut board = Board::EMPTY;
        for y in 0..BOARD_HEIGHT {
            fill_row(&mut board, y);
        }
        let cleared = board.clear_lines();
        assert_eq!(cleared.len(), BOARD_HEIGHT);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_from_ascii_bottom_aligned() {
        let board = Board::from_ascii("#.........", ShapeColor::Blue);
        assert_eq!(board.cell(0, 19), Some(Cell::Filled(ShapeColor::Blue)));
        assert_eq!(board.cell(0, 18), Some(Cell::Empty));
    }

    #[test]
    #[should_panic(expected = "exactly 10 cells")]
    fn test_from_ascii_rejects_wrong_width() {
        let _ = Board::from_ascii("#####", ShapeColor::Blue);
    }

    #[test]
    fn test_cell_serialization() {
        assert_eq!(serde_json::to_string(&Cell::Empty).unwrap(), "null");
        assert_eq!(
            serde_json::to_string(&Cell::Filled(ShapeColor::Green)).unwrap(),
            "\"green\""
        );
    }
}
