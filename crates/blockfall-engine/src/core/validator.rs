//! Boundary and overlap check shared by every attempted state change.

use super::{BOARD_HEIGHT, BOARD_WIDTH, board::Board, shape::Shape};

/// Returns whether `shape` fits with its local origin at board coordinate `(x, y)`.
///
/// Every occupied cell must land in a column inside `[0, BOARD_WIDTH)` and a
/// row below `BOARD_HEIGHT`. Cells above the board (negative rows) skip the
/// occupancy check; all others must land on empty board cells.
///
/// Callers commit a position change only when this returns `true`.
#[must_use]
pub fn valid_move(shape: &Shape, x: i32, y: i32, board: &Board) -> bool {
    shape.occupied_cells().all(|(dx, dy)| {
        let (Some(col), Some(row)) = (offset(x, dx), offset(y, dy)) else {
            return false;
        };
        let Ok(col) = usize::try_from(col) else {
            return false;
        };
        if col >= BOARD_WIDTH {
            return false;
        }
        match usize::try_from(row) {
            Err(_) => true,
            Ok(row) if row >= BOARD_HEIGHT => false,
            Ok(row) => board.cell(col, row).is_some_and(|cell| cell.is_empty()),
        }
    })
}

fn offset(origin: i32, delta: usize) -> Option<i32> {
    origin.checked_add(i32::try_from(delta).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ShapeColor, ShapeKind};

    #[test]
    fn test_rejects_horizontal_out_of_bounds() {
        let board = Board::EMPTY;
        let shape = ShapeKind::I.shape();
        assert!(valid_move(&shape, 0, 0, &board));
        assert!(valid_move(&shape, 6, 0, &board));
        assert!(!valid_move(&shape, -1, 0, &board));
        assert!(!valid_move(&shape, 7, 0, &board));
    }

    #[test]
    fn test_rejects_below_bottom() {
        let board = Board::EMPTY;
        let shape = ShapeKind::O.shape();
        assert!(valid_move(&shape, 0, 18, &board));
        assert!(!valid_move(&shape, 0, 19, &board));
    }

    #[test]
    fn test_rows_above_board_skip_occupancy() {
        let board = Board::from_ascii(
            &"##########\n".repeat(BOARD_HEIGHT),
            ShapeColor::Red,
        );
        let shape = ShapeKind::O.shape();
        assert!(valid_move(&shape, 4, -2, &board));
        assert!(!valid_move(&shape, 4, -1, &board));
    }

    #[test]
    fn test_rows_above_board_still_check_columns() {
        let board = Board::EMPTY;
        let shape = ShapeKind::O.shape();
        assert!(!valid_move(&shape, -1, -5, &board));
        assert!(!valid_move(&shape, 9, -5, &board));
    }

    #[test]
    fn test_rejects_overlap() {
        let board = Board::from_ascii(
            "
            ....#.....
            ",
            ShapeColor::Red,
        );
        let shape = ShapeKind::T.shape();
        // T's stem lands on (4, 19)
        assert!(!valid_move(&shape, 3, 18, &board));
        // Vacant cells of the bounding box may overlap the stack
        assert!(valid_move(&shape, 4, 18, &board));
        assert!(valid_move(&shape, 2, 18, &board));
    }

    #[test]
    fn test_rejects_every_out_of_bounds_anchor() {
        let board = Board::EMPTY;
        for kind in ShapeKind::ALL {
            let shape = kind.shape();
            let w = i32::try_from(shape.width()).unwrap();
            let h = i32::try_from(shape.height()).unwrap();
            for y in -4..24 {
                for x in -5..15 {
                    // Catalog shapes touch every edge of their bounding box
                    let inside = x >= 0 && x + w <= 10 && y + h <= 20;
                    assert_eq!(
                        valid_move(&shape, x, y, &board),
                        inside,
                        "{kind:?} at ({x}, {y})"
                    );
                }
            }
        }
    }
}
