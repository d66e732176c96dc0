use serde::Serialize;

use crate::MoveRejected;

use super::{
    BOARD_WIDTH,
    board::Board,
    catalog::{ShapeColor, ShapeKind},
    shape::Shape,
    validator,
};

/// The active falling piece: a shape, its color, and the board coordinate of
/// the shape's top-left cell.
///
/// Movement and rotation follow a try-then-commit discipline: a candidate is
/// built, checked with [`validator::valid_move`], and only written back when it
/// fits. A rejected change leaves the piece untouched.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, Piece, ShapeKind};
///
/// let board = Board::EMPTY;
/// let mut piece = Piece::spawn(ShapeKind::I);
/// assert_eq!((piece.x(), piece.y()), (3, 0));
///
/// piece.try_shift(-1, 0, &board).unwrap();
/// assert_eq!(piece.x(), 2);
///
/// piece.try_rotate(&board).unwrap();
/// assert_eq!(piece.shape().height(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    kind: ShapeKind,
    shape: Shape,
    color: ShapeColor,
    x: i32,
    y: i32,
}

impl Piece {
    /// Creates a piece of `kind` at its spawn position: horizontally centered, top row.
    #[must_use]
    pub fn spawn(kind: ShapeKind) -> Self {
        let shape = kind.shape();
        let x = BOARD_WIDTH / 2 - shape.width() / 2;
        Self::new(kind, i32::try_from(x).unwrap_or_default(), 0)
    }

    /// Creates a piece of `kind` in its catalog orientation at `(x, y)`.
    #[must_use]
    pub fn new(kind: ShapeKind, x: i32, y: i32) -> Self {
        let entry = kind.entry();
        Self {
            kind,
            shape: entry.shape,
            color: entry.color,
            x,
            y,
        }
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn color(&self) -> ShapeColor {
        self.color
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Iterates over the board coordinates covered by the piece, row-major.
    pub fn occupied_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .occupied_cells()
            .map(move |(dx, dy)| (self.x + to_i32(dx), self.y + to_i32(dy)))
    }

    /// Returns the piece moved by `(dx, dy)` without validation.
    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Returns the piece rotated 90° clockwise at the same anchor, without validation.
    #[must_use]
    pub fn rotated_unchecked(&self) -> Self {
        Self {
            shape: self.shape.rotated_clockwise(),
            ..*self
        }
    }

    /// Returns the piece rotated 90° clockwise if the result fits on `board`.
    ///
    /// The anchor never moves; there are no kick offsets.
    #[must_use]
    pub fn rotated(&self, board: &Board) -> Option<Self> {
        let candidate = self.rotated_unchecked();
        validator::valid_move(&candidate.shape, self.x, self.y, board).then_some(candidate)
    }

    /// Moves the piece by `(dx, dy)` if the new position fits.
    pub fn try_shift(&mut self, dx: i32, dy: i32, board: &Board) -> Result<(), MoveRejected> {
        let candidate = self.shifted(dx, dy);
        if !board.is_lockable(&candidate, candidate.x, candidate.y) {
            return Err(MoveRejected);
        }
        *self = candidate;
        Ok(())
    }

    /// Rotates the piece in place if the rotated shape fits at the current anchor.
    pub fn try_rotate(&mut self, board: &Board) -> Result<(), MoveRejected> {
        *self = self.rotated(board).ok_or(MoveRejected)?;
        Ok(())
    }
}

fn to_i32(v: usize) -> i32 {
    // Shape offsets are bounded by MAX_SHAPE_SIZE
    i32::try_from(v).unwrap_or(i32::MAX)
}
