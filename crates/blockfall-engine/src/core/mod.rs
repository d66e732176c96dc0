//! Board geometry and the piece catalog.
//!
//! Everything here is pure data plus the single placement rule in
//! [`valid_move`]; timing and scoring live in [`crate::engine`].

pub use self::{board::*, catalog::*, piece::*, shape::*, validator::valid_move};

pub(crate) mod board;
pub(crate) mod catalog;
pub(crate) mod piece;
pub(crate) mod shape;
pub(crate) mod validator;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board. Row 0 is the top.
pub const BOARD_HEIGHT: usize = 20;
