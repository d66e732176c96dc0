pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A move or rotation that would leave the piece out of bounds or overlapping the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece cannot move to the requested position")]
pub struct MoveRejected;

/// A lock attempted while part of the piece was still above the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece locked above the top of the board at ({x}, {y})")]
pub struct LockError {
    pub x: i32,
    pub y: i32,
}
