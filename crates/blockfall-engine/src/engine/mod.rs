//! Session logic: piece generation, timing, scoring, and the game-over rule.
//!
//! - [`Session`] - One game: board, active piece, fall timer, statistics
//! - [`GameStats`] - Score, level, fall interval, and counters
//! - [`PieceFactory`] - Uniform random piece source
//! - [`PieceSeed`] - Seed for deterministic piece generation
//! - [`Snapshot`] - Serializable view of a session for renderers
//!
//! # Frame Flow
//!
//! An external driver calls [`Session::step`] once per frame:
//!
//! 1. Each buffered [`Command`] is validated and applied immediately
//! 2. The elapsed time advances the fall timer
//! 3. If the timer reached the fall interval, one gravity drop is attempted
//! 4. A drop that cannot move locks the piece, clears rows, scores, and spawns
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{Command, Session};
//!
//! let mut session = Session::new();
//! while !session.state().is_game_over() && session.stats().completed_pieces() < 3 {
//!     session.step([Command::SoftDrop], Duration::from_millis(16));
//! }
//!
//! let snapshot = session.snapshot();
//! println!("score: {}, level: {}", snapshot.score, snapshot.level);
//! ```

pub use self::{game_stats::*, piece_factory::*, session::*, snapshot::*};

mod game_stats;
mod piece_factory;
mod session;
mod snapshot;
