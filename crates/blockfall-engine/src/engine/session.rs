use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    LockError, MoveRejected,
    core::{Board, ClearedRows, Piece},
};

use super::{GameStats, PieceFactory, PieceSeed, Snapshot};

/// A discrete player action, applied immediately if the result is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    Rotate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    Running,
    /// Terminal: no further commands, drops, or spawns are processed.
    GameOver,
}

/// When a session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameOverRule {
    /// The game ends only when a lock writes a cell above the top row.
    ///
    /// A spawn that overlaps the stack is accepted as is.
    #[default]
    LockAboveTop,
    /// Like [`Self::LockAboveTop`], but the game also ends as soon as a
    /// freshly spawned piece overlaps the stack.
    BlockedSpawn,
}

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Seed for the piece sequence; random when `None`.
    pub seed: Option<PieceSeed>,
    pub game_over_rule: GameOverRule,
}

/// What happened when a piece locked into the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    /// The piece as it was locked.
    pub piece: Piece,
    pub cleared_rows: ClearedRows,
    pub score_gained: usize,
    /// Level in effect after the lock.
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum DropOutcome {
    /// The piece fell one row.
    Moved,
    /// The piece could not fall and was locked; a new piece has spawned.
    Locked(LockEvent),
    /// The piece could not fall and locking it ended the game.
    GameOver(LockError),
    /// The session was already over.
    Ignored,
}

/// Result of one frame driven through [`Session::step`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Number of commands rejected by the movement check.
    pub rejected_commands: usize,
    /// Set when the gravity drop of this frame locked a piece.
    pub lock: Option<LockEvent>,
    pub game_over: bool,
}

/// A single game: board, active piece, piece source, and statistics.
///
/// The session is driven by two inputs: discrete [`Command`]s and elapsed
/// time. Elapsed time accumulates in a fall timer; once the timer reaches
/// the current fall interval it resets to zero and one gravity drop is
/// attempted. A gravity drop that cannot move the piece locks it, clears
/// complete rows, updates the statistics, and spawns the next piece.
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::{Command, Session, SessionConfig};
///
/// let mut session = Session::with_config(SessionConfig {
///     seed: Some("000102030405060708090a0b0c0d0e0f".parse().unwrap()),
///     ..SessionConfig::default()
/// });
///
/// let y = session.piece().y();
/// let report = session.step([Command::Rotate, Command::MoveLeft], Duration::from_millis(500));
/// assert!(!report.game_over);
/// assert_eq!(session.piece().y(), y + 1);
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    piece: Piece,
    factory: PieceFactory,
    stats: GameStats,
    state: SessionState,
    game_over_rule: GameOverRule,
    fall_timer: Duration,
    elapsed: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with a random piece sequence and the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    #[must_use]
    pub fn with_config(config: SessionConfig) -> Self {
        let mut factory = config
            .seed
            .map_or_else(PieceFactory::new, PieceFactory::with_seed);
        let piece = factory.next_piece();
        Self::from_parts(Board::EMPTY, piece, factory, config.game_over_rule)
    }

    /// Creates a session that starts from an existing board and active piece.
    ///
    /// Neither is validated: the piece may overlap the board.
    #[must_use]
    pub fn from_board(board: Board, piece: Piece, config: SessionConfig) -> Self {
        let factory = config
            .seed
            .map_or_else(PieceFactory::new, PieceFactory::with_seed);
        Self::from_parts(board, piece, factory, config.game_over_rule)
    }

    fn from_parts(
        board: Board,
        piece: Piece,
        factory: PieceFactory,
        game_over_rule: GameOverRule,
    ) -> Self {
        Self {
            board,
            piece,
            factory,
            stats: GameStats::new(),
            state: SessionState::Running,
            game_over_rule,
            fall_timer: Duration::ZERO,
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Total time delivered through [`Self::tick`] while the game was running.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Applies one command if the resulting position is valid.
    ///
    /// Every command is rejected once the game is over. A soft drop that
    /// cannot move is rejected like any other move; it never locks the piece.
    pub fn apply(&mut self, command: Command) -> Result<(), MoveRejected> {
        if self.state.is_game_over() {
            return Err(MoveRejected);
        }
        match command {
            Command::MoveLeft => self.piece.try_shift(-1, 0, &self.board),
            Command::MoveRight => self.piece.try_shift(1, 0, &self.board),
            Command::SoftDrop => self.piece.try_shift(0, 1, &self.board),
            Command::Rotate => self.piece.try_rotate(&self.board),
        }
    }

    /// Advances the fall timer by `elapsed`.
    ///
    /// Returns the outcome of the gravity drop if the timer reached the fall
    /// interval, or `None` if no drop was due. The timer restarts from zero
    /// after a drop; any excess time is discarded.
    pub fn tick(&mut self, elapsed: Duration) -> Option<DropOutcome> {
        if self.state.is_game_over() {
            return None;
        }
        self.elapsed = self.elapsed.saturating_add(elapsed);
        self.fall_timer = self.fall_timer.saturating_add(elapsed);
        if self.fall_timer < self.stats.fall_interval() {
            return None;
        }
        self.fall_timer = Duration::ZERO;
        Some(self.gravity_drop())
    }

    /// Runs one frame: every command in order, then the elapsed time.
    pub fn step<I>(&mut self, commands: I, elapsed: Duration) -> FrameReport
    where
        I: IntoIterator<Item = Command>,
    {
        let mut report = FrameReport::default();
        for command in commands {
            if self.apply(command).is_err() {
                report.rejected_commands += 1;
            }
        }
        if let Some(DropOutcome::Locked(event)) = self.tick(elapsed) {
            report.lock = Some(event);
        }
        report.game_over = self.state.is_game_over();
        report
    }

    /// Moves the piece down one row, or locks it if it cannot move.
    pub fn gravity_drop(&mut self) -> DropOutcome {
        if self.state.is_game_over() {
            return DropOutcome::Ignored;
        }
        if self.piece.try_shift(0, 1, &self.board).is_ok() {
            return DropOutcome::Moved;
        }
        self.lock_piece()
    }

    fn lock_piece(&mut self) -> DropOutcome {
        let piece = self.piece;
        if let Err(e) = self.board.lock(&piece) {
            self.state = SessionState::GameOver;
            return DropOutcome::GameOver(e);
        }

        let score_before = self.stats.score();
        let cleared_rows = self.board.clear_lines();
        self.stats.complete_piece_drop(cleared_rows.len());

        self.piece = self.factory.next_piece();
        if self.game_over_rule == GameOverRule::BlockedSpawn
            && !self
                .board
                .is_lockable(&self.piece, self.piece.x(), self.piece.y())
        {
            self.state = SessionState::GameOver;
        }

        DropOutcome::Locked(LockEvent {
            piece,
            cleared_rows,
            score_gained: self.stats.score() - score_before,
            level: self.stats.level(),
        })
    }

    /// Captures everything a renderer needs for one frame.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            piece: self.piece,
            score: self.stats.score(),
            level: self.stats.level(),
            lines: self.stats.total_cleared_lines(),
            fall_interval_ms: u64::try_from(self.stats.fall_interval().as_millis())
                .unwrap_or(u64::MAX),
            game_over: self.state.is_game_over(),
        }
    }
}
