use std::time::Duration;

/// Points per cleared row, multiplied by the level in effect before the clear.
const POINTS_PER_LINE: usize = 100;
/// Score needed to advance one level.
const SCORE_PER_LEVEL: usize = 1000;

const BASE_FALL_INTERVAL_MS: u64 = 500;
const FALL_INTERVAL_STEP_MS: u64 = 50;
const MIN_FALL_INTERVAL_MS: u64 = 100;

/// Score, level, fall speed, and counters for one session.
///
/// # Scoring
///
/// Each lock that clears `k` rows adds `k * 100 * level`, using the level in
/// effect before the lock. Multi-row clears are scored linearly: there is no
/// bonus for clearing several rows at once.
///
/// After every lock, cleared rows or not, the level and fall interval are
/// derived again from the score:
///
/// - `level = score / 1000 + 1`
/// - `fall_interval = max(100ms, 500ms - (level - 1) * 50ms)`
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 400);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.fall_interval(), Duration::from_millis(500));
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
    fall_interval: Duration,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    /// Creates a tracker at score 0, level 1, with the slowest fall interval.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 1,
            fall_interval: Duration::from_millis(BASE_FALL_INTERVAL_MS),
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level, starting at 1.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the time between two gravity drops at the current level.
    #[must_use]
    pub const fn fall_interval(&self) -> Duration {
        self.fall_interval
    }

    /// Returns the total number of pieces that have been locked into place.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of locks by rows cleared.
    ///
    /// Index `k` counts the locks that cleared exactly `k` rows.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Updates statistics after a piece lock that cleared `cleared_lines` rows.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) {
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        if let Some(count) = self.line_cleared_counter.get_mut(cleared_lines) {
            *count += 1;
        }
        self.score += cleared_lines * POINTS_PER_LINE * self.level;
        self.level = self.score / SCORE_PER_LEVEL + 1;
        self.fall_interval = fall_interval_for(self.level);
    }
}

/// Returns the fall interval for `level` (1-based).
#[must_use]
pub fn fall_interval_for(level: usize) -> Duration {
    let steps = u64::try_from(level.saturating_sub(1)).unwrap_or(u64::MAX);
    let ms = BASE_FALL_INTERVAL_MS
        .saturating_sub(steps.saturating_mul(FALL_INTERVAL_STEP_MS))
        .max(MIN_FALL_INTERVAL_MS);
    Duration::from_millis(ms)
}
