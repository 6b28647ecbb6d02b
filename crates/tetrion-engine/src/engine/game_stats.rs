/// Base points for clearing 1, 2, 3 and 4 lines at once.
///
/// Index 0 is a clear of zero lines. Clears of more than 4 lines (only
/// possible on boards taller than the pieces) score like 4.
const SCORE_TABLE: [usize; 5] = [0, 100, 200, 300, 1000];

/// Highest zero-based level.
pub const MAX_LEVEL: usize = 9;

/// Score, level and line-clear statistics of a game.
///
/// # Scoring
///
/// A clear awards `SCORE_TABLE[lines] × (level + 1)` points. Whenever the new
/// score is a multiple of 200 and the level is below [`MAX_LEVEL`], the level
/// goes up by one. Leveling is driven by the score, not by lines cleared.
///
/// # Example
///
/// ```
/// use tetrion_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// assert_eq!(stats.record_line_clear(1), 100);
/// assert_eq!(stats.level(), 0);
///
/// // 200 is a multiple of 200, so the level goes up.
/// assert_eq!(stats.record_line_clear(1), 100);
/// assert_eq!(stats.level(), 1);
/// assert_eq!(stats.speed_ms(), 180);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameStats {
    score: usize,
    level: usize,
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
    /// Creates statistics for a fresh game at level 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            level: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the zero-based level. Display it as `level + 1`.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.level
    }

    /// Returns the gravity interval in milliseconds for the current level.
    #[must_use]
    pub const fn speed_ms(&self) -> u64 {
        speed_ms(self.level)
    }

    /// Returns the number of pieces that have landed.
    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Returns a histogram of clears by size.
    ///
    /// `[1]` counts singles up to `[4]` counting clears of 4 lines or more.
    /// `[0]` is unused.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records that a piece has landed.
    pub const fn record_landing(&mut self) {
        self.completed_pieces += 1;
    }

    /// Records a line clear event and returns the points awarded.
    ///
    /// Does nothing and returns 0 when `lines` is 0.
    pub fn record_line_clear(&mut self, lines: usize) -> usize {
        if lines == 0 {
            return 0;
        }
        let index = lines.min(SCORE_TABLE.len() - 1);
        let points = SCORE_TABLE[index] * (self.level + 1);
        self.score += points;
        self.total_cleared_lines += lines;
        self.line_cleared_counter[index] += 1;
        if self.score % 200 == 0 && self.level < MAX_LEVEL {
            self.level += 1;
        }
        points
    }
}

/// Gravity interval for a zero-based level: 200 ms at level 0, 20 ms faster per level.
#[must_use]
pub const fn speed_ms(level: usize) -> u64 {
    200 - 20 * level as u64
}
