use serde::{Deserialize, Serialize};

/// Base points for line clears.
///
/// Index corresponds to number of lines cleared by a single lock:
/// - 0 lines: 0 points
/// - 1 line: 100 points
/// - 2 lines: 300 points
/// - 3 lines: 500 points
/// - 4 lines: 800 points
const SCORE_TABLE: [usize; 5] = [0, 100, 300, 500, 800];

/// Lines needed to advance one level.
pub const LINES_PER_LEVEL: usize = 10;

/// Points for clearing `cleared_lines` rows at `level`.
///
/// # Example
///
/// ```
/// use blockfall_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(2, 3), 900);
/// assert_eq!(line_clear_score(4, 1), 800);
/// assert_eq!(line_clear_score(0, 7), 0);
/// ```
///
/// # Panics
///
/// Panics if `cleared_lines` is greater than 4.
#[must_use]
pub const fn line_clear_score(cleared_lines: usize, level: usize) -> usize {
    SCORE_TABLE[cleared_lines] * level
}

/// Game statistics tracking score, lines cleared, and piece count.
///
/// - **Score**: line clear points, scaled by the level in force when the
///   clear happened
/// - **Level**: 1 at start, +1 for every 10 cleared lines
/// - **Completed pieces**: total number of pieces locked
/// - **Line clear distribution**: count of single, double, triple and quad clears
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    score: usize,
    completed_pieces: usize,
    cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            completed_pieces: 0,
            cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the current level, derived from total lines cleared.
    #[must_use]
    pub const fn level(&self) -> usize {
        self.cleared_lines / LINES_PER_LEVEL + 1
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    /// Returns a histogram of locks by lines cleared.
    ///
    /// Index `n` counts the locks that cleared exactly `n` lines; index 0
    /// counts locks that cleared nothing.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records a locked piece and returns the points it earned.
    ///
    /// Points use the level before `cleared_lines` is added.
    pub const fn complete_piece_drop(&mut self, cleared_lines: usize) -> usize {
        let points = line_clear_score(cleared_lines, self.level());
        self.completed_pieces += 1;
        self.cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines] += 1;
        self.score += points;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_stats() {
        let stats = GameStats::new();
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.cleared_lines(), 0);
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.completed_pieces(), 0);
    }

    #[test]
    fn test_zero_lines_award_nothing() {
        let mut stats = GameStats::new();
        assert_eq!(stats.complete_piece_drop(0), 0);
        assert_eq!(stats.score(), 0);
        assert_eq!(stats.completed_pieces(), 1);
        assert_eq!(stats.line_cleared_counter(), &[1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_double_at_level_three() {
        let mut stats = GameStats::new();
        // 20 lines reach level 3
        for _ in 0..5 {
            stats.complete_piece_drop(4);
        }
        assert_eq!(stats.level(), 3);
        let before = stats.score();
        assert_eq!(stats.complete_piece_drop(2), 900);
        assert_eq!(stats.score(), before + 900);
    }

    #[test]
    fn test_score_uses_level_before_clear() {
        let mut stats = GameStats::new();
        for _ in 0..9 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.level(), 1);
        // crossing into level 2 with this clear still scores at level 1
        assert_eq!(stats.complete_piece_drop(2), 300);
        assert_eq!(stats.level(), 2);
        assert_eq!(stats.complete_piece_drop(1), 200);
    }

    #[test]
    fn test_level_transitions() {
        let mut stats = GameStats::new();
        for _ in 0..10 {
            stats.complete_piece_drop(1);
        }
        assert_eq!(stats.cleared_lines(), 10);
        assert_eq!(stats.level(), 2);

        for _ in 0..5 {
            stats.complete_piece_drop(3);
        }
        assert_eq!(stats.cleared_lines(), 25);
        assert_eq!(stats.level(), 3);
    }

    #[test]
    fn test_line_clear_histogram() {
        let mut stats = GameStats::new();
        for lines in [1, 2, 2, 3, 4, 0, 4] {
            stats.complete_piece_drop(lines);
        }
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 2, 1, 2]);
        assert_eq!(stats.completed_pieces(), 7);
    }
}
