use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{
    board::Board,
    piece::{Piece, PieceKind, PieceRotation},
    shape::Shape,
};

use super::game_session::{GameSession, SessionState};

/// Read-only view of a session for rendering.
///
/// The board already contains the falling piece's cells. Elapsed time is owned
/// by the driver and attached with [`Self::with_elapsed`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
///
/// use blockfall_engine::GameSession;
///
/// let session = GameSession::new();
/// let snapshot = session.snapshot().with_elapsed(Duration::from_secs(3));
///
/// assert_eq!(snapshot.level(), 1);
/// assert!(!snapshot.is_game_over());
/// assert_eq!(snapshot.elapsed(), Duration::from_secs(3));
/// let visible = snapshot.board().rows().iter().flatten().filter(|b| b.is_piece());
/// assert_eq!(visible.count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    board: Board,
    falling_piece: Piece,
    next_piece: PieceKind,
    score: usize,
    cleared_lines: usize,
    level: usize,
    session_state: SessionState,
    soft_drop: bool,
    #[serde(default)]
    elapsed: Duration,
}

impl GameSnapshot {
    pub(crate) fn capture(session: &GameSession) -> Self {
        let stats = session.stats();
        Self {
            board: session.board().merged(session.falling_piece()),
            falling_piece: session.falling_piece(),
            next_piece: session.next_piece(),
            score: stats.score(),
            cleared_lines: stats.cleared_lines(),
            level: stats.level(),
            session_state: session.session_state(),
            soft_drop: session.is_soft_dropping(),
            elapsed: Duration::ZERO,
        }
    }

    #[must_use]
    pub fn with_elapsed(self, elapsed: Duration) -> Self {
        Self { elapsed, ..self }
    }

    /// Locked cells with the falling piece overlaid.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.next_piece
    }

    /// Spawn orientation of the next piece, for the preview.
    #[must_use]
    pub fn next_shape(&self) -> Shape {
        self.next_piece.shape(PieceRotation::SPAWN)
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn cleared_lines(&self) -> usize {
        self.cleared_lines
    }

    #[must_use]
    pub fn level(&self) -> usize {
        self.level
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.session_state.is_game_over()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.session_state.is_paused()
    }

    #[must_use]
    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Block, GameConfig, GameField, PieceGenerator, PieceRule, PieceSeed};

    fn session() -> GameSession {
        let seed = PieceSeed::from_bytes([9; 16]);
        let mut field = GameField::new(PieceGenerator::with_seed(PieceRule::Uniform, seed));
        field.set_falling_piece(Piece::new(PieceKind::T)).unwrap();
        GameSession::from_field(field)
    }

    #[test]
    fn test_snapshot_overlays_falling_piece() {
        let session = session();
        let snapshot = session.snapshot();
        assert_eq!(session.board(), &Board::EMPTY);
        for (x, y) in [(5, 0), (4, 1), (5, 1), (6, 1)] {
            assert_eq!(snapshot.board().block(x, y), Some(Block::Piece(PieceKind::T)));
        }
        assert_eq!(snapshot.falling_piece(), Piece::new(PieceKind::T));
        assert_eq!(snapshot.next_piece(), session.next_piece());
        assert_eq!(snapshot.next_shape(), session.next_piece().shape(PieceRotation::SPAWN));
    }

    #[test]
    fn test_snapshot_reports_state() {
        let mut session = session();
        session.set_soft_drop(true).unwrap();
        session.toggle_pause();
        let snapshot = session.snapshot();
        assert!(snapshot.is_paused());
        assert!(!snapshot.is_game_over());
        assert!(snapshot.is_soft_dropping());
        assert_eq!(snapshot.score(), 0);
        assert_eq!(snapshot.cleared_lines(), 0);
        assert_eq!(snapshot.level(), 1);
        assert_eq!(snapshot.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_snapshot_is_detached_from_session() {
        let mut session = GameSession::with_config(GameConfig::default());
        let snapshot = session.snapshot();
        session.hard_drop().unwrap();
        assert_ne!(session.snapshot(), snapshot);
        assert_eq!(snapshot.score(), 0);
    }

    #[test]
    fn test_snapshot_serialization() {
        let snapshot = session().snapshot().with_elapsed(Duration::from_millis(1500));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["falling_piece"], "T#0@4,0");
        assert_eq!(json["session_state"], "playing");
        assert_eq!(json["board"][1], "....TTT...");

        let deserialized: GameSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(deserialized, snapshot);
    }
}
