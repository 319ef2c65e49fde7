use serde::{Deserialize, Serialize};

use crate::{
    CommandError, PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, PieceKind},
    },
};

use super::{
    game_field::GameField,
    game_stats::GameStats,
    piece_generator::{PieceGenerator, PieceRule, PieceSeed},
    snapshot::GameSnapshot,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// How a session draws its pieces.
///
/// Without a seed every session starts from a fresh random seed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<PieceSeed>,
    #[serde(default)]
    pub rule: PieceRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    #[must_use]
    pub const fn dx(self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// A discrete event delivered by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Tick,
    Move(Direction),
    Rotate,
    SoftDrop(bool),
    HardDrop,
    TogglePause,
    Reset,
}

/// Result of locking a piece into the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub cleared_lines: usize,
    pub points: usize,
    /// The next piece could not spawn and the session is over.
    pub game_over: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TickOutcome {
    /// The piece moved down one row.
    Fell,
    /// The piece could not move down and was locked.
    Locked(LockOutcome),
}

impl TickOutcome {
    #[must_use]
    pub const fn lock(self) -> Option<LockOutcome> {
        match self {
            TickOutcome::Fell => None,
            TickOutcome::Locked(lock) => Some(lock),
        }
    }
}

/// A single game from the first spawn to game over.
///
/// Commands other than [`Self::toggle_pause`] and [`Self::reset`] only act while
/// the session is [`SessionState::Playing`]. A command that cannot act returns
/// an error and leaves the session unchanged.
///
/// # Example
///
/// ```
/// use blockfall_engine::{GameSession, SessionState};
///
/// let mut session = GameSession::new();
///
/// _ = session.try_move_left();
/// _ = session.try_rotate();
/// let lock = session.hard_drop().unwrap();
/// assert_eq!(lock.cleared_lines, 0);
/// assert_eq!(session.stats().completed_pieces(), 1);
///
/// session.toggle_pause();
/// assert!(session.tick().is_err());
/// assert_eq!(session.session_state(), SessionState::Paused);
/// ```
#[derive(Debug, Clone)]
pub struct GameSession {
    field: GameField,
    stats: GameStats,
    session_state: SessionState,
    soft_drop: bool,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    /// Starts a session with uniform piece draws and a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(GameConfig::default())
    }

    #[must_use]
    pub fn with_config(config: GameConfig) -> Self {
        let generator = match config.seed {
            Some(seed) => PieceGenerator::with_seed(config.rule, seed),
            None => PieceGenerator::new(config.rule),
        };
        Self::from_field(GameField::new(generator))
    }

    /// Starts a session from an existing field, e.g. a prepared board.
    #[must_use]
    pub fn from_field(field: GameField) -> Self {
        Self {
            field,
            stats: GameStats::new(),
            session_state: SessionState::Playing,
            soft_drop: false,
        }
    }

    #[must_use]
    pub fn field(&self) -> &GameField {
        &self.field
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.field.board()
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.field.falling_piece()
    }

    #[must_use]
    pub fn next_piece(&self) -> PieceKind {
        self.field.next_kind()
    }

    /// Where the falling piece would lock after a hard drop.
    #[must_use]
    pub fn ghost_piece(&self) -> Piece {
        self.field.drop_position()
    }

    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub fn session_state(&self) -> SessionState {
        self.session_state
    }

    #[must_use]
    pub fn is_soft_dropping(&self) -> bool {
        self.soft_drop
    }

    #[must_use]
    pub fn seed(&self) -> PieceSeed {
        self.field.generator().seed()
    }

    #[must_use]
    pub fn rule(&self) -> PieceRule {
        self.field.generator().rule()
    }

    #[must_use]
    pub fn config(&self) -> GameConfig {
        GameConfig {
            seed: Some(self.seed()),
            rule: self.rule(),
        }
    }

    /// Captures the current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(self)
    }

    /// Applies a driver event.
    ///
    /// Returns the lock outcome when the command locked a piece.
    pub fn apply(&mut self, command: Command) -> Result<Option<LockOutcome>, CommandError> {
        match command {
            Command::Tick => self.tick().map(TickOutcome::lock),
            Command::Move(direction) => self.move_horizontal(direction).map(|()| None),
            Command::Rotate => self.try_rotate().map(|()| None),
            Command::SoftDrop(active) => self.set_soft_drop(active).map(|()| None),
            Command::HardDrop => self.hard_drop().map(Some),
            Command::TogglePause => {
                self.toggle_pause();
                Ok(None)
            }
            Command::Reset => {
                self.reset();
                Ok(None)
            }
        }
    }

    /// Gravity step: moves the piece down one row, or locks it when it cannot move.
    pub fn tick(&mut self) -> Result<TickOutcome, CommandError> {
        self.ensure_playing()?;
        let fell = self
            .falling_piece()
            .down()
            .is_some_and(|piece| self.field.set_falling_piece(piece).is_ok());
        if fell {
            return Ok(TickOutcome::Fell);
        }
        Ok(TickOutcome::Locked(self.complete_piece_drop()))
    }

    pub fn move_horizontal(&mut self, direction: Direction) -> Result<(), CommandError> {
        self.ensure_playing()?;
        let piece = self
            .falling_piece()
            .shifted(direction.dx(), 0)
            .ok_or(PieceCollisionError)?;
        Ok(self.field.set_falling_piece(piece)?)
    }

    pub fn try_move_left(&mut self) -> Result<(), CommandError> {
        self.move_horizontal(Direction::Left)
    }

    pub fn try_move_right(&mut self) -> Result<(), CommandError> {
        self.move_horizontal(Direction::Right)
    }

    /// Rotates the piece clockwise in place. There is no wall kick.
    pub fn try_rotate(&mut self) -> Result<(), CommandError> {
        self.ensure_playing()?;
        let piece = self.falling_piece().rotated_right();
        Ok(self.field.set_falling_piece(piece)?)
    }

    /// Sets the soft drop flag.
    ///
    /// The flag only changes the drop cadence selected by the driver. Starting a
    /// soft drop requires a playing session; stopping one is always accepted.
    pub fn set_soft_drop(&mut self, active: bool) -> Result<(), CommandError> {
        if active {
            self.ensure_playing()?;
        }
        self.soft_drop = active;
        Ok(())
    }

    /// Drops the piece to its resting row and locks it immediately.
    pub fn hard_drop(&mut self) -> Result<LockOutcome, CommandError> {
        self.ensure_playing()?;
        let dropped = self.field.drop_position();
        self.field.set_falling_piece(dropped)?;
        Ok(self.complete_piece_drop())
    }

    pub fn toggle_pause(&mut self) {
        self.session_state = match self.session_state {
            SessionState::Playing => SessionState::Paused,
            SessionState::Paused => SessionState::Playing,
            SessionState::GameOver => SessionState::GameOver, // No change from game over
        };
    }

    /// Discards the game and starts over with a fresh random seed.
    pub fn reset(&mut self) {
        *self = Self::with_config(GameConfig {
            seed: None,
            rule: self.rule(),
        });
    }

    /// Like [`Self::reset`], but with a specific seed.
    pub fn reset_with_seed(&mut self, seed: PieceSeed) {
        *self = Self::with_config(GameConfig {
            seed: Some(seed),
            rule: self.rule(),
        });
    }

    fn ensure_playing(&self) -> Result<(), CommandError> {
        if self.session_state.is_playing() {
            Ok(())
        } else {
            Err(CommandError::NotPlaying)
        }
    }

    fn complete_piece_drop(&mut self) -> LockOutcome {
        let (cleared_lines, result) = self.field.complete_piece_drop();
        let points = self.stats.complete_piece_drop(cleared_lines);
        let game_over = result.is_err();
        if game_over {
            self.session_state = SessionState::GameOver;
            self.soft_drop = false;
        }
        LockOutcome {
            cleared_lines,
            points,
            game_over,
        }
    }
}
