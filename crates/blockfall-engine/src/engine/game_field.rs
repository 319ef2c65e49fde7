use crate::{
    PieceCollisionError,
    core::{
        board::Board,
        piece::{Piece, PieceKind},
    },
};

use super::piece_generator::PieceGenerator;

/// Board, falling piece and the upcoming kind of one game.
#[derive(Debug, Clone)]
pub struct GameField {
    board: Board,
    falling_piece: Piece,
    next_kind: PieceKind,
    generator: PieceGenerator,
}

impl GameField {
    /// Starts a field on an empty board.
    #[must_use]
    pub fn new(generator: PieceGenerator) -> Self {
        Self::with_board(Board::EMPTY, generator)
    }

    /// Starts a field on a prepared board.
    ///
    /// The first piece is placed at the spawn position without a collision check.
    #[must_use]
    pub fn with_board(board: Board, mut generator: PieceGenerator) -> Self {
        let falling_piece = Piece::new(generator.next_kind());
        let next_kind = generator.next_kind();
        Self {
            board,
            falling_piece,
            next_kind,
            generator,
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn falling_piece(&self) -> Piece {
        self.falling_piece
    }

    #[must_use]
    pub fn next_kind(&self) -> PieceKind {
        self.next_kind
    }

    #[must_use]
    pub fn generator(&self) -> &PieceGenerator {
        &self.generator
    }

    pub fn set_falling_piece(&mut self, piece: Piece) -> Result<(), PieceCollisionError> {
        if self.board.is_colliding(piece) {
            return Err(PieceCollisionError);
        }
        self.falling_piece = piece;
        Ok(())
    }

    /// Where the falling piece would lock after a hard drop.
    #[must_use]
    pub fn drop_position(&self) -> Piece {
        self.board.drop_position(self.falling_piece)
    }

    /// Locks the falling piece, clears full lines and spawns the next piece.
    ///
    /// Returns the number of cleared lines. When the next piece collides at the
    /// spawn position the spawn is abandoned: the locked piece stays as the
    /// falling piece and the next kind is kept.
    pub fn complete_piece_drop(&mut self) -> (usize, Result<(), PieceCollisionError>) {
        self.board.fill_piece(self.falling_piece);
        let cleared_lines = self.board.clear_lines();

        let spawned = Piece::new(self.next_kind);
        if self.board.is_colliding(spawned) {
            return (cleared_lines, Err(PieceCollisionError));
        }
        self.falling_piece = spawned;
        self.next_kind = self.generator.next_kind();

        (cleared_lines, Ok(()))
    }
}
