pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("piece colliding when setting falling piece")]
pub struct PieceCollisionError;

/// Reason a command was rejected.
///
/// A rejected command never changes the session, so callers that only care
/// about the resulting state can discard it with `_ = session.try_rotate()`.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum CommandError {
    #[display("piece colliding after command")]
    PieceCollision(PieceCollisionError),
    #[display("session is not playing")]
    NotPlaying,
}

impl From<PieceCollisionError> for CommandError {
    fn from(err: PieceCollisionError) -> Self {
        Self::PieceCollision(err)
    }
}
