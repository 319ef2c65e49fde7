//! Game engine logic and state management.
//!
//! This module builds the game rules on top of the core data structures:
//!
//! - [`GameField`] - Board, falling piece and next piece
//! - [`GameSession`] - State machine over playing, paused and game over, with statistics
//! - [`GameStats`] - Score, cleared lines and level
//! - [`PieceGenerator`] - Seeded piece kinds, uniform or 7-bag
//! - [`GameSnapshot`] - Immutable view of a session for rendering
//! - [`DropScheduler`] - Gravity and soft drop timing for the driver
//!
//! # Game Flow
//!
//! 1. Create a [`GameSession`], optionally with a seed
//! 2. The driver forwards player commands (move, rotate, soft drop, hard drop)
//! 3. The driver calls [`GameSession::tick`] whenever [`DropScheduler::poll`] says so
//! 4. A piece that cannot fall locks, full lines clear and the next piece spawns
//! 5. Repeat until the next piece collides at spawn, then reset
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use blockfall_engine::{DropScheduler, GameSession};
//!
//! let mut session = GameSession::new();
//! let mut scheduler = DropScheduler::new();
//! scheduler.sync(Duration::ZERO, &session);
//!
//! let mut now = Duration::ZERO;
//! while !session.session_state().is_game_over() {
//!     now += Duration::from_millis(50);
//!     if scheduler.poll(now) {
//!         _ = session.tick();
//!     }
//!     if now.as_secs() % 2 == 0 {
//!         _ = session.hard_drop();
//!     }
//!     scheduler.sync(now, &session);
//! }
//!
//! println!("Game over with {} points", session.snapshot().score());
//! ```

pub use self::{
    game_field::*, game_session::*, game_stats::*, piece_generator::*, scheduler::*, snapshot::*,
};

mod game_field;
mod game_session;
mod game_stats;
mod piece_generator;
mod scheduler;
mod snapshot;
